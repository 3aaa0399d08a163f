//src/lib.rs

// Declaração dos módulos
pub mod cli;
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod persistencia;
pub mod routes;
pub mod services;
pub mod views;
