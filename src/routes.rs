// src/routes.rs

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // --- Categorias ---
        .route("/api/Categoria"
               ,get(handlers::categorias::listar)
               .post(handlers::categorias::criar)
        )
        .route("/api/Categoria/{id}"
               ,get(handlers::categorias::buscar)
               .put(handlers::categorias::atualizar)
               .delete(handlers::categorias::excluir)
        )
        // --- Feirantes ---
        .route("/api/Feirante"
               ,get(handlers::feirantes::listar)
               .post(handlers::feirantes::criar)
        )
        .route("/api/Feirante/{id}"
               ,get(handlers::feirantes::buscar)
               .put(handlers::feirantes::atualizar)
               .delete(handlers::feirantes::excluir)
        )
        // --- Produtos ---
        .route("/api/Produto"
               ,get(handlers::produtos::listar)
               .post(handlers::produtos::criar)
        )
        .route("/api/Produto/{id}"
               ,get(handlers::produtos::buscar)
               .put(handlers::produtos::atualizar)
               .delete(handlers::produtos::excluir)
        )
        // --- Vendas (mexem no estoque) ---
        .route("/api/Venda"
               ,get(handlers::vendas::listar)
               .post(handlers::vendas::registrar)
        )
        .route("/api/Venda/{id}"
               ,get(handlers::vendas::buscar)
               .put(handlers::vendas::editar)
               .delete(handlers::vendas::excluir)
        )
        .with_state(app_state)
}
