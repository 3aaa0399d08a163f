// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Categorias ---
        handlers::categorias::listar,
        handlers::categorias::buscar,
        handlers::categorias::criar,
        handlers::categorias::atualizar,
        handlers::categorias::excluir,

        // --- Feirantes ---
        handlers::feirantes::listar,
        handlers::feirantes::buscar,
        handlers::feirantes::criar,
        handlers::feirantes::atualizar,
        handlers::feirantes::excluir,

        // --- Produtos ---
        handlers::produtos::listar,
        handlers::produtos::buscar,
        handlers::produtos::criar,
        handlers::produtos::atualizar,
        handlers::produtos::excluir,

        // --- Vendas ---
        handlers::vendas::listar,
        handlers::vendas::buscar,
        handlers::vendas::registrar,
        handlers::vendas::editar,
        handlers::vendas::excluir,
    ),
    components(
        schemas(
            models::Categoria,
            models::CategoriaPayload,
            models::Feirante,
            models::FeirantePayload,
            models::Produto,
            models::ProdutoPayload,
            models::Venda,
            models::VendaPayload,
        )
    ),
    tags(
        (name = "Categoria", description = "Categorias de produtos"),
        (name = "Feirante", description = "Feirantes (vendedores)"),
        (name = "Produto", description = "Produtos e estoque"),
        (name = "Venda", description = "Vendas; cada escrita ajusta o estoque do produto")
    )
)]
pub struct ApiDoc;
