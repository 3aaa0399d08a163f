// src/handlers/produtos.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{Produto, ProdutoPayload},
    persistencia::Persistencia,
};

#[utoipa::path(
    get,
    path = "/api/Produto",
    tag = "Produto",
    responses((status = 200, description = "Produtos cadastrados", body = Vec<Produto>))
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let registros = app_state.persistencia.listar::<Produto>().await?;
    Ok((StatusCode::OK, Json(registros)))
}

#[utoipa::path(
    get,
    path = "/api/Produto/{id}",
    tag = "Produto",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 200, description = "Produto encontrado", body = Produto),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let registro = app_state.persistencia.buscar::<Produto>(&id).await?;
    Ok((StatusCode::OK, Json(registro)))
}

#[utoipa::path(
    post,
    path = "/api/Produto",
    tag = "Produto",
    request_body = ProdutoPayload,
    responses(
        (status = 201, description = "Produto criado", body = Produto),
        (status = 400, description = "Campos inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let novo = app_state.persistencia.criar::<Produto>(payload).await?;
    Ok((StatusCode::CREATED, Json(novo)))
}

#[utoipa::path(
    put,
    path = "/api/Produto/{id}",
    tag = "Produto",
    params(("id" = String, Path, description = "Id do registro")),
    request_body = ProdutoPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Produto),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let atualizado = app_state.persistencia.atualizar::<Produto>(&id, payload).await?;
    Ok((StatusCode::OK, Json(atualizado)))
}

#[utoipa::path(
    delete,
    path = "/api/Produto/{id}",
    tag = "Produto",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.persistencia.excluir::<Produto>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
