// src/handlers/vendas.rs
//
// Toda escrita de venda passa pela conciliação de estoque (veja
// `services::estoque`), então criar, editar ou excluir aqui também altera o
// produto.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{Venda, VendaPayload},
    persistencia::Persistencia,
};

#[utoipa::path(
    get,
    path = "/api/Venda",
    tag = "Venda",
    responses((status = 200, description = "Histórico de vendas", body = Vec<Venda>))
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let vendas = app_state.persistencia.listar::<Venda>().await?;
    Ok((StatusCode::OK, Json(vendas)))
}

#[utoipa::path(
    get,
    path = "/api/Venda/{id}",
    tag = "Venda",
    params(("id" = String, Path, description = "Id da venda")),
    responses(
        (status = 200, description = "Venda encontrada", body = Venda),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let venda = app_state.persistencia.buscar::<Venda>(&id).await?;
    Ok((StatusCode::OK, Json(venda)))
}

#[utoipa::path(
    post,
    path = "/api/Venda",
    tag = "Venda",
    request_body = VendaPayload,
    responses(
        (status = 201, description = "Venda registrada; estoque debitado", body = Venda),
        (status = 400, description = "Campos inválidos"),
        (status = 422, description = "Produto inexistente ou estoque insuficiente")
    )
)]
pub async fn registrar(
    State(app_state): State<AppState>,
    Json(payload): Json<VendaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let venda = app_state.persistencia.registrar_venda(payload).await?;
    Ok((StatusCode::CREATED, Json(venda)))
}

#[utoipa::path(
    put,
    path = "/api/Venda/{id}",
    tag = "Venda",
    params(("id" = String, Path, description = "Id da venda")),
    request_body = VendaPayload,
    responses(
        (status = 200, description = "Venda editada; estoque recalculado", body = Venda),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Venda não encontrada"),
        (status = 422, description = "Produto inexistente ou estoque insuficiente")
    )
)]
pub async fn editar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<VendaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let venda = app_state.persistencia.editar_venda(&id, payload).await?;
    Ok((StatusCode::OK, Json(venda)))
}

#[utoipa::path(
    delete,
    path = "/api/Venda/{id}",
    tag = "Venda",
    params(("id" = String, Path, description = "Id da venda")),
    responses(
        (status = 204, description = "Venda excluída; quantidade devolvida ao estoque"),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.persistencia.excluir_venda(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
