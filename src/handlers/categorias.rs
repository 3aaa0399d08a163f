// src/handlers/categorias.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{Categoria, CategoriaPayload},
    persistencia::Persistencia,
};

#[utoipa::path(
    get,
    path = "/api/Categoria",
    tag = "Categoria",
    responses((status = 200, description = "Categorias cadastradas", body = Vec<Categoria>))
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let registros = app_state.persistencia.listar::<Categoria>().await?;
    Ok((StatusCode::OK, Json(registros)))
}

#[utoipa::path(
    get,
    path = "/api/Categoria/{id}",
    tag = "Categoria",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 200, description = "Categoria encontrada", body = Categoria),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let registro = app_state.persistencia.buscar::<Categoria>(&id).await?;
    Ok((StatusCode::OK, Json(registro)))
}

#[utoipa::path(
    post,
    path = "/api/Categoria",
    tag = "Categoria",
    request_body = CategoriaPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Categoria),
        (status = 400, description = "Campos inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<CategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let novo = app_state.persistencia.criar::<Categoria>(payload).await?;
    Ok((StatusCode::CREATED, Json(novo)))
}

#[utoipa::path(
    put,
    path = "/api/Categoria/{id}",
    tag = "Categoria",
    params(("id" = String, Path, description = "Id do registro")),
    request_body = CategoriaPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = Categoria),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let atualizado = app_state.persistencia.atualizar::<Categoria>(&id, payload).await?;
    Ok((StatusCode::OK, Json(atualizado)))
}

#[utoipa::path(
    delete,
    path = "/api/Categoria/{id}",
    tag = "Categoria",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 204, description = "Categoria excluída"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.persistencia.excluir::<Categoria>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
