// src/handlers/feirantes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{Feirante, FeirantePayload},
    persistencia::Persistencia,
};

#[utoipa::path(
    get,
    path = "/api/Feirante",
    tag = "Feirante",
    responses((status = 200, description = "Feirantes cadastrados", body = Vec<Feirante>))
)]
pub async fn listar(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let registros = app_state.persistencia.listar::<Feirante>().await?;
    Ok((StatusCode::OK, Json(registros)))
}

#[utoipa::path(
    get,
    path = "/api/Feirante/{id}",
    tag = "Feirante",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 200, description = "Feirante encontrado", body = Feirante),
        (status = 404, description = "Feirante não encontrado")
    )
)]
pub async fn buscar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let registro = app_state.persistencia.buscar::<Feirante>(&id).await?;
    Ok((StatusCode::OK, Json(registro)))
}

#[utoipa::path(
    post,
    path = "/api/Feirante",
    tag = "Feirante",
    request_body = FeirantePayload,
    responses(
        (status = 201, description = "Feirante criado", body = Feirante),
        (status = 400, description = "Campos inválidos")
    )
)]
pub async fn criar(
    State(app_state): State<AppState>,
    Json(payload): Json<FeirantePayload>,
) -> Result<impl IntoResponse, AppError> {
    let novo = app_state.persistencia.criar::<Feirante>(payload).await?;
    Ok((StatusCode::CREATED, Json(novo)))
}

#[utoipa::path(
    put,
    path = "/api/Feirante/{id}",
    tag = "Feirante",
    params(("id" = String, Path, description = "Id do registro")),
    request_body = FeirantePayload,
    responses(
        (status = 200, description = "Feirante atualizado", body = Feirante),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Feirante não encontrado")
    )
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FeirantePayload>,
) -> Result<impl IntoResponse, AppError> {
    let atualizado = app_state.persistencia.atualizar::<Feirante>(&id, payload).await?;
    Ok((StatusCode::OK, Json(atualizado)))
}

#[utoipa::path(
    delete,
    path = "/api/Feirante/{id}",
    tag = "Feirante",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 204, description = "Feirante excluído"),
        (status = 404, description = "Feirante não encontrado")
    )
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.persistencia.excluir::<Feirante>(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
