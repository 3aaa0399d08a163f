// src/persistencia/remota.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    common::error::AppError,
    models::{Cadastro, Entidade, Venda, VendaPayload},
    persistencia::Persistencia,
};

const ERRO_REQUISICAO: &str = "Erro na requisição";
const ERRO_SALVAR: &str = "Erro ao salvar";
const ERRO_ATUALIZAR: &str = "Erro ao atualizar";
const ERRO_EXCLUIR: &str = "Erro ao excluir";

/// Fala com a API REST (`/api/<Recurso>`). A conciliação de estoque das
/// vendas é feita pelo servidor.
#[derive(Clone)]
pub struct PersistenciaRemota {
    client: Client,
    base_url: String,
}

impl PersistenciaRemota {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, recurso: &str, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/api/{}/{}", self.base_url, recurso, id),
            None => format!("{}/api/{}", self.base_url, recurso),
        }
    }

    // Qualquer status fora de 2xx vira um erro genérico; o corpo é ignorado.
    fn conferir(response: Response, mensagem: &'static str) -> Result<Response, AppError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} {}: {}", mensagem, response.url(), status);
            return Err(AppError::Remoto { status: status.as_u16(), mensagem });
        }
        Ok(response)
    }

    async fn json<R: DeserializeOwned>(response: Response, mensagem: &'static str) -> Result<R, AppError> {
        Ok(Self::conferir(response, mensagem)?.json::<R>().await?)
    }
}

#[async_trait]
impl Persistencia for PersistenciaRemota {
    async fn listar<T: Entidade>(&self) -> Result<Vec<T>, AppError> {
        let response = self.client.get(self.url(T::RECURSO, None)).send().await?;
        Self::json(response, ERRO_REQUISICAO).await
    }

    async fn buscar<T: Entidade>(&self, id: &str) -> Result<T, AppError> {
        let response = self.client.get(self.url(T::RECURSO, Some(id))).send().await?;
        Self::json(response, ERRO_REQUISICAO).await
    }

    async fn criar<T: Cadastro>(&self, payload: T::Payload) -> Result<T, AppError> {
        payload.validate()?;
        let response = self
            .client
            .post(self.url(T::RECURSO, None))
            .json(&payload)
            .send()
            .await?;
        Self::json(response, ERRO_SALVAR).await
    }

    async fn atualizar<T: Cadastro>(&self, id: &str, payload: T::Payload) -> Result<T, AppError> {
        payload.validate()?;
        let response = self
            .client
            .put(self.url(T::RECURSO, Some(id)))
            .json(&payload)
            .send()
            .await?;
        Self::json(response, ERRO_ATUALIZAR).await
    }

    async fn excluir<T: Cadastro>(&self, id: &str) -> Result<(), AppError> {
        let response = self.client.delete(self.url(T::RECURSO, Some(id))).send().await?;
        Self::conferir(response, ERRO_EXCLUIR)?;
        Ok(())
    }

    async fn registrar_venda(&self, payload: VendaPayload) -> Result<Venda, AppError> {
        payload.validate()?;
        let response = self
            .client
            .post(self.url(Venda::RECURSO, None))
            .json(&payload)
            .send()
            .await?;
        Self::json(response, ERRO_SALVAR).await
    }

    async fn editar_venda(&self, id: &str, payload: VendaPayload) -> Result<Venda, AppError> {
        payload.validate()?;
        let response = self
            .client
            .put(self.url(Venda::RECURSO, Some(id)))
            .json(&payload)
            .send()
            .await?;
        Self::json(response, ERRO_ATUALIZAR).await
    }

    async fn excluir_venda(&self, id: &str) -> Result<(), AppError> {
        let response = self.client.delete(self.url(Venda::RECURSO, Some(id))).send().await?;
        Self::conferir(response, ERRO_EXCLUIR)?;
        Ok(())
    }
}
