// src/persistencia/local.rs

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{Armazenamento, ColecaoRepository},
    models::{Cadastro, Entidade, Venda, VendaPayload},
    persistencia::Persistencia,
    services::{CadastroService, VendaService},
};

/// Dados num `Armazenamento` deste processo; a conciliação de estoque roda aqui.
#[derive(Clone)]
pub struct PersistenciaLocal {
    cadastro: CadastroService,
    vendas: VendaService,
}

impl PersistenciaLocal {
    pub fn new(store: Arc<dyn Armazenamento>) -> Self {
        // Os dois serviços dividem o mesmo repositório (e a mesma trava).
        let repo = ColecaoRepository::new(store);
        Self {
            cadastro: CadastroService::new(repo.clone()),
            vendas: VendaService::new(repo),
        }
    }
}

#[async_trait]
impl Persistencia for PersistenciaLocal {
    async fn listar<T: Entidade>(&self) -> Result<Vec<T>, AppError> {
        self.cadastro.listar().await
    }

    async fn buscar<T: Entidade>(&self, id: &str) -> Result<T, AppError> {
        self.cadastro.buscar(id).await
    }

    async fn criar<T: Cadastro>(&self, payload: T::Payload) -> Result<T, AppError> {
        payload.validate()?;
        self.cadastro.criar::<T>(payload).await
    }

    async fn atualizar<T: Cadastro>(&self, id: &str, payload: T::Payload) -> Result<T, AppError> {
        payload.validate()?;
        self.cadastro.atualizar::<T>(id, payload).await
    }

    async fn excluir<T: Cadastro>(&self, id: &str) -> Result<(), AppError> {
        self.cadastro.excluir::<T>(id).await
    }

    async fn registrar_venda(&self, payload: VendaPayload) -> Result<Venda, AppError> {
        payload.validate()?;
        self.vendas.registrar(&payload).await
    }

    async fn editar_venda(&self, id: &str, payload: VendaPayload) -> Result<Venda, AppError> {
        payload.validate()?;
        self.vendas.editar(id, &payload).await
    }

    async fn excluir_venda(&self, id: &str) -> Result<(), AppError> {
        self.vendas.excluir(id).await.map(|_| ())
    }
}
