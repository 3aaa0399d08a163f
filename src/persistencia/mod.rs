// src/persistencia/mod.rs
//
// Uma única interface para onde os dados moram. As telas (CLI) e os testes
// falam só com `Persistencia`; quem decide se é o diretório local ou a API
// remota é a configuração.

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{Cadastro, Entidade, Venda, VendaPayload},
};

pub mod local;
pub mod remota;

pub use local::PersistenciaLocal;
pub use remota::PersistenciaRemota;

#[async_trait]
pub trait Persistencia: Send + Sync {
    async fn listar<T: Entidade>(&self) -> Result<Vec<T>, AppError>;

    async fn buscar<T: Entidade>(&self, id: &str) -> Result<T, AppError>;

    async fn criar<T: Cadastro>(&self, payload: T::Payload) -> Result<T, AppError>;

    async fn atualizar<T: Cadastro>(&self, id: &str, payload: T::Payload) -> Result<T, AppError>;

    async fn excluir<T: Cadastro>(&self, id: &str) -> Result<(), AppError>;

    /// Cria a venda e debita o estoque do produto.
    async fn registrar_venda(&self, payload: VendaPayload) -> Result<Venda, AppError>;

    /// Desfaz a venda antiga e aplica a nova, mantendo o id.
    async fn editar_venda(&self, id: &str, payload: VendaPayload) -> Result<Venda, AppError>;

    /// Remove a venda e devolve a quantidade ao produto.
    async fn excluir_venda(&self, id: &str) -> Result<(), AppError>;
}
