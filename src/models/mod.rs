// src/models/mod.rs

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

pub mod cadastro;
pub mod venda;

pub use cadastro::{Categoria, CategoriaPayload, Feirante, FeirantePayload, Produto, ProdutoPayload};
pub use venda::{Venda, VendaPayload};

/// Um registro guardado como parte de uma coleção inteira.
pub trait Entidade: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Chave da coleção no armazenamento local.
    const COLECAO: &'static str;
    /// Nome do recurso na API REST (`/api/<RECURSO>`).
    const RECURSO: &'static str;

    fn id(&self) -> &str;
}

/// Entidades de cadastro simples: criadas e editadas direto a partir do
/// payload do formulário, sem efeito em outras coleções.
pub trait Cadastro: Entidade {
    type Payload: Validate + Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    fn montar(id: String, payload: Self::Payload) -> Self;
}
