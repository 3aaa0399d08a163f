// src/db/colecao_repo.rs

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{
    common::error::AppError,
    db::Armazenamento,
    models::{Entidade, Produto, Venda},
};

// O repositório de coleções: lê e grava cada coleção inteira, em JSON.
#[derive(Clone)]
pub struct ColecaoRepository {
    store: Arc<dyn Armazenamento>,
    escrita: Arc<Mutex<()>>,
}

impl ColecaoRepository {
    pub fn new(store: Arc<dyn Armazenamento>) -> Self {
        Self {
            store,
            escrita: Arc::new(Mutex::new(())),
        }
    }

    /// Serializa os ciclos ler-alterar-gravar. Quem altera coleções segura
    /// esta guarda do primeiro `carregar` até o último `salvar`.
    pub async fn bloquear(&self) -> MutexGuard<'_, ()> {
        self.escrita.lock().await
    }

    // Chave ausente vira coleção vazia; JSON inválido é erro.
    pub async fn carregar<T: Entidade>(&self) -> Result<Vec<T>, AppError> {
        match self.store.ler(T::COLECAO).await? {
            Some(conteudo) => Ok(serde_json::from_str(&conteudo)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn salvar<T: Entidade>(&self, registros: &[T]) -> Result<(), AppError> {
        let conteudo = serde_json::to_string(registros)?;
        self.store.gravar(T::COLECAO, conteudo).await
    }

    /// Grava produtos e vendas juntos: se a gravação falhar, as duas coleções
    /// ficam como estavam. Uma queda do processo entre as duas trocas ainda
    /// pode deixar só a primeira gravada.
    pub async fn salvar_estoque(&self, produtos: &[Produto], vendas: &[Venda]) -> Result<(), AppError> {
        let entradas = vec![
            (Produto::COLECAO, serde_json::to_string(produtos)?),
            (Venda::COLECAO, serde_json::to_string(vendas)?),
        ];
        self.store.gravar_lote(entradas).await
    }
}
