// src/services/cadastro_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ColecaoRepository,
    models::{Cadastro, Entidade},
};

fn nao_encontrado<T: Entidade>(id: &str) -> AppError {
    AppError::NaoEncontrado { recurso: T::RECURSO, id: id.to_string() }
}

// CRUD das coleções de cadastro (categorias, feirantes, produtos). Cada
// operação carrega a coleção inteira, altera em memória e grava de volta.
#[derive(Clone)]
pub struct CadastroService {
    repo: ColecaoRepository,
}

impl CadastroService {
    pub fn new(repo: ColecaoRepository) -> Self {
        Self { repo }
    }

    pub async fn listar<T: Entidade>(&self) -> Result<Vec<T>, AppError> {
        self.repo.carregar().await
    }

    pub async fn buscar<T: Entidade>(&self, id: &str) -> Result<T, AppError> {
        self.repo
            .carregar::<T>()
            .await?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| nao_encontrado::<T>(id))
    }

    // --- CREATE ---
    pub async fn criar<T: Cadastro>(&self, payload: T::Payload) -> Result<T, AppError> {
        let _guarda = self.repo.bloquear().await;

        let mut registros = self.repo.carregar::<T>().await?;
        let novo = T::montar(Uuid::new_v4().to_string(), payload);
        registros.push(novo.clone());
        self.repo.salvar(&registros).await?;

        tracing::info!("{} criado: {}", T::RECURSO, novo.id());
        Ok(novo)
    }

    // --- UPDATE ---
    pub async fn atualizar<T: Cadastro>(&self, id: &str, payload: T::Payload) -> Result<T, AppError> {
        let _guarda = self.repo.bloquear().await;

        let mut registros = self.repo.carregar::<T>().await?;
        let registro = registros
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| nao_encontrado::<T>(id))?;
        *registro = T::montar(id.to_string(), payload);
        let atualizado = registro.clone();
        self.repo.salvar(&registros).await?;

        tracing::info!("{} atualizado: {}", T::RECURSO, id);
        Ok(atualizado)
    }

    // --- DELETE ---
    // Sem cascata: vendas e produtos que apontam para o registro ficam como estão.
    pub async fn excluir<T: Cadastro>(&self, id: &str) -> Result<(), AppError> {
        let _guarda = self.repo.bloquear().await;

        let mut registros = self.repo.carregar::<T>().await?;
        let antes = registros.len();
        registros.retain(|r| r.id() != id);
        if registros.len() == antes {
            return Err(nao_encontrado::<T>(id));
        }
        self.repo.salvar(&registros).await?;

        tracing::info!("{} excluído: {}", T::RECURSO, id);
        Ok(())
    }
}
