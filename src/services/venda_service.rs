// src/services/venda_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ColecaoRepository,
    models::{Produto, Venda, VendaPayload},
    services::estoque,
};

// Vendas: carrega produtos e vendas, concilia em memória e grava as duas
// coleções juntas. Se a conciliação falhar, nada é gravado.
#[derive(Clone)]
pub struct VendaService {
    repo: ColecaoRepository,
}

impl VendaService {
    pub fn new(repo: ColecaoRepository) -> Self {
        Self { repo }
    }

    async fn carregar_estoque(&self) -> Result<(Vec<Produto>, Vec<Venda>), AppError> {
        let produtos = self.repo.carregar::<Produto>().await?;
        let vendas = self.repo.carregar::<Venda>().await?;
        Ok((produtos, vendas))
    }

    // --- SELL (CREATE) ---
    pub async fn registrar(&self, payload: &VendaPayload) -> Result<Venda, AppError> {
        let _guarda = self.repo.bloquear().await;
        let (mut produtos, mut vendas) = self.carregar_estoque().await?;

        let venda = estoque::registrar_venda(
            &mut produtos,
            &mut vendas,
            Uuid::new_v4().to_string(),
            payload,
            Utc::now(),
        )?;
        self.repo.salvar_estoque(&produtos, &vendas).await?;

        tracing::info!(
            "🧾 Venda {} registrada: {} x produto {}",
            venda.id,
            venda.quantidade,
            venda.produto_id
        );
        Ok(venda)
    }

    // --- UPDATE ---
    pub async fn editar(&self, id: &str, payload: &VendaPayload) -> Result<Venda, AppError> {
        let _guarda = self.repo.bloquear().await;
        let (mut produtos, mut vendas) = self.carregar_estoque().await?;

        let venda = estoque::editar_venda(&mut produtos, &mut vendas, id, payload, Utc::now())?;
        self.repo.salvar_estoque(&produtos, &vendas).await?;

        tracing::info!(
            "Venda {} editada: {} x produto {}",
            venda.id,
            venda.quantidade,
            venda.produto_id
        );
        Ok(venda)
    }

    // --- DELETE ---
    pub async fn excluir(&self, id: &str) -> Result<Venda, AppError> {
        let _guarda = self.repo.bloquear().await;
        let (mut produtos, mut vendas) = self.carregar_estoque().await?;

        let removida = estoque::excluir_venda(&mut produtos, &mut vendas, id)?;
        self.repo.salvar_estoque(&produtos, &vendas).await?;

        tracing::info!(
            "Venda {} excluída; {} devolvidos ao produto {}",
            removida.id,
            removida.quantidade,
            removida.produto_id
        );
        Ok(removida)
    }
}
