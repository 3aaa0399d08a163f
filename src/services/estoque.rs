// src/services/estoque.rs
//
// Conciliação entre vendas e estoque. O estoque do produto é estado
// derivado: toda alteração de venda ajusta explicitamente o produto afetado.
// Cada função valida tudo antes de mexer em qualquer coleção, então um erro
// deixa produtos e vendas exatamente como estavam.

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    models::{Produto, Venda, VendaPayload},
};

fn posicao_produto(produtos: &[Produto], produto_id: &str) -> Result<usize, AppError> {
    produtos
        .iter()
        .position(|p| p.id == produto_id)
        .ok_or(AppError::ProdutoNaoEncontrado)
}

fn posicao_venda(vendas: &[Venda], id: &str) -> Result<usize, AppError> {
    vendas
        .iter()
        .position(|v| v.id == id)
        .ok_or_else(|| AppError::NaoEncontrado { recurso: "Venda", id: id.to_string() })
}

fn validar_quantidade(quantidade: u32, disponivel: u64) -> Result<(), AppError> {
    if quantidade == 0 {
        return Err(AppError::QuantidadeInvalida);
    }
    if u64::from(quantidade) > disponivel {
        return Err(AppError::EstoqueInsuficiente { disponivel });
    }
    Ok(())
}

// Quantidade que não cabe no estoque de um produto.
fn excedido(produto: &Produto) -> AppError {
    AppError::EstoqueExcedido { produto_id: produto.id.clone() }
}

fn devolver(produto: &Produto, quantidade: u32) -> Result<u32, AppError> {
    produto
        .quantidade
        .checked_add(quantidade)
        .ok_or_else(|| excedido(produto))
}

/// Quanto do produto pode ser vendido, contando de volta a quantidade de uma
/// venda que está sendo editada (se ela for do mesmo produto).
pub fn disponivel_para(produto: &Produto, venda_em_edicao: Option<&Venda>) -> u64 {
    match venda_em_edicao {
        Some(anterior) if anterior.produto_id == produto.id => {
            u64::from(produto.quantidade) + u64::from(anterior.quantidade)
        }
        _ => u64::from(produto.quantidade),
    }
}

fn montar_venda(id: String, produto: &Produto, quantidade: u32, agora: DateTime<Utc>) -> Venda {
    Venda {
        id,
        produto_id: produto.id.clone(),
        quantidade,
        data: agora,
        feirante_id: produto.feirante_id.clone(),
        valor_unitario: Some(produto.preco),
    }
}

// --- CREATE ---
pub fn registrar_venda(
    produtos: &mut [Produto],
    vendas: &mut Vec<Venda>,
    id: String,
    payload: &VendaPayload,
    agora: DateTime<Utc>,
) -> Result<Venda, AppError> {
    let idx = posicao_produto(produtos, &payload.produto_id)?;
    validar_quantidade(payload.quantidade, u64::from(produtos[idx].quantidade))?;

    let produto = &mut produtos[idx];
    let venda = montar_venda(id, produto, payload.quantidade, agora);
    produto.quantidade -= payload.quantidade;
    vendas.push(venda.clone());
    Ok(venda)
}

// --- UPDATE ---
// Primeiro desfaz a venda antiga (devolve a quantidade ao produto antigo),
// depois aplica a nova como se fosse criada agora, validando contra o
// estoque já devolvido. Mantém o id da venda.
pub fn editar_venda(
    produtos: &mut [Produto],
    vendas: &mut [Venda],
    id: &str,
    payload: &VendaPayload,
    agora: DateTime<Utc>,
) -> Result<Venda, AppError> {
    let idx_venda = posicao_venda(vendas, id)?;
    let idx_novo = posicao_produto(produtos, &payload.produto_id)?;
    let anterior = &vendas[idx_venda];

    let disponivel = disponivel_para(&produtos[idx_novo], Some(anterior));
    validar_quantidade(payload.quantidade, disponivel)?;
    let restante = u32::try_from(disponivel - u64::from(payload.quantidade))
        .map_err(|_| excedido(&produtos[idx_novo]))?;

    let idx_antigo = produtos.iter().position(|p| p.id == anterior.produto_id);
    let devolucao = match idx_antigo {
        Some(i) if i != idx_novo => Some((i, devolver(&produtos[i], anterior.quantidade)?)),
        _ => None,
    };
    if idx_antigo.is_none() {
        tracing::warn!(
            "Venda {} aponta para produto inexistente {}; nada a devolver",
            anterior.id,
            anterior.produto_id
        );
    }

    // Validado; daqui em diante só aplica.
    if let Some((i, quantidade)) = devolucao {
        produtos[i].quantidade = quantidade;
    }
    let produto = &mut produtos[idx_novo];
    let venda = montar_venda(id.to_string(), produto, payload.quantidade, agora);
    produto.quantidade = restante;
    vendas[idx_venda] = venda.clone();
    Ok(venda)
}

// --- DELETE ---
// Devolve exatamente a quantidade da venda. Só falha se o estoque do
// produto não comportar a devolução; nesse caso a venda fica.
pub fn excluir_venda(
    produtos: &mut [Produto],
    vendas: &mut Vec<Venda>,
    id: &str,
) -> Result<Venda, AppError> {
    let idx = posicao_venda(vendas, id)?;
    let alvo = &vendas[idx];
    let devolucao = match produtos.iter().position(|p| p.id == alvo.produto_id) {
        Some(i) => Some((i, devolver(&produtos[i], alvo.quantidade)?)),
        None => None,
    };

    let venda = vendas.remove(idx);
    match devolucao {
        Some((i, quantidade)) => produtos[i].quantidade = quantidade,
        None => tracing::warn!(
            "Venda {} excluída; produto {} não existe mais",
            venda.id,
            venda.produto_id
        ),
    }
    Ok(venda)
}
