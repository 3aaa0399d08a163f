// src/models/venda.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{Entidade, Produto};

// --- Vendas ---
// `feirante_id` e `valor_unitario` são copiados do produto no momento da
// venda e não acompanham alterações posteriores do produto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venda {
    pub id: String,
    pub produto_id: String,
    pub quantidade: u32,
    pub data: DateTime<Utc>,
    pub feirante_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_unitario: Option<Decimal>,
}

impl Venda {
    /// Valor total da venda. Usa o preço gravado na venda; sem ele, o preço
    /// atual do produto; sem produto, zero. `None` quando o produto não cabe
    /// num `Decimal`.
    pub fn valor_total(&self, produto: Option<&Produto>) -> Option<Decimal> {
        let unitario = self
            .valor_unitario
            .or_else(|| produto.map(|p| p.preco))
            .unwrap_or(Decimal::ZERO);
        unitario.checked_mul(Decimal::from(self.quantidade))
    }
}

impl Entidade for Venda {
    const COLECAO: &'static str = "vendas";
    const RECURSO: &'static str = "Venda";

    fn id(&self) -> &str {
        &self.id
    }
}

/// O que o formulário de venda envia. O resto (data, feirante, preço) vem do
/// produto escolhido.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaPayload {
    #[validate(length(min = 1, message = "Selecione um produto válido"))]
    pub produto_id: String,

    #[validate(range(min = 1, message = "Quantidade deve ser maior que zero"))]
    pub quantidade: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venda(valor_unitario: Option<Decimal>) -> Venda {
        Venda {
            id: "v1".into(),
            produto_id: "p1".into(),
            quantidade: 3,
            data: Utc::now(),
            feirante_id: "f1".into(),
            valor_unitario,
        }
    }

    #[test]
    fn valor_total_prefere_preco_gravado() {
        let produto = Produto {
            id: "p1".into(),
            nome: "Tomate".into(),
            preco: Decimal::new(900, 2),
            quantidade: 1,
            feirante_id: "f1".into(),
            categoria_id: "c1".into(),
            descricao: None,
        };

        assert_eq!(venda(Some(Decimal::new(250, 2))).valor_total(Some(&produto)), Some(Decimal::new(750, 2)));
        assert_eq!(venda(None).valor_total(Some(&produto)), Some(Decimal::new(2700, 2)));
        assert_eq!(venda(None).valor_total(None), Some(Decimal::ZERO));
    }

    #[test]
    fn valor_total_que_estoura_o_decimal_e_none() {
        let mut grande = venda(Some(Decimal::MAX));
        grande.quantidade = u32::MAX;
        assert_eq!(grande.valor_total(None), None);
    }

    #[test]
    fn quantidade_zero_nao_passa() {
        let payload = VendaPayload { produto_id: "p1".into(), quantidade: 0 };
        assert!(payload.validate().is_err());
    }
}
