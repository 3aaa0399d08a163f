// src/models/cadastro.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{Cadastro, Entidade};

fn validar_nao_negativo(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// --- 1. Categorias ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: String,
    pub nome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
}

impl Entidade for Categoria {
    const COLECAO: &'static str = "categorias";
    const RECURSO: &'static str = "Categoria";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Cadastro for Categoria {
    type Payload = CategoriaPayload;

    fn montar(id: String, payload: CategoriaPayload) -> Self {
        Self { id, nome: payload.nome }
    }
}

// --- 2. Feirantes ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feirante {
    pub id: String,
    pub nome: String,
    pub contato: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeirantePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(length(min = 1, message = "O contato é obrigatório."))]
    pub contato: String,

    #[serde(default)]
    pub cpf: Option<String>,
}

impl Entidade for Feirante {
    const COLECAO: &'static str = "feirantes";
    const RECURSO: &'static str = "Feirante";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Cadastro for Feirante {
    type Payload = FeirantePayload;

    fn montar(id: String, payload: FeirantePayload) -> Self {
        Self {
            id,
            nome: payload.nome,
            contato: payload.contato,
            cpf: payload.cpf,
        }
    }
}

// --- 3. Produtos ---
// `quantidade` é o estoque atual; as vendas descontam daqui.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: String,
    pub nome: String,
    pub preco: Decimal,
    pub quantidade: u32,
    pub feirante_id: String,
    pub categoria_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(custom(function = "validar_nao_negativo"))]
    pub preco: Decimal,

    pub quantidade: u32,

    #[validate(length(min = 1, message = "Selecione um feirante."))]
    pub feirante_id: String,

    #[validate(length(min = 1, message = "Selecione uma categoria."))]
    pub categoria_id: String,

    #[serde(default)]
    pub descricao: Option<String>,
}

impl Entidade for Produto {
    const COLECAO: &'static str = "produtos";
    const RECURSO: &'static str = "Produto";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Cadastro for Produto {
    type Payload = ProdutoPayload;

    fn montar(id: String, payload: ProdutoPayload) -> Self {
        Self {
            id,
            nome: payload.nome,
            preco: payload.preco,
            quantidade: payload.quantidade,
            feirante_id: payload.feirante_id,
            categoria_id: payload.categoria_id,
            descricao: payload.descricao,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn produto_usa_camel_case_no_json() {
        let produto = Produto {
            id: "p1".into(),
            nome: "Alface".into(),
            preco: dec("2.5"),
            quantidade: 10,
            feirante_id: "f1".into(),
            categoria_id: "c1".into(),
            descricao: None,
        };
        let json = serde_json::to_value(&produto).unwrap();
        assert_eq!(json["feiranteId"], "f1");
        assert_eq!(json["categoriaId"], "c1");
        assert_eq!(json["preco"], 2.5);
        assert!(json.get("descricao").is_none());
    }

    #[test]
    fn preco_negativo_nao_passa() {
        let payload = ProdutoPayload {
            nome: "Alface".into(),
            preco: dec("-1"),
            quantidade: 1,
            feirante_id: "f1".into(),
            categoria_id: "c1".into(),
            descricao: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("preco"));
    }
}
