// src/forms.rs
//
// Formulários: recebem o texto digitado, fazem a conversão numérica e
// devolvem o payload pronto ou os erros por campo, para mostrar junto ao
// campo sem abortar nada.

use std::str::FromStr;

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    models::{
        Categoria, CategoriaPayload, Feirante, FeirantePayload, Produto, ProdutoPayload, Venda,
        VendaPayload,
    },
    services::estoque::disponivel_para,
};

fn erro(codigo: &'static str, mensagem: String) -> ValidationError {
    let mut err = ValidationError::new(codigo);
    err.message = Some(mensagem.into());
    err
}

// Junta os erros de conversão (feitos aqui) com os do `validate()` do payload.
fn concluir<P: Validate>(payload: P, mut erros: ValidationErrors) -> Result<P, ValidationErrors> {
    if let Err(do_payload) = payload.validate() {
        for (campo, lista) in do_payload.field_errors() {
            if erros.field_errors().contains_key(&*campo) {
                continue;
            }
            for e in lista.iter() {
                erros.add(campo_estatico(&campo), e.clone());
            }
        }
    }
    if erros.is_empty() { Ok(payload) } else { Err(erros) }
}

// `ValidationErrors::add` pede `&'static str`; os campos dos payloads são fixos.
fn campo_estatico(campo: &str) -> &'static str {
    match campo {
        "nome" => "nome",
        "contato" => "contato",
        "preco" => "preco",
        "quantidade" => "quantidade",
        "feirante_id" => "feirante_id",
        "categoria_id" => "categoria_id",
        "produto_id" => "produto_id",
        _ => "formulario",
    }
}

fn opcional(valor: &str) -> Option<String> {
    let valor = valor.trim();
    (!valor.is_empty()).then(|| valor.to_string())
}

// --- Categoria ---
#[derive(Debug, Clone, Default)]
pub struct FormularioCategoria {
    pub nome: String,
}

impl FormularioCategoria {
    pub fn de(categoria: &Categoria) -> Self {
        Self { nome: categoria.nome.clone() }
    }

    pub fn validar(&self) -> Result<CategoriaPayload, ValidationErrors> {
        let payload = CategoriaPayload { nome: self.nome.trim().to_string() };
        concluir(payload, ValidationErrors::new())
    }
}

// --- Feirante ---
#[derive(Debug, Clone, Default)]
pub struct FormularioFeirante {
    pub nome: String,
    pub contato: String,
    pub cpf: String,
}

impl FormularioFeirante {
    pub fn de(feirante: &Feirante) -> Self {
        Self {
            nome: feirante.nome.clone(),
            contato: feirante.contato.clone(),
            cpf: feirante.cpf.clone().unwrap_or_default(),
        }
    }

    pub fn validar(&self) -> Result<FeirantePayload, ValidationErrors> {
        let payload = FeirantePayload {
            nome: self.nome.trim().to_string(),
            contato: self.contato.trim().to_string(),
            cpf: opcional(&self.cpf),
        };
        concluir(payload, ValidationErrors::new())
    }
}

// --- Produto ---
#[derive(Debug, Clone, Default)]
pub struct FormularioProduto {
    pub nome: String,
    pub preco: String,
    pub quantidade: String,
    pub feirante_id: String,
    pub categoria_id: String,
    pub descricao: String,
}

impl FormularioProduto {
    pub fn de(produto: &Produto) -> Self {
        Self {
            nome: produto.nome.clone(),
            preco: produto.preco.to_string(),
            quantidade: produto.quantidade.to_string(),
            feirante_id: produto.feirante_id.clone(),
            categoria_id: produto.categoria_id.clone(),
            descricao: produto.descricao.clone().unwrap_or_default(),
        }
    }

    pub fn validar(&self) -> Result<ProdutoPayload, ValidationErrors> {
        let mut erros = ValidationErrors::new();

        // Aceita vírgula ou ponto como separador decimal.
        let preco = match Decimal::from_str(&self.preco.trim().replace(',', ".")) {
            Ok(preco) if preco.is_sign_negative() && !preco.is_zero() => {
                erros.add("preco", erro("range", "O preço não pode ser negativo.".into()));
                Decimal::ZERO
            }
            Ok(preco) => preco,
            Err(_) => {
                erros.add("preco", erro("parse", "Informe um preço válido.".into()));
                Decimal::ZERO
            }
        };

        let quantidade = match self.quantidade.trim().parse::<u32>() {
            Ok(quantidade) => quantidade,
            Err(_) => {
                erros.add(
                    "quantidade",
                    erro("parse", "A quantidade deve ser um número inteiro não negativo.".into()),
                );
                0
            }
        };

        let payload = ProdutoPayload {
            nome: self.nome.trim().to_string(),
            preco,
            quantidade,
            feirante_id: self.feirante_id.trim().to_string(),
            categoria_id: self.categoria_id.trim().to_string(),
            descricao: opcional(&self.descricao),
        };
        concluir(payload, erros)
    }
}

// --- Venda ---
#[derive(Debug, Clone)]
pub struct FormularioVenda {
    pub produto_id: String,
    pub quantidade: String,
}

impl Default for FormularioVenda {
    fn default() -> Self {
        Self { produto_id: String::new(), quantidade: "1".into() }
    }
}

impl FormularioVenda {
    pub fn de(venda: &Venda) -> Self {
        Self {
            produto_id: venda.produto_id.clone(),
            quantidade: venda.quantidade.to_string(),
        }
    }

    /// Confere a quantidade contra o estoque do produto escolhido. Ao editar,
    /// o que a própria venda já tirou do produto conta como disponível.
    pub fn validar(
        &self,
        produtos: &[Produto],
        em_edicao: Option<&Venda>,
    ) -> Result<VendaPayload, ValidationErrors> {
        let mut erros = ValidationErrors::new();
        let produto_id = self.produto_id.trim();
        let produto = produtos.iter().find(|p| p.id == produto_id);

        if produto.is_none() {
            erros.add("produto_id", erro("required", "Selecione um produto válido".into()));
        }

        let quantidade = match self.quantidade.trim().parse::<i64>() {
            Ok(q) if q <= 0 => {
                erros.add("quantidade", erro("range", "Quantidade deve ser maior que zero".into()));
                None
            }
            Ok(q) => match u32::try_from(q) {
                Ok(q) => Some(q),
                Err(_) => {
                    erros.add("quantidade", erro("range", "Quantidade muito grande".into()));
                    None
                }
            },
            Err(_) => {
                erros.add("quantidade", erro("parse", "Informe uma quantidade inteira".into()));
                None
            }
        };

        if let (Some(produto), Some(q)) = (produto, quantidade) {
            let disponivel = disponivel_para(produto, em_edicao);
            if u64::from(q) > disponivel {
                erros.add(
                    "quantidade",
                    erro("estoque", format!("Estoque insuficiente (disponível: {disponivel})")),
                );
            }
        }

        match (produto, quantidade) {
            (Some(produto), Some(quantidade)) if erros.is_empty() => Ok(VendaPayload {
                produto_id: produto.id.clone(),
                quantidade,
            }),
            _ => Err(erros),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn produto(quantidade: u32) -> Produto {
        Produto {
            id: "p1".into(),
            nome: "Banana".into(),
            preco: Decimal::new(599, 2),
            quantidade,
            feirante_id: "f1".into(),
            categoria_id: "c1".into(),
            descricao: None,
        }
    }

    #[test]
    fn categoria_sem_nome() {
        let erros = FormularioCategoria { nome: "   ".into() }.validar().unwrap_err();
        assert!(erros.field_errors().contains_key("nome"));
    }

    #[test]
    fn feirante_cpf_vazio_vira_none() {
        let payload = FormularioFeirante {
            nome: "Dona Maria".into(),
            contato: "11 99999-0000".into(),
            cpf: " ".into(),
        }
        .validar()
        .unwrap();
        assert_eq!(payload.cpf, None);
    }

    #[test]
    fn produto_aceita_virgula_no_preco() {
        let payload = FormularioProduto {
            nome: "Banana".into(),
            preco: "5,99".into(),
            quantidade: "12".into(),
            feirante_id: "f1".into(),
            categoria_id: "c1".into(),
            descricao: String::new(),
        }
        .validar()
        .unwrap();
        assert_eq!(payload.preco, Decimal::new(599, 2));
        assert_eq!(payload.quantidade, 12);
    }

    #[test]
    fn produto_reune_todos_os_erros() {
        let erros = FormularioProduto {
            nome: String::new(),
            preco: "abc".into(),
            quantidade: "-3".into(),
            feirante_id: String::new(),
            categoria_id: "c1".into(),
            descricao: String::new(),
        }
        .validar()
        .unwrap_err();

        let campos = erros.field_errors();
        assert!(campos.contains_key("nome"));
        assert!(campos.contains_key("preco"));
        assert!(campos.contains_key("quantidade"));
        assert!(campos.contains_key("feirante_id"));
        assert!(!campos.contains_key("categoria_id"));
        assert_eq!(campos["preco"].len(), 1);
    }

    #[test]
    fn venda_respeita_o_estoque() {
        let produtos = vec![produto(3)];
        let form = |q: &str| FormularioVenda { produto_id: "p1".into(), quantidade: q.into() };

        assert_eq!(form("3").validar(&produtos, None).unwrap().quantidade, 3);
        assert!(form("4").validar(&produtos, None).is_err());
        assert!(form("0").validar(&produtos, None).is_err());
        assert!(form("-1").validar(&produtos, None).is_err());
        assert!(form("1.5").validar(&produtos, None).is_err());
    }

    #[test]
    fn venda_em_edicao_conta_a_propria_quantidade() {
        let produtos = vec![produto(1)];
        let anterior = Venda {
            id: "v1".into(),
            produto_id: "p1".into(),
            quantidade: 2,
            data: Utc::now(),
            feirante_id: "f1".into(),
            valor_unitario: None,
        };
        let form = FormularioVenda { produto_id: "p1".into(), quantidade: "3".into() };

        assert!(form.validar(&produtos, None).is_err());
        assert!(form.validar(&produtos, Some(&anterior)).is_ok());
    }

    #[test]
    fn venda_sem_produto() {
        let erros = FormularioVenda::default().validar(&[], None).unwrap_err();
        assert!(erros.field_errors().contains_key("produto_id"));
    }
}
