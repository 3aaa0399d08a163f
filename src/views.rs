// src/views.rs
//
// As quatro telas em texto: uma tabela por coleção. Referência pendurada
// (feirante, categoria ou produto que não existe mais) aparece como "—".

use chrono::{DateTime, Local, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Categoria, Feirante, Produto, Venda};

pub const MARCADOR: &str = "—";

fn nome_feirante<'a>(feirantes: &'a [Feirante], id: &str) -> &'a str {
    feirantes.iter().find(|f| f.id == id).map_or(MARCADOR, |f| f.nome.as_str())
}

fn nome_categoria<'a>(categorias: &'a [Categoria], id: &str) -> &'a str {
    categorias.iter().find(|c| c.id == id).map_or(MARCADOR, |c| c.nome.as_str())
}

/// Duas casas, arredondando meio centavo para cima.
pub fn formatar_preco(valor: Decimal) -> String {
    let valor = valor.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("R$ {:.2}", valor)
}

pub fn formatar_data(data: &DateTime<Utc>) -> String {
    data.with_timezone(&Local).format("%d/%m/%Y, %H:%M:%S").to_string()
}

// Alinha as colunas pela largura em caracteres (não bytes).
fn tabela(cabecalho: &[&str], linhas: &[Vec<String>], vazia: &str) -> String {
    if linhas.is_empty() {
        return format!("{vazia}\n");
    }

    let mut larguras: Vec<usize> = cabecalho.iter().map(|c| c.chars().count()).collect();
    for linha in linhas {
        for (i, celula) in linha.iter().enumerate() {
            larguras[i] = larguras[i].max(celula.chars().count());
        }
    }

    let formatar = |celulas: Vec<&str>| {
        let partes: Vec<String> = celulas
            .iter()
            .zip(&larguras)
            .map(|(celula, largura)| {
                let faltam = largura - celula.chars().count();
                format!("{celula}{}", " ".repeat(faltam))
            })
            .collect();
        partes.join(" | ").trim_end().to_string()
    };

    let mut saida = formatar(cabecalho.to_vec());
    saida.push('\n');
    let total: usize = larguras.iter().sum::<usize>() + 3 * (larguras.len() - 1);
    saida.push_str(&"-".repeat(total));
    saida.push('\n');
    for linha in linhas {
        saida.push_str(&formatar(linha.iter().map(String::as_str).collect()));
        saida.push('\n');
    }
    saida
}

pub fn tabela_feirantes(feirantes: &[Feirante]) -> String {
    let linhas: Vec<Vec<String>> = feirantes
        .iter()
        .map(|f| {
            vec![
                f.id.clone(),
                f.nome.clone(),
                f.contato.clone(),
                f.cpf.clone().unwrap_or_else(|| MARCADOR.to_string()),
            ]
        })
        .collect();
    tabela(&["Id", "Nome", "Contato", "CPF"], &linhas, "Nenhum feirante cadastrado.")
}

pub fn tabela_categorias(categorias: &[Categoria]) -> String {
    let linhas: Vec<Vec<String>> = categorias
        .iter()
        .map(|c| vec![c.id.clone(), c.nome.clone()])
        .collect();
    tabela(&["Id", "Nome"], &linhas, "Nenhuma categoria cadastrada.")
}

pub fn tabela_produtos(produtos: &[Produto], feirantes: &[Feirante], categorias: &[Categoria]) -> String {
    let linhas: Vec<Vec<String>> = produtos
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.nome.clone(),
                formatar_preco(p.preco),
                p.quantidade.to_string(),
                nome_feirante(feirantes, &p.feirante_id).to_string(),
                nome_categoria(categorias, &p.categoria_id).to_string(),
            ]
        })
        .collect();
    tabela(
        &["Id", "Nome", "Preço", "Quantidade", "Feirante", "Categoria"],
        &linhas,
        "Nenhum produto cadastrado.",
    )
}

/// Produtos disponíveis para venda: só dá para vender o que tem estoque.
pub fn tabela_disponiveis(produtos: &[Produto], feirantes: &[Feirante], categorias: &[Categoria]) -> String {
    let linhas: Vec<Vec<String>> = produtos
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.nome.clone(),
                formatar_preco(p.preco),
                p.quantidade.to_string(),
                nome_feirante(feirantes, &p.feirante_id).to_string(),
                nome_categoria(categorias, &p.categoria_id).to_string(),
                if p.quantidade > 0 { "sim" } else { "não" }.to_string(),
            ]
        })
        .collect();
    tabela(
        &["Id", "Nome", "Preço", "Quantidade", "Feirante", "Categoria", "Vender"],
        &linhas,
        "Nenhum produto disponível.",
    )
}

pub fn tabela_vendas(vendas: &[Venda], produtos: &[Produto], feirantes: &[Feirante]) -> String {
    let linhas: Vec<Vec<String>> = vendas
        .iter()
        .map(|v| {
            let produto = produtos.iter().find(|p| p.id == v.produto_id);
            vec![
                v.id.clone(),
                produto.map_or(MARCADOR, |p| p.nome.as_str()).to_string(),
                v.quantidade.to_string(),
                v.valor_total(produto).map_or_else(|| MARCADOR.to_string(), formatar_preco),
                formatar_data(&v.data),
                nome_feirante(feirantes, &v.feirante_id).to_string(),
            ]
        })
        .collect();
    tabela(
        &["Id", "Produto", "Quantidade", "Valor Total", "Data", "Feirante"],
        &linhas,
        "Nenhuma venda registrada.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produto(id: &str, feirante_id: &str, quantidade: u32) -> Produto {
        Produto {
            id: id.into(),
            nome: "Couve".into(),
            preco: Decimal::new(3, 0),
            quantidade,
            feirante_id: feirante_id.into(),
            categoria_id: "sumiu".into(),
            descricao: None,
        }
    }

    #[test]
    fn tabelas_vazias_mostram_mensagem() {
        assert_eq!(tabela_produtos(&[], &[], &[]), "Nenhum produto cadastrado.\n");
        assert_eq!(tabela_vendas(&[], &[], &[]), "Nenhuma venda registrada.\n");
        assert_eq!(tabela_categorias(&[]), "Nenhuma categoria cadastrada.\n");
    }

    #[test]
    fn referencia_pendurada_vira_marcador() {
        let feirantes = vec![Feirante {
            id: "f1".into(),
            nome: "Seu João".into(),
            contato: "joao@feira".into(),
            cpf: None,
        }];
        let saida = tabela_produtos(&[produto("p1", "f1", 2), produto("p2", "f9", 0)], &feirantes, &[]);

        let linhas: Vec<&str> = saida.lines().collect();
        assert_eq!(linhas.len(), 4);
        assert!(linhas[2].contains("Seu João"));
        assert!(linhas[2].contains("R$ 3.00"));
        assert!(linhas[2].ends_with(MARCADOR));
        assert_eq!(linhas[3].matches(MARCADOR).count(), 2);
    }

    #[test]
    fn venda_de_produto_apagado_usa_preco_gravado() {
        let venda = Venda {
            id: "v1".into(),
            produto_id: "apagado".into(),
            quantidade: 4,
            data: Utc::now(),
            feirante_id: "f1".into(),
            valor_unitario: Some(Decimal::new(125, 2)),
        };
        let saida = tabela_vendas(&[venda], &[], &[]);
        assert!(saida.contains("R$ 5.00"));
        assert!(saida.lines().nth(2).unwrap().contains(MARCADOR));
    }

    #[test]
    fn preco_arredonda_em_vez_de_truncar() {
        assert_eq!(formatar_preco(Decimal::new(2999, 3)), "R$ 3.00");
        assert_eq!(formatar_preco(Decimal::new(5, 3)), "R$ 0.01");
        assert_eq!(formatar_preco(Decimal::new(12344, 4)), "R$ 1.23");
        assert_eq!(formatar_preco(Decimal::new(7, 0)), "R$ 7.00");
    }

    #[test]
    fn total_grande_demais_vira_marcador_sem_derrubar_a_tela() {
        let venda = Venda {
            id: "v1".into(),
            produto_id: "p1".into(),
            quantidade: 4_000_000_000,
            data: Utc::now(),
            feirante_id: "f1".into(),
            valor_unitario: Some(Decimal::from(10u64.pow(19)) * Decimal::from(10)),
        };
        let saida = tabela_vendas(&[venda], &[], &[]);
        let linha = saida.lines().nth(2).unwrap();
        assert!(linha.contains("4000000000"));
        assert_eq!(linha.matches(MARCADOR).count(), 3);
    }

    #[test]
    fn so_vende_com_estoque() {
        let saida = tabela_disponiveis(&[produto("p1", "f1", 0)], &[], &[]);
        assert!(saida.lines().nth(2).unwrap().ends_with("não"));
    }
}
