// tests/estoque.rs
//
// Conciliação de estoque de ponta a ponta pela `PersistenciaLocal`.

use std::str::FromStr;

use rust_decimal::Decimal;

use feira::common::error::AppError;
use feira::config::AppState;
use feira::models::{Produto, ProdutoPayload, Venda, VendaPayload};
use feira::persistencia::{Persistencia, PersistenciaLocal};

fn persistencia() -> PersistenciaLocal {
    AppState::em_memoria().persistencia
}

async fn criar_produto(p: &PersistenciaLocal, nome: &str, quantidade: u32) -> Produto {
    p.criar::<Produto>(ProdutoPayload {
        nome: nome.into(),
        preco: Decimal::from_str("4.50").unwrap(),
        quantidade,
        feirante_id: format!("feirante-{nome}"),
        categoria_id: "hortifruti".into(),
        descricao: None,
    })
    .await
    .unwrap()
}

fn pedido(produto: &Produto, quantidade: u32) -> VendaPayload {
    VendaPayload { produto_id: produto.id.clone(), quantidade }
}

async fn estoque(p: &PersistenciaLocal, id: &str) -> u32 {
    p.buscar::<Produto>(id).await.unwrap().quantidade
}

#[tokio::test]
async fn vender_3_editar_para_5_e_excluir() {
    let p = persistencia();
    let a = criar_produto(&p, "A", 10).await;

    let venda = p.registrar_venda(pedido(&a, 3)).await.unwrap();
    assert_eq!(estoque(&p, &a.id).await, 7);
    assert_eq!(venda.feirante_id, a.feirante_id);

    let editada = p.editar_venda(&venda.id, pedido(&a, 5)).await.unwrap();
    assert_eq!(editada.id, venda.id);
    assert_eq!(estoque(&p, &a.id).await, 5);

    p.excluir_venda(&venda.id).await.unwrap();
    assert_eq!(estoque(&p, &a.id).await, 10);
    assert!(p.listar::<Venda>().await.unwrap().is_empty());
}

#[tokio::test]
async fn venda_acima_do_estoque_e_rejeitada_sem_mudar_nada() {
    let p = persistencia();
    let a = criar_produto(&p, "A", 2).await;

    let err = p.registrar_venda(pedido(&a, 3)).await.unwrap_err();

    assert!(matches!(err, AppError::EstoqueInsuficiente { disponivel: 2 }));
    assert_eq!(estoque(&p, &a.id).await, 2);
    assert!(p.listar::<Venda>().await.unwrap().is_empty());
}

#[tokio::test]
async fn quantidade_zero_e_rejeitada() {
    let p = persistencia();
    let a = criar_produto(&p, "A", 2).await;

    let err = p.registrar_venda(pedido(&a, 0)).await.unwrap_err();

    assert!(err.e_validacao());
    assert_eq!(estoque(&p, &a.id).await, 2);
}

#[tokio::test]
async fn produto_inexistente_e_rejeitado() {
    let p = persistencia();
    let err = p
        .registrar_venda(VendaPayload { produto_id: "nao-existe".into(), quantidade: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProdutoNaoEncontrado));
}

#[tokio::test]
async fn editar_para_outro_produto_devolve_e_debita() {
    let p = persistencia();
    let a = criar_produto(&p, "A", 10).await;
    let b = criar_produto(&p, "B", 5).await;

    let venda = p.registrar_venda(pedido(&a, 4)).await.unwrap();
    let editada = p.editar_venda(&venda.id, pedido(&b, 5)).await.unwrap();

    assert_eq!(estoque(&p, &a.id).await, 10);
    assert_eq!(estoque(&p, &b.id).await, 0);
    assert_eq!(editada.feirante_id, b.feirante_id);
}

#[tokio::test]
async fn excluir_devolve_mesmo_com_estoque_alterado_depois() {
    let p = persistencia();
    let a = criar_produto(&p, "A", 10).await;
    let venda = p.registrar_venda(pedido(&a, 6)).await.unwrap();

    // Alguém zera o estoque editando o produto.
    let mut payload = ProdutoPayload {
        nome: a.nome.clone(),
        preco: a.preco,
        quantidade: 0,
        feirante_id: a.feirante_id.clone(),
        categoria_id: a.categoria_id.clone(),
        descricao: None,
    };
    p.atualizar::<Produto>(&a.id, payload.clone()).await.unwrap();

    p.excluir_venda(&venda.id).await.unwrap();
    assert_eq!(estoque(&p, &a.id).await, 6);

    payload.quantidade = 1;
    p.atualizar::<Produto>(&a.id, payload).await.unwrap();
    assert_eq!(estoque(&p, &a.id).await, 1);
}

#[tokio::test]
async fn estoque_e_inicial_menos_vendas_existentes() {
    let p = persistencia();
    let a = criar_produto(&p, "A", 20).await;
    let b = criar_produto(&p, "B", 15).await;

    let v1 = p.registrar_venda(pedido(&a, 5)).await.unwrap();
    let v2 = p.registrar_venda(pedido(&b, 3)).await.unwrap();
    let v3 = p.registrar_venda(pedido(&a, 2)).await.unwrap();
    p.editar_venda(&v1.id, pedido(&b, 7)).await.unwrap();
    assert!(p.editar_venda(&v2.id, pedido(&a, 99)).await.is_err());
    p.excluir_venda(&v3.id).await.unwrap();
    p.registrar_venda(pedido(&a, 1)).await.unwrap();
    p.editar_venda(&v2.id, pedido(&b, 1)).await.unwrap();

    let vendas = p.listar::<Venda>().await.unwrap();
    for (produto, inicial) in [(&a, 20u32), (&b, 15u32)] {
        let vendido: u32 = vendas
            .iter()
            .filter(|v| v.produto_id == produto.id)
            .map(|v| v.quantidade)
            .sum();
        assert_eq!(estoque(&p, &produto.id).await, inicial - vendido, "produto {}", produto.nome);
    }
}

#[tokio::test]
async fn editar_ou_excluir_venda_inexistente_e_404() {
    let p = persistencia();
    let a = criar_produto(&p, "A", 1).await;

    let err = p.editar_venda("nada", pedido(&a, 1)).await.unwrap_err();
    assert!(matches!(err, AppError::NaoEncontrado { .. }));
    let err = p.excluir_venda("nada").await.unwrap_err();
    assert!(matches!(err, AppError::NaoEncontrado { .. }));
    assert_eq!(estoque(&p, &a.id).await, 1);
}
