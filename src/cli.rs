// src/cli.rs
//
// As quatro telas na linha de comando: cada uma lista, cria, edita e exclui.
// Depois de qualquer alteração a tabela da tela é mostrada de novo.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    common::error::AppError,
    forms::{FormularioCategoria, FormularioFeirante, FormularioProduto, FormularioVenda},
    models::{Categoria, Feirante, Produto, Venda},
    persistencia::Persistencia,
    views,
};

#[derive(Debug, Parser)]
#[command(name = "feira", version, about = "Feirantes, categorias, produtos e vendas")]
pub struct Cli {
    /// Usa a API remota em vez do diretório local
    #[arg(long, global = true)]
    pub remoto: bool,

    /// URL base da API (padrão: FEIRA_API_URL ou http://localhost:8080)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Diretório dos dados locais (padrão: FEIRA_DADOS ou ./dados)
    #[arg(long, global = true)]
    pub dados: Option<PathBuf>,

    /// Exclui sem pedir confirmação
    #[arg(long, short = 's', global = true)]
    pub sim: bool,

    #[command(subcommand)]
    pub tela: Tela,
}

#[derive(Debug, Subcommand)]
pub enum Tela {
    #[command(subcommand)]
    Feirantes(AcaoFeirante),
    #[command(subcommand)]
    Categorias(AcaoCategoria),
    #[command(subcommand)]
    Produtos(AcaoProduto),
    #[command(subcommand)]
    Vendas(AcaoVenda),
}

// --- Feirantes ---
#[derive(Debug, Subcommand)]
pub enum AcaoFeirante {
    Listar,
    Novo(CamposFeirante),
    Editar {
        id: String,
        #[command(flatten)]
        campos: CamposFeirante,
    },
    Excluir { id: String },
}

#[derive(Debug, Args, Default)]
pub struct CamposFeirante {
    #[arg(long)]
    pub nome: Option<String>,
    #[arg(long)]
    pub contato: Option<String>,
    #[arg(long)]
    pub cpf: Option<String>,
}

impl CamposFeirante {
    fn aplicar(self, form: &mut FormularioFeirante) {
        if let Some(nome) = self.nome {
            form.nome = nome;
        }
        if let Some(contato) = self.contato {
            form.contato = contato;
        }
        if let Some(cpf) = self.cpf {
            form.cpf = cpf;
        }
    }
}

// --- Categorias ---
#[derive(Debug, Subcommand)]
pub enum AcaoCategoria {
    Listar,
    Novo(CamposCategoria),
    Editar {
        id: String,
        #[command(flatten)]
        campos: CamposCategoria,
    },
    Excluir { id: String },
}

#[derive(Debug, Args, Default)]
pub struct CamposCategoria {
    #[arg(long)]
    pub nome: Option<String>,
}

impl CamposCategoria {
    fn aplicar(self, form: &mut FormularioCategoria) {
        if let Some(nome) = self.nome {
            form.nome = nome;
        }
    }
}

// --- Produtos ---
#[derive(Debug, Subcommand)]
pub enum AcaoProduto {
    Listar,
    Novo(CamposProduto),
    Editar {
        id: String,
        #[command(flatten)]
        campos: CamposProduto,
    },
    Excluir { id: String },
}

#[derive(Debug, Args, Default)]
pub struct CamposProduto {
    #[arg(long)]
    pub nome: Option<String>,
    /// Preço unitário (aceita vírgula: 4,50)
    #[arg(long, allow_hyphen_values = true)]
    pub preco: Option<String>,
    /// Quantidade em estoque
    #[arg(long, allow_hyphen_values = true)]
    pub quantidade: Option<String>,
    /// Id do feirante
    #[arg(long)]
    pub feirante: Option<String>,
    /// Id da categoria
    #[arg(long)]
    pub categoria: Option<String>,
    #[arg(long)]
    pub descricao: Option<String>,
}

impl CamposProduto {
    fn aplicar(self, form: &mut FormularioProduto) {
        if let Some(nome) = self.nome {
            form.nome = nome;
        }
        if let Some(preco) = self.preco {
            form.preco = preco;
        }
        if let Some(quantidade) = self.quantidade {
            form.quantidade = quantidade;
        }
        if let Some(feirante) = self.feirante {
            form.feirante_id = feirante;
        }
        if let Some(categoria) = self.categoria {
            form.categoria_id = categoria;
        }
        if let Some(descricao) = self.descricao {
            form.descricao = descricao;
        }
    }
}

// --- Vendas ---
#[derive(Debug, Subcommand)]
pub enum AcaoVenda {
    /// Histórico de vendas
    Listar,
    /// Produtos disponíveis para venda
    Disponiveis,
    Vender(CamposVenda),
    Editar {
        id: String,
        #[command(flatten)]
        campos: CamposVenda,
    },
    Excluir { id: String },
}

#[derive(Debug, Args, Default)]
pub struct CamposVenda {
    /// Id do produto
    #[arg(long)]
    pub produto: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub quantidade: Option<String>,
}

impl CamposVenda {
    fn aplicar(self, form: &mut FormularioVenda) {
        if let Some(produto) = self.produto {
            form.produto_id = produto;
        }
        if let Some(quantidade) = self.quantidade {
            form.quantidade = quantidade;
        }
    }
}

const CANCELADO: &str = "Exclusão cancelada.\n";

/// Executa uma ação e devolve o texto a mostrar. `confirmar` é chamado antes
/// de qualquer exclusão; `false` cancela sem tocar em nada.
pub async fn executar<P: Persistencia>(
    persistencia: &P,
    tela: Tela,
    confirmar: &mut (dyn FnMut(&str) -> bool + Send),
) -> Result<String, AppError> {
    match tela {
        Tela::Feirantes(acao) => feirantes(persistencia, acao, confirmar).await,
        Tela::Categorias(acao) => categorias(persistencia, acao, confirmar).await,
        Tela::Produtos(acao) => produtos(persistencia, acao, confirmar).await,
        Tela::Vendas(acao) => vendas(persistencia, acao, confirmar).await,
    }
}

async fn feirantes<P: Persistencia>(
    p: &P,
    acao: AcaoFeirante,
    confirmar: &mut (dyn FnMut(&str) -> bool + Send),
) -> Result<String, AppError> {
    let mensagem = match acao {
        AcaoFeirante::Listar => String::new(),
        AcaoFeirante::Novo(campos) => {
            let mut form = FormularioFeirante::default();
            campos.aplicar(&mut form);
            let novo = p.criar::<Feirante>(form.validar()?).await?;
            format!("Feirante criado: {}\n", novo.id)
        }
        AcaoFeirante::Editar { id, campos } => {
            let atual = p.buscar::<Feirante>(&id).await?;
            let mut form = FormularioFeirante::de(&atual);
            campos.aplicar(&mut form);
            p.atualizar::<Feirante>(&id, form.validar()?).await?;
            format!("Feirante atualizado: {id}\n")
        }
        AcaoFeirante::Excluir { id } => {
            if !confirmar("Deseja excluir este feirante?") {
                return Ok(CANCELADO.to_string());
            }
            p.excluir::<Feirante>(&id).await?;
            format!("Feirante excluído: {id}\n")
        }
    };
    let feirantes = p.listar::<Feirante>().await?;
    Ok(mensagem + &views::tabela_feirantes(&feirantes))
}

async fn categorias<P: Persistencia>(
    p: &P,
    acao: AcaoCategoria,
    confirmar: &mut (dyn FnMut(&str) -> bool + Send),
) -> Result<String, AppError> {
    let mensagem = match acao {
        AcaoCategoria::Listar => String::new(),
        AcaoCategoria::Novo(campos) => {
            let mut form = FormularioCategoria::default();
            campos.aplicar(&mut form);
            let nova = p.criar::<Categoria>(form.validar()?).await?;
            format!("Categoria criada: {}\n", nova.id)
        }
        AcaoCategoria::Editar { id, campos } => {
            let atual = p.buscar::<Categoria>(&id).await?;
            let mut form = FormularioCategoria::de(&atual);
            campos.aplicar(&mut form);
            p.atualizar::<Categoria>(&id, form.validar()?).await?;
            format!("Categoria atualizada: {id}\n")
        }
        AcaoCategoria::Excluir { id } => {
            if !confirmar("Deseja excluir esta categoria?") {
                return Ok(CANCELADO.to_string());
            }
            p.excluir::<Categoria>(&id).await?;
            format!("Categoria excluída: {id}\n")
        }
    };
    let categorias = p.listar::<Categoria>().await?;
    Ok(mensagem + &views::tabela_categorias(&categorias))
}

async fn produtos<P: Persistencia>(
    p: &P,
    acao: AcaoProduto,
    confirmar: &mut (dyn FnMut(&str) -> bool + Send),
) -> Result<String, AppError> {
    let mensagem = match acao {
        AcaoProduto::Listar => String::new(),
        AcaoProduto::Novo(campos) => {
            let mut form = FormularioProduto::default();
            campos.aplicar(&mut form);
            let novo = p.criar::<Produto>(form.validar()?).await?;
            format!("Produto criado: {}\n", novo.id)
        }
        AcaoProduto::Editar { id, campos } => {
            let atual = p.buscar::<Produto>(&id).await?;
            let mut form = FormularioProduto::de(&atual);
            campos.aplicar(&mut form);
            p.atualizar::<Produto>(&id, form.validar()?).await?;
            format!("Produto atualizado: {id}\n")
        }
        AcaoProduto::Excluir { id } => {
            if !confirmar("Deseja excluir este produto?") {
                return Ok(CANCELADO.to_string());
            }
            p.excluir::<Produto>(&id).await?;
            format!("Produto excluído: {id}\n")
        }
    };
    let produtos = p.listar::<Produto>().await?;
    let feirantes = p.listar::<Feirante>().await?;
    let categorias = p.listar::<Categoria>().await?;
    Ok(mensagem + &views::tabela_produtos(&produtos, &feirantes, &categorias))
}

async fn vendas<P: Persistencia>(
    p: &P,
    acao: AcaoVenda,
    confirmar: &mut (dyn FnMut(&str) -> bool + Send),
) -> Result<String, AppError> {
    if let AcaoVenda::Disponiveis = acao {
        let produtos = p.listar::<Produto>().await?;
        let feirantes = p.listar::<Feirante>().await?;
        let categorias = p.listar::<Categoria>().await?;
        return Ok(views::tabela_disponiveis(&produtos, &feirantes, &categorias));
    }

    let mensagem = match acao {
        AcaoVenda::Listar | AcaoVenda::Disponiveis => String::new(),
        AcaoVenda::Vender(campos) => {
            let produtos = p.listar::<Produto>().await?;
            let mut form = FormularioVenda::default();
            campos.aplicar(&mut form);
            let venda = p.registrar_venda(form.validar(&produtos, None)?).await?;
            format!("Venda registrada: {}\n", venda.id)
        }
        AcaoVenda::Editar { id, campos } => {
            let atual = p.buscar::<Venda>(&id).await?;
            let produtos = p.listar::<Produto>().await?;
            let mut form = FormularioVenda::de(&atual);
            campos.aplicar(&mut form);
            p.editar_venda(&id, form.validar(&produtos, Some(&atual))?).await?;
            format!("Venda editada: {id}\n")
        }
        AcaoVenda::Excluir { id } => {
            if !confirmar("Deseja excluir esta venda?") {
                return Ok(CANCELADO.to_string());
            }
            p.excluir_venda(&id).await?;
            format!("Venda excluída: {id}\n")
        }
    };
    let vendas = p.listar::<Venda>().await?;
    let produtos = p.listar::<Produto>().await?;
    let feirantes = p.listar::<Feirante>().await?;
    Ok(mensagem + &views::tabela_vendas(&vendas, &produtos, &feirantes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppState;
    use clap::CommandFactory;

    #[test]
    fn definicao_do_clap_e_valida() {
        Cli::command().debug_assert();
    }

    #[test]
    fn interpreta_venda() {
        let cli = Cli::try_parse_from(["feira", "vendas", "vender", "--produto", "p1", "--quantidade", "2"]).unwrap();
        match cli.tela {
            Tela::Vendas(AcaoVenda::Vender(campos)) => {
                assert_eq!(campos.produto.as_deref(), Some("p1"));
                assert_eq!(campos.quantidade.as_deref(), Some("2"));
            }
            outro => panic!("tela inesperada: {outro:?}"),
        }
    }

    #[tokio::test]
    async fn excluir_cancelado_nao_remove() {
        let p = AppState::em_memoria().persistencia;
        let mut sempre_sim = |_: &str| true;
        let mut sempre_nao = |_: &str| false;

        executar(
            &p,
            Tela::Categorias(AcaoCategoria::Novo(CamposCategoria { nome: Some("Frutas".into()) })),
            &mut sempre_sim,
        )
        .await
        .unwrap();
        let id = p.listar::<Categoria>().await.unwrap()[0].id.clone();

        let saida = executar(&p, Tela::Categorias(AcaoCategoria::Excluir { id: id.clone() }), &mut sempre_nao)
            .await
            .unwrap();
        assert_eq!(saida, CANCELADO);
        assert_eq!(p.listar::<Categoria>().await.unwrap().len(), 1);

        executar(&p, Tela::Categorias(AcaoCategoria::Excluir { id }), &mut sempre_sim)
            .await
            .unwrap();
        assert!(p.listar::<Categoria>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn editar_mantem_campos_nao_informados() {
        let p = AppState::em_memoria().persistencia;
        let mut sim = |_: &str| true;
        executar(
            &p,
            Tela::Feirantes(AcaoFeirante::Novo(CamposFeirante {
                nome: Some("Dona Cida".into()),
                contato: Some("cida@feira".into()),
                cpf: None,
            })),
            &mut sim,
        )
        .await
        .unwrap();
        let id = p.listar::<Feirante>().await.unwrap()[0].id.clone();

        let campos = CamposFeirante { contato: Some("11 98888-7777".into()), ..Default::default() };
        executar(&p, Tela::Feirantes(AcaoFeirante::Editar { id: id.clone(), campos }), &mut sim)
            .await
            .unwrap();

        let feirante = p.buscar::<Feirante>(&id).await.unwrap();
        assert_eq!(feirante.nome, "Dona Cida");
        assert_eq!(feirante.contato, "11 98888-7777");
    }

    #[tokio::test]
    async fn novo_produto_sem_campos_e_erro_de_validacao() {
        let p = AppState::em_memoria().persistencia;
        let mut sim = |_: &str| true;
        let err = executar(&p, Tela::Produtos(AcaoProduto::Novo(CamposProduto::default())), &mut sim)
            .await
            .unwrap_err();
        assert!(err.e_validacao());
        assert!(p.listar::<Produto>().await.unwrap().is_empty());
    }
}
