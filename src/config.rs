// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use tracing_subscriber::EnvFilter;

use crate::{
    db::{Armazenamento, ArmazenamentoArquivo, ArmazenamentoMemoria},
    persistencia::PersistenciaLocal,
};

pub const ENDERECO_PADRAO: &str = "0.0.0.0:8080";
pub const DADOS_PADRAO: &str = "dados";
pub const API_URL_PADRAO: &str = "http://localhost:8080";

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub endereco: String,
    pub diretorio_dados: PathBuf,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            endereco: env::var("FEIRA_ENDERECO").unwrap_or_else(|_| ENDERECO_PADRAO.to_string()),
            diretorio_dados: env::var("FEIRA_DADOS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DADOS_PADRAO)),
            api_url: env::var("FEIRA_API_URL").unwrap_or_else(|_| API_URL_PADRAO.to_string()),
        }
    }
}

/// Inicializa o logger. `RUST_LOG` manda; sem ele, usa `nivel_padrao`.
pub fn init_tracing(nivel_padrao: &str, stderr: bool) {
    let filtro = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(nivel_padrao));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filtro)
        .with_target(false)
        .compact();
    if stderr {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.init();
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub persistencia: PersistenciaLocal,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = ArmazenamentoArquivo::abrir(&config.diretorio_dados).await?;
        Ok(Self::com_armazenamento(Arc::new(store)))
    }

    pub fn com_armazenamento(store: Arc<dyn Armazenamento>) -> Self {
        Self {
            persistencia: PersistenciaLocal::new(store),
        }
    }

    pub fn em_memoria() -> Self {
        Self::com_armazenamento(Arc::new(ArmazenamentoMemoria::new()))
    }
}
