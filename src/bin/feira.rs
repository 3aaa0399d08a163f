//src/bin/feira.rs

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use feira::cli::{executar, Cli};
use feira::common::error::{mensagens_de_validacao, AppError};
use feira::config::{init_tracing, Config};
use feira::db::ArmazenamentoArquivo;
use feira::persistencia::{PersistenciaLocal, PersistenciaRemota};

fn perguntar(pergunta: &str) -> bool {
    print!("{pergunta} [s/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut resposta = String::new();
    if io::stdin().lock().read_line(&mut resposta).is_err() {
        return false;
    }
    matches!(resposta.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
}

async fn rodar(cli: Cli, config: Config) -> Result<String, AppError> {
    let sim = cli.sim;
    let mut confirmar = move |pergunta: &str| sim || perguntar(pergunta);

    if cli.remoto {
        let url = cli.api_url.unwrap_or(config.api_url);
        let persistencia = PersistenciaRemota::new(url)?;
        executar(&persistencia, cli.tela, &mut confirmar).await
    } else {
        let diretorio = cli.dados.unwrap_or(config.diretorio_dados);
        let store = ArmazenamentoArquivo::abrir(diretorio).await?;
        let persistencia = PersistenciaLocal::new(Arc::new(store));
        executar(&persistencia, cli.tela, &mut confirmar).await
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing("warn", true);

    match rodar(cli, config).await {
        Ok(saida) => {
            print!("{saida}");
            ExitCode::SUCCESS
        }
        // Erro de formulário: mostra por campo, como ao lado do campo na tela.
        Err(AppError::ValidationError(erros)) => {
            eprintln!("Corrija os campos:");
            for linha in mensagens_de_validacao(&erros) {
                eprintln!("  • {linha}");
            }
            ExitCode::from(2)
        }
        Err(e) if e.e_validacao() => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!("{:?}", e);
            eprintln!("⚠️  {e}");
            ExitCode::FAILURE
        }
    }
}
