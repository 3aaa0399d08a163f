//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;

use feira::config::{init_tracing, AppState, Config};
use feira::routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing("info", false);

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new(&config)
        .await
        .context("Falha ao inicializar o estado da aplicação.")?;

    let app = routes::app(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.endereco)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", config.endereco))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app)
        .await
        .context("Erro no servidor Axum")?;
    Ok(())
}
