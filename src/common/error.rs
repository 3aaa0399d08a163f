use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Selecione um produto válido")]
    ProdutoNaoEncontrado,

    #[error("Quantidade deve ser maior que zero")]
    QuantidadeInvalida,

    #[error("Estoque insuficiente (disponível: {disponivel})")]
    EstoqueInsuficiente { disponivel: u64 },

    #[error("Estoque do produto {produto_id} passaria do limite")]
    EstoqueExcedido { produto_id: String },

    #[error("{recurso} não encontrado: {id}")]
    NaoEncontrado { recurso: &'static str, id: String },

    // Erros de leitura/gravação do armazenamento local
    #[error("Erro de armazenamento: {0}")]
    Armazenamento(#[from] std::io::Error),

    // Coleção gravada com JSON inválido (ou registro que não serializa)
    #[error("Dados corrompidos: {0}")]
    Serializacao(#[from] serde_json::Error),

    // A API remota respondeu com status diferente de 2xx; o corpo não é lido.
    #[error("{mensagem} (status {status})")]
    Remoto { status: u16, mensagem: &'static str },

    #[error("Erro de rede: {0}")]
    Rede(#[from] reqwest::Error),
}

impl AppError {
    /// Erros causados pela entrada do usuário: aparecem junto ao formulário
    /// e não interrompem nada.
    pub fn e_validacao(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::ProdutoNaoEncontrado
                | AppError::QuantidadeInvalida
                | AppError::EstoqueInsuficiente { .. }
                | AppError::EstoqueExcedido { .. }
        )
    }
}

/// Achata os erros do `validator` em "campo: mensagem", ordenado por campo.
pub fn mensagens_de_validacao(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut linhas = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for e in field_errors.iter() {
            let mensagem = e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string());
            linhas.push(format!("{field}: {mensagem}"));
        }
    }
    linhas.sort();
    linhas
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ref e @ (AppError::ProdutoNaoEncontrado
            | AppError::QuantidadeInvalida
            | AppError::EstoqueInsuficiente { .. }
            | AppError::EstoqueExcedido { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ref e @ AppError::NaoEncontrado { .. } => (StatusCode::NOT_FOUND, e.to_string()),

            // Todo o resto vira 500; o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
