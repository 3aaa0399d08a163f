// src/db/armazenamento.rs

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::common::error::AppError;

/// Armazenamento chave/valor de coleções inteiras, como o `localStorage` do
/// navegador: cada chave guarda o JSON de um array completo.
#[async_trait]
pub trait Armazenamento: Send + Sync {
    async fn ler(&self, chave: &str) -> Result<Option<String>, AppError>;

    /// Grava várias chaves como uma unidade.
    async fn gravar_lote(&self, entradas: Vec<(&'static str, String)>) -> Result<(), AppError>;

    async fn gravar(&self, chave: &'static str, conteudo: String) -> Result<(), AppError> {
        self.gravar_lote(vec![(chave, conteudo)]).await
    }
}

// --- Memória ---
#[derive(Default)]
pub struct ArmazenamentoMemoria {
    dados: RwLock<HashMap<String, String>>,
}

impl ArmazenamentoMemoria {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Armazenamento for ArmazenamentoMemoria {
    async fn ler(&self, chave: &str) -> Result<Option<String>, AppError> {
        Ok(self.dados.read().await.get(chave).cloned())
    }

    async fn gravar_lote(&self, entradas: Vec<(&'static str, String)>) -> Result<(), AppError> {
        let mut dados = self.dados.write().await;
        for (chave, conteudo) in entradas {
            dados.insert(chave.to_string(), conteudo);
        }
        Ok(())
    }
}

// --- Arquivos ---
// Um `<chave>.json` por coleção dentro do diretório de dados.
pub struct ArmazenamentoArquivo {
    diretorio: PathBuf,
}

impl ArmazenamentoArquivo {
    pub async fn abrir(diretorio: impl AsRef<Path>) -> Result<Self, AppError> {
        let diretorio = diretorio.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&diretorio).await?;
        tracing::info!("📂 Dados em {}", diretorio.display());
        Ok(Self { diretorio })
    }

    fn caminho(&self, chave: &str) -> PathBuf {
        self.diretorio.join(format!("{chave}.json"))
    }

    fn caminho_temporario(&self, chave: &str) -> PathBuf {
        self.diretorio.join(format!("{chave}.json.tmp"))
    }

    fn caminho_copia(&self, chave: &str) -> PathBuf {
        self.diretorio.join(format!("{chave}.json.bak"))
    }

    async fn limpar(&self, entradas: &[(&'static str, String)]) {
        for (chave, _) in entradas {
            let _ = tokio::fs::remove_file(self.caminho_temporario(chave)).await;
            let _ = tokio::fs::remove_file(self.caminho_copia(chave)).await;
        }
    }

    // Copia o arquivo atual da chave. `false` quando não havia arquivo.
    async fn copiar_atual(&self, chave: &str) -> Result<bool, AppError> {
        match tokio::fs::metadata(self.caminho(chave)).await {
            Ok(meta) if meta.is_file() => {
                tokio::fs::copy(self.caminho(chave), self.caminho_copia(chave)).await?;
                Ok(true)
            }
            Ok(_) => Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    // Desfaz as trocas já feitas: volta a cópia ou apaga o que não existia.
    async fn desfazer(&self, trocadas: &[(&'static str, bool)]) {
        for (chave, tinha_copia) in trocadas {
            let resultado = if *tinha_copia {
                tokio::fs::rename(self.caminho_copia(chave), self.caminho(chave)).await
            } else {
                tokio::fs::remove_file(self.caminho(chave)).await
            };
            if let Err(e) = resultado {
                tracing::error!("Não foi possível restaurar {chave}.json: {}", e);
            }
        }
    }
}

#[async_trait]
impl Armazenamento for ArmazenamentoArquivo {
    async fn ler(&self, chave: &str) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(self.caminho(chave)).await {
            Ok(conteudo) => Ok(Some(conteudo)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn gravar_lote(&self, entradas: Vec<(&'static str, String)>) -> Result<(), AppError> {
        // 1. Escreve os temporários e guarda cópia dos atuais; se algo falhar
        //    aqui, nada foi trocado.
        let mut copias = Vec::with_capacity(entradas.len());
        for (chave, conteudo) in &entradas {
            let preparado = match tokio::fs::write(self.caminho_temporario(chave), conteudo).await {
                Ok(()) => self.copiar_atual(chave).await,
                Err(e) => Err(e.into()),
            };
            match preparado {
                Ok(tinha_copia) => copias.push((*chave, tinha_copia)),
                Err(e) => {
                    self.limpar(&entradas).await;
                    return Err(e);
                }
            }
        }

        // 2. Troca os arquivos (rename é atômico dentro do mesmo diretório).
        //    Uma troca que falha no meio desfaz as anteriores.
        for (i, (chave, _)) in entradas.iter().enumerate() {
            if let Err(e) = tokio::fs::rename(self.caminho_temporario(chave), self.caminho(chave)).await {
                self.desfazer(&copias[..i]).await;
                self.limpar(&entradas).await;
                return Err(e.into());
            }
        }
        self.limpar(&entradas).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn chave_ausente_e_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArmazenamentoArquivo::abrir(dir.path()).await.unwrap();
        assert!(store.ler("produtos").await.unwrap().is_none());

        let memoria = ArmazenamentoMemoria::new();
        assert!(memoria.ler("produtos").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lote_grava_todas_as_chaves_sem_sobrar_temporario() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArmazenamentoArquivo::abrir(dir.path().join("dados")).await.unwrap();

        store
            .gravar_lote(vec![("produtos", "[1]".into()), ("vendas", "[2]".into())])
            .await
            .unwrap();

        assert_eq!(store.ler("produtos").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.ler("vendas").await.unwrap().as_deref(), Some("[2]"));
        assert!(!dir.path().join("dados").join("produtos.json.tmp").exists());
    }

    #[tokio::test]
    async fn troca_que_falha_no_meio_desfaz_as_anteriores() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArmazenamentoArquivo::abrir(dir.path()).await.unwrap();
        store.gravar("produtos", "[0]".into()).await.unwrap();
        // Um diretório no lugar de `vendas.json` faz o segundo rename falhar.
        std::fs::create_dir(dir.path().join("vendas.json")).unwrap();

        let resultado = store
            .gravar_lote(vec![("produtos", "[1]".into()), ("vendas", "[2]".into())])
            .await;

        assert!(matches!(resultado, Err(AppError::Armazenamento(_))));
        assert_eq!(store.ler("produtos").await.unwrap().as_deref(), Some("[0]"));
        for sobra in ["produtos.json.tmp", "produtos.json.bak", "vendas.json.tmp", "vendas.json.bak"] {
            assert!(!dir.path().join(sobra).exists(), "sobrou {sobra}");
        }
    }

    #[tokio::test]
    async fn chave_nova_que_falha_no_meio_nao_fica_criada() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArmazenamentoArquivo::abrir(dir.path()).await.unwrap();
        std::fs::create_dir(dir.path().join("vendas.json")).unwrap();

        let resultado = store
            .gravar_lote(vec![("produtos", "[1]".into()), ("vendas", "[2]".into())])
            .await;

        assert!(resultado.is_err());
        assert!(store.ler("produtos").await.unwrap().is_none());
    }
}
