pub mod armazenamento;
pub use armazenamento::{Armazenamento, ArmazenamentoArquivo, ArmazenamentoMemoria};
pub mod colecao_repo;
pub use colecao_repo::ColecaoRepository;
