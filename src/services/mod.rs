pub mod cadastro_service;
pub mod estoque;
pub mod venda_service;

pub use cadastro_service::CadastroService;
pub use venda_service::VendaService;
