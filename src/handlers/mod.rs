pub mod categorias;
pub mod feirantes;
pub mod produtos;
pub mod vendas;
