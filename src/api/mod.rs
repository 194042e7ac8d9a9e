pub mod bitbank;
pub mod fgi;

pub use bitbank::BitbankClient;
pub use fgi::FgiClient;
