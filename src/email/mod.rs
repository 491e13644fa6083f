pub mod clients;
pub mod templates;
