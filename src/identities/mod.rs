pub mod config;
pub mod domain;
#[cfg(test)]
pub(crate) mod fakes;
pub mod http;
pub mod services;
