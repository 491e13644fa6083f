/// Generating and hashing user passwords.
mod hash;
mod password;

pub use hash::{Hash, MAX_COST, MAX_PASSWORD_BYTES, MIN_COST};
pub use password::{Password, PASSWORD_ALPHABET};
