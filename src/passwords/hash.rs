use anyhow::Result;

use super::Password;

/// The lowest cost factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// The highest cost factor bcrypt accepts.
pub const MAX_COST: u32 = 31;
/// bcrypt ignores every byte of a password past this length.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// The hash of a user's password.
#[derive(Clone, Debug)]
pub struct Hash(String);

impl Hash {
    /// Construct a new hash from a user's password.
    ///
    /// This is deliberately slow. Callers in an async context should run it on
    /// a blocking thread.
    ///
    /// # Arguments
    ///
    /// * `password` - The user's password.
    /// * `cost` - The bcrypt cost factor. Each increment doubles the work.
    ///
    /// # Returns
    ///
    /// Returns a [`Result`] containing the hashed password if the operation
    /// completed successfully.
    pub fn new(password: &Password, cost: u32) -> Result<Self> {
        let password_hash = bcrypt::hash(password.as_bytes(), cost)?;

        Ok(Self(password_hash))
    }

    /// Determine if the hash value matches a raw password.
    ///
    /// # Arguments
    ///
    /// * `raw_password` - The password to compare the hash to.
    ///
    /// # Returns
    ///
    /// A [`Result`] containing a [`bool`] that indicates if the password
    /// matches the hash.
    pub fn matches_raw_password(&self, raw_password: &str) -> Result<bool> {
        Ok(bcrypt::verify(raw_password, &self.0)?)
    }

    /// Retrieve the hash's string representation in modular crypt format,
    /// for example `$2b$10$...`.
    pub fn value(&self) -> &str {
        &self.0
    }
}
