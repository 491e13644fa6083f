use std::fmt::Debug;

use rand::{thread_rng, Rng};

/// Characters a generated password is drawn from.
pub const PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()";

/// A plaintext password.
///
/// The value is only kept long enough to hash it and to put it in the
/// notification sent to its owner.
pub struct Password(String);

impl Password {
    /// Generate a new random password.
    ///
    /// Each character is drawn uniformly from [`PASSWORD_ALPHABET`] using the
    /// thread-local RNG, which is seeded from the operating system.
    ///
    /// # Arguments
    ///
    /// * `length` - The number of characters in the password.
    pub fn generate(length: usize) -> Self {
        let mut rng = thread_rng();

        let password = (0..length)
            .map(|_| char::from(PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())]))
            .collect();

        Self(password)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't include the raw password in debug output.
        f.debug_tuple("Password").field(&"*".repeat(8)).finish()
    }
}
