//! Resets a user's password in a Supabase project and emails the new password
//! to them through Mailgun.
//!
//! The reset is an immediate, administrator triggered overwrite. There are no
//! reset links or tokens involved.

pub mod cli;
pub mod email;
pub mod http_err;
pub mod identities;
pub mod passwords;
#[cfg(test)]
mod recording_server;
pub mod remote_err;
pub mod repos;
pub mod server;
pub mod supabase;
