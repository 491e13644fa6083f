use std::sync::Arc;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{remote_err::ensure_success, supabase::SupabaseConnection};

/// A user account held by the account directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub id: String,
}

pub type DynAccountDirectory = Arc<dyn AccountDirectory + Send + Sync>;

/// The system of record for user accounts and their credential hashes.
#[async_trait]
pub trait AccountDirectory {
    /// Find the account registered with an email address.
    ///
    /// # Arguments
    ///
    /// * `email` - The address to search for. This must match exactly.
    ///
    /// # Returns
    ///
    /// An [`anyhow::Result`] containing the account, or [`None`] if no account
    /// uses the address.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>>;

    /// Overwrite the credential hash stored for an account.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The ID of the account to update.
    /// * `hash` - The new credential hash.
    async fn update_credential_hash(&self, account_id: &str, hash: &str) -> anyhow::Result<()>;
}

/// Account IDs may be stored as text (UUIDs) or as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum AccountId {
    Text(String),
    Integer(i64),
}

#[derive(Deserialize)]
struct AccountRow {
    id: AccountId,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        let id = match row.id {
            AccountId::Text(id) => id,
            AccountId::Integer(id) => id.to_string(),
        };

        Self { id }
    }
}

#[derive(Serialize)]
struct CredentialUpdate<'a> {
    password: &'a str,
}

/// A Supabase table exposed through PostgREST that stores accounts in `id`,
/// `email`, and `password` columns.
#[derive(Clone)]
pub struct SupabaseAccounts {
    connection: SupabaseConnection,
    table: String,
}

impl SupabaseAccounts {
    pub fn new(connection: SupabaseConnection, table: &str) -> Self {
        Self {
            connection,
            table: table.to_owned(),
        }
    }
}

fn single_account(rows: Vec<AccountRow>) -> anyhow::Result<Option<Account>> {
    let row_count = rows.len();
    let mut rows = rows.into_iter();

    match (rows.next(), row_count) {
        (None, _) => Ok(None),
        (Some(row), 1) => Ok(Some(row.into())),
        (Some(_), count) => bail!("Expected a single account but found {}.", count),
    }
}

#[async_trait]
impl AccountDirectory for SupabaseAccounts {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        let url = self.connection.table_url(&self.table);

        let response = self
            .connection
            .get(&url)
            .query(&[("select", "id".to_owned()), ("email", format!("eq.{}", email))])
            .send()
            .await
            .context("Failed to query accounts.")?;

        let rows: Vec<AccountRow> = ensure_success("Supabase", response)
            .await?
            .json()
            .await
            .context("Failed to parse account rows.")?;

        single_account(rows)
    }

    async fn update_credential_hash(&self, account_id: &str, hash: &str) -> anyhow::Result<()> {
        let url = self.connection.table_url(&self.table);

        // PostgREST answers a PATCH that matches nothing with success, so the
        // updated rows are requested back to detect an account that vanished
        // after the lookup.
        let response = self
            .connection
            .patch(&url)
            .query(&[
                ("select", "id".to_owned()),
                ("id", format!("eq.{}", account_id)),
            ])
            .header("Prefer", "return=representation")
            .json(&CredentialUpdate { password: hash })
            .send()
            .await
            .context("Failed to update account.")?;

        let rows: Vec<AccountRow> = ensure_success("Supabase", response)
            .await?
            .json()
            .await
            .context("Failed to parse updated account rows.")?;

        if rows.is_empty() {
            bail!("No account with ID {} was updated.", account_id);
        }

        Ok(())
    }
}
