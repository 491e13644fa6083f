mod accounts;

pub use accounts::{Account, AccountDirectory, DynAccountDirectory, SupabaseAccounts};
