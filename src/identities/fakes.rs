//! In-memory collaborators that record how they were called.

use std::sync::Mutex;

use anyhow::{anyhow, bail};
use async_trait::async_trait;

use crate::{
    email::clients::{EmailClient, Message},
    repos::{Account, AccountDirectory},
};

#[derive(Default)]
pub(crate) struct FakeDirectory {
    pub(crate) accounts: Vec<(String, String)>,
    pub(crate) fail_lookup: bool,
    pub(crate) fail_update: bool,
    pub(crate) lookups: Mutex<Vec<String>>,
    pub(crate) updates: Mutex<Vec<(String, String)>>,
}

impl FakeDirectory {
    pub(crate) fn with_account(email: &str, id: &str) -> Self {
        Self {
            accounts: vec![(email.to_owned(), id.to_owned())],
            ..Default::default()
        }
    }

    pub(crate) fn updates(&self) -> Vec<(String, String)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountDirectory for FakeDirectory {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        self.lookups.lock().unwrap().push(email.to_owned());

        if self.fail_lookup {
            bail!("connection refused");
        }

        Ok(self
            .accounts
            .iter()
            .find(|(account_email, _)| account_email == email)
            .map(|(_, id)| Account { id: id.clone() }))
    }

    async fn update_credential_hash(&self, account_id: &str, hash: &str) -> anyhow::Result<()> {
        if self.fail_update {
            bail!("permission denied for table users");
        }

        self.updates
            .lock()
            .unwrap()
            .push((account_id.to_owned(), hash.to_owned()));

        Ok(())
    }
}

#[derive(Clone)]
pub(crate) struct SentMessage {
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) subject: String,
    pub(crate) text: String,
    pub(crate) domain: String,
}

#[derive(Default)]
pub(crate) struct FakeMailer {
    pub(crate) fail: bool,
    pub(crate) sent: Mutex<Vec<SentMessage>>,
}

impl FakeMailer {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailClient for FakeMailer {
    async fn send(&self, message: &Message, domain: &str) -> anyhow::Result<()> {
        if self.fail {
            return Err(anyhow!("Mailgun responded with 401 Unauthorized: Forbidden"));
        }

        self.sent.lock().unwrap().push(SentMessage {
            from: message.from.clone(),
            to: message.to.clone(),
            subject: message.subject.clone(),
            text: message.text.clone(),
            domain: domain.to_owned(),
        });

        Ok(())
    }
}

