use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// A connection to a Supabase project's REST interface.
///
/// The key must be the project's service-role key. It bypasses row level
/// security and must never be handed to a browser.
#[derive(Clone)]
pub struct SupabaseConnection {
    client: reqwest::Client,
    endpoint: String,
    service_key: SecretString,
}

impl SupabaseConnection {
    pub fn new(client: reqwest::Client, endpoint: &str, service_key: SecretString) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            service_key,
        }
    }

    /// The PostgREST URL of a table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.endpoint, table)
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.authorize(self.client.get(url))
    }

    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.authorize(self.client.patch(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose_secret();

        request.header("apikey", key).bearer_auth(key)
    }
}
