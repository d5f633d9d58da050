//! Remote board server client for pushing reorder payloads.
//!
//! After a successful local move the CLI pushes the complete new order of
//! the affected scope to the configured board server. Payloads always carry
//! every item in scope (all columns of the board, or every task across all
//! its columns), so the server can apply the batch atomically and
//! concurrent clients converge on whichever push lands last.
//!
//! A failed push is reported and nothing is rolled back locally; the local
//! database stays the source of truth and `kanbo sync` re-pushes the
//! current order.

use crate::libs::config::ConfigModule;
use crate::libs::messages::Message;
use crate::libs::ordering::{ReorderColumnsRequest, ReorderTasksRequest};
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

const COLUMNS_REORDER_URL: &str = "columns/reorder";
const TASKS_REORDER_URL: &str = "tasks/reorder";

/// Error body returned by the board server on rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the board server's reorder endpoints.
///
/// The client is stateless; authentication is a static bearer token from
/// the remote configuration, sent with every request.
#[derive(Debug)]
pub struct SyncClient {
    client: Client,
    config: RemoteConfig,
}

impl SyncClient {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    /// Pushes the complete column order of a board.
    pub async fn push_column_order(&self, payload: &ReorderColumnsRequest) -> Result<()> {
        self.post(COLUMNS_REORDER_URL, payload).await
    }

    /// Pushes the complete flattened task order of a board.
    pub async fn push_task_order(&self, payload: &ReorderTasksRequest) -> Result<()> {
        self.post(TASKS_REORDER_URL, payload).await
    }

    /// POSTs a JSON payload and maps non-success statuses to errors.
    ///
    /// The server responds with an `{"error": ...}` body on rejection; that
    /// message is surfaced verbatim when present, otherwise the HTTP status
    /// reason is used.
    async fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<()> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.config.auth_token))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        Err(anyhow::anyhow!(Message::RemoteStatusError(status.as_u16(), detail)))
    }
}

/// Configuration for the remote board server.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RemoteConfig {
    /// Base URL of the board server; endpoint paths are appended to it.
    pub api_url: String,
    /// Bearer token sent with every push.
    pub auth_token: String,
}

impl RemoteConfig {
    /// Returns the configuration module metadata shown in the setup wizard.
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "remote".to_string(),
            name: Message::ConfigModuleRemote.to_string(),
        }
    }

    /// Runs the interactive setup for the remote module, pre-filling
    /// existing values as defaults.
    pub fn init(config: &Option<RemoteConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            api_url: "".to_string(),
            auth_token: "".to_string(),
        });

        msg_print!(Message::ConfigModuleRemote);

        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRemoteApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            auth_token: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRemoteAuthToken.to_string())
                .default(config.auth_token)
                .interact_text()?,
        })
    }
}
