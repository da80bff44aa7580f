//! Application state wiring the adapters into one controller.
//!
//! The controller is generic over its ports; AppState pins it to the infra
//! implementations and puts it behind a `tokio::sync::Mutex` so the CLI and
//! the HTTP handlers drive the same instance.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use chatgate_core::controller::ChatController;
use chatgate_infra::config::load_app_config;
use chatgate_infra::filesystem::{resolve_data_dir, session_path};
use chatgate_infra::http::build_http_client;
use chatgate_infra::identity::HostedIdentityClient;
use chatgate_infra::secret::{ServiceCredentials, load_credentials, read_greeting};
use chatgate_infra::session::FileSessionStore;
use chatgate_infra::webhook::WebhookDispatcher;
use chatgate_types::config::AppConfig;

/// Controller pinned to the concrete adapters.
pub type ConcreteController =
    ChatController<HostedIdentityClient, FileSessionStore, WebhookDispatcher>;

/// Shared application state.
///
/// Cheap to clone; used by both CLI commands and REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub session_path: PathBuf,
    /// Optional chat title from `greeting.txt`.
    pub greeting: Option<String>,
    pub controller: Arc<Mutex<ConcreteController>>,
}

impl AppState {
    /// Resolve the data dir, read config and secrets, wire the adapters.
    ///
    /// Missing secrets are fatal; everything else falls back to defaults.
    pub async fn init(data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.unwrap_or_else(resolve_data_dir);
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;
        let credentials = load_credentials(&config.secrets_dir).await?;
        let greeting = read_greeting(&config.secrets_dir).await;

        Self::from_parts(config, data_dir, credentials, greeting)
    }

    pub fn from_parts(
        config: AppConfig,
        data_dir: PathBuf,
        credentials: ServiceCredentials,
        greeting: Option<String>,
    ) -> anyhow::Result<Self> {
        let http = build_http_client(Duration::from_secs(config.request_timeout_secs))?;
        let session_path = session_path(&config, &data_dir);

        let identity = HostedIdentityClient::new(
            http.clone(),
            credentials.identity_url,
            credentials.identity_key,
        );
        let store = FileSessionStore::new(&session_path);
        let dispatcher = WebhookDispatcher::new(http, credentials.webhook_url);
        let controller = ChatController::new(Arc::new(identity), store, dispatcher);

        tracing::debug!(
            data_dir = %data_dir.display(),
            session = %session_path.display(),
            "application state ready"
        );

        Ok(Self {
            config: Arc::new(config),
            data_dir,
            session_path,
            greeting,
            controller: Arc::new(Mutex::new(controller)),
        })
    }

    /// Heading for the chat view: the greeting file, else a default.
    pub fn title(&self) -> &str {
        self.greeting.as_deref().unwrap_or("AI Chat")
    }
}
