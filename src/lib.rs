use std::sync::Arc;

pub mod config;
pub mod errors;
pub mod lookup;
pub mod models;
pub mod routes;
pub mod rpc;
pub mod sessions;
pub mod ui;
pub mod utils;

use config::Config;
use rpc::{HttpTransport, RpcClient, TransactionCountSource};
use sessions::SessionStore;

pub struct AppState {
    pub config: Config,
    pub source: Arc<dyn TransactionCountSource>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn TransactionCountSource>) -> Self {
        let sessions = Arc::new(SessionStore::new(config.session_ttl));
        Self {
            config,
            source,
            sessions,
        }
    }

    /// State backed by the real JSON-RPC endpoint from `config`.
    pub fn from_config(config: Config) -> Self {
        let client = RpcClient::new(HttpTransport::new(config.rpc_url.clone()));
        Self::new(config, Arc::new(client))
    }
}
