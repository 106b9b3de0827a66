use std::sync::Arc;

use tokio::sync::Mutex;

use crate::board::JobBoard;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one board this process hosts. Handlers finish reading request
    /// bodies before locking, then dispatch a single command under the lock.
    pub board: Arc<Mutex<JobBoard>>,
    pub config: Config,
}

impl AppState {
    pub fn new(board: JobBoard, config: Config) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            config,
        }
    }
}
