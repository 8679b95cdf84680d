//! Best-effort access to the single countdown record

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::{config::Config, error::StoreError, state::CountdownState};
use super::gist::GistBackend;

/// A place the countdown record can be loaded from and saved to
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn load(&self) -> Result<CountdownState, StoreError>;

    async fn save(&self, state: &CountdownState) -> Result<(), StoreError>;
}

/// In-process backend for local runs and tests
#[derive(Debug, Default)]
pub struct MemoryBackend {
    record: Mutex<Option<CountdownState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a record already stored
    pub fn with_record(state: CountdownState) -> Self {
        Self {
            record: Mutex::new(Some(state)),
        }
    }

    /// The raw stored record, if any
    pub fn record(&self) -> Option<CountdownState> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl StateBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<CountdownState, StoreError> {
        Ok(self.record().unwrap_or_default())
    }

    async fn save(&self, state: &CountdownState) -> Result<(), StoreError> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner()) = Some(*state);
        Ok(())
    }
}

#[async_trait]
impl<B: StateBackend + ?Sized> StateBackend for Arc<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn load(&self) -> Result<CountdownState, StoreError> {
        (**self).load().await
    }

    async fn save(&self, state: &CountdownState) -> Result<(), StoreError> {
        (**self).save(state).await
    }
}

/// The remote store as seen by the countdown service.
///
/// Whether a backend is reachable at all is decided once, at construction.
/// Every backend failure is logged and absorbed: reads fall back to the
/// inactive record and writes are dropped.
#[derive(Clone)]
pub enum RemoteStateStore {
    Configured(Arc<dyn StateBackend>),
    Unconfigured,
}

impl RemoteStateStore {
    /// Wrap a backend
    pub fn configured<B: StateBackend + 'static>(backend: B) -> Self {
        Self::Configured(Arc::new(backend))
    }

    /// Choose the backend from configuration
    pub fn from_config(config: &Config) -> Self {
        if config.in_memory {
            info!("Using in-memory state store");
            return Self::configured(MemoryBackend::new());
        }

        match config.gist_credentials() {
            Some((gist_id, token)) => {
                info!("Using gist state store (gist {}, file {})", gist_id, config.state_file);
                Self::configured(GistBackend::new(
                    &config.github_api,
                    gist_id,
                    token,
                    &config.state_file,
                ))
            }
            None => {
                warn!("GIST_ID or GITHUB_TOKEN not set; countdown will always report inactive");
                Self::Unconfigured
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    /// Read the stored record, or the inactive record if it cannot be read
    pub async fn read(&self) -> CountdownState {
        let backend = match self {
            Self::Configured(backend) => backend,
            Self::Unconfigured => return CountdownState::inactive(),
        };

        match backend.load().await {
            Ok(state) => {
                debug!("Loaded record from {}: {:?}", backend.name(), state);
                state
            }
            Err(e) => {
                warn!("Failed to read state from {}: {}", backend.name(), e);
                CountdownState::inactive()
            }
        }
    }

    /// Persist a record; failures are logged and dropped
    pub async fn write(&self, state: &CountdownState) {
        let backend = match self {
            Self::Configured(backend) => backend,
            Self::Unconfigured => {
                debug!("Store unconfigured, dropping write: {:?}", state);
                return;
            }
        };

        match backend.save(state).await {
            Ok(()) => debug!("Saved record to {}: {:?}", backend.name(), state),
            Err(e) => warn!("Failed to write state to {}: {}", backend.name(), e),
        }
    }
}

impl std::fmt::Debug for RemoteStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured(backend) => write!(f, "Configured({})", backend.name()),
            Self::Unconfigured => write!(f, "Unconfigured"),
        }
    }
}
