//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::PanelConfig;
use crate::options::OptionsStore;
use crate::wmp::{WmpClient, WmpError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PanelConfig,
    wmp: WmpClient,
    options: OptionsStore,
}

impl AppState {
    /// Create the application state.
    ///
    /// # Errors
    ///
    /// Returns an error when the WMP HTTP client cannot be constructed.
    pub fn new(config: PanelConfig, options: OptionsStore) -> Result<Self, WmpError> {
        let wmp = WmpClient::new(&config.wmp)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                wmp,
                options,
            }),
        })
    }

    /// Panel configuration.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    /// WMP config API client.
    #[must_use]
    pub fn wmp(&self) -> &WmpClient {
        &self.inner.wmp
    }

    /// Persisted panel options.
    #[must_use]
    pub fn options(&self) -> &OptionsStore {
        &self.inner.options
    }
}
