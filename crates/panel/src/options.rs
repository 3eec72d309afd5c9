//! Panel options persisted as a small JSON blob.
//!
//! The classic three-field settings form: a flag, a short text field and a
//! long text field. The blob is rewritten wholesale on every save; a
//! missing or corrupt file falls back to defaults so the panel always
//! boots.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

/// Longest accepted support notice, in characters.
pub const MAX_NOTICE_CHARS: usize = 1000;

/// Longest accepted support email address, in characters (RFC 5321 limit).
pub const MAX_EMAIL_CHARS: usize = 254;

/// Admin-editable panel options.
///
/// Unknown fields in the persisted blob are ignored and missing ones take
/// their defaults, so the file survives option additions and removals
/// across versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Render outbound deep-links into the WMP portal.
    pub portal_links: bool,
    /// Address behind the pre-filled support link.
    pub support_email: String,
    /// Short text shown in the web-support contact box.
    pub support_notice: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            portal_links: true,
            support_email: "webmaster@fau.de".to_string(),
            support_notice: "You need help with your website? Please contact us!".to_string(),
        }
    }
}

/// Store owning the options blob on disk.
///
/// Reads are served from memory; saves rewrite the file and then update
/// the in-memory copy. Concurrent saves are last-writer-wins, which is
/// fine for a single-admin panel.
#[derive(Debug)]
pub struct OptionsStore {
    path: PathBuf,
    current: RwLock<PanelOptions>,
}

impl OptionsStore {
    /// Load options from `path`.
    ///
    /// A missing file is the normal first-boot state and yields defaults
    /// silently; an unreadable or corrupt file yields defaults with a
    /// warning.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let current = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(options) => options,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Options file is corrupt, using defaults"
                    );
                    PanelOptions::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PanelOptions::default(),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Options file is unreadable, using defaults"
                );
                PanelOptions::default()
            }
        };

        Self {
            path,
            current: RwLock::new(current),
        }
    }

    /// Current options snapshot.
    pub async fn get(&self) -> PanelOptions {
        self.current.read().await.clone()
    }

    /// Persist `options` and make them current.
    ///
    /// The in-memory copy is only updated after the file write succeeds,
    /// so a failed save leaves the previous options in effect.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the blob cannot be written.
    pub async fn save(&self, options: PanelOptions) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&options).map_err(std::io::Error::from)?;
        tokio::fs::write(&self.path, json).await?;

        *self.current.write().await = options;
        Ok(())
    }
}
