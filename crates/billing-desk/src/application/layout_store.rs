//! Layout Store: loads and saves the persisted billing-screen layout.
//!
//! The layout is kept as one JSON blob under [`LAYOUT_SETTINGS_KEY`] in the
//! application's key-value settings.  The store never fails towards its
//! caller: an absent, unreadable, or invalid record yields
//! [`DEFAULT_LAYOUT`], and a failed write is logged and dropped.  Layout is
//! cosmetic state, so a lost write costs nothing more than a retry on the
//! next save.
//!
//! # Architecture
//!
//! The store depends only on the [`SettingsStore`] trait.  The JSON-file and
//! in-memory backends live in `infrastructure::storage::settings`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use panel_core::{LayoutError, LayoutState, DEFAULT_LAYOUT};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Settings key the layout record is stored under.
pub const LAYOUT_SETTINGS_KEY: &str = "billing_panel_layout";

/// Errors reported by a settings backend.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document could not be parsed or written as JSON.
    #[error("settings document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused the request for another reason.
    #[error("settings backend unavailable: {0}")]
    Unavailable(String),
}

/// Key-value settings collaborator.
///
/// The production implementation is a JSON file; tests use an in-memory map
/// or a `mockall` mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns every stored setting.
    async fn get_all(&self) -> Result<HashMap<String, String>, SettingsError>;

    /// Inserts or replaces one setting.
    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Why a persisted record was discarded in favour of the default.
#[derive(Debug, Error)]
pub enum LayoutRecordError {
    /// The record is not a JSON object with exactly the three panel keys.
    #[error("malformed layout record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The record parsed but breaks a layout invariant.
    #[error("invalid layout record: {0}")]
    Invalid(#[from] LayoutError),
}

/// Parses and validates a persisted layout record.
///
/// # Errors
///
/// Returns [`LayoutRecordError::Malformed`] for JSON or shape errors and
/// [`LayoutRecordError::Invalid`] when an invariant does not hold.
pub fn decode_layout(raw: &str) -> Result<LayoutState, LayoutRecordError> {
    let layout: LayoutState = serde_json::from_str(raw)?;
    layout.validate()?;
    Ok(layout)
}

/// Serializes a layout into its persisted record form.
///
/// # Errors
///
/// Only fails if `serde_json` cannot represent a value, which does not happen
/// for finite layouts.
pub fn encode_layout(layout: &LayoutState) -> Result<String, serde_json::Error> {
    serde_json::to_string(layout)
}

/// Owns reading and writing the canonical layout record.
#[derive(Clone)]
pub struct LayoutStore {
    settings: Arc<dyn SettingsStore>,
}

impl LayoutStore {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Loads the persisted layout, falling back to [`DEFAULT_LAYOUT`].
    pub async fn load(&self) -> LayoutState {
        let settings = match self.settings.get_all().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("could not read settings, using default layout: {e}");
                return DEFAULT_LAYOUT;
            }
        };

        let Some(raw) = settings.get(LAYOUT_SETTINGS_KEY) else {
            debug!("no persisted layout found, using default layout");
            return DEFAULT_LAYOUT;
        };

        match decode_layout(raw) {
            Ok(layout) => {
                info!("loaded persisted panel layout");
                layout
            }
            Err(e) => {
                warn!("discarding persisted layout: {e}");
                DEFAULT_LAYOUT
            }
        }
    }

    /// Writes `layout` as the persisted record.  Failures are logged only.
    pub async fn save(&self, layout: &LayoutState) {
        if let Err(e) = self.try_save(layout).await {
            error!("failed to persist panel layout: {e}");
        }
    }

    async fn try_save(&self, layout: &LayoutState) -> Result<(), SettingsError> {
        let raw = encode_layout(layout)?;
        self.settings.set(LAYOUT_SETTINGS_KEY, &raw).await?;
        debug!(bytes = raw.len(), "panel layout persisted");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
