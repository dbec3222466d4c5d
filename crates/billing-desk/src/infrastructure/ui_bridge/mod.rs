//! Host command bridge: exposes the layout orchestrator to the UI shell.
//!
//! Every command is an async function over the shared [`AppState`] and is the
//! only way the presentation layer touches the billing-screen layout.  This
//! module must NOT be imported by the application or domain layers.
//!
//! # How host commands work (for beginners)
//!
//! The UI (a web view, a native toolkit, or a test) invokes a command by name
//! and receives JSON back:
//! ```js
//! const frames = await invoke("get_frames");
//! ```
//!
//! The host routes `"get_frames"` to [`get_frames`], passing the shared
//! `Arc<AppState>`, and serialises the returned value.
//!
//! # Data Transfer Objects (DTOs)
//!
//! DTOs are plain `Serialize`/`Deserialize` structs with camelCase field names
//! so they read naturally on the JavaScript side.  Domain types that are
//! already JSON-friendly (`LayoutState`, `PanelFrame`, `PanelId`, `DragMode`,
//! `MoveOutcome`, `DispatchOutcome`) are passed through unchanged.
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>`, so every
//! response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.

use std::sync::Arc;

use panel_core::{ContainerSize, DragMode, LayoutState, MoveOutcome, PanelId, PointerPosition};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

use crate::application::{
    edit_session::{EditContext, LayoutOrchestrator},
    layout_store::{LayoutStore, SettingsStore},
    render::PanelFrame,
};
use crate::infrastructure::{
    storage::config::{load_config, settings_file_path, AppConfig, ConfigError},
    storage::settings::FileSettingsStore,
    surface::{ApplicationSurface, DispatchOutcome, RawPointerEvent},
};

// ── Shared application state ──────────────────────────────────────────────────

/// Application state shared between host commands.
///
/// The orchestrator sits behind an async Tokio mutex so concurrent command
/// invocations are serialized; persistence writes are therefore ordered and
/// the last save wins.
pub struct AppState {
    /// Owner of the persisted layout and any open edit session.
    pub orchestrator: Mutex<LayoutOrchestrator>,
    /// The host window's global pointer listener.
    pub surface: Arc<ApplicationSurface>,
    /// The current application configuration.
    pub config: Mutex<AppConfig>,
    /// Lock-free view of the session state for polling UI elements.
    pub edit_context: EditContext,
}

impl AppState {
    /// Initialises application state from the persisted configuration.
    ///
    /// The host must call
    /// [`init_logging(&config.general.log_level)`](crate::infrastructure::logging::init_logging)
    /// before this, or the fallback warning and session logs go nowhere.
    ///
    /// Falls back to defaults if the config file is missing or unreadable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] when no settings path can
    /// be resolved.
    pub async fn new() -> Result<Arc<Self>, ConfigError> {
        let config = load_config().unwrap_or_else(|e| {
            warn!("could not load config, using defaults: {e}");
            AppConfig::default()
        });
        Self::from_config(config).await
    }

    /// Builds state for `config`, storing settings in the configured JSON file.
    ///
    /// # Errors
    ///
    /// See [`AppState::new`].
    pub async fn from_config(config: AppConfig) -> Result<Arc<Self>, ConfigError> {
        let settings = Arc::new(FileSettingsStore::new(settings_file_path(&config)?));
        Ok(Self::with_settings(config, settings).await)
    }

    /// Builds state over an arbitrary settings backend.
    pub async fn with_settings(config: AppConfig, settings: Arc<dyn SettingsStore>) -> Arc<Self> {
        let surface = Arc::new(ApplicationSurface::new());
        let orchestrator = LayoutOrchestrator::mount(
            LayoutStore::new(settings),
            surface.clone(),
            config.billing_screen.container(),
        )
        .await;
        let edit_context = orchestrator.context();

        Arc::new(Self {
            orchestrator: Mutex::new(orchestrator),
            surface,
            config: Mutex::new(config),
            edit_context,
        })
    }
}

// ── Data Transfer Objects (Presentation layer) ────────────────────────────────

/// The layout currently on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDto {
    pub editing: bool,
    pub layout: LayoutState,
}

/// A pointer position in container pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointerDto {
    pub x: f64,
    pub y: f64,
}

/// Pointer-down on a specific handle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerDownDto {
    pub panel: PanelId,
    pub mode: DragMode,
    pub x: f64,
    pub y: f64,
}

/// The configuration values the UI shell reads at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    pub log_level: String,
    pub container_width: u32,
    pub container_height: u32,
    /// `None` when the platform default location is used.
    pub settings_file: Option<String>,
}

/// New container pixel size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContainerDto {
    pub width: f64,
    pub height: f64,
}

/// Unified response wrapper used by host commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

fn layout_dto(orchestrator: &LayoutOrchestrator) -> LayoutDto {
    LayoutDto {
        editing: orchestrator.is_editing(),
        layout: *orchestrator.displayed(),
    }
}

// ── Host commands ─────────────────────────────────────────────────────────────

/// Returns the layout currently on screen.
///
/// # Example (frontend)
/// ```ts
/// const { editing, layout } = (await invoke<CommandResult<LayoutDto>>('get_layout')).data;
/// ```
pub async fn get_layout(state: Arc<AppState>) -> CommandResult<LayoutDto> {
    let orchestrator = state.orchestrator.lock().await;
    CommandResult::ok(layout_dto(&orchestrator))
}

/// Returns the current application configuration.
pub async fn get_config(state: Arc<AppState>) -> CommandResult<ConfigDto> {
    let cfg = state.config.lock().await;
    CommandResult::ok(ConfigDto {
        log_level: cfg.general.log_level.clone(),
        container_width: cfg.billing_screen.container_width,
        container_height: cfg.billing_screen.container_height,
        settings_file: cfg
            .storage
            .settings_file
            .as_ref()
            .map(|p| p.display().to_string()),
    })
}

/// Returns the panel frames to paint, in paint order.
pub async fn get_frames(state: Arc<AppState>) -> CommandResult<Vec<PanelFrame>> {
    let orchestrator = state.orchestrator.lock().await;
    CommandResult::ok(orchestrator.frames())
}

/// Returns whether an edit session is open.  Does not take the orchestrator lock.
pub async fn is_editing(state: Arc<AppState>) -> CommandResult<bool> {
    CommandResult::ok(state.edit_context.is_editing())
}

pub async fn enter_edit(state: Arc<AppState>) -> CommandResult<()> {
    let mut orchestrator = state.orchestrator.lock().await;
    match orchestrator.enter_edit() {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Commits the working layout.  Succeeds even if the settings write fails.
pub async fn save_edit(state: Arc<AppState>) -> CommandResult<()> {
    let mut orchestrator = state.orchestrator.lock().await;
    match orchestrator.save_edit().await {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn cancel_edit(state: Arc<AppState>) -> CommandResult<()> {
    let mut orchestrator = state.orchestrator.lock().await;
    match orchestrator.cancel_edit() {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Restores and persists the default layout; returns it.
pub async fn reset_layout(state: Arc<AppState>) -> CommandResult<LayoutDto> {
    let mut orchestrator = state.orchestrator.lock().await;
    orchestrator.reset_to_default().await;
    CommandResult::ok(layout_dto(&orchestrator))
}

/// Starts dragging the handle the UI reported as grabbed.
pub async fn pointer_down(state: Arc<AppState>, down: PointerDownDto) -> CommandResult<()> {
    let mut orchestrator = state.orchestrator.lock().await;
    match orchestrator.pointer_down(down.panel, down.mode, PointerPosition::new(down.x, down.y)) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Applies a pointer-move; `data` is `null` when no drag is open.
pub async fn pointer_move(
    state: Arc<AppState>,
    pointer: PointerDto,
) -> CommandResult<Option<MoveOutcome>> {
    let mut orchestrator = state.orchestrator.lock().await;
    CommandResult::ok(orchestrator.pointer_move(PointerPosition::new(pointer.x, pointer.y)))
}

pub async fn pointer_up(state: Arc<AppState>) -> CommandResult<()> {
    let mut orchestrator = state.orchestrator.lock().await;
    orchestrator.pointer_up();
    CommandResult::ok(())
}

/// Records the container's new pixel size.  Negative or non-finite sizes are rejected.
pub async fn resize_container(state: Arc<AppState>, size: ContainerDto) -> CommandResult<()> {
    if !(size.width.is_finite() && size.height.is_finite()) || size.width < 0.0 || size.height < 0.0
    {
        return CommandResult::err(format!(
            "invalid container size {}x{}",
            size.width, size.height
        ));
    }
    let mut orchestrator = state.orchestrator.lock().await;
    orchestrator.container_resized(ContainerSize::new(size.width, size.height));
    CommandResult::ok(())
}

/// Routes a raw host pointer event through the application surface.
///
/// Hosts that cannot tell which handle was grabbed send raw events here and
/// let hit-testing decide.
pub async fn dispatch_pointer_event(
    state: Arc<AppState>,
    event: RawPointerEvent,
) -> CommandResult<DispatchOutcome> {
    let mut orchestrator = state.orchestrator.lock().await;
    match state.surface.dispatch(&mut orchestrator, event) {
        Ok(outcome) => CommandResult::ok(outcome),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
