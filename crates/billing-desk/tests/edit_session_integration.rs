//! Integration tests for the layout edit workflow.
//!
//! These tests drive billing-desk end-to-end through its public API:
//! `AppState` + host commands + `FileSettingsStore` on a temp directory, so a
//! "restart" is simply building a fresh `AppState` over the same file.

use std::path::PathBuf;
use std::sync::Arc;

use billing_desk::application::layout_store::{LayoutStore, SettingsStore, LAYOUT_SETTINGS_KEY};
use billing_desk::infrastructure::storage::config::AppConfig;
use billing_desk::infrastructure::storage::settings::{FileSettingsStore, MemorySettingsStore};
use billing_desk::infrastructure::ui_bridge::{self, AppState, PointerDownDto, PointerDto};
use panel_core::{DragMode, PanelId, DEFAULT_LAYOUT};
use uuid::Uuid;

fn temp_settings() -> (PathBuf, Arc<FileSettingsStore>) {
    let dir = std::env::temp_dir().join(format!("billing_desk_it_{}", Uuid::new_v4()));
    let store = Arc::new(FileSettingsStore::new(dir.join("settings.json")));
    (dir, store)
}

fn square_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.billing_screen.container_width = 100;
    config.billing_screen.container_height = 100;
    config
}

async fn drag(state: &Arc<AppState>, panel: PanelId, mode: DragMode, from: (f64, f64), to: (f64, f64)) {
    let down = PointerDownDto { panel, mode, x: from.0, y: from.1 };
    assert!(ui_bridge::pointer_down(state.clone(), down).await.success);
    ui_bridge::pointer_move(state.clone(), PointerDto { x: to.0, y: to.1 }).await;
    ui_bridge::pointer_up(state.clone()).await;
}

// ── Persistence across restarts ───────────────────────────────────────────────

#[tokio::test]
async fn test_saved_layout_survives_restart() {
    // Arrange
    let (dir, settings) = temp_settings();
    let state = AppState::with_settings(square_config(), settings.clone()).await;
    ui_bridge::enter_edit(state.clone()).await;
    drag(&state, PanelId::Products, DragMode::ResizeW, (49.0, 50.0), (39.0, 50.0)).await;

    // Act
    assert!(ui_bridge::save_edit(state.clone()).await.success);
    drop(state);
    let restarted = AppState::with_settings(square_config(), settings).await;

    // Assert
    let layout = ui_bridge::get_layout(restarted).await.data.unwrap().layout;
    assert!((layout.products.x - 39.0).abs() < 1e-9);
    assert!((layout.products.width - 61.0).abs() < 1e-9);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_corrupt_settings_file_starts_with_default_layout() {
    let (dir, settings) = temp_settings();
    settings.set(LAYOUT_SETTINGS_KEY, "{\"currentBill\": 3}").await.expect("seed");

    let state = AppState::with_settings(square_config(), settings).await;

    let layout = ui_bridge::get_layout(state).await.data.unwrap().layout;
    assert_eq!(layout, DEFAULT_LAYOUT);
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_cancel_after_many_drags_leaves_file_untouched() {
    // Arrange: persist a custom layout first.
    let (dir, settings) = temp_settings();
    let state = AppState::with_settings(square_config(), settings.clone()).await;
    ui_bridge::enter_edit(state.clone()).await;
    drag(&state, PanelId::CurrentBill, DragMode::ResizeS, (20.0, 60.0), (20.0, 70.0)).await;
    ui_bridge::save_edit(state.clone()).await;
    let before = settings.get_all().await.expect("read");

    // Act
    ui_bridge::enter_edit(state.clone()).await;
    drag(&state, PanelId::Products, DragMode::Move, (70.0, 10.0), (10.0, 10.0)).await;
    drag(&state, PanelId::RecentInvoices, DragMode::ResizeNe, (49.0, 70.0), (60.0, 90.0)).await;
    ui_bridge::cancel_edit(state.clone()).await;

    // Assert
    assert_eq!(settings.get_all().await.expect("read"), before);
    let layout = ui_bridge::get_layout(state).await.data.unwrap().layout;
    assert_eq!(layout.current_bill.height, 70.0);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_reset_during_session_persists_default_and_keeps_editing() {
    let (dir, settings) = temp_settings();
    let state = AppState::with_settings(square_config(), settings.clone()).await;
    ui_bridge::enter_edit(state.clone()).await;
    drag(&state, PanelId::Products, DragMode::ResizeW, (49.0, 50.0), (30.0, 50.0)).await;

    let result = ui_bridge::reset_layout(state.clone()).await.data.unwrap();

    assert!(result.editing);
    assert_eq!(result.layout, DEFAULT_LAYOUT);
    let reloaded = LayoutStore::new(settings).load().await;
    assert_eq!(reloaded, DEFAULT_LAYOUT);
    std::fs::remove_dir_all(&dir).ok();
}

// ── Listener discipline ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_listener_released_on_every_exit_path() {
    let state = AppState::with_settings(square_config(), Arc::new(MemorySettingsStore::new())).await;
    let down = PointerDownDto { panel: PanelId::Products, mode: DragMode::Move, x: 60.0, y: 10.0 };
    ui_bridge::enter_edit(state.clone()).await;

    // pointer-up
    ui_bridge::pointer_down(state.clone(), down).await;
    ui_bridge::pointer_up(state.clone()).await;
    assert!(!state.surface.is_listening());

    // reset mid-drag
    ui_bridge::pointer_down(state.clone(), down).await;
    ui_bridge::reset_layout(state.clone()).await;
    assert!(!state.surface.is_listening());

    // save mid-drag
    ui_bridge::pointer_down(state.clone(), down).await;
    ui_bridge::save_edit(state.clone()).await;
    assert!(!state.surface.is_listening());

    // cancel mid-drag
    ui_bridge::enter_edit(state.clone()).await;
    ui_bridge::pointer_down(state.clone(), down).await;
    ui_bridge::cancel_edit(state.clone()).await;

    let (attaches, detaches) = state.surface.listener_counts();
    assert_eq!(attaches, 4);
    assert_eq!(attaches, detaches);
    assert!(!state.edit_context.is_dragging());
}
