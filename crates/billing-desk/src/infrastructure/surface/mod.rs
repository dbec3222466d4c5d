//! Application surface: the host window's pointer stream.
//!
//! The host forwards every raw pointer event it sees as a [`RawPointerEvent`]
//! to [`ApplicationSurface::dispatch`].  Pointer-down is hit-tested against
//! the current frames to find the grabbed handle; pointer-move is routed to
//! the orchestrator only while the global listener is attached (i.e. while a
//! drag is open); pointer-up always ends any drag, wherever it lands.
//!
//! # Testability
//!
//! The `PointerSurface` trait lets unit tests use [`mock::MockPointerSurface`]
//! to count attach/detach calls without a host window.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use panel_core::{ContainerSize, DragMode, MoveOutcome, PanelId, PointerPosition};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::application::edit_session::{LayoutOrchestrator, SessionError};
use crate::application::pointer::{PointerSurface, SurfaceError};
use crate::application::render::hit_test;

pub mod mock;

/// A raw pointer event in container pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RawPointerEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    ContainerResized { width: f64, height: f64 },
}

/// What a dispatched event did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DispatchOutcome {
    /// The event had no effect.
    Ignored,
    /// A handle was grabbed and a drag started.
    DragStarted { panel: PanelId, mode: DragMode },
    /// The open drag was updated.
    Moved(MoveOutcome),
    /// The open drag ended.
    DragEnded,
    /// The container size was recorded.
    Resized,
}

/// Global pointer listener registry for the host window.
#[derive(Debug, Default)]
pub struct ApplicationSurface {
    listening: AtomicBool,
    attaches: AtomicU64,
    detaches: AtomicU64,
}

impl ApplicationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while the global listener is attached.
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// `(attach, detach)` totals since creation.
    pub fn listener_counts(&self) -> (u64, u64) {
        (
            self.attaches.load(Ordering::Relaxed),
            self.detaches.load(Ordering::Relaxed),
        )
    }

    /// Routes one host pointer event into `orchestrator`.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] from a pointer-down that hit a handle but
    /// could not start a drag.
    pub fn dispatch(
        &self,
        orchestrator: &mut LayoutOrchestrator,
        event: RawPointerEvent,
    ) -> Result<DispatchOutcome, SessionError> {
        trace!(?event, "pointer event");
        match event {
            RawPointerEvent::PointerDown { x, y } => {
                if !orchestrator.is_editing() {
                    return Ok(DispatchOutcome::Ignored);
                }
                let point = PointerPosition::new(x, y);
                let Some((panel, mode)) = hit_test(&orchestrator.frames(), point) else {
                    return Ok(DispatchOutcome::Ignored);
                };
                orchestrator.pointer_down(panel, mode, point)?;
                Ok(DispatchOutcome::DragStarted { panel, mode })
            }
            RawPointerEvent::PointerMove { x, y } => {
                if !self.is_listening() {
                    return Ok(DispatchOutcome::Ignored);
                }
                Ok(orchestrator
                    .pointer_move(PointerPosition::new(x, y))
                    .map_or(DispatchOutcome::Ignored, DispatchOutcome::Moved))
            }
            RawPointerEvent::PointerUp { .. } => {
                let was_dragging = orchestrator.active_panel().is_some();
                orchestrator.pointer_up();
                Ok(if was_dragging {
                    DispatchOutcome::DragEnded
                } else {
                    DispatchOutcome::Ignored
                })
            }
            RawPointerEvent::ContainerResized { width, height } => {
                orchestrator.container_resized(ContainerSize::new(width, height));
                Ok(DispatchOutcome::Resized)
            }
        }
    }
}

impl PointerSurface for ApplicationSurface {
    fn attach_global(&self) -> Result<(), SurfaceError> {
        if self.listening.swap(true, Ordering::AcqRel) {
            return Err(SurfaceError::AlreadyAttached);
        }
        self.attaches.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn detach_global(&self) {
        if self.listening.swap(false, Ordering::AcqRel) {
            self.detaches.fetch_add(1, Ordering::Relaxed);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
