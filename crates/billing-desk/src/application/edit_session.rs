//! LayoutOrchestrator: owns the persisted layout, the edit session, and drags.
//!
//! # Persisted vs. working layout (for beginners)
//!
//! Outside an edit session the screen is drawn from the *persisted* layout:
//! the one last saved to settings.  `enter_edit` copies it into a *working*
//! layout, and every drag mutates only that copy.  `save_edit` commits the
//! copy (it becomes the persisted layout and is written to settings);
//! `cancel_edit` throws it away.  Nothing is ever partially merged.
//!
//! # Edit context
//!
//! Parts of the UI far from the billing screen (for example a settings menu
//! entry) need to know whether an edit session is open.  Rather than a global
//! flag they receive an [`EditContext`]: a cheap cloneable handle created by
//! the orchestrator and updated only by it.
//!
//! # Side effects
//!
//! Only [`LayoutOrchestrator::save_edit`] and
//! [`LayoutOrchestrator::reset_to_default`] touch storage.  Everything else is
//! in-memory and synchronous.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use panel_core::{
    ContainerSize, DragController, DragError, DragMode, LayoutState, MoveOutcome, PanelId,
    PointerPosition, DEFAULT_LAYOUT,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::layout_store::LayoutStore;
use super::pointer::{PointerCapture, PointerSurface, SurfaceError};
use super::render::{render_frames, PanelFrame, RenderMode};

/// Errors returned when the orchestrator is driven out of order.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// `enter_edit` was called while a session is already open.
    #[error("an edit session is already open")]
    AlreadyEditing,

    /// The operation requires an open edit session.
    #[error("no edit session is open")]
    NotEditing,

    /// The drag state machine rejected the event.
    #[error(transparent)]
    Drag(#[from] DragError),

    /// The global pointer listener could not be attached.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

#[derive(Debug, Default)]
struct EditFlags {
    editing: AtomicBool,
    dragging: AtomicBool,
}

/// Read-only view of the orchestrator's session state for distant UI code.
#[derive(Debug, Clone, Default)]
pub struct EditContext {
    flags: Arc<EditFlags>,
}

impl EditContext {
    /// `true` while an edit session is open.
    pub fn is_editing(&self) -> bool {
        self.flags.editing.load(Ordering::Acquire)
    }

    /// `true` while a panel is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.flags.dragging.load(Ordering::Acquire)
    }

    fn set_editing(&self, value: bool) {
        self.flags.editing.store(value, Ordering::Release);
    }

    fn set_dragging(&self, value: bool) {
        self.flags.dragging.store(value, Ordering::Release);
    }
}

/// An open edit session: the working copy plus a correlation id for logs.
#[derive(Debug)]
struct EditSession {
    id: Uuid,
    working: LayoutState,
}

/// Top-level coordinator of the billing-screen layout.
pub struct LayoutOrchestrator {
    store: LayoutStore,
    surface: Arc<dyn PointerSurface>,
    persisted: LayoutState,
    session: Option<EditSession>,
    drag: DragController,
    capture: Option<PointerCapture>,
    container: ContainerSize,
    context: EditContext,
}

impl LayoutOrchestrator {
    /// Mounts the orchestrator, loading the persisted layout from `store`.
    pub async fn mount(
        store: LayoutStore,
        surface: Arc<dyn PointerSurface>,
        container: ContainerSize,
    ) -> Self {
        let persisted = store.load().await;
        Self::with_layout(store, surface, container, persisted)
    }

    /// Builds an orchestrator around an already-loaded layout.
    pub fn with_layout(
        store: LayoutStore,
        surface: Arc<dyn PointerSurface>,
        container: ContainerSize,
        persisted: LayoutState,
    ) -> Self {
        Self {
            store,
            surface,
            persisted,
            session: None,
            drag: DragController::new(),
            capture: None,
            container,
            context: EditContext::default(),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Returns a handle that reports this orchestrator's session state.
    pub fn context(&self) -> EditContext {
        self.context.clone()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn persisted(&self) -> &LayoutState {
        &self.persisted
    }

    /// The working copy, while a session is open.
    pub fn working(&self) -> Option<&LayoutState> {
        self.session.as_ref().map(|s| &s.working)
    }

    /// The layout currently on screen: working in edit mode, persisted otherwise.
    pub fn displayed(&self) -> &LayoutState {
        self.working().unwrap_or(&self.persisted)
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.is_editing() {
            RenderMode::Edit
        } else {
            RenderMode::View
        }
    }

    pub fn active_panel(&self) -> Option<PanelId> {
        self.drag.active_panel()
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    /// Frames for the current mode, in paint order.
    pub fn frames(&self) -> Vec<PanelFrame> {
        render_frames(
            self.displayed(),
            self.render_mode(),
            self.container,
            self.active_panel(),
        )
    }

    // ── Session lifecycle ─────────────────────────────────────────────────────

    /// Opens an edit session on a copy of the persisted layout.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyEditing`] if a session is open.
    pub fn enter_edit(&mut self) -> Result<(), SessionError> {
        if self.session.is_some() {
            return Err(SessionError::AlreadyEditing);
        }
        let session = EditSession {
            id: Uuid::new_v4(),
            working: self.persisted,
        };
        info!(session = %session.id, "layout edit session opened");
        self.session = Some(session);
        self.context.set_editing(true);
        Ok(())
    }

    /// Commits the working layout and closes the session.
    ///
    /// A failed write is logged by the store; the session closes regardless.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotEditing`] if no session is open.
    pub async fn save_edit(&mut self) -> Result<(), SessionError> {
        let session = self.close_session().ok_or(SessionError::NotEditing)?;
        self.persisted = session.working;
        self.store.save(&self.persisted).await;
        info!(session = %session.id, "layout edit session saved");
        Ok(())
    }

    /// Discards the working layout and closes the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotEditing`] if no session is open.
    pub fn cancel_edit(&mut self) -> Result<(), SessionError> {
        let session = self.close_session().ok_or(SessionError::NotEditing)?;
        info!(session = %session.id, "layout edit session cancelled");
        Ok(())
    }

    /// Replaces the persisted layout (and the working copy, if a session is
    /// open) with [`DEFAULT_LAYOUT`] and persists it immediately.
    pub async fn reset_to_default(&mut self) {
        self.finish_drag();
        if let Some(session) = self.session.as_mut() {
            session.working = DEFAULT_LAYOUT;
        }
        self.persisted = DEFAULT_LAYOUT;
        self.store.save(&self.persisted).await;
        info!(editing = self.is_editing(), "layout reset to default");
    }

    /// Releases every transient resource; called when the hosting view goes away.
    ///
    /// An open session stays open so the host can still save or cancel it.
    pub fn teardown(&mut self) {
        if self.finish_drag() {
            warn!("hosting view torn down during a drag; drag ended");
        }
    }

    // ── Pointer events ────────────────────────────────────────────────────────

    /// Starts dragging `panel` with `mode` from `pointer`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotEditing`] outside a session,
    /// [`SessionError::Drag`] if a drag is already open, and
    /// [`SessionError::Surface`] if the global listener cannot be attached.
    pub fn pointer_down(
        &mut self,
        panel: PanelId,
        mode: DragMode,
        pointer: PointerPosition,
    ) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotEditing)?;
        if let Some(open) = self.drag.active_panel() {
            return Err(DragError::AlreadyDragging(open).into());
        }

        let capture = PointerCapture::acquire(Arc::clone(&self.surface))?;
        self.drag.start(&mut session.working, panel, mode, pointer)?;
        self.capture = Some(capture);
        self.context.set_dragging(true);
        Ok(())
    }

    /// Applies a pointer-move to the working layout.
    ///
    /// Returns `None` when no drag is open; stray moves are ignored.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> Option<MoveOutcome> {
        let session = self.session.as_mut()?;
        match self.drag.move_to(&mut session.working, pointer, self.container) {
            Ok(outcome) => Some(outcome),
            Err(DragError::NotDragging) => None,
            Err(e) => {
                warn!("unexpected drag error on pointer move: {e}");
                None
            }
        }
    }

    /// Ends any open drag and releases the global listener.
    pub fn pointer_up(&mut self) {
        self.finish_drag();
    }

    /// Records the container's current pixel size.
    pub fn container_resized(&mut self, container: ContainerSize) {
        debug!(width = container.width, height = container.height, "container resized");
        self.container = container;
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Ends the drag, if any; returns `true` when one was open.
    fn finish_drag(&mut self) -> bool {
        let ended = self.drag.end().is_some();
        if let Some(capture) = self.capture.take() {
            capture.release();
        }
        self.context.set_dragging(false);
        ended
    }

    fn close_session(&mut self) -> Option<EditSession> {
        let session = self.session.take()?;
        self.finish_drag();
        self.context.set_editing(false);
        Some(session)
    }
}

impl Drop for LayoutOrchestrator {
    fn drop(&mut self) {
        self.finish_drag();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
