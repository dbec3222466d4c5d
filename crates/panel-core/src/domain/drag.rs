//! Drag state machine: turns pointer gestures into panel rectangle changes.
//!
//! A drag runs from pointer-down over a handle to pointer-up anywhere.  While
//! it is open the controller holds a [`DragSession`] with an immutable copy of
//! the grabbed panel's rectangle taken at pointer-down.  Every pointer-move is
//! measured against that snapshot, never against the previous move, so a long
//! drag cannot accumulate rounding error.
//!
//! The working layout itself is not owned here.  Callers pass it in as
//! `&mut LayoutState` on each event, so the controller always writes into the
//! latest value while its own snapshot stays frozen for the whole session.
//!
//! # Per-axis rejection
//!
//! Resizing checks each axis on its own.  When the north half of a
//! `resize-ne` gesture would shrink the panel below [`MIN_SIZE`], the vertical
//! axis keeps whatever value it had before the event while the east half is
//! still applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use super::layout::{LayoutState, PanelId, PanelLayout, CONTAINER_EXTENT, MIN_SIZE};

/// Which gesture a drag session performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragMode {
    #[serde(rename = "move")]
    Move,
    #[serde(rename = "resize-n")]
    ResizeN,
    #[serde(rename = "resize-s")]
    ResizeS,
    #[serde(rename = "resize-e")]
    ResizeE,
    #[serde(rename = "resize-w")]
    ResizeW,
    #[serde(rename = "resize-ne")]
    ResizeNe,
    #[serde(rename = "resize-nw")]
    ResizeNw,
    #[serde(rename = "resize-se")]
    ResizeSe,
    #[serde(rename = "resize-sw")]
    ResizeSw,
}

/// Edge a resize gesture moves on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HorizontalEdge {
    West,
    East,
}

/// Edge a resize gesture moves on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerticalEdge {
    North,
    South,
}

impl DragMode {
    /// Every mode, move first, then edges, then corners.
    pub const ALL: [DragMode; 9] = [
        DragMode::Move,
        DragMode::ResizeN,
        DragMode::ResizeS,
        DragMode::ResizeE,
        DragMode::ResizeW,
        DragMode::ResizeNe,
        DragMode::ResizeNw,
        DragMode::ResizeSe,
        DragMode::ResizeSw,
    ];

    /// Wire name of the mode (`"move"`, `"resize-ne"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            DragMode::Move => "move",
            DragMode::ResizeN => "resize-n",
            DragMode::ResizeS => "resize-s",
            DragMode::ResizeE => "resize-e",
            DragMode::ResizeW => "resize-w",
            DragMode::ResizeNe => "resize-ne",
            DragMode::ResizeNw => "resize-nw",
            DragMode::ResizeSe => "resize-se",
            DragMode::ResizeSw => "resize-sw",
        }
    }

    /// `true` for the four diagonal resize modes.
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            DragMode::ResizeNe | DragMode::ResizeNw | DragMode::ResizeSe | DragMode::ResizeSw
        )
    }

    fn horizontal_edge(self) -> Option<HorizontalEdge> {
        match self {
            DragMode::ResizeE | DragMode::ResizeNe | DragMode::ResizeSe => Some(HorizontalEdge::East),
            DragMode::ResizeW | DragMode::ResizeNw | DragMode::ResizeSw => Some(HorizontalEdge::West),
            _ => None,
        }
    }

    fn vertical_edge(self) -> Option<VerticalEdge> {
        match self {
            DragMode::ResizeN | DragMode::ResizeNe | DragMode::ResizeNw => Some(VerticalEdge::North),
            DragMode::ResizeS | DragMode::ResizeSe | DragMode::ResizeSw => Some(VerticalEdge::South),
            _ => None,
        }
    }
}

impl std::fmt::Display for DragMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer position in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Current pixel size of the panel container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Converts a pixel displacement along the x axis into percent of the width.
    ///
    /// Returns `None` when the container has no usable width.
    pub fn dx_percent(&self, pixels: f64) -> Option<f64> {
        percent_of(pixels, self.width)
    }

    /// Converts a pixel displacement along the y axis into percent of the height.
    pub fn dy_percent(&self, pixels: f64) -> Option<f64> {
        percent_of(pixels, self.height)
    }
}

fn percent_of(pixels: f64, extent: f64) -> Option<f64> {
    if extent.is_finite() && extent > 0.0 && pixels.is_finite() {
        Some(pixels * CONTAINER_EXTENT / extent)
    } else {
        None
    }
}

/// An open drag: which panel, which gesture, and where it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub panel: PanelId,
    pub mode: DragMode,
    pub start_pointer: PointerPosition,
    /// Value copy of the panel rectangle at pointer-down.
    pub start_layout: PanelLayout,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// What a single pointer-move did to one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisOutcome {
    /// The mode does not touch this axis, or the container has no extent on it.
    Untouched,
    /// The candidate value satisfied every constraint and was written.
    Applied,
    /// A move was pinned to the container edge.
    Clamped,
    /// The candidate broke a constraint; the axis kept its previous value.
    Rejected,
}

/// Per-axis result of [`DragController::move_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub horizontal: AxisOutcome,
    pub vertical: AxisOutcome,
}

/// Errors from driving the controller out of order.
#[derive(Debug, Error, PartialEq)]
pub enum DragError {
    /// `start` was called while another drag is still open.
    #[error("a drag on panel {0} is already in progress")]
    AlreadyDragging(PanelId),

    /// `move_to` was called with no drag open.
    #[error("no drag in progress")]
    NotDragging,
}

/// The drag state machine: `Idle` ⇄ `Dragging`.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Returns the open session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Panel being dragged, if any.
    pub fn active_panel(&self) -> Option<PanelId> {
        self.session().map(|s| s.panel)
    }

    /// Opens a drag on `panel`.
    ///
    /// Brings the panel to the front of `working` and snapshots its rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyDragging`] if a drag is already open; the
    /// layout is left untouched in that case.
    pub fn start(
        &mut self,
        working: &mut LayoutState,
        panel: PanelId,
        mode: DragMode,
        pointer: PointerPosition,
    ) -> Result<DragSession, DragError> {
        if let DragState::Dragging(open) = &self.state {
            return Err(DragError::AlreadyDragging(open.panel));
        }

        let z_index = working.bring_to_front(panel);
        let session = DragSession {
            panel,
            mode,
            start_pointer: pointer,
            start_layout: *working.get(panel),
        };
        self.state = DragState::Dragging(session);
        debug!(%panel, %mode, z_index, "drag started");
        Ok(session)
    }

    /// Applies the pointer displacement since pointer-down to `working`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] when no drag is open.
    pub fn move_to(
        &self,
        working: &mut LayoutState,
        pointer: PointerPosition,
        container: ContainerSize,
    ) -> Result<MoveOutcome, DragError> {
        let session = self.session().ok_or(DragError::NotDragging)?;
        let start = session.start_layout;
        let dx = container.dx_percent(pointer.x - session.start_pointer.x);
        let dy = container.dy_percent(pointer.y - session.start_pointer.y);
        let panel = working.get_mut(session.panel);

        let outcome = if session.mode == DragMode::Move {
            MoveOutcome {
                horizontal: dx.map_or(AxisOutcome::Untouched, |d| {
                    translate(&mut panel.x, start.x, start.width, d)
                }),
                vertical: dy.map_or(AxisOutcome::Untouched, |d| {
                    translate(&mut panel.y, start.y, start.height, d)
                }),
            }
        } else {
            let horizontal = match (session.mode.horizontal_edge(), dx) {
                (Some(HorizontalEdge::West), Some(d)) => {
                    resize_leading(&mut panel.x, &mut panel.width, start.x, start.width, d)
                }
                (Some(HorizontalEdge::East), Some(d)) => {
                    resize_trailing(&mut panel.width, start.x, start.width, d)
                }
                _ => AxisOutcome::Untouched,
            };
            let vertical = match (session.mode.vertical_edge(), dy) {
                (Some(VerticalEdge::North), Some(d)) => {
                    resize_leading(&mut panel.y, &mut panel.height, start.y, start.height, d)
                }
                (Some(VerticalEdge::South), Some(d)) => {
                    resize_trailing(&mut panel.height, start.y, start.height, d)
                }
                _ => AxisOutcome::Untouched,
            };
            MoveOutcome { horizontal, vertical }
        };

        if outcome.horizontal == AxisOutcome::Rejected || outcome.vertical == AxisOutcome::Rejected {
            debug!(panel = %session.panel, mode = %session.mode, ?outcome, "resize axis rejected");
        } else {
            trace!(panel = %session.panel, ?outcome, "drag moved");
        }
        Ok(outcome)
    }

    /// Closes the drag unconditionally and returns the finished session.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                debug!(panel = %session.panel, mode = %session.mode, "drag ended");
                Some(session)
            }
            DragState::Idle => None,
        }
    }
}

// ── Axis transforms ───────────────────────────────────────────────────────────

/// Moves an edge-less coordinate, pinning it inside `[0, 100 - len]`.
fn translate(pos: &mut f64, start_pos: f64, len: f64, delta: f64) -> AxisOutcome {
    let raw = start_pos + delta;
    let limit = (CONTAINER_EXTENT - len).max(0.0);
    let pinned = raw.clamp(0.0, limit);
    *pos = pinned;
    if pinned == raw {
        AxisOutcome::Applied
    } else {
        AxisOutcome::Clamped
    }
}

/// Moves the leading (north/west) edge: position and length change together.
fn resize_leading(
    pos: &mut f64,
    len: &mut f64,
    start_pos: f64,
    start_len: f64,
    delta: f64,
) -> AxisOutcome {
    let new_pos = start_pos + delta;
    let new_len = start_len - delta;
    if new_len >= MIN_SIZE && new_pos >= 0.0 {
        *pos = new_pos;
        *len = new_len;
        AxisOutcome::Applied
    } else {
        AxisOutcome::Rejected
    }
}

/// Moves the trailing (south/east) edge: only the length changes.
fn resize_trailing(len: &mut f64, start_pos: f64, start_len: f64, delta: f64) -> AxisOutcome {
    let new_len = start_len + delta;
    if new_len >= MIN_SIZE && start_pos + new_len <= CONTAINER_EXTENT {
        *len = new_len;
        AxisOutcome::Applied
    } else {
        AxisOutcome::Rejected
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
