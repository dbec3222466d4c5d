//! # panel-core
//!
//! Shared library for the billing screen's free-form panel layout: the layout
//! model, its invariants, the built-in default, the drag state machine, and
//! size-class bucketing.
//!
//! It has zero dependencies on storage, UI frameworks, or async runtimes.
//!
//! # Architecture overview (for beginners)
//!
//! The billing screen shows three panels (current bill, recent invoices,
//! products) inside one container.  In edit mode the user can drag a panel
//! around or pull any of its edges and corners to resize it.
//!
//! - **`domain::layout`** – Rectangles in percent of the container, the
//!   three-panel [`LayoutState`], [`DEFAULT_LAYOUT`], and validation.
//!
//! - **`domain::drag`** – The [`DragController`]: `Idle` ⇄ `Dragging`.  It
//!   turns pointer displacement into new rectangles, clamping moves and
//!   rejecting resizes axis by axis.
//!
//! - **`domain::size_class`** – Maps a panel's pixel size to a density bucket.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `panel_core::LayoutState` instead of `panel_core::domain::layout::LayoutState`.
pub use domain::drag::{
    AxisOutcome, ContainerSize, DragController, DragError, DragMode, DragSession, DragState,
    MoveOutcome, PointerPosition,
};
pub use domain::layout::{
    LayoutError, LayoutState, PanelId, PanelLayout, CONTAINER_EXTENT, DEFAULT_LAYOUT, MIN_SIZE,
    VALIDATION_TOLERANCE,
};
pub use domain::size_class::SizeClass;
