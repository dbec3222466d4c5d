//! Panel Renderer: derives what the host should draw for each panel.
//!
//! The renderer is a pure projection.  Given a layout, the render mode, the
//! container's pixel size and the panel being dragged (if any), it produces
//! one [`PanelFrame`] per panel in paint order.  The host paints frames from
//! first to last and lays the opaque panel body into `frame.rect`.
//!
//! In edit mode each frame also carries its drag affordances (a move grip,
//! four edge handles, four corner handles) and a live size readout.
//! [`hit_test`] resolves a pointer-down position against those affordances.

use panel_core::{
    ContainerSize, DragMode, LayoutState, PanelId, PanelLayout, PointerPosition, SizeClass,
    CONTAINER_EXTENT,
};
use serde::{Deserialize, Serialize};

/// Height of the move grip strip along the top of a panel, in pixels.
pub const GRIP_HEIGHT_PX: f64 = 28.0;
/// Thickness of edge resize handles, in pixels.
pub const EDGE_HANDLE_PX: f64 = 8.0;
/// Side length of the square corner resize handles, in pixels.
pub const CORNER_HANDLE_PX: f64 = 14.0;

/// Which layout a frame is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Committed layout, no affordances.
    View,
    /// Working layout with drag/resize affordances.
    Edit,
}

/// Axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Projects a percentage rectangle onto a container.
    pub fn from_percent(panel: &PanelLayout, container: ContainerSize) -> Self {
        let sx = container.width.max(0.0) / CONTAINER_EXTENT;
        let sy = container.height.max(0.0) / CONTAINER_EXTENT;
        Self {
            x: panel.x * sx,
            y: panel.y * sy,
            width: panel.width * sx,
            height: panel.height * sy,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment test (`[x, right) × [y, bottom)`).
    pub fn contains(&self, p: PointerPosition) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// A draggable region of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affordance {
    pub mode: DragMode,
    pub rect: PixelRect,
}

/// Live width/height readout shown in edit mode, in percent of the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeReadout {
    pub width_percent: f64,
    pub height_percent: f64,
}

impl SizeReadout {
    fn of(panel: &PanelLayout) -> Self {
        Self {
            width_percent: round_tenth(panel.width),
            height_percent: round_tenth(panel.height),
        }
    }

    /// Text drawn in the panel corner, e.g. `61.0% × 100.0%`.
    pub fn label(&self) -> String {
        format!("{:.1}% × {:.1}%", self.width_percent, self.height_percent)
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Pixel size handed to the panel body so it can adapt its density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailableSize {
    pub width: f64,
    pub height: f64,
}

/// Everything the host needs to draw one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelFrame {
    pub panel: PanelId,
    /// Header text drawn in the panel's grip strip.
    pub title: String,
    pub rect: PixelRect,
    pub z_index: i32,
    /// `true` for the panel currently being dragged.
    pub active: bool,
    pub size_class: SizeClass,
    pub available: AvailableSize,
    /// Empty in view mode.  Corners first, then edges, then the move grip.
    pub affordances: Vec<Affordance>,
    pub readout: Option<SizeReadout>,
}

/// Builds frames for every panel, in paint order.
///
/// Frames are sorted by ascending z-index; the `active` panel is always last
/// so it paints above everything while dragged.
pub fn render_frames(
    layout: &LayoutState,
    mode: RenderMode,
    container: ContainerSize,
    active: Option<PanelId>,
) -> Vec<PanelFrame> {
    let mut frames: Vec<PanelFrame> = layout
        .iter()
        .map(|(id, panel)| {
            let rect = PixelRect::from_percent(panel, container);
            let editing = mode == RenderMode::Edit;
            PanelFrame {
                panel: id,
                title: id.title().to_owned(),
                rect,
                z_index: panel.z_index,
                active: editing && active == Some(id),
                size_class: SizeClass::classify(rect.width, rect.height),
                available: AvailableSize {
                    width: rect.width,
                    height: rect.height,
                },
                affordances: if editing { affordances_for(&rect) } else { Vec::new() },
                readout: editing.then(|| SizeReadout::of(panel)),
            }
        })
        .collect();

    frames.sort_by_key(|f| (f.active, f.z_index));
    frames
}

/// Lays out the nine affordances of a panel rectangle, highest priority first.
fn affordances_for(r: &PixelRect) -> Vec<Affordance> {
    let c = CORNER_HANDLE_PX.min(r.width / 2.0).min(r.height / 2.0);
    let e = EDGE_HANDLE_PX.min(r.width / 2.0).min(r.height / 2.0);
    let inner_w = (r.width - 2.0 * c).max(0.0);
    let inner_h = (r.height - 2.0 * c).max(0.0);
    let rect = |x: f64, y: f64, width: f64, height: f64| PixelRect { x, y, width, height };

    vec![
        Affordance { mode: DragMode::ResizeNw, rect: rect(r.x, r.y, c, c) },
        Affordance { mode: DragMode::ResizeNe, rect: rect(r.right() - c, r.y, c, c) },
        Affordance { mode: DragMode::ResizeSw, rect: rect(r.x, r.bottom() - c, c, c) },
        Affordance { mode: DragMode::ResizeSe, rect: rect(r.right() - c, r.bottom() - c, c, c) },
        Affordance { mode: DragMode::ResizeN, rect: rect(r.x + c, r.y, inner_w, e) },
        Affordance { mode: DragMode::ResizeS, rect: rect(r.x + c, r.bottom() - e, inner_w, e) },
        Affordance { mode: DragMode::ResizeW, rect: rect(r.x, r.y + c, e, inner_h) },
        Affordance { mode: DragMode::ResizeE, rect: rect(r.right() - e, r.y + c, e, inner_h) },
        Affordance {
            mode: DragMode::Move,
            rect: rect(r.x, r.y, r.width, GRIP_HEIGHT_PX.min(r.height)),
        },
    ]
}

/// Finds the affordance under `point`, searching from the top of the paint order.
///
/// A panel body with no affordance under the pointer still occludes the
/// panels beneath it, so the search stops at the first frame containing the
/// point.
pub fn hit_test(frames: &[PanelFrame], point: PointerPosition) -> Option<(PanelId, DragMode)> {
    let frame = frames.iter().rev().find(|f| f.rect.contains(point))?;
    frame
        .affordances
        .iter()
        .find(|a| a.rect.contains(point))
        .map(|a| (frame.panel, a.mode))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
