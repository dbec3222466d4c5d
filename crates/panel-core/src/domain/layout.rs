//! Panel layout domain entity.
//!
//! The billing screen is split into three fixed panels.  Each panel occupies a
//! rectangle expressed in percent of the container (0–100 on both axes), so a
//! layout survives window resizes without any rescaling step.  A stacking
//! order (`z_index`) decides which panel paints on top when rectangles overlap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum permitted panel width/height, in percent of the container.
pub const MIN_SIZE: f64 = 15.0;

/// Upper bound of the percentage coordinate space.
pub const CONTAINER_EXTENT: f64 = 100.0;

/// Slack allowed when validating persisted values that went through float math.
pub const VALIDATION_TOLERANCE: f64 = 1e-6;

/// Identifies one of the three fixed panels on the billing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelId {
    /// The bill currently being composed.
    CurrentBill,
    /// The list of recently issued invoices.
    RecentInvoices,
    /// The product grid items are picked from.
    Products,
}

impl PanelId {
    /// All panels, in their canonical order.
    pub const ALL: [PanelId; 3] = [PanelId::CurrentBill, PanelId::RecentInvoices, PanelId::Products];

    /// Key used for this panel in the persisted record.
    pub const fn key(self) -> &'static str {
        match self {
            PanelId::CurrentBill => "currentBill",
            PanelId::RecentInvoices => "recentInvoices",
            PanelId::Products => "products",
        }
    }

    /// Human-readable panel title.
    pub const fn title(self) -> &'static str {
        match self {
            PanelId::CurrentBill => "Current Bill",
            PanelId::RecentInvoices => "Recent Invoices",
            PanelId::Products => "Products",
        }
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors produced when a layout breaks one of its invariants.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A coordinate or dimension is NaN or infinite.
    #[error("panel {0} has a non-finite coordinate")]
    NonFinite(PanelId),

    /// Width or height is below [`MIN_SIZE`].
    #[error("panel {panel} is smaller than the minimum size ({width}x{height})")]
    BelowMinimumSize { panel: PanelId, width: f64, height: f64 },

    /// The rectangle leaves the 0–100 container space.
    #[error("panel {0} extends outside the container")]
    OutOfBounds(PanelId),

    /// Two panels share a stacking position.
    #[error("duplicate z-index {0}")]
    DuplicateZIndex(i32),
}

/// Position, size, and stacking order of a single panel.
///
/// `x`, `y`, `width`, and `height` are percentages of the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLayout {
    /// Left edge, percent of container width.
    pub x: f64,
    /// Top edge, percent of container height.
    pub y: f64,
    /// Width, percent of container width.
    pub width: f64,
    /// Height, percent of container height.
    pub height: f64,
    /// Stacking order; larger paints on top.
    pub z_index: i32,
}

impl PanelLayout {
    /// Returns the right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Checks the bounds and minimum-size invariants, allowing `tolerance`
    /// of slack on every comparison.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant for `panel`.
    pub fn check(&self, panel: PanelId, tolerance: f64) -> Result<(), LayoutError> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(LayoutError::NonFinite(panel));
        }
        if self.width < MIN_SIZE - tolerance || self.height < MIN_SIZE - tolerance {
            return Err(LayoutError::BelowMinimumSize {
                panel,
                width: self.width,
                height: self.height,
            });
        }
        if self.x < -tolerance
            || self.y < -tolerance
            || self.right() > CONTAINER_EXTENT + tolerance
            || self.bottom() > CONTAINER_EXTENT + tolerance
        {
            return Err(LayoutError::OutOfBounds(panel));
        }
        Ok(())
    }
}

/// The full billing-screen layout: exactly one rectangle per panel.
///
/// Serialized with the keys `currentBill`, `recentInvoices`, and `products`.
/// Unknown keys in persisted records are rejected so that a record written by
/// a different screen cannot be mistaken for this one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutState {
    pub current_bill: PanelLayout,
    pub recent_invoices: PanelLayout,
    pub products: PanelLayout,
}

/// Built-in layout used on first run and whenever the persisted record is unusable.
///
/// The bill and recent invoices share the left column; products fill the right.
pub const DEFAULT_LAYOUT: LayoutState = LayoutState {
    current_bill: PanelLayout { x: 0.0, y: 0.0, width: 49.0, height: 60.0, z_index: 1 },
    recent_invoices: PanelLayout { x: 0.0, y: 60.0, width: 49.0, height: 40.0, z_index: 2 },
    products: PanelLayout { x: 49.0, y: 0.0, width: 51.0, height: 100.0, z_index: 3 },
};

impl Default for LayoutState {
    fn default() -> Self {
        DEFAULT_LAYOUT
    }
}

impl LayoutState {
    /// Returns the rectangle of `panel`.
    pub fn get(&self, panel: PanelId) -> &PanelLayout {
        match panel {
            PanelId::CurrentBill => &self.current_bill,
            PanelId::RecentInvoices => &self.recent_invoices,
            PanelId::Products => &self.products,
        }
    }

    /// Returns a mutable handle to the rectangle of `panel`.
    pub fn get_mut(&mut self, panel: PanelId) -> &mut PanelLayout {
        match panel {
            PanelId::CurrentBill => &mut self.current_bill,
            PanelId::RecentInvoices => &mut self.recent_invoices,
            PanelId::Products => &mut self.products,
        }
    }

    /// Iterates over `(panel, rectangle)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &PanelLayout)> {
        PanelId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }

    /// Highest z-index currently in use.
    pub fn max_z_index(&self) -> i32 {
        self.iter().map(|(_, p)| p.z_index).max().unwrap_or(0)
    }

    /// Moves `panel` above every other panel and returns its new z-index.
    ///
    /// When the stack has reached `i32::MAX` the z-indices are first
    /// renumbered to `1..=3`, keeping their relative order.
    pub fn bring_to_front(&mut self, panel: PanelId) -> i32 {
        let top = match self.max_z_index().checked_add(1) {
            Some(top) => top,
            None => {
                self.normalize_z_order();
                self.max_z_index() + 1
            }
        };
        self.get_mut(panel).z_index = top;
        top
    }

    /// Renumbers z-indices to `1..=3` in their current stacking order.
    pub fn normalize_z_order(&mut self) {
        let mut order = PanelId::ALL;
        order.sort_by_key(|&id| self.get(id).z_index);
        for (rank, id) in (1..).zip(order) {
            self.get_mut(id).z_index = rank;
        }
    }

    /// Panel with the highest z-index.
    pub fn topmost(&self) -> PanelId {
        self.iter()
            .max_by_key(|(_, p)| p.z_index)
            .map(|(id, _)| id)
            .unwrap_or(PanelId::Products)
    }

    /// Validates every panel rectangle and the stacking order.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.  Bounds are compared with
    /// [`VALIDATION_TOLERANCE`] of slack.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (id, panel) in self.iter() {
            panel.check(id, VALIDATION_TOLERANCE)?;
        }
        let mut seen: Vec<i32> = Vec::with_capacity(PanelId::ALL.len());
        for (_, panel) in self.iter() {
            if seen.contains(&panel.z_index) {
                return Err(LayoutError::DuplicateZIndex(panel.z_index));
            }
            seen.push(panel.z_index);
        }
        Ok(())
    }

    /// Returns `true` when every coordinate of `other` is within `tolerance`
    /// of this layout and the stacking orders match exactly.
    pub fn approx_eq(&self, other: &LayoutState, tolerance: f64) -> bool {
        PanelId::ALL.iter().all(|&id| {
            let (a, b) = (self.get(id), other.get(id));
            (a.x - b.x).abs() <= tolerance
                && (a.y - b.y).abs() <= tolerance
                && (a.width - b.width).abs() <= tolerance
                && (a.height - b.height).abs() <= tolerance
                && a.z_index == b.z_index
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, width: f64, height: f64) -> PanelLayout {
        PanelLayout { x, y, width, height, z_index: 1 }
    }

    // ── PanelLayout helpers ───────────────────────────────────────────────────

    #[test]
    fn test_panel_layout_right_returns_x_plus_width() {
        assert_eq!(rect(49.0, 0.0, 51.0, 100.0).right(), 100.0);
    }

    #[test]
    fn test_panel_layout_bottom_returns_y_plus_height() {
        assert_eq!(rect(0.0, 60.0, 49.0, 40.0).bottom(), 100.0);
    }

    #[test]
    fn test_check_accepts_rectangle_exactly_filling_container() {
        assert!(rect(0.0, 0.0, 100.0, 100.0).check(PanelId::Products, 0.0).is_ok());
    }

    #[test]
    fn test_check_rejects_width_below_minimum() {
        let result = rect(0.0, 0.0, 14.9, 50.0).check(PanelId::CurrentBill, 0.0);
        assert!(matches!(
            result,
            Err(LayoutError::BelowMinimumSize { panel: PanelId::CurrentBill, .. })
        ));
    }

    #[test]
    fn test_check_rejects_rectangle_past_right_edge() {
        let result = rect(90.0, 0.0, 20.0, 50.0).check(PanelId::Products, 0.0);
        assert_eq!(result, Err(LayoutError::OutOfBounds(PanelId::Products)));
    }

    #[test]
    fn test_check_rejects_negative_origin() {
        let result = rect(0.0, -1.0, 20.0, 50.0).check(PanelId::Products, 0.0);
        assert_eq!(result, Err(LayoutError::OutOfBounds(PanelId::Products)));
    }

    #[test]
    fn test_check_rejects_nan() {
        let result = rect(f64::NAN, 0.0, 20.0, 50.0).check(PanelId::RecentInvoices, 0.0);
        assert_eq!(result, Err(LayoutError::NonFinite(PanelId::RecentInvoices)));
    }

    #[test]
    fn test_check_allows_overshoot_within_tolerance() {
        let r = rect(49.0, 0.0, 51.000_000_1, 100.0);
        assert!(r.check(PanelId::Products, VALIDATION_TOLERANCE).is_ok());
    }

    // ── DEFAULT_LAYOUT ────────────────────────────────────────────────────────

    #[test]
    fn test_default_layout_is_valid() {
        assert_eq!(DEFAULT_LAYOUT.validate(), Ok(()));
    }

    #[test]
    fn test_default_layout_covers_full_container_without_overlap() {
        let total: f64 = DEFAULT_LAYOUT.iter().map(|(_, p)| p.width * p.height).sum();
        assert_eq!(total, CONTAINER_EXTENT * CONTAINER_EXTENT);
    }

    #[test]
    fn test_default_trait_returns_default_layout() {
        assert_eq!(LayoutState::default(), DEFAULT_LAYOUT);
    }

    // ── Stacking order ────────────────────────────────────────────────────────

    #[test]
    fn test_bring_to_front_assigns_max_plus_one() {
        let mut layout = DEFAULT_LAYOUT;
        let z = layout.bring_to_front(PanelId::CurrentBill);
        assert_eq!(z, 4);
        assert_eq!(layout.topmost(), PanelId::CurrentBill);
    }

    #[test]
    fn test_bring_to_front_at_i32_max_renumbers_instead_of_overflowing() {
        // Arrange
        let mut layout = DEFAULT_LAYOUT;
        layout.products.z_index = i32::MAX;
        layout.recent_invoices.z_index = i32::MIN;

        // Act
        let z = layout.bring_to_front(PanelId::CurrentBill);

        // Assert: old order was recentInvoices < currentBill < products.
        assert_eq!(z, 4);
        assert_eq!(layout.recent_invoices.z_index, 1);
        assert_eq!(layout.products.z_index, 3);
        assert_eq!(layout.topmost(), PanelId::CurrentBill);
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn test_bring_to_front_topmost_panel_at_i32_max_stays_on_top() {
        let mut layout = DEFAULT_LAYOUT;
        layout.products.z_index = i32::MAX;

        let z = layout.bring_to_front(PanelId::Products);

        assert_eq!(z, 4);
        assert_eq!(layout.topmost(), PanelId::Products);
    }

    #[test]
    fn test_normalize_z_order_keeps_relative_order() {
        let mut layout = DEFAULT_LAYOUT;
        layout.current_bill.z_index = 900;
        layout.recent_invoices.z_index = -5;
        layout.products.z_index = 40;

        layout.normalize_z_order();

        assert_eq!(layout.recent_invoices.z_index, 1);
        assert_eq!(layout.products.z_index, 2);
        assert_eq!(layout.current_bill.z_index, 3);
    }

    #[test]
    fn test_validate_rejects_duplicate_z_index() {
        let mut layout = DEFAULT_LAYOUT;
        layout.products.z_index = layout.current_bill.z_index;
        assert_eq!(layout.validate(), Err(LayoutError::DuplicateZIndex(1)));
    }

    // ── Serialization shape ───────────────────────────────────────────────────

    #[test]
    fn test_layout_state_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(DEFAULT_LAYOUT).expect("serialize");
        for id in PanelId::ALL {
            assert!(json.get(id.key()).is_some(), "missing key {}", id.key());
        }
        assert_eq!(json["products"]["zIndex"], 3);
    }

    #[test]
    fn test_layout_state_rejects_missing_panel_key() {
        let json = r#"{
            "currentBill": {"x":0,"y":0,"width":50,"height":50,"zIndex":1},
            "products": {"x":50,"y":0,"width":50,"height":100,"zIndex":2}
        }"#;
        assert!(serde_json::from_str::<LayoutState>(json).is_err());
    }

    #[test]
    fn test_layout_state_rejects_unknown_panel_key() {
        let mut json = serde_json::to_value(DEFAULT_LAYOUT).expect("serialize");
        json["charts"] = json["products"].clone();
        assert!(serde_json::from_value::<LayoutState>(json).is_err());
    }

    #[test]
    fn test_approx_eq_ignores_sub_tolerance_drift() {
        let mut drifted = DEFAULT_LAYOUT;
        drifted.products.x += 1e-9;
        assert!(DEFAULT_LAYOUT.approx_eq(&drifted, 1e-6));
        drifted.products.z_index += 1;
        assert!(!DEFAULT_LAYOUT.approx_eq(&drifted, 1e-6));
    }
}
