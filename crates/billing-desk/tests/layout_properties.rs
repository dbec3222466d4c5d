//! Property tests for layout persistence and edit-session semantics.
//!
//! Layouts are generated anywhere inside the valid space, with stacking
//! values that include the ends of the `i32` range.  The orchestrator's
//! pointer operations are synchronous, so only the storage calls go through
//! `tokio_test::block_on`.

use std::sync::Arc;

use billing_desk::application::edit_session::LayoutOrchestrator;
use billing_desk::application::layout_store::{
    decode_layout, encode_layout, LayoutStore, SettingsStore,
};
use billing_desk::infrastructure::storage::settings::MemorySettingsStore;
use billing_desk::infrastructure::surface::ApplicationSurface;
use panel_core::{
    ContainerSize, DragMode, LayoutState, PanelId, PanelLayout, PointerPosition, MIN_SIZE,
};
use proptest::prelude::*;

const CONTAINER: ContainerSize = ContainerSize::new(1280.0, 720.0);

// ── Strategies ────────────────────────────────────────────────────────────────

fn axis() -> impl Strategy<Value = (f64, f64)> {
    (MIN_SIZE..=100.0f64, 0.0..=1.0f64).prop_map(|(len, t)| (t * (100.0 - len), len))
}

fn z_index() -> impl Strategy<Value = i32> {
    prop_oneof![Just(i32::MAX), Just(i32::MIN), -10..10i32, any::<i32>()]
}

fn valid_layout() -> impl Strategy<Value = LayoutState> {
    let z = prop::array::uniform3(z_index())
        .prop_filter("distinct z-indices", |z| z[0] != z[1] && z[1] != z[2] && z[0] != z[2]);
    (prop::array::uniform3((axis(), axis())), z).prop_map(|(rects, z)| {
        let panel = |((x, width), (y, height)): ((f64, f64), (f64, f64)), z_index| PanelLayout {
            x,
            y,
            width,
            height,
            z_index,
        };
        LayoutState {
            current_bill: panel(rects[0], z[0]),
            recent_invoices: panel(rects[1], z[1]),
            products: panel(rects[2], z[2]),
        }
    })
}

/// `(panel, mode, start, end)` with positions as fractions of the container.
type Drag = (PanelId, DragMode, (f64, f64), (f64, f64));

fn drag_sequence() -> impl Strategy<Value = Vec<Drag>> {
    prop::collection::vec(
        (
            prop::sample::select(PanelId::ALL.to_vec()),
            prop::sample::select(DragMode::ALL.to_vec()),
            (0.0..1.0f64, 0.0..1.0f64),
            (-0.5..1.5f64, -0.5..1.5f64),
        ),
        1..10,
    )
}

fn at((fx, fy): (f64, f64)) -> PointerPosition {
    PointerPosition::new(fx * CONTAINER.width, fy * CONTAINER.height)
}

fn orchestrator(
    initial: LayoutState,
) -> (LayoutOrchestrator, Arc<MemorySettingsStore>, Arc<ApplicationSurface>) {
    let settings = Arc::new(MemorySettingsStore::new());
    let surface = Arc::new(ApplicationSurface::new());
    let orchestrator = LayoutOrchestrator::with_layout(
        LayoutStore::new(settings.clone()),
        surface.clone(),
        CONTAINER,
        initial,
    );
    (orchestrator, settings, surface)
}

fn apply(orchestrator: &mut LayoutOrchestrator, drags: &[Drag]) {
    for &(panel, mode, from, to) in drags {
        orchestrator.pointer_down(panel, mode, at(from)).expect("pointer down");
        orchestrator.pointer_move(at(to));
        orchestrator.pointer_up();
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn test_encoded_layout_decodes_to_the_same_layout(layout in valid_layout()) {
        let raw = encode_layout(&layout).expect("encode");
        let decoded = decode_layout(&raw).expect("decode");
        prop_assert!(decoded.approx_eq(&layout, 1e-9), "{decoded:?} != {layout:?}");
    }

    #[test]
    fn test_store_load_after_save_returns_saved_layout(layout in valid_layout()) {
        let store = LayoutStore::new(Arc::new(MemorySettingsStore::new()));

        tokio_test::block_on(store.save(&layout));
        let loaded = tokio_test::block_on(store.load());

        prop_assert!(loaded.approx_eq(&layout, 1e-9));
    }

    #[test]
    fn test_cancel_after_any_drags_leaves_persisted_layout_and_storage_untouched(
        initial in valid_layout(),
        drags in drag_sequence(),
    ) {
        // Arrange
        let (mut orchestrator, settings, surface) = orchestrator(initial);
        orchestrator.enter_edit().expect("enter");
        apply(&mut orchestrator, &drags);

        // Act
        orchestrator.cancel_edit().expect("cancel");

        // Assert
        prop_assert_eq!(*orchestrator.persisted(), initial);
        prop_assert_eq!(*orchestrator.displayed(), initial);
        let stored = tokio_test::block_on(settings.get_all()).expect("get_all");
        prop_assert!(stored.is_empty());
        let (attaches, detaches) = surface.listener_counts();
        prop_assert_eq!(attaches, detaches);
    }

    #[test]
    fn test_saved_session_is_valid_and_reloads(
        initial in valid_layout(),
        drags in drag_sequence(),
    ) {
        // Arrange
        let (mut orchestrator, settings, _) = orchestrator(initial);
        orchestrator.enter_edit().expect("enter");
        apply(&mut orchestrator, &drags);
        let working = *orchestrator.working().expect("working");

        // Act
        tokio_test::block_on(orchestrator.save_edit()).expect("save");

        // Assert
        prop_assert_eq!(working.validate(), Ok(()));
        let reloaded = tokio_test::block_on(LayoutStore::new(settings).load());
        prop_assert!(reloaded.approx_eq(&working, 1e-9));
    }
}
