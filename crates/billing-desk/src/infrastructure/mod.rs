//! Infrastructure layer for the billing desk.
//!
//! Contains the outward-facing adapters: settings and config storage, the
//! host window's pointer surface, the UI command bridge, and logging setup.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `panel_core`, but MUST NOT be imported by the `application` or domain
//! layers (test-only mocks excepted).

pub mod logging;
pub mod storage;
pub mod surface;
pub mod ui_bridge;
