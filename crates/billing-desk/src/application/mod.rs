//! Application layer use cases for the billing screen.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure layout rules in `panel_core`) and the infrastructure (files, the
//! host window, the UI command bridge).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "drag the
//!   products panel wider, then save").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the infrastructure can be swapped without changing this code.
//! - **Contain no direct file system or window access**.
//!
//! # Sub-modules
//!
//! - **`edit_session`** – The `LayoutOrchestrator`: persisted vs. working
//!   layout, edit-mode transitions, and routing of pointer events into the
//!   drag state machine.
//!
//! - **`layout_store`** – Loads and saves the layout record through the
//!   `SettingsStore` trait, falling back to the default on any problem.
//!
//! - **`pointer`** – The `PointerSurface` trait and the RAII guard that owns
//!   the global pointer listener for the duration of a drag.
//!
//! - **`render`** – Turns a layout into pixel frames with edit affordances,
//!   and hit-tests pointer-down positions against them.

pub mod edit_session;
pub mod layout_store;
pub mod pointer;
pub mod render;
