//! billing-desk library entry point.
//!
//! Hosts the billing-screen panel layout: edit sessions over a working copy,
//! persistence through a key-value settings backend, pixel frame rendering,
//! and the command bridge a UI shell calls into.  The pure layout rules live
//! in `panel_core`.

pub mod application;
pub mod infrastructure;
