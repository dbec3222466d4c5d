//! Domain entities for the billing-screen panel layout.
//!
//! This module contains pure layout rules with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from storage backends, UI toolkits, or async runtimes.
//! - Can be compiled and tested on any platform without any external setup.
//! - Defines the data types and operations that make the system what it is:
//!   here, three panels placed in a percentage coordinate space and a drag
//!   state machine that moves and resizes them without breaking the rules.
//!
//! Code in outer layers (application, infrastructure) depends on the domain,
//! but the domain never depends on them.

/// Drag/resize state machine.
pub mod drag;

/// Panel rectangles, the three-panel layout, and its invariants.
///
/// See [`layout::LayoutState`] for the main type.
pub mod layout;

/// Pure size-class bucketing for adaptive panel content.
pub mod size_class;
