//! Global pointer listener acquisition.
//!
//! While a drag is open, pointer-move and pointer-up must be observed on the
//! whole application surface, not only on the grabbed handle; otherwise a
//! release outside the panel would leave the drag stuck.  The listener is a
//! resource: it is attached when a drag starts and must be detached on every
//! exit path.
//!
//! [`PointerCapture`] is the RAII guard for that resource.  Dropping it
//! detaches the listener, so ending a drag, cancelling an edit session, and
//! tearing down the hosting view all release it the same way.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Errors raised by a pointer surface.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// The host refused to install the global listener.
    #[error("could not attach global pointer listener: {0}")]
    AttachFailed(String),

    /// A listener is already attached.
    #[error("global pointer listener is already attached")]
    AlreadyAttached,
}

/// Host surface that can route application-wide pointer events to the
/// layout engine.
///
/// The production implementation is `infrastructure::surface::ApplicationSurface`;
/// tests use `infrastructure::surface::mock::MockPointerSurface`.
pub trait PointerSurface: Send + Sync {
    /// Starts routing application-wide pointer-move/up events.
    fn attach_global(&self) -> Result<(), SurfaceError>;

    /// Stops routing application-wide pointer events.
    fn detach_global(&self);
}

/// Scoped ownership of the global pointer listener.
///
/// Created by [`PointerCapture::acquire`]; the listener is detached exactly
/// once, when the guard is released or dropped.
#[must_use = "dropping the capture detaches the listener immediately"]
pub struct PointerCapture {
    surface: Arc<dyn PointerSurface>,
    released: bool,
}

impl PointerCapture {
    /// Attaches the global listener and returns the guard owning it.
    ///
    /// # Errors
    ///
    /// Propagates the surface's [`SurfaceError`]; nothing is attached then.
    pub fn acquire(surface: Arc<dyn PointerSurface>) -> Result<Self, SurfaceError> {
        surface.attach_global()?;
        debug!("global pointer listener attached");
        Ok(Self {
            surface,
            released: false,
        })
    }

    /// Detaches the listener now instead of at drop.
    pub fn release(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if !self.released {
            self.released = true;
            self.surface.detach_global();
            debug!("global pointer listener detached");
        }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerCapture")
            .field("released", &self.released)
            .finish()
    }
}
