//! Mock pointer surface for unit testing.
//!
//! Records attach/detach calls so tests can assert that the global listener
//! is released on every exit path, without a host window.

use std::sync::{Arc, Mutex};

use crate::application::pointer::{PointerSurface, SurfaceError};

#[derive(Debug, Default)]
struct Counters {
    attached: bool,
    attaches: u32,
    detaches: u32,
}

/// A mock implementation of [`PointerSurface`] that counts calls.
#[derive(Debug, Default)]
pub struct MockPointerSurface {
    counters: Arc<Mutex<Counters>>,
    fail_with: Option<String>,
}

impl MockPointerSurface {
    /// Creates a surface that accepts every attach.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface whose attach always fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            counters: Arc::default(),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.counters.lock().expect("lock poisoned").attached
    }

    pub fn attach_count(&self) -> u32 {
        self.counters.lock().expect("lock poisoned").attaches
    }

    pub fn detach_count(&self) -> u32 {
        self.counters.lock().expect("lock poisoned").detaches
    }
}

impl PointerSurface for MockPointerSurface {
    fn attach_global(&self) -> Result<(), SurfaceError> {
        if let Some(reason) = &self.fail_with {
            return Err(SurfaceError::AttachFailed(reason.clone()));
        }
        let mut counters = self.counters.lock().expect("lock poisoned");
        if counters.attached {
            return Err(SurfaceError::AlreadyAttached);
        }
        counters.attached = true;
        counters.attaches += 1;
        Ok(())
    }

    fn detach_global(&self) {
        let mut counters = self.counters.lock().expect("lock poisoned");
        counters.attached = false;
        counters.detaches += 1;
    }
}
