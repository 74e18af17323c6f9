//! Scoped release of resources the host will not reclaim on its own (GPU
//! buffers, observers, event listeners). Callbacks run exactly once, in
//! reverse registration order, on explicit `dispose()` or on drop.

pub struct Teardown {
    callbacks: Vec<Box<dyn FnOnce()>>,
    disposed: bool,
}

impl Default for Teardown {
    fn default() -> Self {
        Self::new()
    }
}

impl Teardown {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
            disposed: false,
        }
    }

    /// Register a release callback. Registering after disposal runs the
    /// callback immediately, so late acquisitions are still released.
    pub fn on_teardown(&mut self, callback: impl FnOnce() + 'static) {
        if self.disposed {
            callback();
        } else {
            self.callbacks.push(Box::new(callback));
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run all callbacks, newest first. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        log::debug!("[teardown] releasing {} resources", self.callbacks.len());
        while let Some(callback) = self.callbacks.pop() {
            callback();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.dispose();
    }
}
