//! Central frame scheduler: effects register a per-frame callback on mount
//! and deregister it on unmount, so no callback can outlive its owner.
//! The host drives `run_frame` from its animation loop.

/// Handle returned by [`FrameScheduler::register`]; required to deregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

/// Timing information passed to every callback each frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameTick {
    /// Seconds since the scheduler started running.
    pub time: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
}

type FrameCallback = Box<dyn FnMut(&FrameTick)>;

#[derive(Default)]
pub struct FrameScheduler {
    slots: Vec<(CallbackId, FrameCallback)>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, callback: impl FnMut(&FrameTick) + 'static) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Idempotent; returns whether it was registered.
    pub fn deregister(&mut self, id: CallbackId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        before != self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Invoke every registered callback in registration order.
    pub fn run_frame(&mut self, tick: &FrameTick) {
        for (_, callback) in self.slots.iter_mut() {
            callback(tick);
        }
    }

    /// Drop every callback at once; used on scene teardown.
    pub fn clear(&mut self) {
        if !self.slots.is_empty() {
            log::debug!("[scheduler] clearing {} callbacks", self.slots.len());
        }
        self.slots.clear();
    }
}
