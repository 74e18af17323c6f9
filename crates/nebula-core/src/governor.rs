//! Visibility gate for deferred sections.
//!
//! A section mounts its real content the first time an intersection report
//! lands inside the current preload margin, and stays mounted from then on.
//! The margin follows the scroll-velocity bucket; when the bucket changes,
//! the owner is told to rebuild its observer with the new margin. A second,
//! fixed-margin "approaching" latch fires at most once and is used to
//! prefetch a section's assets ahead of the mount.

use crate::constants::APPROACH_MARGIN_PX;
use crate::scroll::preload_margin_px;

#[derive(Clone, Debug)]
pub struct SectionGate {
    margin_px: u32,
    mounted: bool,
    prefetch_fired: bool,
}

impl Default for SectionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionGate {
    /// New gates assume an idle page, hence the slow-scroll margin.
    pub fn new() -> Self {
        Self {
            margin_px: preload_margin_px(0.0),
            mounted: false,
            prefetch_fired: false,
        }
    }

    pub fn margin_px(&self) -> u32 {
        self.margin_px
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Fixed margin for the independent approach observer.
    pub fn approach_margin_px(&self) -> u32 {
        APPROACH_MARGIN_PX
    }

    /// Re-evaluate the margin for a new velocity sample. Returns the new
    /// margin only when the bucket materially changed and the gate still
    /// needs its observer; `None` means keep the observer as-is.
    pub fn retune(&mut self, velocity: f32) -> Option<u32> {
        if self.mounted {
            return None;
        }
        let margin = preload_margin_px(velocity);
        if margin != self.margin_px {
            self.margin_px = margin;
            Some(margin)
        } else {
            None
        }
    }

    /// Intersection report from the mount observer. Returns true exactly
    /// once, on the report that mounts the section; the latch is sticky,
    /// so scrolling back out never unmounts.
    pub fn on_intersection(&mut self, intersecting: bool) -> bool {
        if intersecting && !self.mounted {
            self.mounted = true;
            log::debug!("[gate] section mounted (margin {}px)", self.margin_px);
            return true;
        }
        false
    }

    /// Intersection report from the approach observer. Returns true at most
    /// once per section instance.
    pub fn on_approach(&mut self, intersecting: bool) -> bool {
        if intersecting && !self.prefetch_fired {
            self.prefetch_fired = true;
            return true;
        }
        false
    }

    pub fn prefetch_fired(&self) -> bool {
        self.prefetch_fired
    }
}
