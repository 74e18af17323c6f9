//! Frame-rate counter behind the development overlay: frames are counted
//! into one-second windows, with a rolling average over the last ten
//! readings.

use crate::constants::{FPS_HISTORY_LEN, FPS_WINDOW_MS};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug)]
pub struct FpsReading {
    pub fps: u32,
    pub avg: u32,
}

pub struct FpsCounter {
    frames: u32,
    window_start_ms: f64,
    history: VecDeque<u32>,
    primed: bool,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            window_start_ms: 0.0,
            history: VecDeque::with_capacity(FPS_HISTORY_LEN),
            primed: false,
        }
    }

    /// Count one frame. Emits a reading when the current window closes.
    pub fn frame(&mut self, now_ms: f64) -> Option<FpsReading> {
        if !self.primed {
            self.window_start_ms = now_ms;
            self.primed = true;
        }
        self.frames += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed < FPS_WINDOW_MS {
            return None;
        }

        let fps = ((self.frames as f64 * 1000.0) / elapsed).round() as u32;
        if self.history.len() == FPS_HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(fps);
        let avg = (self.history.iter().sum::<u32>() as f64 / self.history.len() as f64).round()
            as u32;

        self.frames = 0;
        self.window_start_ms = now_ms;
        Some(FpsReading { fps, avg })
    }
}
