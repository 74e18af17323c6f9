//! Shooting stars: short-lived streaks spawned at the scene edges on a
//! probabilistic timer, each dragging a fixed-length position trail.
//!
//! Lifecycle per entity is spawned -> active -> expired; expiry removes the
//! star from the active set the same frame `lifetime` reaches
//! `max_lifetime`. The concurrent-active ceiling comes from the device
//! budget and is enforced at spawn time.

use crate::capability::EffectBudget;
use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;
use std::time::Duration;

/// Fixed-length circular history of past positions, oldest overwritten
/// first. A wrapping head index replaces the per-frame array shift the
/// site used for the same trail.
#[derive(Clone, Debug)]
pub struct TrailRing {
    buf: Vec<Vec3>,
    head: usize,
}

impl TrailRing {
    /// All slots start at `fill` so a fresh trail renders as a point, not a
    /// streak back to the origin.
    pub fn new(len: usize, fill: Vec3) -> Self {
        Self {
            buf: vec![fill; len.max(1)],
            head: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn push(&mut self, pos: Vec3) {
        self.buf[self.head] = pos;
        self.head = (self.head + 1) % self.buf.len();
    }

    /// Samples oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        let n = self.buf.len();
        (0..n).map(move |i| self.buf[(self.head + i) % n])
    }

    pub fn newest(&self) -> Vec3 {
        let n = self.buf.len();
        self.buf[(self.head + n - 1) % n]
    }
}

#[derive(Clone, Debug)]
pub struct ShootingStar {
    pub position: Vec3,
    pub velocity: Vec3,
    pub trail: TrailRing,
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl ShootingStar {
    fn spawn(rng: &mut StdRng, trail_len: usize) -> Self {
        // Start at a left or right edge, upper half of the scene, heading
        // toward the opposite side and downward.
        let side: f32 = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let start = Vec3::new(
            side * (STAR_EDGE_X_MIN + rng.gen::<f32>() * STAR_EDGE_X_SPAN),
            STAR_START_Y_MIN + rng.gen::<f32>() * STAR_START_Y_SPAN,
            (rng.gen::<f32>() - 0.5) * STAR_START_Z_SPAN,
        );
        let speed = STAR_SPEED_MIN + rng.gen::<f32>() * STAR_SPEED_SPAN;
        let velocity = Vec3::new(
            -side * speed,
            -(STAR_FALL_MIN + rng.gen::<f32>() * STAR_FALL_SPAN),
            (rng.gen::<f32>() - 0.5) * STAR_DRIFT_Z_SPAN,
        );
        Self {
            position: start,
            velocity,
            trail: TrailRing::new(trail_len, start),
            lifetime: 0.0,
            max_lifetime: STAR_LIFETIME_MIN + rng.gen::<f32>() * STAR_LIFETIME_SPAN,
        }
    }

    /// Advance one frame. Returns false once expired.
    fn advance(&mut self, dt: f32) -> bool {
        self.lifetime += dt;
        if self.lifetime >= self.max_lifetime {
            return false;
        }
        self.position += self.velocity;
        self.trail.push(self.position);
        true
    }

    /// Quadratic burn-out: bright for most of the flight, then a fast fade.
    pub fn opacity(&self) -> f32 {
        let f = (self.lifetime / self.max_lifetime).clamp(0.0, 1.0);
        (STAR_PEAK_OPACITY * (1.0 - f * f)).max(0.0)
    }

    pub fn trail_opacity(&self) -> f32 {
        self.opacity() * STAR_TRAIL_OPACITY_SCALE
    }
}

pub struct StarField {
    stars: SmallVec<[ShootingStar; 4]>,
    rng: StdRng,
    spawn_accum: Duration,
    spawn_interval: Duration,
    max_stars: usize,
    trail_len: usize,
}

impl StarField {
    pub fn new(budget: &EffectBudget, seed: u64) -> Self {
        Self {
            stars: SmallVec::new(),
            rng: StdRng::seed_from_u64(seed),
            spawn_accum: Duration::ZERO,
            spawn_interval: budget.star_spawn_interval,
            max_stars: budget.max_stars,
            trail_len: budget.trail_len,
        }
    }

    pub fn active(&self) -> &[ShootingStar] {
        &self.stars
    }

    pub fn active_count(&self) -> usize {
        self.stars.len()
    }

    pub fn max_stars(&self) -> usize {
        self.max_stars
    }

    /// Advance one frame. The spawn timer accumulates real frame time, so
    /// there is no host timer to cancel when the effect unmounts.
    pub fn step(&mut self, dt: Duration) {
        self.spawn_accum += dt;
        while self.spawn_accum >= self.spawn_interval {
            self.spawn_accum -= self.spawn_interval;
            self.try_spawn();
        }

        let dt_sec = dt.as_secs_f32();
        self.stars.retain(|star| star.advance(dt_sec));
    }

    fn try_spawn(&mut self) {
        if self.stars.len() >= self.max_stars {
            return;
        }
        // Interval coin-flip: most ticks spawn, some stay quiet.
        if self.rng.gen::<f32>() < STAR_SPAWN_CHANCE {
            let star = ShootingStar::spawn(&mut self.rng, self.trail_len);
            log::debug!(
                "[stars] spawn at ({:.1},{:.1},{:.1}) lifetime {:.2}s ({} active)",
                star.position.x,
                star.position.y,
                star.position.z,
                star.max_lifetime,
                self.stars.len() + 1
            );
            self.stars.push(star);
        }
    }
}
