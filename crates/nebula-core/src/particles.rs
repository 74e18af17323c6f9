//! Ambient particle field: a fixed batch of drifting points inside a cubic
//! volume with toroidal wrap-around, plus a slow rotation of the whole
//! group. Counts are fixed at mount time from the device budget.

use crate::capability::EffectBudget;
use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct ParticleParams {
    pub count: usize,
    pub spread: f32,
    pub size: f32,
    pub color: [f32; 3],
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            spread: PARTICLE_SPREAD,
            size: PARTICLE_SIZE,
            color: COLOR_CYAN,
        }
    }
}

/// Packed per-particle data uploaded straight to the instance buffer.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 3],
    pub opacity: f32,
}

pub struct ParticleField {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    opacities: Vec<f32>,
    params: ParticleParams,
    yaw: f32,
    pitch: f32,
}

impl ParticleField {
    /// Allocate the batch. The nominal count is clamped by the tier budget
    /// before any particle exists, so the cap invariant holds from frame 0.
    pub fn new(params: ParticleParams, budget: &EffectBudget, seed: u64) -> Self {
        let count = budget.scaled_particle_count(params.count);
        let mut rng = StdRng::seed_from_u64(seed);
        let half = params.spread / 2.0;

        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);
        let mut opacities = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(Vec3::new(
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            ));
            let v = PARTICLE_DRIFT_SPAN / 2.0;
            velocities.push(Vec3::new(
                rng.gen_range(-v..=v),
                rng.gen_range(-v..=v),
                rng.gen_range(-v..=v),
            ));
            opacities.push(PARTICLE_OPACITY_MIN + rng.gen::<f32>() * PARTICLE_OPACITY_SPAN);
        }

        Self {
            positions,
            velocities,
            opacities,
            params,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn params(&self) -> &ParticleParams {
        &self.params
    }

    /// Group rotation as (yaw, pitch), applied by the renderer.
    pub fn rotation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    /// Advance one frame. `time` is seconds since the effect mounted; the
    /// sway phase is the particle index, so each particle follows its own
    /// offset of the same slow curve.
    pub fn step(&mut self, time: f32) {
        let half = self.params.spread / 2.0;
        for (i, (pos, vel)) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter())
            .enumerate()
        {
            let phase = i as f32;
            pos.x += vel.x + (time * PARTICLE_SWAY_FREQ_X + phase).sin() * PARTICLE_SWAY_AMPLITUDE;
            pos.y += vel.y + (time * PARTICLE_SWAY_FREQ_Y + phase).cos() * PARTICLE_SWAY_AMPLITUDE;
            pos.z += vel.z;

            // Toroidal wrap keeps the field visually continuous.
            wrap_axis(&mut pos.x, half);
            wrap_axis(&mut pos.y, half);
            wrap_axis(&mut pos.z, half);
        }
        self.yaw = time * FIELD_YAW_RATE;
        self.pitch = (time * FIELD_PITCH_FREQ).sin() * FIELD_PITCH_AMPLITUDE;
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.reserve(self.positions.len());
        for (pos, opacity) in self.positions.iter().zip(self.opacities.iter()) {
            out.push(ParticleInstance {
                pos: pos.to_array(),
                opacity: *opacity,
            });
        }
    }
}

#[inline]
fn wrap_axis(coord: &mut f32, half: f32) {
    if *coord > half {
        *coord = -half;
    } else if *coord < -half {
        *coord = half;
    }
}
