//! Lens-flare element parameterization: each light source gets a run of
//! translucent discs strung along the light-to-center axis. Element counts
//! follow the device tier; the slow breathing of their opacity is driven
//! by the frame time in the renderer.

use crate::capability::EffectBudget;
use crate::constants::{COLOR_CYAN, COLOR_VIOLET};
use rand::prelude::*;

pub const DEFAULT_FLARE_LIGHTS: [[f32; 3]; 3] =
    [[10.0, 10.0, 5.0], [-10.0, -10.0, -5.0], [0.0, 8.0, -20.0]];

#[derive(Clone, Copy, Debug)]
pub struct FlareElement {
    pub light_index: usize,
    /// 0 at the light, 1 at the screen center.
    pub axis_offset: f32,
    pub scale: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

pub fn generate_flares(budget: &EffectBudget, light_count: usize, seed: u64) -> Vec<FlareElement> {
    let mut rng = StdRng::seed_from_u64(seed);
    let per_light = budget.flare_elements;
    let mut elements = Vec::with_capacity(light_count * per_light);
    for light_index in 0..light_count {
        for i in 0..per_light {
            elements.push(FlareElement {
                light_index,
                axis_offset: 0.2 + (i as f32 / per_light as f32) * 0.8,
                scale: 0.1 + rng.gen::<f32>() * 0.3,
                color: if i % 2 == 0 { COLOR_CYAN } else { COLOR_VIOLET },
                opacity: (0.15 - i as f32 * 0.02).max(0.0),
            });
        }
    }
    elements
}
