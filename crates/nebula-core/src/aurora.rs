//! Aurora ribbon parameterization. The ribbons themselves are pure shader
//! work; what varies per device tier is how many ribbons exist and how
//! finely each strip is tessellated. Per-ribbon motion parameters are
//! rolled once at mount and stay fixed.

use crate::capability::EffectBudget;
use crate::constants::{COLOR_CYAN, COLOR_VIOLET};
use rand::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct RibbonParams {
    pub height: f32,
    pub depth: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
    pub opacity: f32,
}

/// Roll one parameter row per ribbon in the tier budget. Even ribbons run
/// cyan-to-violet, odd ones the reverse; deeper ribbons sit higher and
/// fainter.
pub fn generate_ribbons(budget: &EffectBudget, seed: u64) -> Vec<RibbonParams> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..budget.aurora_ribbons)
        .map(|i| {
            let (color_a, color_b) = if i % 2 == 0 {
                (COLOR_CYAN, COLOR_VIOLET)
            } else {
                (COLOR_VIOLET, COLOR_CYAN)
            };
            RibbonParams {
                height: -8.0 + i as f32 * 3.0,
                depth: -(i as f32) * 2.0,
                speed: 0.3 + rng.gen::<f32>() * 0.2,
                amplitude: 1.5 + rng.gen::<f32>() * 0.5,
                color_a,
                color_b,
                opacity: 0.08 - i as f32 * 0.01,
            }
        })
        .collect()
}
