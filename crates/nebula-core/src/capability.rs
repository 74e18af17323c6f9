//! Device capability classification and the per-tier effect budget table.
//!
//! The front-end probes the host once (user agent, viewport width, WebGL
//! renderer string, reduced-motion preference) and hands the raw answers
//! here. Classification is pure and total: a probe that could not answer a
//! question degrades to the conservative default instead of failing.

use crate::constants::MOBILE_VIEWPORT_MAX;
use std::time::Duration;

/// Coarse GPU capability classes derived from the unmasked renderer string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpuTier {
    Low,
    Medium,
    High,
}

/// Overall performance class used to index the [`EffectBudget`] table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerfClass {
    Low,
    Medium,
    High,
}

/// Raw answers collected by the one-shot startup probe.
#[derive(Clone, Debug, Default)]
pub struct ProbeInputs<'a> {
    pub user_agent: &'a str,
    pub viewport_width: u32,
    /// Unmasked WebGL renderer string, when introspection was available.
    pub renderer: Option<&'a str>,
    pub reduced_motion: bool,
}

/// Immutable capability record for the session.
#[derive(Clone, Copy, Debug)]
pub struct DeviceProfile {
    pub is_mobile: bool,
    pub is_low_end: bool,
    pub gpu_tier: GpuTier,
    pub max_dpr: f64,
    pub reduced_motion: bool,
}

const MOBILE_UA_MARKERS: &[&str] = &[
    "android", "webos", "iphone", "ipad", "ipod", "blackberry", "iemobile", "opera mini",
];

const LOW_GPU_MARKERS: &[&str] = &["intel", "mali-4", "adreno 3", "powervr"];
const HIGH_GPU_MARKERS: &[&str] = &["nvidia", "radeon", "adreno 6", "apple gpu"];

/// Classify a WebGL renderer string. `None` (introspection unavailable)
/// defaults to `Medium` so a blind probe never disables effects outright.
pub fn classify_renderer(renderer: Option<&str>) -> GpuTier {
    let Some(renderer) = renderer else {
        return GpuTier::Medium;
    };
    let lower = renderer.to_ascii_lowercase();
    if LOW_GPU_MARKERS.iter().any(|m| lower.contains(m)) {
        GpuTier::Low
    } else if HIGH_GPU_MARKERS.iter().any(|m| lower.contains(m)) {
        GpuTier::High
    } else {
        GpuTier::Medium
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let lower = user_agent.to_ascii_lowercase();
    MOBILE_UA_MARKERS.iter().any(|m| lower.contains(m))
}

impl DeviceProfile {
    pub fn from_probe(inputs: &ProbeInputs<'_>) -> Self {
        let is_mobile =
            is_mobile_user_agent(inputs.user_agent) || inputs.viewport_width < MOBILE_VIEWPORT_MAX;
        let gpu_tier = classify_renderer(inputs.renderer);
        let is_low_end = is_mobile && gpu_tier == GpuTier::Low;
        let max_dpr = if is_low_end {
            1.0
        } else if is_mobile {
            1.5
        } else {
            2.0
        };
        Self {
            is_mobile,
            is_low_end,
            gpu_tier,
            max_dpr,
            reduced_motion: inputs.reduced_motion,
        }
    }

    pub fn perf_class(&self) -> PerfClass {
        if self.is_low_end {
            PerfClass::Low
        } else if self.is_mobile {
            PerfClass::Medium
        } else {
            PerfClass::High
        }
    }

    pub fn budget(&self) -> &'static EffectBudget {
        EffectBudget::for_class(self.perf_class())
    }

    /// Whether a WebGL/WebGPU canvas may be constructed at all. Low-end
    /// devices and reduced-motion users get the static fallback instead.
    pub fn allows_canvas(&self) -> bool {
        !self.is_low_end && !self.reduced_motion
    }
}

/// Per-tier complexity budget for every effect. One table instead of the
/// per-component ternaries the site grew organically.
#[derive(Clone, Copy, Debug)]
pub struct EffectBudget {
    pub particle_scale: f32,
    pub aurora_ribbons: usize,
    pub aurora_segments: u32,
    pub grid_extent: f32,
    pub grid_divisions: u32,
    pub flare_elements: usize,
    pub max_stars: usize,
    pub star_spawn_interval: Duration,
    pub trail_len: usize,
    pub max_dpr: f64,
}

static BUDGETS: [EffectBudget; 3] = [
    // Low: low-end mobile hardware
    EffectBudget {
        particle_scale: 0.3,
        aurora_ribbons: 2,
        aurora_segments: 20,
        grid_extent: 40.0,
        grid_divisions: 20,
        flare_elements: 3,
        max_stars: 1,
        star_spawn_interval: Duration::from_millis(4000),
        trail_len: 10,
        max_dpr: 1.0,
    },
    // Medium: capable phones and tablets
    EffectBudget {
        particle_scale: 0.5,
        aurora_ribbons: 3,
        aurora_segments: 40,
        grid_extent: 60.0,
        grid_divisions: 30,
        flare_elements: 4,
        max_stars: 2,
        star_spawn_interval: Duration::from_millis(3000),
        trail_len: 15,
        max_dpr: 1.5,
    },
    // High: desktop
    EffectBudget {
        particle_scale: 1.0,
        aurora_ribbons: 5,
        aurora_segments: 80,
        grid_extent: 100.0,
        grid_divisions: 50,
        flare_elements: 6,
        max_stars: 3,
        star_spawn_interval: Duration::from_millis(2000),
        trail_len: 20,
        max_dpr: 2.0,
    },
];

impl EffectBudget {
    pub fn for_class(class: PerfClass) -> &'static EffectBudget {
        match class {
            PerfClass::Low => &BUDGETS[0],
            PerfClass::Medium => &BUDGETS[1],
            PerfClass::High => &BUDGETS[2],
        }
    }

    /// Scale a nominal particle count by this tier's budget.
    pub fn scaled_particle_count(&self, nominal: usize) -> usize {
        (nominal as f32 * self.particle_scale).floor() as usize
    }
}
