// Shared tuning constants for the background effects. Values mirror the
// shipped site so the Rust engine is visually indistinguishable from it.

// Particle field defaults
pub const DEFAULT_PARTICLE_COUNT: usize = 500;
pub const PARTICLE_SPREAD: f32 = 20.0; // cubic volume side length
pub const PARTICLE_SIZE: f32 = 0.02;
pub const PARTICLE_DRIFT_SPAN: f32 = 0.002; // velocity range is +/- half of this, per axis
pub const PARTICLE_SWAY_AMPLITUDE: f32 = 0.0005;
pub const PARTICLE_SWAY_FREQ_X: f32 = 0.5;
pub const PARTICLE_SWAY_FREQ_Y: f32 = 0.3;
pub const PARTICLE_OPACITY_MIN: f32 = 0.2;
pub const PARTICLE_OPACITY_SPAN: f32 = 0.5;
pub const FIELD_YAW_RATE: f32 = 0.02; // radians per second of elapsed time
pub const FIELD_PITCH_FREQ: f32 = 0.01;
pub const FIELD_PITCH_AMPLITUDE: f32 = 0.1;

// Shooting stars
pub const STAR_SPAWN_CHANCE: f32 = 0.7; // per elapsed spawn interval
pub const STAR_EDGE_X_MIN: f32 = 15.0;
pub const STAR_EDGE_X_SPAN: f32 = 5.0;
pub const STAR_START_Y_MIN: f32 = 8.0;
pub const STAR_START_Y_SPAN: f32 = 7.0;
pub const STAR_START_Z_SPAN: f32 = 10.0;
pub const STAR_SPEED_MIN: f32 = 0.3;
pub const STAR_SPEED_SPAN: f32 = 0.2;
pub const STAR_FALL_MIN: f32 = 0.1;
pub const STAR_FALL_SPAN: f32 = 0.15;
pub const STAR_DRIFT_Z_SPAN: f32 = 0.05;
pub const STAR_LIFETIME_MIN: f32 = 2.0; // seconds
pub const STAR_LIFETIME_SPAN: f32 = 1.5;
pub const STAR_PEAK_OPACITY: f32 = 0.9;
pub const STAR_TRAIL_OPACITY_SCALE: f32 = 0.7;

// Scroll velocity sampling
pub const SCROLL_SAMPLE_INTERVAL_MS: f64 = 50.0;
pub const SCROLL_IDLE_TIMEOUT_MS: f64 = 150.0;
pub const SCROLL_VELOCITY_CAP: f32 = 5000.0; // px/s

// Preload margins by velocity bucket (px ahead of the viewport)
pub const MARGIN_SLOW_PX: u32 = 200; // velocity below SLOW_SCROLL_MAX
pub const MARGIN_MEDIUM_PX: u32 = 400;
pub const MARGIN_FAST_PX: u32 = 800;
pub const SLOW_SCROLL_MAX: f32 = 500.0; // px/s
pub const MEDIUM_SCROLL_MAX: f32 = 1500.0;
pub const APPROACH_MARGIN_PX: u32 = 600; // fixed margin for the prefetch observer

// Mobile detection
pub const MOBILE_VIEWPORT_MAX: u32 = 768; // px; narrower viewports count as mobile

// Diagnostics
pub const FPS_WINDOW_MS: f64 = 1000.0;
pub const FPS_HISTORY_LEN: usize = 10;

// Persisted settings
pub const EFFECTS_ENABLED_KEY: &str = "portfolio-3d-enabled";

// Palette shared by every effect (site accent colors)
pub const COLOR_CYAN: [f32; 3] = [0.0, 0.851, 1.0]; // #00D9FF
pub const COLOR_VIOLET: [f32; 3] = [0.545, 0.361, 0.965]; // #8B5CF6
