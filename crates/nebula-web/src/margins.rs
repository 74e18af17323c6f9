// Pure observer-margin helpers, kept free of web-sys so host tests can
// include this file directly.

/// CSS rootMargin string for a symmetric preload margin.
pub fn root_margin_css(margin_px: u32) -> String {
    format!("{margin_px}px")
}

/// Intersection threshold used by every section gate observer.
pub const GATE_THRESHOLD: f64 = 0.1;

/// The approach (prefetch) observer fires as soon as any part of the
/// section crosses the widened margin.
pub const APPROACH_THRESHOLD: f64 = 0.0;
