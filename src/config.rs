/// Surface units per logical unit of the rectangle
pub const DISPLAY_SCALE: f64 = 100.0;

/// Length of the full-turn animation in milliseconds
pub const ANIMATION_MS: f64 = 1000.0;

/// Distance between axis tick labels in surface units
pub const TICK_SPACING: usize = 50;

/// Radius of the pivot marker in surface units
pub const MARKER_RADIUS: f64 = 5.0;

/// Scene settings shared by the controller and the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Display scale applied by the transform builder
    pub scale: f64,
    /// Animation duration in milliseconds
    pub animation_ms: f64,
    /// Tick label spacing
    pub tick_spacing: usize,
    /// Pivot marker radius
    pub marker_radius: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scale: DISPLAY_SCALE,
            animation_ms: ANIMATION_MS,
            tick_spacing: TICK_SPACING,
            marker_radius: MARKER_RADIUS,
        }
    }
}
