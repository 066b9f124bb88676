//! Device metrics supplied by the host.

use crate::geom::Expanse;

/// Discrete UI scale tiers. Each multiplies the base text unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UiScale {
    /// 80%.
    Smallest,
    /// 90%.
    Small,
    /// 100%.
    #[default]
    Normal,
    /// 120%.
    Large,
    /// 140%.
    Largest,
}

impl UiScale {
    /// Multiplier applied to the base text unit.
    pub fn factor(self) -> f32 {
        match self {
            Self::Smallest => 0.8,
            Self::Small => 0.9,
            Self::Normal => 1.0,
            Self::Large => 1.2,
            Self::Largest => 1.4,
        }
    }
}

/// Viewport size, pixel density and UI scale of the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceMetrics {
    /// Viewport size in pixels.
    pub viewport: Expanse,
    /// Device pixel density relative to a baseline display.
    pub density: f32,
    /// User-selected UI scale.
    pub scale: UiScale,
}

impl DeviceMetrics {
    /// Metrics for a viewport at density 1 and normal scale.
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            viewport: Expanse::new(w, h),
            density: 1.0,
            scale: UiScale::Normal,
        }
    }

    /// Combined density and scale multiplier.
    pub fn factor(&self) -> f32 {
        self.density * self.scale.factor()
    }
}

impl Default for DeviceMetrics {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
