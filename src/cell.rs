use crate::color::Color;

/// Opacities this close to full are snapped to exactly 1
const OPACITY_SNAP: f32 = 1e-6;

/// One addressable unit of the grid.
///
/// `accumulated_opacity` only carries meaning for grayscale painting; every
/// other mutation resets it to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellState {
    color: Color,
    accumulated_opacity: f32,
}

impl CellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(color: Color) -> Self {
        Self { color, accumulated_opacity: 0.0 }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn accumulated_opacity(&self) -> f32 {
        self.accumulated_opacity
    }

    pub fn is_clear(&self) -> bool {
        self.color.is_transparent() && self.accumulated_opacity == 0.0
    }

    pub fn paint(&mut self, color: Color) {
        self.color = color;
        self.accumulated_opacity = 0.0;
    }

    /// Build up `base` one step at a time, never past full opacity.
    /// The result stays in `[0, 1]` whatever `step` is; a NaN step is a no-op.
    pub fn accumulate(&mut self, base: Color, step: f32) {
        let step = if step.is_nan() { 0.0 } else { step };
        let mut opacity = (self.accumulated_opacity + step).clamp(0.0, 1.0);
        if 1.0 - opacity < OPACITY_SNAP {
            opacity = 1.0;
        }
        self.accumulated_opacity = opacity;
        self.color = base.with_alpha(opacity);
    }

    pub fn erase(&mut self) {
        self.clear();
    }

    pub fn clear(&mut self) {
        self.color = Color::TRANSPARENT;
        self.accumulated_opacity = 0.0;
    }
}
