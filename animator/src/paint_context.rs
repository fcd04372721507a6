use svganim_geometry::{Color, Matrix};

/// The rendering state animations are composited onto.
pub trait PaintContext {
    fn fill_color(&self) -> Color;
    fn set_fill_color(&mut self, color: Color);

    fn stroke_color(&self) -> Color;
    fn set_stroke_color(&mut self, color: Color);

    /// The cumulative transform from node to device space.
    fn world_transform(&self) -> Matrix;
    fn set_world_transform(&mut self, transform: Matrix);
}

/// A plain paint state, for headless rendering and for recording what animations set.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintState {
    pub fill: Color,
    pub stroke: Color,
    pub world_transform: Matrix,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::TRANSPARENT,
            world_transform: Matrix::identity(),
        }
    }
}

impl PaintContext for PaintState {
    fn fill_color(&self) -> Color {
        self.fill
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn stroke_color(&self) -> Color {
        self.stroke
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn world_transform(&self) -> Matrix {
        self.world_transform
    }

    fn set_world_transform(&mut self, transform: Matrix) {
        self.world_transform = transform;
    }
}
