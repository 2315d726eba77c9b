use jam_model::room::{Position, Size};
use rand::Rng;

use crate::config::LayoutConfig;

/// Places room windows inside the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    viewport: Size,
    window: Size,
    jitter: f64,
}

impl Layout {
    pub fn new(config: &LayoutConfig) -> Self {
        Layout {
            viewport: Size {
                width: config.viewport_width,
                height: config.viewport_height,
            },
            window: Size {
                width: config.window_width,
                height: config.window_height,
            },
            jitter: config.jitter.max(0.0),
        }
    }

    pub fn window_size(&self) -> Size {
        self.window
    }

    /// Around the centre of the viewport, randomly nudged so stacked windows do not hide each other
    pub fn place<R: Rng>(&self, rng: &mut R) -> Position {
        let offset = |rng: &mut R| {
            if self.jitter > 0.0 {
                rng.gen_range(-0.5..0.5) * self.jitter
            } else {
                0.0
            }
        };

        let x = (self.viewport.width - self.window.width) / 2.0 + offset(&mut *rng);
        let y = (self.viewport.height - self.window.height) / 2.0 + offset(&mut *rng);

        self.clamp(Position::new(x, y))
    }

    /// Keeps the whole window inside the viewport, pinned to the top left when it does not fit
    pub fn clamp(&self, position: Position) -> Position {
        let max_x = (self.viewport.width - self.window.width).max(0.0);
        let max_y = (self.viewport.height - self.window.height).max(0.0);

        Position::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
    }
}
