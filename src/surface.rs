//! Drawing surface seam.
//!
//! The field only ever clears, draws axis-aligned filled rectangles and
//! presents. [`RectBatch`] records those calls as a retained draw list that a
//! GPU backend can upload in one buffer write.

use encase::ShaderType;

use crate::Color;

pub trait Surface {
    /// Clears everything drawn since the last present to `color`.
    fn fill(&mut self, color: Color);
    fn draw_filled_rect(&mut self, color: Color, x: f32, y: f32, width: f32, height: f32);
    /// Publishes the frame drawn so far.
    fn present(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, ShaderType)]
pub struct FilledRect {
    pub position: cgmath::Vector2<f32>,
    pub size: cgmath::Vector2<f32>,
    pub color: cgmath::Vector4<f32>,
}

impl FilledRect {
    pub fn new(color: Color, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: cgmath::vec2(x, y),
            size: cgmath::vec2(width, height),
            color: color.extend(1.0),
        }
    }
}

/// Draw list with a pending and a presented frame.
///
/// `fill` is recorded as a rectangle spanning the whole surface so the
/// background goes through the same pipeline as the particles.
pub struct RectBatch {
    size: cgmath::Vector2<f32>,
    pending: Vec<FilledRect>,
    presented: Vec<FilledRect>,
}

impl RectBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: cgmath::vec2(width, height),
            pending: vec![],
            presented: vec![],
        }
    }

    pub fn size(&self) -> cgmath::Vector2<f32> {
        self.size
    }

    /// Rectangles of the last presented frame, in draw order.
    pub fn frame(&self) -> &[FilledRect] {
        &self.presented
    }
}

impl Surface for RectBatch {
    fn fill(&mut self, color: Color) {
        self.pending.clear();
        self.pending
            .push(FilledRect::new(color, 0.0, 0.0, self.size.x, self.size.y));
    }

    fn draw_filled_rect(&mut self, color: Color, x: f32, y: f32, width: f32, height: f32) {
        self.pending.push(FilledRect::new(color, x, y, width, height));
    }

    fn present(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.presented);
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_visible_before_present() {
        let mut batch = RectBatch::new(500.0, 300.0);
        batch.fill(cgmath::vec3(1.0, 1.0, 1.0));
        batch.draw_filled_rect(cgmath::vec3(1.0, 0.0, 0.0), 10.0, 20.0, 5.0, 5.0);
        assert!(batch.frame().is_empty());

        batch.present();
        assert_eq!(batch.frame().len(), 2);
    }

    #[test]
    fn fill_covers_surface_and_discards_pending() {
        let mut batch = RectBatch::new(500.0, 300.0);
        batch.draw_filled_rect(cgmath::vec3(0.0, 0.0, 1.0), 1.0, 1.0, 5.0, 5.0);
        batch.fill(cgmath::vec3(1.0, 1.0, 1.0));
        batch.present();

        assert_eq!(
            batch.frame(),
            &[FilledRect::new(cgmath::vec3(1.0, 1.0, 1.0), 0.0, 0.0, 500.0, 300.0)]
        );
    }

    #[test]
    fn present_replaces_previous_frame() {
        let mut batch = RectBatch::new(10.0, 10.0);
        batch.fill(cgmath::vec3(0.0, 0.0, 0.0));
        batch.draw_filled_rect(cgmath::vec3(1.0, 1.0, 0.0), 2.0, 3.0, 5.0, 5.0);
        batch.present();

        batch.fill(cgmath::vec3(1.0, 1.0, 1.0));
        batch.present();

        assert_eq!(batch.frame().len(), 1);
        assert_eq!(batch.frame()[0].color, cgmath::vec4(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn rect_color_is_opaque() {
        let rect = FilledRect::new(cgmath::vec3(0.0, 1.0, 0.0), 3.0, 4.0, 5.0, 5.0);
        assert_eq!(rect.color.w, 1.0);
        assert_eq!(rect.position, cgmath::vec2(3.0, 4.0));
    }
}
