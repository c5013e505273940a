//! Drawing of layouts and packets.
//!
//! All drawing goes through the [`Surface`] trait so the renderer can target
//! an egui painter in the application and a recording surface in tests.

pub mod painter;
pub mod palette;
pub mod renderer;

use egui::Color32;

use crate::topology::Point;

pub use painter::PainterSurface;
pub use palette::Palette;
pub use renderer::{RenderOptions, render_layout};

/// Minimal 2D drawing surface in canvas pixel coordinates.
pub trait Surface {
    /// Fill the whole surface with `color`, discarding the previous frame.
    fn clear(&mut self, color: Color32);
    fn line(&mut self, from: Point, to: Point, width: f32, color: Color32);
    fn circle_filled(&mut self, center: Point, radius: f32, color: Color32);
    fn circle_stroke(&mut self, center: Point, radius: f32, width: f32, color: Color32);
    /// Draw `text` horizontally centred on `anchor`, hanging below it.
    fn text(&mut self, anchor: Point, text: &str, size: f32, color: Color32);
}
