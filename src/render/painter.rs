//! [`Surface`] implementation on top of an egui painter.
//!
//! Canvas coordinates start at the top-left corner of the canvas rect; they
//! are translated to screen coordinates by adding the rect's minimum corner.

use eframe::egui;
use egui::Color32;

use crate::topology::Point;

use super::Surface;

pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> PainterSurface<'a> {
    /// Wrap `painter`, drawing into `rect` (usually the painter's clip rect).
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x, p.y)
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 4.0, color);
    }

    fn line(&mut self, from: Point, to: Point, width: f32, color: Color32) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], egui::Stroke::new(width, color));
    }

    fn circle_filled(&mut self, center: Point, radius: f32, color: Color32) {
        self.painter.circle_filled(self.to_screen(center), radius, color);
    }

    fn circle_stroke(&mut self, center: Point, radius: f32, width: f32, color: Color32) {
        self.painter
            .circle_stroke(self.to_screen(center), radius, egui::Stroke::new(width, color));
    }

    fn text(&mut self, anchor: Point, text: &str, size: f32, color: Color32) {
        self.painter.text(
            self.to_screen(anchor),
            egui::Align2::CENTER_TOP,
            text,
            egui::FontId::proportional(size),
            color,
        );
    }
}
