//! egui back end: replays a [`Scene`] on an [`egui::Painter`].

use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke};

use super::base::{Color, Point};
use super::scene::{DrawCommand, Scene};

impl From<Color> for Color32 {
    fn from(color: Color) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

/// Maps device pixels of a scene into the painter's coordinate space.
#[derive(Debug, Clone, Copy)]
pub struct ScenePainter {
    origin: Pos2,
    /// Device pixels per egui point
    scale: f32,
}

impl ScenePainter {
    /// `scale` is the quality factor the canvas was built with.
    pub fn new(area: egui::Rect, scale: f64) -> Self {
        Self {
            origin: area.min,
            scale: scale.max(f64::EPSILON) as f32,
        }
    }

    fn pos(&self, point: Point) -> Pos2 {
        Pos2::new(
            self.origin.x + point.x as f32 / self.scale,
            self.origin.y + point.y as f32 / self.scale,
        )
    }

    fn len(&self, value: f64) -> f32 {
        value as f32 / self.scale
    }

    pub fn paint(&self, painter: &Painter, scene: &Scene) {
        for command in &scene.commands {
            self.paint_command(painter, command);
        }
    }

    fn paint_command(&self, painter: &Painter, command: &DrawCommand) {
        match command {
            DrawCommand::Rect { rect, corner_radius, color } => {
                let min = self.pos(Point::new(rect.x, rect.y));
                let area = egui::Rect::from_min_size(min, egui::vec2(self.len(rect.width), self.len(rect.height)));
                painter.rect_filled(area, self.len(*corner_radius), Color32::from(*color));
            }
            DrawCommand::Line { from, to, width, color, dash } => {
                let stroke = Stroke::new(self.len(*width), Color32::from(*color));
                let points = [self.pos(*from), self.pos(*to)];
                match dash {
                    Some(dash) => {
                        let dash = self.len(*dash);
                        painter.extend(Shape::dashed_line(&points, stroke, dash, dash));
                    }
                    None => {
                        painter.line_segment(points, stroke);
                    }
                }
            }
            DrawCommand::Polyline { points, width, color } => {
                let points: Vec<Pos2> = points.iter().map(|point| self.pos(*point)).collect();
                painter.add(Shape::line(points, Stroke::new(self.len(*width), Color32::from(*color))));
            }
            DrawCommand::Circle { center, radius, color } => {
                painter.circle_filled(self.pos(*center), self.len(*radius), Color32::from(*color));
            }
            DrawCommand::Triangle { points, color } => {
                let points = points.iter().map(|point| self.pos(*point)).collect();
                painter.add(Shape::convex_polygon(points, Color32::from(*color), Stroke::NONE));
            }
            DrawCommand::Text { position, text, size, color } => {
                painter.text(
                    self.pos(*position),
                    Align2::LEFT_CENTER,
                    text,
                    FontId::proportional(self.len(*size)),
                    Color32::from(*color),
                );
            }
        }
    }
}
