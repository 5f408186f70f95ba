use std::f32::consts::TAU;

use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};

use crate::wheel::geometry;

const ACCENT: Color32 = Color32::from_rgb(0xFF, 0x6B, 0x35);

/// Colors and labelling for one kind of wheel
#[derive(Copy, Clone, Debug)]
pub struct WheelStyle {
    pub palette: [Color32; 10],
    /// Labels longer than this are cut short
    pub max_label: usize,
    pub font_size: f32,
    pub hub_radius: f32,
    pub hub_text: &'static [&'static str],
}

impl WheelStyle {
    pub const MENU: Self = Self {
        palette: [
            Color32::from_rgb(0xFF, 0x6B, 0x35),
            Color32::from_rgb(0xF7, 0x93, 0x1E),
            Color32::from_rgb(0xFD, 0xC8, 0x30),
            Color32::from_rgb(0x37, 0xB3, 0xA0),
            Color32::from_rgb(0x4E, 0xCD, 0xC4),
            Color32::from_rgb(0x45, 0xB7, 0xD1),
            Color32::from_rgb(0x96, 0xCE, 0xB4),
            Color32::from_rgb(0xFF, 0xEA, 0xA7),
            Color32::from_rgb(0xDF, 0xE6, 0xE9),
            Color32::from_rgb(0x74, 0xB9, 0xFF),
        ],
        max_label: 20,
        font_size: 14.0,
        hub_radius: 30.0,
        hub_text: &[],
    };

    pub const PAYMENT: Self = Self {
        palette: [
            Color32::from_rgb(0xFF, 0x6B, 0x35),
            Color32::from_rgb(0xF7, 0x93, 0x1E),
            Color32::from_rgb(0xFD, 0xC8, 0x30),
            Color32::from_rgb(0x37, 0xB3, 0xA0),
            Color32::from_rgb(0x4E, 0xCD, 0xC4),
            Color32::from_rgb(0x45, 0xB7, 0xD1),
            Color32::from_rgb(0x96, 0xCE, 0xB4),
            Color32::from_rgb(0xFF, 0xEA, 0xA7),
            Color32::from_rgb(0x74, 0xB9, 0xFF),
            Color32::from_rgb(0xA2, 0x9B, 0xFE),
        ],
        max_label: 15,
        font_size: 16.0,
        hub_radius: 35.0,
        hub_text: &["WHO", "PAYS?"],
    };
}

/// "Chocolate Lava Cake Supreme" -> "Chocolate Lava Cak..."
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let mut short = label.chars().take(max.saturating_sub(2)).collect::<String>();
    short.push_str("...");
    short
}

/// Draws a wheel at some rotation. Holds no state, the [`Wheel`](crate::wheel::Wheel) does.
pub struct WheelPainter<'a, S> {
    labels: &'a [S],
    rotation: f64,
    style: WheelStyle,
    size: f32,
}

impl<'a, S: AsRef<str>> WheelPainter<'a, S> {
    pub const fn new(labels: &'a [S], rotation: f64, style: WheelStyle) -> Self {
        Self {
            labels,
            rotation,
            style,
            size: 360.0,
        }
    }

    pub const fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn display(self, ui: &mut egui::Ui) -> egui::Response {
        let side = self.size.min(ui.available_width());
        let (resp, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());

        let rect = resp.rect;
        let center = rect.center();
        let radius = side / 2.0 - 20.0;
        let white = Stroke::new(3.0, Color32::WHITE);

        match self.labels.len() {
            0 => {
                painter.circle(center, radius, ui.visuals().faint_bg_color, white);
            }
            1 => {
                painter.circle(center, radius, self.style.palette[0], white);
                self.label(&painter, center, radius, 0, 1);
            }
            count => {
                for index in 0..count {
                    let (start, end) = slice_angles(self.rotation, index, count);
                    let points = std::iter::once(center)
                        .chain(arc(center, radius, start, end))
                        .collect();
                    let fill = self.style.palette[index % self.style.palette.len()];
                    painter.add(Shape::convex_polygon(points, fill, white));
                    self.label(&painter, center, radius, index, count);
                }
            }
        }

        painter.circle(
            center,
            self.style.hub_radius,
            Color32::WHITE,
            Stroke::new(4.0, ACCENT),
        );

        let lines = self.style.hub_text;
        for (i, line) in lines.iter().enumerate() {
            let offset = (i as f32 - (lines.len() as f32 - 1.0) / 2.0) * 15.0;
            painter.text(
                center + vec2(0.0, offset),
                Align2::CENTER_CENTER,
                line,
                FontId::proportional(14.0),
                ACCENT,
            );
        }

        let top = rect.center_top();
        painter.add(Shape::convex_polygon(
            vec![
                pos2(top.x, top.y + 10.0),
                pos2(top.x + 15.0, top.y + 40.0),
                pos2(top.x - 15.0, top.y + 40.0),
            ],
            ACCENT,
            Stroke::new(2.0, Color32::WHITE),
        ));

        resp
    }

    fn label(&self, painter: &egui::Painter, center: Pos2, radius: f32, index: usize, count: usize) {
        let (start, end) = slice_angles(self.rotation, index, count);
        let mid = (start + end) / 2.0;
        let at = center + vec2(mid.cos(), mid.sin()) * radius * 0.65;

        let text = truncate_label(self.labels[index].as_ref(), self.style.max_label);
        // a drop shadow so light slices stay readable
        let font = FontId::proportional(self.style.font_size);
        painter.text(
            at + vec2(1.0, 1.0),
            Align2::CENTER_CENTER,
            &text,
            font.clone(),
            Color32::from_black_alpha(128),
        );
        painter.text(at, Align2::CENTER_CENTER, text, font, Color32::WHITE);
    }
}

/// Screen angles of a slice. The rotation is folded into one turn first so
/// `f32` keeps its precision however long the wheel has been spinning.
fn slice_angles(rotation: f64, index: usize, count: usize) -> (f32, f32) {
    let (start, end) = geometry::slice_bounds(geometry::normalize(rotation), index, count);
    (start as f32, end as f32)
}

fn arc(center: Pos2, radius: f32, start: f32, end: f32) -> impl Iterator<Item = Pos2> {
    let steps = (((end - start).abs() / TAU) * 96.0).ceil().max(2.0) as usize;
    (0..=steps).map(move |i| {
        let angle = start + (end - start) * i as f32 / steps as f32;
        center + vec2(angle.cos(), angle.sin()) * radius
    })
}
