use egui::{Color32, RichText};

/// A one-line message in the status bar
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    text: String,
    error: bool,
}

impl Notice {
    pub fn info(text: impl ToString) -> Self {
        Self {
            text: text.to_string(),
            error: false,
        }
    }

    pub fn error(text: impl ToString) -> Self {
        Self {
            text: text.to_string(),
            error: true,
        }
    }

    /// Returns true when the user dismissed it
    pub fn display(&self, ui: &mut egui::Ui) -> bool {
        ui.horizontal(|ui| {
            let color = if self.error {
                Color32::LIGHT_RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(&self.text).color(color));
            ui.small_button(crate::font_icon::REMOVE).clicked()
        })
        .inner
    }
}
