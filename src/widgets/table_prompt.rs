use egui::{Align2, Key, TextEdit, Window};

use crate::{font_icon, state::AppState};

/// Asks for a table number when none was given on the command line or stored
pub struct TablePrompt<'a> {
    state: &'a mut AppState,
}

impl<'a> TablePrompt<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(self, ctx: &egui::Context) {
        if self.state.table.is_some() {
            return;
        }

        let mut open = true;
        let mut submit = false;

        Window::new(format!("{} Welcome to {}", font_icon::NUMBER, self.state.settings.name))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Which table are you sitting at?");
                let resp = ui.add(
                    TextEdit::singleline(&mut self.state.table_prompt).hint_text("Table number"),
                );
                if resp.lost_focus() && ui.input().key_pressed(Key::Enter) {
                    submit = true;
                }
                ui.horizontal(|ui| {
                    submit |= ui
                        .add_enabled(
                            !self.state.table_prompt.trim().is_empty(),
                            egui::Button::new("Continue"),
                        )
                        .clicked();
                    ui.small("Ordering takeout or delivery? Just close this.");
                });
            });

        if submit && !self.state.table_prompt.trim().is_empty() {
            let table = std::mem::take(&mut self.state.table_prompt);
            self.state.set_table(&table);
            log::info!("seated at table {}", table.trim());
            return;
        }

        if !open {
            // an empty table keeps the prompt away for this session
            self.state.table.replace(String::new());
        }
    }
}
