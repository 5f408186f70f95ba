use egui::{Align, Color32, Frame, Layout, RichText, ScrollArea};

use crate::{
    billing::format_money,
    font_icon,
    menu::{Category, MenuItem},
    state::AppState,
};

use super::ItemDetailsState;

#[derive(Debug, Default)]
pub struct MenuState {
    pub category: Option<Category>,
}

pub struct MenuView<'a> {
    state: &'a mut AppState,
}

impl<'a> MenuView<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(&self.state.settings.name);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .button(format!("{} Can't decide?", font_icon::SPIN))
                    .on_hover_text("Let the wheel pick something for you")
                    .clicked()
                {
                    self.state.spin.open(&self.state.store);
                }
            });
        });

        if !self.state.settings.accepts_orders {
            ui.colored_label(Color32::LIGHT_RED, "We are not taking orders right now");
        }

        ui.horizontal_wrapped(|ui| {
            ui.selectable_value(&mut self.state.menu.category, None, "All");
            for category in Category::ALL {
                ui.selectable_value(
                    &mut self.state.menu.category,
                    Some(category),
                    category.heading(),
                );
            }
        });
        ui.separator();

        let category = self.state.menu.category;
        let currency = self.state.settings.currency.clone();
        let mut picked = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut any = false;
                for item in self.state.catalog.by_category(category) {
                    any = true;
                    if Self::display_item(item, &currency, ui) {
                        picked.replace(item.clone());
                    }
                }
                if !any {
                    ui.weak("Nothing here yet");
                }
            });

        if let Some(item) = picked {
            self.state.details.replace(ItemDetailsState::new(item));
        }
    }

    fn display_item(item: &MenuItem, currency: &str, ui: &mut egui::Ui) -> bool {
        Frame::group(ui.style())
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&item.name).strong());
                    if item.popular {
                        ui.small(format!("{} Popular", font_icon::STAR));
                    }
                    ui.small(item.spice_repr());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new(format_money(item.price, currency)).strong());
                    });
                });

                ui.label(&item.description);

                ui.horizontal_wrapped(|ui| {
                    for tag in &item.dietary {
                        ui.small(tag.as_str());
                    }
                    ui.small(format!("{} {} min", font_icon::TIME, item.prep_time));
                    ui.small(format!("{} cal", item.calories));
                    ui.small(format!(
                        "{} {:.1} ({})",
                        font_icon::STAR,
                        item.rating,
                        item.review_count
                    ));
                });

                ui.add_enabled(item.available, egui::Button::new(format!("{} Add", font_icon::ADD)))
                    .on_disabled_hover_text("Currently unavailable")
                    .clicked()
            })
            .inner
    }
}
