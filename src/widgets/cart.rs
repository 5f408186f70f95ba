use egui::{Align, Grid, Layout, RichText, ScrollArea};

use crate::{
    billing::{format_money, Tip, Totals},
    font_icon,
    state::AppState,
};

use super::MainView;

pub struct CartView<'a> {
    state: &'a mut AppState,
}

impl<'a> CartView<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(self, ui: &mut egui::Ui) {
        ui.heading(format!("{} Your Order", font_icon::CART));
        ui.separator();

        if self.state.cart.is_empty() {
            ui.vertical_centered(|ui| {
                ui.weak("Your cart is empty");
                if ui.button("Browse the menu").clicked() {
                    self.state.view_state.switch_to_view(MainView::Menu);
                }
            });
            return;
        }

        let currency = self.state.settings.currency.clone();
        let mut quantity = None;
        let mut remove = None;

        ScrollArea::vertical()
            .max_height(ui.available_height() - 160.0)
            .show(ui, |ui| {
                for item in self.state.cart.items() {
                    ui.group(|ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&item.menu_item.name).strong());
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if ui
                                    .small_button(font_icon::REMOVE)
                                    .on_hover_text("Remove from cart")
                                    .clicked()
                                {
                                    remove.replace(item.id.clone());
                                }
                                ui.label(format_money(item.line_total(), &currency));
                            });
                        });

                        let selections = item.describe_selections();
                        if !selections.is_empty() {
                            ui.small(selections);
                        }
                        if !item.special_instructions.is_empty() {
                            ui.small(format!("Note: {}", item.special_instructions));
                        }

                        ui.horizontal(|ui| {
                            if ui.small_button(font_icon::MINUS).clicked() {
                                quantity.replace((item.id.clone(), item.quantity - 1));
                            }
                            ui.monospace(item.quantity.to_string());
                            if ui.small_button(font_icon::ADD).clicked() {
                                quantity.replace((item.id.clone(), item.quantity + 1));
                            }
                            ui.weak(format!("× {}", format_money(item.unit_price(), &currency)));
                        });
                    });
                }
            });

        if let Some((id, qty)) = quantity {
            self.state.cart.update_quantity(&id, qty);
        }
        if let Some(id) = remove {
            self.state.cart.remove(&id);
        }

        ui.separator();
        let totals = Totals::compute(self.state.cart.subtotal(), &self.state.settings, Tip::NONE);
        display_totals(&totals, &currency, ui);

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Clear cart").clicked() {
                log::debug!("clearing {} cart lines", self.state.cart.items().len());
                self.state.cart.clear();
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let enabled = self.state.settings.accepts_orders && !self.state.cart.is_empty();
                if ui
                    .add_enabled(enabled, egui::Button::new("Proceed to Checkout"))
                    .clicked()
                {
                    self.state.view_state.switch_to_view(MainView::Checkout);
                }
            });
        });
    }
}

/// The breakdown shared by the cart, checkout and order cards
pub(super) fn display_totals(totals: &Totals, currency: &str, ui: &mut egui::Ui) {
    Grid::new(ui.next_auto_id())
        .num_columns(2)
        .show(ui, |ui| {
            let mut row = |name: &str, cents: i64| {
                ui.label(name);
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.monospace(format_money(cents, currency));
                });
                ui.end_row();
            };

            row("Subtotal", totals.subtotal);
            row("Tax", totals.tax);
            row("Service charge", totals.service_charge);
            if totals.tip > 0 {
                row("Tip", totals.tip);
            }

            ui.label(RichText::new("Total").strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new(format_money(totals.total, currency)).strong());
            });
            ui.end_row();
        });
}
