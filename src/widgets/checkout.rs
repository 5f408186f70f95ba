use egui::{Color32, Grid, RichText, ScrollArea, TextEdit};

use crate::{
    billing::{format_money, Tip, TipPreset},
    font_icon,
    order::{CheckoutForm, OrderType},
    state::AppState,
};

use super::{cart::display_totals, MainView, Notice};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckoutState {
    pub form: CheckoutForm,
    pub error: Option<String>,
    custom_tip: String,
}

impl CheckoutState {
    /// Fills in the table number when the form doesn't have one yet
    pub fn prefill(&mut self, table: Option<&str>) {
        if let Some(table) = table {
            if self.form.table_number.trim().is_empty() {
                self.form.table_number = table.to_string();
            }
        }
    }

    pub fn select_tip(&mut self, preset: TipPreset) {
        self.form.tip = Tip::Preset(preset);
        self.custom_tip.clear();
    }

    /// Reads the custom amount as money, anything unreadable tips nothing
    pub fn set_custom_tip(&mut self, input: &str) {
        self.custom_tip = input.to_string();
        let cents = input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .map_or(0, |amount| (amount * 100.0).round() as i64);
        self.form.tip = Tip::Custom(cents);
    }

    /// Keeps the contact details for the next order
    pub fn reset(&mut self) {
        self.form = CheckoutForm {
            name: std::mem::take(&mut self.form.name),
            phone: std::mem::take(&mut self.form.phone),
            email: std::mem::take(&mut self.form.email),
            ..CheckoutForm::default()
        };
        self.error = None;
        self.custom_tip.clear();
    }
}

pub struct CheckoutView<'a> {
    state: &'a mut AppState,
}

impl<'a> CheckoutView<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(self, ui: &mut egui::Ui) {
        let table = self.state.table.clone();
        self.state.checkout.prefill(table.as_deref());

        ui.horizontal(|ui| {
            if ui.small_button("⏴ Back to cart").clicked() {
                self.state.view_state.switch_to_view(MainView::Cart);
            }
            ui.heading("Checkout");
        });
        ui.separator();

        let currency = self.state.settings.currency.clone();
        let mut place = false;

        ScrollArea::vertical().show(ui, |ui| {
            let checkout = &mut self.state.checkout;
            let form = &mut checkout.form;

            ui.label(RichText::new("Order type").strong());
            ui.horizontal(|ui| {
                for kind in OrderType::ALL {
                    ui.radio_value(&mut form.order_type, kind, kind.label());
                }
            });
            ui.separator();

            ui.label(RichText::new("Contact").strong());
            Grid::new("checkout_contact")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Name *");
                    ui.text_edit_singleline(&mut form.name);
                    ui.end_row();

                    ui.label("Phone *");
                    ui.text_edit_singleline(&mut form.phone);
                    ui.end_row();

                    ui.label("Email");
                    ui.text_edit_singleline(&mut form.email);
                    ui.end_row();

                    match form.order_type {
                        OrderType::DineIn => {
                            ui.label(format!("{} Table *", font_icon::NUMBER));
                            ui.text_edit_singleline(&mut form.table_number);
                            ui.end_row();
                        }
                        OrderType::Delivery => {
                            ui.label("Address *");
                            ui.add(TextEdit::multiline(&mut form.delivery_address).desired_rows(2));
                            ui.end_row();
                        }
                        OrderType::Takeout => {}
                    }
                });

            ui.label("Special instructions");
            ui.add(
                TextEdit::multiline(&mut form.special_instructions)
                    .hint_text("Anything the kitchen should know?")
                    .desired_rows(2),
            );
            ui.separator();

            ui.label(RichText::new("Tip").strong());
            let mut picked = None;
            ui.horizontal(|ui| {
                for preset in TipPreset::ALL {
                    if ui
                        .selectable_label(form.tip == Tip::Preset(preset), preset.label())
                        .clicked()
                    {
                        picked.replace(preset);
                    }
                }
            });
            let mut custom = checkout.custom_tip.clone();
            let edited = ui
                .add(TextEdit::singleline(&mut custom).hint_text("Custom tip amount"))
                .changed();
            if let Some(preset) = picked {
                checkout.select_tip(preset);
            } else if edited {
                checkout.set_custom_tip(&custom);
            }
            ui.separator();

            let totals = checkout
                .form
                .totals(&self.state.cart, &self.state.settings);
            ui.label(RichText::new("Order summary").strong());
            for item in self.state.cart.items() {
                ui.horizontal(|ui| {
                    ui.label(format!("{} × {}", item.quantity, item.menu_item.name));
                    ui.weak(format_money(item.line_total(), &currency));
                });
            }
            display_totals(&totals, &currency, ui);

            if let Some(error) = &self.state.checkout.error {
                ui.colored_label(Color32::LIGHT_RED, error);
            }

            ui.separator();
            place = ui
                .add_enabled(
                    !self.state.cart.is_empty(),
                    egui::Button::new(
                        RichText::new(format!(
                            "Place Order • {}",
                            format_money(totals.total, &currency)
                        ))
                        .strong(),
                    ),
                )
                .clicked();
        });

        if place {
            self.place_order();
        }
    }

    fn place_order(self) {
        let AppState {
            orders,
            checkout,
            cart,
            settings,
            rng,
            ..
        } = &mut *self.state;

        let now = time::OffsetDateTime::now_utc();
        let order_number = match orders.place(&checkout.form, cart, settings, now, rng) {
            Ok(order) => order.order_number.clone(),
            Err(err) => {
                log::warn!("checkout failed: {err}");
                checkout.error.replace(err.to_string());
                return;
            }
        };

        cart.clear();
        checkout.reset();
        self.state.persist();
        self.state.notify(Notice::info(format!(
            "Order {order_number} placed! We'll start preparing it right away."
        )));
        self.state.view_state.switch_to_view(MainView::Orders);
    }
}
