use std::collections::BTreeSet;

use egui::{Align2, Color32, RichText, TextEdit, Window};

use crate::{
    billing::format_money,
    cart::{unit_price, validate_selections, Selection, Selections},
    font_icon,
    menu::{Customization, CustomizationKind, MenuItem},
    state::AppState,
};

use super::Notice;

/// The item being customized before it goes into the cart
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDetailsState {
    item: MenuItem,
    selections: Selections,
    instructions: String,
    error: Option<String>,
}

impl ItemDetailsState {
    pub fn new(item: MenuItem) -> Self {
        Self {
            item,
            selections: Selections::new(),
            instructions: String::new(),
            error: None,
        }
    }

    fn radio(&mut self, custom: &Customization, ui: &mut egui::Ui) {
        let mut current = match self.selections.get(&custom.id) {
            Some(Selection::Single(id)) => Some(id.clone()),
            _ => None,
        };

        for option in &custom.options {
            let text = Self::option_text(&option.name, option.price_adjustment);
            ui.radio_value(&mut current, Some(option.id.clone()), text);
        }

        if let Some(id) = current {
            self.selections
                .insert(custom.id.clone(), Selection::Single(id));
        }
    }

    fn checkbox(&mut self, custom: &Customization, ui: &mut egui::Ui) {
        let mut chosen = match self.selections.get(&custom.id) {
            Some(Selection::Multiple(ids)) => ids.clone(),
            _ => BTreeSet::new(),
        };

        for option in &custom.options {
            let mut checked = chosen.contains(&option.id);
            let text = Self::option_text(&option.name, option.price_adjustment);
            if ui.checkbox(&mut checked, text).changed() {
                if checked {
                    chosen.insert(option.id.clone());
                } else {
                    chosen.remove(&option.id);
                }
            }
        }

        self.selections
            .insert(custom.id.clone(), Selection::Multiple(chosen));
    }

    fn option_text(name: &str, adjustment: i64) -> String {
        if adjustment == 0 {
            return name.to_string();
        }
        // adjustments are shown without a currency
        format!("{name} (+{}.{:02})", adjustment / 100, adjustment % 100)
    }
}

pub struct ItemDetails<'a> {
    state: &'a mut AppState,
}

impl<'a> ItemDetails<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(self, ctx: &egui::Context) {
        let mut details = match self.state.details.take() {
            Some(details) => details,
            None => return,
        };

        let currency = self.state.settings.currency.clone();
        let mut open = true;
        let mut add = false;

        Window::new(details.item.name.clone())
            .collapsible(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                let item = details.item.clone();

                ui.label(&item.description);
                ui.horizontal_wrapped(|ui| {
                    ui.small(format!("{} {} min", font_icon::TIME, item.prep_time));
                    ui.small(format!("{} cal", item.calories));
                    ui.small(item.spice_repr());
                });

                if !item.ingredients.is_empty() {
                    ui.small(format!("Ingredients: {}", item.ingredients.join(", ")));
                }
                if !item.allergens.is_empty() {
                    ui.colored_label(
                        Color32::YELLOW,
                        format!("Contains: {}", item.allergens.join(", ")),
                    );
                }
                let n = item.nutrition;
                ui.small(format!(
                    "protein {}g • carbs {}g • fat {}g • fiber {}g",
                    n.protein, n.carbs, n.fat, n.fiber
                ));

                for custom in &item.customizations {
                    ui.separator();
                    let heading = match custom.required {
                        true => format!("{} *", custom.name),
                        false => custom.name.clone(),
                    };
                    ui.label(RichText::new(heading).strong());
                    match custom.kind {
                        CustomizationKind::Radio => details.radio(custom, ui),
                        CustomizationKind::Checkbox => details.checkbox(custom, ui),
                    }
                }

                ui.separator();
                ui.label("Special instructions");
                ui.add(
                    TextEdit::multiline(&mut details.instructions)
                        .hint_text("Any allergies or preferences?")
                        .desired_rows(2),
                );

                if let Some(error) = &details.error {
                    ui.colored_label(Color32::LIGHT_RED, error);
                }

                let price = unit_price(&item, &details.selections);
                if ui
                    .add_enabled(
                        item.available,
                        egui::Button::new(format!(
                            "{} Add to Cart • {}",
                            font_icon::CART,
                            format_money(price, &currency)
                        )),
                    )
                    .clicked()
                {
                    add = true;
                }
            });

        if add {
            match validate_selections(&details.item, &details.selections) {
                Ok(()) => {
                    let ItemDetailsState {
                        item,
                        selections,
                        instructions,
                        ..
                    } = details;
                    self.state.cart.add(&item, selections, instructions.trim());
                    self.state
                        .notify(Notice::info(format!("{} has been added to your cart.", item.name)));
                    return;
                }
                Err(err) => {
                    details.error.replace(err.to_string());
                }
            }
        }

        if open {
            self.state.details.replace(details);
        }
    }
}
