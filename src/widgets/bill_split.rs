use egui::{Align2, DragValue, Grid, RichText, Window};

use crate::{
    billing::{format_money, split_equally, MAX_SPLIT, MIN_SPLIT},
    font_icon,
    state::AppState,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillSplitState {
    order_number: String,
    total: i64,
    people: usize,
}

impl BillSplitState {
    pub fn new(order_number: impl ToString, total: i64) -> Self {
        Self {
            order_number: order_number.to_string(),
            total,
            people: MIN_SPLIT,
        }
    }
}

pub struct BillSplitView<'a> {
    state: &'a mut AppState,
}

impl<'a> BillSplitView<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(self, ctx: &egui::Context) {
        let mut split = match self.state.bill_split.take() {
            Some(split) => split,
            None => return,
        };

        let currency = self.state.settings.currency.clone();
        let mut open = true;
        let mut roulette = false;

        Window::new("Split Bill")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.small(format!("Order {} • Total Bill", split.order_number));
                    ui.heading(format_money(split.total, &currency));
                });
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Number of People");
                    ui.add(DragValue::new(&mut split.people).clamp_range(MIN_SPLIT..=MAX_SPLIT));
                    ui.small(format!("({MIN_SPLIT}-{MAX_SPLIT} people)"));
                });

                match split_equally(split.total, split.people) {
                    Ok(shares) => {
                        ui.label(RichText::new("Each person pays").strong());
                        Grid::new("bill_shares").striped(true).show(ui, |ui| {
                            for (i, share) in shares.iter().enumerate() {
                                ui.label(format!("Person {}", i + 1));
                                ui.monospace(format_money(*share, &currency));
                                ui.end_row();
                            }
                        });
                    }
                    Err(err) => {
                        ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
                    }
                }

                ui.separator();
                ui.vertical_centered(|ui| {
                    ui.label("Feeling lucky?");
                    if ui
                        .button(format!("{} Who Pays? Spin the Wheel", font_icon::DICE))
                        .clicked()
                    {
                        roulette = true;
                    }
                });
            });

        if roulette {
            self.state.roulette.open(&split.order_number, split.total);
            return;
        }

        if open {
            self.state.bill_split.replace(split);
        }
    }
}
