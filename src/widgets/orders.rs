use egui::{Align, CollapsingHeader, Color32, Layout, ProgressBar, RichText, ScrollArea};

use crate::{
    billing::format_money,
    font_icon,
    order::{Order, OrderStatus, OrderType},
    state::AppState,
};

use super::{cart::display_totals, BillSplitState, MainView, Notice};

enum Action {
    Cancel(String),
    Split(String, i64),
}

pub struct OrdersView<'a> {
    state: &'a mut AppState,
}

impl<'a> OrdersView<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(self, ui: &mut egui::Ui) {
        let now = time::OffsetDateTime::now_utc();

        let dropped = self.state.orders.clear_old(now);
        if dropped > 0 {
            log::info!("dropped {dropped} orders older than a day");
            self.state.persist();
        }

        ui.heading("Your Orders");
        ui.separator();

        if self.state.orders.orders().is_empty() {
            ui.vertical_centered(|ui| {
                ui.weak("No orders in the last 24 hours");
                if ui.button("Browse the menu").clicked() {
                    self.state.view_state.switch_to_view(MainView::Menu);
                }
            });
            return;
        }

        let currency = self.state.settings.currency.clone();
        let mut action = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for order in self.state.orders.recent(now) {
                    if let Some(next) = Self::display_order(order, now, &currency, ui) {
                        action.replace(next);
                    }
                }
            });

        match action {
            Some(Action::Cancel(id)) => {
                if self.state.orders.update_status(&id, OrderStatus::Cancelled) {
                    self.state.persist();
                } else {
                    self.state
                        .notify(Notice::error("That order is no longer on this device"));
                }
            }
            Some(Action::Split(order_number, total)) => {
                self.state
                    .bill_split
                    .replace(BillSplitState::new(order_number, total));
            }
            None => {}
        }
    }

    fn display_order(
        order: &Order,
        now: time::OffsetDateTime,
        currency: &str,
        ui: &mut egui::Ui,
    ) -> Option<Action> {
        let mut action = None;

        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("Order {}", order.order_number)).strong());
                ui.small(order.order_type.label());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let color = match order.status {
                        OrderStatus::Cancelled => Color32::LIGHT_RED,
                        OrderStatus::Completed | OrderStatus::Ready => Color32::LIGHT_GREEN,
                        _ => ui.visuals().text_color(),
                    };
                    ui.colored_label(color, order.status.label());
                });
            });

            if order.status != OrderStatus::Cancelled {
                let progress = f32::from(order.status.progress()) / 100.0;
                ui.add(ProgressBar::new(progress).show_percentage());
            }

            let minutes = (now - order.created_at).whole_minutes();
            let mut info = format!("placed {minutes} min ago");
            if !order.status.is_final() {
                info.push_str(&format!(
                    " • {} ready in about {} min",
                    font_icon::TIME,
                    order.estimated_minutes
                ));
            }
            match (&order.order_type, &order.table_number, &order.delivery_address) {
                (OrderType::DineIn, Some(table), _) => {
                    info.push_str(&format!(" • table {table}"));
                }
                (OrderType::Delivery, _, Some(address)) => {
                    info.push_str(&format!(" • to {address}"));
                }
                _ => {}
            }
            ui.small(info);

            CollapsingHeader::new(format!(
                "{} items • {}",
                order.items.iter().map(|item| item.quantity).sum::<u32>(),
                format_money(order.totals.total, currency)
            ))
            .id_source(&order.id)
            .show(ui, |ui| {
                for item in &order.items {
                    ui.horizontal(|ui| {
                        ui.label(format!("{} × {}", item.quantity, item.menu_item.name));
                        ui.weak(format_money(item.line_total(), currency));
                    });
                    let selections = item.describe_selections();
                    if !selections.is_empty() {
                        ui.small(selections);
                    }
                }
                if let Some(note) = &order.special_instructions {
                    ui.small(format!("Note: {note}"));
                }
                ui.separator();
                display_totals(&order.totals, currency, ui);
            });

            ui.horizontal(|ui| {
                if order.status == OrderStatus::Pending
                    && ui.button("Cancel order").clicked()
                {
                    action.replace(Action::Cancel(order.id.clone()));
                }
                if order.status != OrderStatus::Cancelled
                    && ui
                        .button(format!("{} Split bill", font_icon::DICE))
                        .clicked()
                {
                    action.replace(Action::Split(
                        order.order_number.clone(),
                        order.totals.total,
                    ));
                }
            });
        });

        action
    }
}
