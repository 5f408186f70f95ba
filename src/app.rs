use egui::{Align, CentralPanel, Layout, TopBottomPanel};

use crate::{
    logger::Record,
    schedule::Clock,
    state::AppState,
    store,
    widgets::{
        BillSplitView, CartView, CheckoutView, ItemDetails, LogWindow, MainView, MenuView,
        OrdersView, RouletteView, SpinView, TablePrompt,
    },
    SETTINGS_KEY,
};

pub struct App {
    context: egui::Context,
    logs: flume::Receiver<Record>,
    log_window: LogWindow,
    pub app: AppState,
}

impl App {
    pub fn new(context: egui::Context, logs: flume::Receiver<Record>, state: AppState) -> Self {
        Self {
            context,
            logs,
            log_window: LogWindow::default(),
            app: state,
        }
    }

    fn display_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let view_state = &mut self.app.view_state;
            for view in [MainView::Menu, MainView::Cart, MainView::Orders] {
                let title = match view {
                    MainView::Cart => format!("{} ({})", view.title(), self.app.cart.total_items()),
                    _ => view.title().to_string(),
                };
                if ui
                    .selectable_label(view_state.current_view == view, title)
                    .clicked()
                {
                    view_state.switch_to_view(view);
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if let Some(table) = self.app.table.as_deref().filter(|t| !t.is_empty()) {
                    ui.small(format!("Table {table}"));
                }
            });
        });
    }

    fn display_notice(&mut self, ctx: &egui::Context) {
        let dismissed = match &self.app.notice {
            Some(notice) => TopBottomPanel::bottom("notice")
                .show(ctx, |ui| notice.display(ui))
                .inner,
            None => return,
        };

        if dismissed {
            self.app.notice.take();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.log_window.drain(&self.logs);

        let now = self.context.now_ms();
        self.app.advance_wheels(now);

        TopBottomPanel::top("tabs").show(ctx, |ui| self.display_tabs(ui));
        self.display_notice(ctx);

        CentralPanel::default().show(ctx, |ui| match self.app.view_state.current_view {
            MainView::Menu => MenuView::new(&mut self.app).display(ui),
            MainView::Cart => CartView::new(&mut self.app).display(ui),
            MainView::Checkout => CheckoutView::new(&mut self.app).display(ui),
            MainView::Orders => OrdersView::new(&mut self.app).display(ui),
        });

        ItemDetails::new(&mut self.app).display(ctx);
        SpinView::new(&mut self.app).display(ctx);
        RouletteView::new(&mut self.app).display(ctx);
        BillSplitView::new(&mut self.app).display(ctx);
        TablePrompt::new(&mut self.app).display(ctx);

        self.log_window.display(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.app.persist();
        store::save_to(&self.app.store, storage, SETTINGS_KEY);
    }

    fn persist_native_window(&self) -> bool {
        true
    }
}
