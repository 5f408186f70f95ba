use std::rc::Rc;

use egui::{Align2, RichText, Window};

use crate::{
    billing::format_money,
    candidates::{
        resolve_menu, Candidate, CategoryFilter, DietaryFilter, MenuFilter, PriceFilter,
        MENU_WHEEL_SLICES,
    },
    cart::default_selections,
    font_icon,
    menu::{Catalog, MenuItem},
    schedule::{Clock, FrameScheduler, RandomSource},
    state::AppState,
    store::KeyValueStore,
    wheel::{StartError, Wheel, WheelConfig},
};

use super::{Notice, WheelPainter, WheelStyle};

/// The "what should I eat?" wheel and its filters
pub struct SpinViewState {
    open: bool,
    filter: MenuFilter,
    wheel: Wheel<MenuItem>,
    outcome: flume::Receiver<MenuItem>,
    result: Option<MenuItem>,
    advisory: Option<String>,
}

impl SpinViewState {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        let (sender, outcome) = flume::unbounded();
        let wheel = Wheel::new(WheelConfig::menu(), scheduler, move |item| {
            let _ = sender.send(item);
        });

        Self {
            open: false,
            filter: MenuFilter::default(),
            wheel,
            outcome,
            result: None,
            advisory: None,
        }
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn is_active(&self) -> bool {
        self.wheel.is_active()
    }

    pub const fn filter(&self) -> &MenuFilter {
        &self.filter
    }

    pub fn result(&self) -> Option<&MenuItem> {
        self.result.as_ref()
    }

    /// Opens the wheel with the filters of the last spin
    pub fn open(&mut self, store: &impl KeyValueStore) {
        self.filter = MenuFilter::load(store);
        self.result = None;
        self.advisory = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.wheel.cancel();
        self.result = None;
        self.advisory = None;
        self.open = false;
    }

    pub fn set_filter(&mut self, filter: MenuFilter) {
        if self.filter != filter {
            log::debug!("spin filters changed: {filter:?}");
            self.filter = filter;
        }
    }

    pub fn advance(&mut self, now: f64) {
        self.wheel.advance(now);
        for item in self.outcome.try_iter() {
            log::info!("the wheel picked {}", item.name);
            self.result.replace(item);
        }
    }

    /// The slices the wheel shows when it is not spinning
    pub fn preview(&self, catalog: &Catalog) -> Vec<Candidate<MenuItem>> {
        let mut candidates = resolve_menu(catalog.items(), &self.filter);
        candidates.truncate(MENU_WHEEL_SLICES);
        candidates
    }

    /// Spins over what the filters show and remembers the filters
    pub fn spin(
        &mut self,
        catalog: &Catalog,
        store: &mut impl KeyValueStore,
        now: f64,
        rng: &mut impl RandomSource,
    ) -> Result<(), StartError> {
        let candidates = self.preview(catalog);
        if let Err(err) = self.wheel.start(&candidates, now, rng) {
            if let StartError::TooFewCandidates { advisory, .. } = &err {
                self.advisory.replace(advisory.to_string());
            }
            return Err(err);
        }

        self.filter.save(store);
        self.result = None;
        self.advisory = None;
        Ok(())
    }

    /// Back to the filters, keeping the wheel where it stopped
    pub fn spin_again(&mut self) {
        self.result = None;
    }

    fn labels(&self, catalog: &Catalog) -> Vec<String> {
        if self.wheel.is_active() || self.result.is_some() {
            return self.wheel.candidates().iter().map(|c| c.label.clone()).collect();
        }
        self.preview(catalog).into_iter().map(|c| c.label).collect()
    }
}

pub struct SpinView<'a> {
    state: &'a mut AppState,
}

impl<'a> SpinView<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(mut self, ctx: &egui::Context) {
        if !self.state.spin.is_open() {
            return;
        }

        let mut open = true;
        Window::new(format!("{} Can't decide? Spin the wheel!", font_icon::SPIN))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                if self.state.spin.result.is_some() {
                    self.display_result(ui);
                } else {
                    self.display_filters(ui);
                    ui.separator();
                    self.display_wheel(ui, ctx);
                }
            });

        if !open {
            self.state.spin.close();
        }
    }

    fn display_filters(&mut self, ui: &mut egui::Ui) {
        let spinning = self.state.spin.is_active();
        let mut filter = *self.state.spin.filter();

        ui.add_enabled_ui(!spinning, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label("Category");
                for category in CategoryFilter::all() {
                    ui.selectable_value(&mut filter.category, category, category.label());
                }
            });
            ui.horizontal_wrapped(|ui| {
                ui.label("Dietary");
                for dietary in DietaryFilter::ALL {
                    ui.selectable_value(&mut filter.dietary, dietary, dietary.label());
                }
            });
            ui.horizontal_wrapped(|ui| {
                ui.label("Price");
                for price in PriceFilter::ALL {
                    ui.selectable_value(&mut filter.price, price, price.label());
                }
            });
        });

        self.state.spin.set_filter(filter);

        let available = resolve_menu(self.state.catalog.items(), &filter).len();
        ui.small(format!("{available} items available for spinning"));
    }

    fn display_wheel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let labels = self.state.spin.labels(&self.state.catalog);
        let rotation = self.state.spin.wheel.rotation();

        ui.vertical_centered(|ui| {
            WheelPainter::new(&labels, rotation, WheelStyle::MENU).display(ui);

            if let Some(advisory) = &self.state.spin.advisory {
                ui.colored_label(egui::Color32::LIGHT_RED, advisory);
            }

            let spinning = self.state.spin.is_active();
            let text = if spinning { "Spinning..." } else { "SPIN!" };
            let resp = ui.add_enabled(
                !spinning,
                egui::Button::new(RichText::new(text).heading()),
            );

            if resp.clicked() {
                let AppState {
                    spin,
                    catalog,
                    store,
                    rng,
                    ..
                } = &mut *self.state;
                if let Err(err) = spin.spin(catalog, store, ctx.now_ms(), rng) {
                    log::warn!("cannot spin: {err}");
                }
            }
        });
    }

    fn display_result(&mut self, ui: &mut egui::Ui) {
        let item = match self.state.spin.result() {
            Some(item) => item.clone(),
            None => return,
        };

        ui.vertical_centered(|ui| {
            ui.label(RichText::new("🎉 The wheel has chosen! 🎉").strong());
            ui.heading(&item.name);
            ui.label(
                RichText::new(format_money(item.price, &self.state.settings.currency)).strong(),
            );
        });

        ui.label(&item.description);
        ui.horizontal_wrapped(|ui| {
            for tag in &item.dietary {
                ui.small(tag.as_str());
            }
            ui.small(format!(
                "{} {:.1} ({}) {} {} min",
                font_icon::STAR,
                item.rating,
                item.review_count,
                font_icon::TIME,
                item.prep_time
            ));
        });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button(format!("{} Add to Cart", font_icon::CART)).clicked() {
                self.state
                    .cart
                    .add(&item, default_selections(&item), String::new());
                self.state
                    .notify(Notice::info(format!("{} added to cart!", item.name)));
            }
            if ui.button(format!("{} Spin Again", font_icon::UNDO)).clicked() {
                self.state.spin.spin_again();
            }
        });
    }
}
