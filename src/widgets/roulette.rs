use std::rc::Rc;

use egui::{Align2, RichText, TextEdit, Window};

use crate::{
    billing::format_money,
    candidates::NameList,
    font_icon,
    schedule::{Clock, FrameScheduler, RandomSource},
    state::AppState,
    wheel::{StartError, Wheel, WheelConfig},
};

use super::{BillSplitState, WheelPainter, WheelStyle};

const FUNNY_MESSAGES: [&str; 6] = [
    "Better luck next time! 😅",
    "The wheel has spoken! 🎯",
    "Congratulations, you're the chosen one! 🎉",
    "Your wallet is about to get lighter! 💸",
    "The fate has decided your destiny! ✨",
    "Time to treat your friends! 🍽",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouletteError {
    #[error("names have to be confirmed before the wheel can spin")]
    NamesNotConfirmed,

    #[error(transparent)]
    Wheel(#[from] StartError),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RouletteStep {
    #[default]
    Input,
    Spin,
    Result,
}

/// "Who pays?" for one order
pub struct RouletteState {
    open: bool,
    step: RouletteStep,
    order_number: String,
    total: i64,
    names: NameList,
    wheel: Wheel<String>,
    outcome: flume::Receiver<String>,
    winner: Option<String>,
    message: &'static str,
    advisory: Option<String>,
}

impl RouletteState {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        let (sender, outcome) = flume::unbounded();
        let wheel = Wheel::new(WheelConfig::payment(), scheduler, move |name| {
            let _ = sender.send(name);
        });

        Self {
            open: false,
            step: RouletteStep::default(),
            order_number: String::new(),
            total: 0,
            names: NameList::new(),
            wheel,
            outcome,
            winner: None,
            message: FUNNY_MESSAGES[0],
            advisory: None,
        }
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn is_active(&self) -> bool {
        self.wheel.is_active()
    }

    pub const fn step(&self) -> RouletteStep {
        self.step
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn names_mut(&mut self) -> &mut NameList {
        &mut self.names
    }

    pub fn open(&mut self, order_number: impl ToString, total: i64) {
        self.reset();
        self.order_number = order_number.to_string();
        self.total = total;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.wheel.cancel();
        self.open = false;
    }

    /// Back to two empty names
    pub fn reset(&mut self) {
        self.wheel.cancel();
        self.names.reset();
        self.step = RouletteStep::Input;
        self.winner = None;
        self.advisory = None;
    }

    /// Leaves the name form once at least two names are filled in
    pub fn confirm_names(&mut self) -> bool {
        let required = self.wheel.config().min_candidates;
        if self.names.candidates().len() < required {
            self.advisory.replace(self.wheel.config().advisory.to_string());
            return false;
        }
        self.advisory = None;
        self.step = RouletteStep::Spin;
        true
    }

    pub fn spin(&mut self, now: f64, rng: &mut impl RandomSource) -> Result<(), RouletteError> {
        if self.step != RouletteStep::Spin {
            return Err(RouletteError::NamesNotConfirmed);
        }
        if let Err(err) = self.wheel.start(&self.names.candidates(), now, rng) {
            if let StartError::TooFewCandidates { advisory, .. } = &err {
                self.advisory.replace(advisory.to_string());
            }
            return Err(err.into());
        }
        self.winner = None;
        Ok(())
    }

    pub fn spin_again(&mut self) {
        self.winner = None;
        self.step = RouletteStep::Spin;
    }

    pub fn advance(&mut self, now: f64, rng: &mut impl RandomSource) {
        self.wheel.advance(now);
        for name in self.outcome.try_iter() {
            log::info!("{name} pays for order {}", self.order_number);
            self.message = FUNNY_MESSAGES[rng.below(FUNNY_MESSAGES.len() as u32) as usize];
            self.winner.replace(name);
            self.step = RouletteStep::Result;
        }
    }

    fn labels(&self) -> Vec<String> {
        if self.wheel.is_active() || self.winner.is_some() {
            return self.wheel.candidates().iter().map(|c| c.label.clone()).collect();
        }
        self.names.candidates().into_iter().map(|c| c.label).collect()
    }
}

pub struct RouletteView<'a> {
    state: &'a mut AppState,
}

impl<'a> RouletteView<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn display(mut self, ctx: &egui::Context) {
        if !self.state.roulette.is_open() {
            return;
        }

        let mut open = true;
        Window::new(format!("{} Who Pays? Payment Roulette", font_icon::DICE))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| match self.state.roulette.step() {
                RouletteStep::Input => self.display_input(ui),
                RouletteStep::Spin => self.display_spin(ui, ctx),
                RouletteStep::Result => self.display_result(ui),
            });

        if !open {
            self.state.roulette.close();
        }
    }

    fn display_total(&self, ui: &mut egui::Ui) {
        let roulette = &self.state.roulette;
        ui.vertical_centered(|ui| {
            ui.small(format!("Order {} • Total Amount", roulette.order_number));
            ui.heading(format_money(roulette.total, &self.state.settings.currency));
        });
    }

    fn display_input(&mut self, ui: &mut egui::Ui) {
        self.display_total(ui);
        ui.separator();
        ui.label(RichText::new("Enter Names (2-10 people)").strong());

        let roulette = &mut self.state.roulette;
        let can_remove = roulette.names.can_remove();
        let mut remove = None;

        for (i, name) in roulette.names.entries_mut().iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.add(TextEdit::singleline(name).hint_text(format!("Person {}", i + 1)));
                if can_remove && ui.small_button(font_icon::REMOVE).clicked() {
                    remove.replace(i);
                }
            });
        }

        if let Some(index) = remove {
            roulette.names.remove_field(index);
        }

        if roulette.names.can_add()
            && ui
                .button(format!("{} Add Person", font_icon::ADD))
                .clicked()
        {
            roulette.names.add_field();
        }

        if let Some(advisory) = &roulette.advisory {
            ui.colored_label(egui::Color32::LIGHT_RED, advisory);
        }

        ui.separator();
        if ui.button("Spin the Wheel").clicked() {
            roulette.confirm_names();
        }
    }

    fn display_spin(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let labels = self.state.roulette.labels();
        let rotation = self.state.roulette.wheel.rotation();

        ui.vertical_centered(|ui| {
            WheelPainter::new(&labels, rotation, WheelStyle::PAYMENT).display(ui);

            if let Some(advisory) = &self.state.roulette.advisory {
                ui.colored_label(egui::Color32::LIGHT_RED, advisory);
            }

            if !self.state.roulette.is_active()
                && ui
                    .button(RichText::new(format!("SPIN! {}", font_icon::TARGET)).heading())
                    .clicked()
            {
                let AppState { roulette, rng, .. } = &mut *self.state;
                if let Err(err) = roulette.spin(ctx.now_ms(), rng) {
                    log::warn!("cannot spin: {err}");
                }
            }
        });
    }

    fn display_result(&mut self, ui: &mut egui::Ui) {
        let winner = self.state.roulette.winner().unwrap_or_default().to_string();

        ui.vertical_centered(|ui| {
            ui.label("🎉🎉🎉");
            ui.heading(RichText::new(&winner).strong());
            ui.label("pays the full bill! 💸");
            ui.label(self.state.roulette.message);
        });
        ui.separator();
        self.display_total(ui);
        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Spin Again").clicked() {
                self.state.roulette.spin_again();
            }
            if ui.button("Split Equally").clicked() {
                let roulette = &mut self.state.roulette;
                self.state.bill_split = Some(BillSplitState::new(
                    roulette.order_number.clone(),
                    roulette.total,
                ));
                roulette.close();
            }
        });
    }
}
