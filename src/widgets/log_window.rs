use egui::{ScrollArea, Window};

use crate::{
    font_icon,
    logger::{DisplayOptions, Record},
    Queue,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Level {
    #[default]
    All,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    const fn filter(self) -> Option<log::Level> {
        Some(match self {
            Self::All => return None,
            Self::Error => log::Level::Error,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
        })
    }
}

/// The records this crate logged, bucketed by level. F12 shows it.
pub struct LogWindow {
    trace: Queue<Record>,
    debug: Queue<Record>,
    info: Queue<Record>,
    warn: Queue<Record>,
    error: Queue<Record>,

    active_log: Level,
    opts: DisplayOptions,
    pub open: bool,
}

impl Default for LogWindow {
    fn default() -> Self {
        Self::with_caps(200, 200, 500, 200, 200)
    }
}

impl LogWindow {
    pub fn with_caps(trace: usize, debug: usize, info: usize, warn: usize, error: usize) -> Self {
        Self {
            trace: Queue::with_capacity(trace),
            debug: Queue::with_capacity(debug),
            info: Queue::with_capacity(info),
            warn: Queue::with_capacity(warn),
            error: Queue::with_capacity(error),
            active_log: Level::default(),
            opts: DisplayOptions::new(),
            open: false,
        }
    }

    fn queue_mut(&mut self, level: log::Level) -> &mut Queue<Record> {
        match level {
            log::Level::Error => &mut self.error,
            log::Level::Warn => &mut self.warn,
            log::Level::Info => &mut self.info,
            log::Level::Debug => &mut self.debug,
            log::Level::Trace => &mut self.trace,
        }
    }

    pub fn push(&mut self, record: Record) {
        self.queue_mut(record.level).push(record);
    }

    /// Moves everything waiting on `logs` into the window
    pub fn drain(&mut self, logs: &flume::Receiver<Record>) {
        for record in logs.try_iter() {
            self.push(record)
        }
    }

    fn clear(&mut self) {
        for queue in [
            &mut self.trace,
            &mut self.debug,
            &mut self.info,
            &mut self.warn,
            &mut self.error,
        ] {
            queue.clear()
        }
    }

    fn records(&self) -> Vec<&Record> {
        let mut list = [
            &self.trace,
            &self.debug,
            &self.info,
            &self.warn,
            &self.error,
        ]
        .into_iter()
        .flat_map(Queue::iter)
        .filter(|record| {
            self.active_log
                .filter()
                .map_or(true, |level| record.level == level)
        })
        .collect::<Vec<_>>();

        list.sort_by_key(|k| k.timestamp);
        list
    }

    pub fn display(&mut self, ctx: &egui::Context) {
        if ctx.input().key_pressed(egui::Key::F12) {
            self.open = !self.open;
        }

        let mut open = self.open;
        Window::new("logs")
            .default_height(200.0)
            .resizable(true)
            .collapsible(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (repr, level) in [
                        ("trace", Level::Trace),
                        ("debug", Level::Debug),
                        ("info", Level::Info),
                        ("warn", Level::Warn),
                        ("error", Level::Error),
                        ("all", Level::All),
                    ] {
                        ui.selectable_value(&mut self.active_log, level, repr);
                    }

                    ui.menu_button("Fields", |ui| {
                        ui.horizontal(|ui| {
                            for (opt, repr, desc) in [
                                (&mut self.opts.index, font_icon::NUMBER, "Toggle index"),
                                (&mut self.opts.level, font_icon::UP_TRIANGLE, "Toggle level"),
                                (
                                    &mut self.opts.timestamp,
                                    font_icon::TIME,
                                    "Toggle timestamp",
                                ),
                                (&mut self.opts.target, font_icon::TARGET, "Toggle target"),
                            ] {
                                ui.toggle_value(opt, repr).on_hover_text_at_pointer(desc);
                            }
                        })
                    });

                    if ui.small_button(font_icon::REMOVE).on_hover_text("Clear").clicked() {
                        self.clear();
                    }
                });

                ui.separator();
                ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for (i, record) in self.records().into_iter().enumerate() {
                            record.display(self.opts, i, ui);
                        }
                    });
            });
        self.open = open;
    }
}
