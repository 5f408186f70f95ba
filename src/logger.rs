use egui::{Color32, Label, RichText};
use log::Level;

use crate::format_seconds;

/// How many records can wait for the UI before new ones are dropped
const BACKLOG: usize = 4096;

/// Installs a logger that forwards this crate's records to the returned receiver.
pub fn init_logger() -> anyhow::Result<flume::Receiver<Record>> {
    let (sender, receiver) = flume::bounded(BACKLOG);
    log::set_boxed_logger(Box::new(Logger::new(sender)))
        .map_err(|err| anyhow::anyhow!("cannot install the logger: {err}"))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(receiver)
}

fn now() -> time::OffsetDateTime {
    time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc())
}

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct DisplayOptions {
    pub timestamp: bool,
    pub level: bool,
    pub target: bool,
    pub index: bool,
}

impl DisplayOptions {
    pub const fn new() -> Self {
        Self {
            timestamp: true,
            level: true,
            target: false,
            index: false,
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Record {
    pub timestamp: time::OffsetDateTime,
    pub start: time::OffsetDateTime,
    pub target: Box<str>,
    pub level: Level,
    pub data: Box<str>,
}

impl Record {
    const fn level(&self) -> &'static str {
        match self.level {
            Level::Error => "error",
            Level::Warn => "warn ",
            Level::Info => "info ",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    const fn level_color(&self) -> Color32 {
        match self.level {
            Level::Error => Color32::RED,
            Level::Warn => Color32::YELLOW,
            Level::Info => Color32::GREEN,
            Level::Debug => Color32::from_rgb(0x00, 0xFF, 0xFF),
            Level::Trace => Color32::from_rgb(0xFF, 0x00, 0xFF),
        }
    }

    /// Milliseconds since the logger started, as `sss.mmm`
    fn elapsed(&self) -> String {
        let ms = (self.timestamp - self.start).whole_milliseconds().max(0);
        format!("{:>5}.{:03}", ms / 1000, ms % 1000)
    }

    pub fn display(&self, opts: DisplayOptions, index: usize, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            if opts.index {
                ui.monospace(index.to_string());
            }

            if opts.level {
                ui.add(Label::new(
                    RichText::new(self.level())
                        .monospace()
                        .color(self.level_color()),
                ));
            }

            if opts.timestamp {
                let resp = ui.add(Label::new(
                    RichText::new(self.elapsed())
                        .monospace()
                        .color(Color32::LIGHT_BLUE),
                ));

                if ui.ctx().input().modifiers.command_only() {
                    resp.on_hover_ui_at_pointer(|ui| {
                        let d = now() - self.timestamp;
                        let secs = d.whole_seconds();
                        let label = if secs < 10 {
                            format!("{}ms ago", d.whole_milliseconds())
                        } else {
                            format!("{} ago", format_seconds(secs as u64))
                        };
                        ui.label(label);
                    });
                }
            }

            if opts.target {
                ui.monospace(&*self.target);
            }

            ui.add(
                Label::new(
                    RichText::new(&*self.data)
                        .monospace()
                        .color(ui.style().visuals.strong_text_color()),
                )
                .wrap(true),
            );
        });
    }
}

struct Logger {
    sender: flume::Sender<Record>,
    start: time::OffsetDateTime,
}

impl Logger {
    fn new(sender: flume::Sender<Record>) -> Self {
        Self {
            sender,
            start: now(),
        }
    }

    fn log_it(&self, record: &log::Record<'_>) {
        let metadata = record.metadata();
        let _ = self.sender.try_send(Record {
            timestamp: now(),
            start: self.start,
            target: Box::from(metadata.target()),
            level: metadata.level(),
            data: Box::from(&*record.args().to_string()),
        });
    }

    fn is_from_our_pkg(record: &log::Record<'_>) -> bool {
        record
            .module_path()
            .map(|module| module.split_once("::").map_or(module, |(head, _)| head))
            .filter(|&head| head == env!("CARGO_PKG_NAME"))
            .is_some()
    }
}

impl log::Log for Logger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        if !Self::is_from_our_pkg(record) {
            return;
        }

        self.log_it(record)
    }

    fn flush(&self) {}
}
