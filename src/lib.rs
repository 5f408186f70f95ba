pub const SETTINGS_KEY: &str = "bistro";

pub trait RequestPaint {
    fn request_repaint(&self) {}
}

impl RequestPaint for egui::Context {
    fn request_repaint(&self) {
        Self::request_repaint(self)
    }
}

pub fn format_seconds(secs: u64) -> String {
    const TABLE: [(&str, u64); 3] = [("hours", 60 * 60), ("minutes", 60), ("seconds", 1)];

    let mut secs = secs;
    let mut parts = vec![];
    for (name, d) in TABLE {
        let div = secs / d;
        if div > 0 {
            parts.push(format!("{div} {name}"));
            secs -= d * div;
        }
    }

    if parts.is_empty() {
        return String::from("0 seconds");
    }
    parts.join(" ")
}

mod app;
pub use app::App;

pub mod billing;
pub mod candidates;
pub mod cart;

mod config;
pub use config::EnvConfig;

pub mod logger;
pub mod menu;
pub mod order;

mod queue;
pub use queue::Queue;

pub mod schedule;
pub mod session;
pub mod state;
pub mod store;
pub mod wheel;
pub mod widgets;

pub mod font_icon {
    pub const ADD: &str = "➕";
    pub const REMOVE: &str = "✖";
    pub const MINUS: &str = "➖";
    pub const CART: &str = "🛒";
    pub const SPIN: &str = "🎡";
    pub const DICE: &str = "🎲";
    pub const STAR: &str = "⭐";
    pub const TIME: &str = "⏰";
    pub const NUMBER: &str = "#";
    pub const UP_TRIANGLE: &str = "⏶";
    pub const TARGET: &str = "🎯";
    pub const UNDO: &str = "🔄";
}

#[cfg(test)]
mod tests {
    use super::format_seconds;

    #[test]
    fn seconds_are_readable() {
        assert_eq!(format_seconds(0), "0 seconds");
        assert_eq!(format_seconds(59), "59 seconds");
        assert_eq!(format_seconds(3600 + 120 + 1), "1 hours 2 minutes 1 seconds");
    }
}
