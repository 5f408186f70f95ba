mod wheel_painter;
pub use wheel_painter::{truncate_label, WheelPainter, WheelStyle};

mod log_window;
pub use log_window::LogWindow;

mod notice;
pub use notice::Notice;

mod menu;
pub use menu::{MenuState, MenuView};

mod item_details;
pub use item_details::{ItemDetails, ItemDetailsState};

mod cart;
pub use cart::CartView;

mod checkout;
pub use checkout::{CheckoutState, CheckoutView};

mod orders;
pub use orders::OrdersView;

mod spin;
pub use spin::{SpinView, SpinViewState};

mod roulette;
pub use roulette::{RouletteError, RouletteState, RouletteView};

mod bill_split;
pub use bill_split::{BillSplitState, BillSplitView};

mod table_prompt;
pub use table_prompt::TablePrompt;

#[derive(Copy, Clone, Default, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum MainView {
    #[default]
    Menu,
    Cart,
    Checkout,
    Orders,
}

impl MainView {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Cart => "Cart",
            Self::Checkout => "Checkout",
            Self::Orders => "My Orders",
        }
    }
}
