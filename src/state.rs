use std::rc::Rc;

use crate::{
    billing::RestaurantSettings,
    cart::Cart,
    menu::Catalog,
    order::OrderBook,
    schedule::{FastRandom, FrameScheduler},
    session,
    store::MemoryStore,
    widgets::{
        BillSplitState, CheckoutState, ItemDetailsState, MainView, MenuState, Notice,
        RouletteState, SpinViewState,
    },
};

/// Everything loaded before the window opens
#[derive(Debug, Default)]
pub struct PersistState {
    pub catalog: Catalog,
    pub settings: RestaurantSettings,
    pub store: MemoryStore,
    /// from `--table`, wins over the stored table
    pub table_arg: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub current_view: MainView,
    pub previous_view: MainView,
}

impl ViewState {
    pub fn switch_to_view(&mut self, view: MainView) {
        if self.current_view == view {
            return;
        }
        log::debug!("switching to {view:?}");
        self.previous_view = std::mem::replace(&mut self.current_view, view);
    }
}

pub struct AppState {
    pub catalog: Catalog,
    pub settings: RestaurantSettings,
    pub store: MemoryStore,
    pub rng: FastRandom,

    pub cart: Cart,
    pub orders: OrderBook,
    pub session_id: String,
    pub table: Option<String>,

    pub view_state: ViewState,
    pub menu: MenuState,
    pub details: Option<ItemDetailsState>,
    pub checkout: CheckoutState,
    pub spin: SpinViewState,
    pub roulette: RouletteState,
    pub bill_split: Option<BillSplitState>,
    pub table_prompt: String,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(persist: PersistState, scheduler: Rc<dyn FrameScheduler>) -> Self {
        let PersistState {
            catalog,
            settings,
            mut store,
            table_arg,
        } = persist;

        let mut rng = FastRandom::new();

        if let Some(table) = &table_arg {
            session::set_table_number(&mut store, table);
        }
        let table = session::table_number(&store);

        let unix_ms = (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u128;
        let session_id = session::session_id(&mut store, unix_ms, &mut rng);

        let cart = Cart::load(&store);
        let orders = OrderBook::load(&store);
        log::info!(
            "restored {} cart lines and {} orders for table {}",
            cart.items().len(),
            orders.orders().len(),
            table.as_deref().unwrap_or("(none)")
        );

        Self {
            spin: SpinViewState::new(Rc::clone(&scheduler)),
            roulette: RouletteState::new(scheduler),

            catalog,
            settings,
            store,
            rng,

            cart,
            orders,
            session_id,
            table,

            view_state: ViewState::default(),
            menu: MenuState::default(),
            details: None,
            checkout: CheckoutState::default(),
            bill_split: None,
            table_prompt: String::new(),
            notice: None,
        }
    }

    /// Moves any running wheel to `now`
    pub fn advance_wheels(&mut self, now: f64) {
        self.spin.advance(now);
        self.roulette.advance(now, &mut self.rng);
    }

    pub fn is_animating(&self) -> bool {
        self.spin.is_active() || self.roulette.is_active()
    }

    pub fn set_table(&mut self, table: &str) {
        session::set_table_number(&mut self.store, table);
        self.table = session::table_number(&self.store);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice.replace(notice);
    }

    /// Writes the cart and the order book back into the store
    pub fn persist(&mut self) {
        self.cart.save(&mut self.store);
        self.orders.save(&mut self.store);
    }
}
