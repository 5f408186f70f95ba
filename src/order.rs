use time::{Duration, OffsetDateTime};

use crate::{
    billing::{RestaurantSettings, Tip, Totals},
    cart::{Cart, CartItem},
    schedule::RandomSource,
    store::KeyValueStore,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    #[default]
    DineIn,
    Takeout,
    Delivery,
}

impl OrderType {
    pub const ALL: [Self; 3] = [Self::DineIn, Self::Takeout, Self::Delivery];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::DineIn => "Dine-in",
            Self::Takeout => "Takeout",
            Self::Delivery => "Delivery",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Percent along the kitchen pipeline
    pub const fn progress(&self) -> u8 {
        match self {
            Self::Pending | Self::Cancelled => 0,
            Self::Confirmed => 25,
            Self::Preparing => 50,
            Self::Ready => 75,
            Self::Completed => 100,
        }
    }

    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,
    #[error("please fill in your name and phone number")]
    MissingContact,
    #[error("please enter your table number")]
    MissingTable,
    #[error("please enter your delivery address")]
    MissingAddress,
    #[error("the restaurant is not taking orders right now")]
    NotAccepting,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckoutForm {
    pub order_type: OrderType,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub table_number: String,
    pub delivery_address: String,
    pub special_instructions: String,
    pub tip: Tip,
}

impl CheckoutForm {
    pub fn validate(&self, cart: &Cart) -> Result<(), CheckoutError> {
        let blank = |s: &str| s.trim().is_empty();

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if blank(&self.name) || blank(&self.phone) {
            return Err(CheckoutError::MissingContact);
        }
        match self.order_type {
            OrderType::DineIn if blank(&self.table_number) => Err(CheckoutError::MissingTable),
            OrderType::Delivery if blank(&self.delivery_address) => {
                Err(CheckoutError::MissingAddress)
            }
            _ => Ok(()),
        }
    }

    pub fn totals(&self, cart: &Cart, settings: &RestaurantSettings) -> Totals {
        Totals::compute(cart.subtotal(), settings, self.tip)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub items: Vec<CartItem>,
    pub customer: Customer,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(flatten)]
    pub totals: Totals,
    pub status: OrderStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "estimatedTime")]
    pub estimated_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl Order {
    const DEFAULT_MINUTES: u32 = 25;
    const DELIVERY_MINUTES: u32 = 15;

    fn estimate(items: &[CartItem], order_type: OrderType) -> u32 {
        let kitchen = items
            .iter()
            .map(|item| item.menu_item.prep_time)
            .max()
            .unwrap_or(Self::DEFAULT_MINUTES);

        match order_type {
            OrderType::Delivery => kitchen + Self::DELIVERY_MINUTES,
            _ => kitchen,
        }
    }

    fn is_recent(&self, now: OffsetDateTime) -> bool {
        self.created_at > now - OrderBook::WINDOW
    }
}

/// Orders placed from this device, newest first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    const STORE_KEY: &'static str = "restaurant_orders";
    pub const WINDOW: Duration = Duration::hours(24);

    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            orders: store.get_json(Self::STORE_KEY).unwrap_or_default(),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.set_json(Self::STORE_KEY, &self.orders)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn find(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Validates the form and records a new pending order.
    ///
    /// The cart is left alone, the caller clears it once the order is shown.
    pub fn place(
        &mut self,
        form: &CheckoutForm,
        cart: &Cart,
        settings: &RestaurantSettings,
        now: OffsetDateTime,
        rng: &mut impl RandomSource,
    ) -> Result<&Order, CheckoutError> {
        if !settings.accepts_orders {
            return Err(CheckoutError::NotAccepting);
        }
        form.validate(cart)?;

        let optional = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(String::from);
        let items = cart.items().to_vec();

        let order = Order {
            id: format!("order_{}", uuid::Uuid::new_v4().simple()),
            order_number: format!("#{}", 1000 + rng.below(9000)),
            estimated_minutes: Order::estimate(&items, form.order_type),
            items,
            customer: Customer {
                name: form.name.trim().to_string(),
                phone: form.phone.trim().to_string(),
                email: optional(&form.email),
            },
            order_type: form.order_type,
            table_number: match form.order_type {
                OrderType::DineIn => optional(&form.table_number),
                _ => None,
            },
            delivery_address: match form.order_type {
                OrderType::Delivery => optional(&form.delivery_address),
                _ => None,
            },
            totals: form.totals(cart, settings),
            status: OrderStatus::Pending,
            created_at: now,
            special_instructions: optional(&form.special_instructions),
        };

        log::info!(
            "placed order {} for {}",
            order.order_number,
            crate::billing::format_money(order.totals.total, &settings.currency)
        );

        self.orders.insert(0, order);
        Ok(&self.orders[0])
    }

    pub fn update_status(&mut self, id: &str, status: OrderStatus) -> bool {
        match self.orders.iter_mut().find(|order| order.id == id) {
            Some(order) => {
                log::debug!("order {} is now {}", order.order_number, status.label());
                order.status = status;
                true
            }
            None => false,
        }
    }

    /// Orders placed within the last day
    pub fn recent(&self, now: OffsetDateTime) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter().filter(move |order| order.is_recent(now))
    }

    /// Drops everything older than a day, returning how many went
    pub fn clear_old(&mut self, now: OffsetDateTime) -> usize {
        let len = self.orders.len();
        self.orders.retain(|order| order.is_recent(now));
        len - self.orders.len()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::{
        cart::default_selections, menu::Catalog, schedule::testing::FixedRandom, store::MemoryStore,
    };

    fn cart() -> Cart {
        let catalog = Catalog::builtin().unwrap();
        let pizza = catalog.find("item_001").unwrap();
        let mut cart = Cart::new();
        cart.add(pizza, default_selections(pizza), "");
        cart
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Alice".into(),
            phone: "555-0100".into(),
            table_number: "7".into(),
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn checkout_validation() {
        let cart = cart();
        assert_eq!(form().validate(&cart), Ok(()));
        assert_eq!(form().validate(&Cart::new()), Err(CheckoutError::EmptyCart));

        let no_phone = CheckoutForm {
            phone: "  ".into(),
            ..form()
        };
        assert_eq!(no_phone.validate(&cart), Err(CheckoutError::MissingContact));

        let no_table = CheckoutForm {
            table_number: String::new(),
            ..form()
        };
        assert_eq!(no_table.validate(&cart), Err(CheckoutError::MissingTable));

        let takeout = CheckoutForm {
            order_type: OrderType::Takeout,
            ..no_table.clone()
        };
        assert_eq!(takeout.validate(&cart), Ok(()));

        let delivery = CheckoutForm {
            order_type: OrderType::Delivery,
            ..no_table
        };
        assert_eq!(delivery.validate(&cart), Err(CheckoutError::MissingAddress));
    }

    #[test]
    fn placing_an_order() {
        let now = datetime!(2024-05-01 12:00 UTC);
        let mut book = OrderBook::default();
        let cart = cart();

        let order = book
            .place(
                &form(),
                &cart,
                &RestaurantSettings::default(),
                now,
                &mut FixedRandom(0.5),
            )
            .unwrap()
            .clone();

        assert_eq!(order.order_number, "#5500");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.table_number.as_deref(), Some("7"));
        assert_eq!(order.delivery_address, None);
        assert_eq!(order.customer.email, None);
        assert_eq!(order.totals.subtotal, 1699);
        assert_eq!(order.totals.tip, 255);
        assert_eq!(order.estimated_minutes, 15);
        assert_eq!(order.created_at, now);
        assert_eq!(book.orders().len(), 1);
    }

    #[test]
    fn custom_tip_goes_on_the_order() {
        let form = CheckoutForm {
            tip: Tip::Custom(400),
            ..form()
        };
        let totals = form.totals(&cart(), &RestaurantSettings::default());
        assert_eq!(totals.tip, 400);
        assert_eq!(totals.total, 1699 + 136 + 85 + 400);
    }

    #[test]
    fn order_numbers_stay_in_range() {
        let now = datetime!(2024-05-01 12:00 UTC);
        let mut book = OrderBook::default();
        let cart = cart();
        let settings = RestaurantSettings::default();

        for r in [0.0, 0.999_999] {
            let order = book
                .place(&form(), &cart, &settings, now, &mut FixedRandom(r))
                .unwrap();
            let number: u32 = order.order_number[1..].parse().unwrap();
            assert!((1000..=9999).contains(&number));
        }
        assert_eq!(book.orders()[0].order_number, "#9999");
        assert_eq!(book.orders()[1].order_number, "#1000");
    }

    #[test]
    fn closed_restaurant() {
        let settings = RestaurantSettings {
            accepts_orders: false,
            ..RestaurantSettings::default()
        };
        let mut book = OrderBook::default();
        let err = book
            .place(
                &form(),
                &cart(),
                &settings,
                datetime!(2024-05-01 12:00 UTC),
                &mut FixedRandom(0.1),
            )
            .unwrap_err();
        assert_eq!(err, CheckoutError::NotAccepting);
        assert!(book.orders().is_empty());
    }

    #[test]
    fn status_updates() {
        let mut book = OrderBook::default();
        let id = book
            .place(
                &form(),
                &cart(),
                &RestaurantSettings::default(),
                datetime!(2024-05-01 12:00 UTC),
                &mut FixedRandom(0.1),
            )
            .unwrap()
            .id
            .clone();

        assert!(book.update_status(&id, OrderStatus::Preparing));
        assert_eq!(book.find(&id).unwrap().status.progress(), 50);
        assert!(!book.update_status("order_missing", OrderStatus::Ready));
        assert!(!OrderStatus::Ready.is_final());
        assert!(OrderStatus::Cancelled.is_final());
    }

    #[test]
    fn old_orders_fall_away() {
        let start = datetime!(2024-05-01 12:00 UTC);
        let mut book = OrderBook::default();
        let cart = cart();
        let settings = RestaurantSettings::default();

        for hours in [0, 20, 30] {
            book.place(
                &form(),
                &cart,
                &settings,
                start + Duration::hours(hours),
                &mut FixedRandom(0.3),
            )
            .unwrap();
        }

        let now = start + Duration::hours(30);
        assert_eq!(book.recent(now).count(), 2);
        assert_eq!(book.clear_old(now), 1);
        assert_eq!(book.orders().len(), 2);
        assert_eq!(book.clear_old(now), 0);
    }

    #[test]
    fn orders_persist() {
        let mut book = OrderBook::default();
        book.place(
            &CheckoutForm {
                order_type: OrderType::Delivery,
                delivery_address: "1 Main St".into(),
                email: "alice@example.com".into(),
                ..form()
            },
            &cart(),
            &RestaurantSettings::default(),
            datetime!(2024-05-01 12:00 UTC),
            &mut FixedRandom(0.3),
        )
        .unwrap();

        let mut store = MemoryStore::new();
        book.save(&mut store);

        let json = store.get("restaurant_orders").unwrap();
        assert!(json.contains("\"createdAt\":\"2024-05-01T12:00:00Z\""));
        assert!(json.contains("\"orderType\":\"delivery\""));

        let restored = OrderBook::load(&store);
        assert_eq!(restored, book);
        assert_eq!(restored.orders()[0].estimated_minutes, 30);
        assert_eq!(restored.orders()[0].table_number, None);
    }
}
