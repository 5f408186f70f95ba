use std::collections::{BTreeMap, BTreeSet};

use crate::{
    menu::{CustomizationKind, MenuItem},
    store::KeyValueStore,
};

/// A choice for one customization
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// a radio option id
    Single(String),
    /// checkbox option ids
    Multiple(BTreeSet<String>),
}

/// Choices keyed by customization id
pub type Selections = BTreeMap<String, Selection>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("please choose a {name}")]
    MissingRequired { id: String, name: String },
}

/// The base price plus every selected option's adjustment, in cents
pub fn unit_price(item: &MenuItem, selections: &Selections) -> i64 {
    item.customizations
        .iter()
        .filter_map(|custom| Some((custom, selections.get(&custom.id)?)))
        .map(|(custom, selection)| match (custom.kind, selection) {
            (CustomizationKind::Radio, Selection::Single(id)) => custom
                .option(id)
                .map_or(0, |option| option.price_adjustment),
            (CustomizationKind::Checkbox, Selection::Multiple(ids)) => ids
                .iter()
                .filter_map(|id| custom.option(id))
                .map(|option| option.price_adjustment)
                .sum::<i64>(),
            _ => 0,
        })
        .fold(item.price, |total, adjustment| total + adjustment)
}

/// Every required radio needs one of its own options chosen
pub fn validate_selections(item: &MenuItem, selections: &Selections) -> Result<(), CartError> {
    let missing = item
        .customizations
        .iter()
        .filter(|custom| custom.required && custom.kind == CustomizationKind::Radio)
        .find(|custom| {
            !matches!(
                selections.get(&custom.id),
                Some(Selection::Single(id)) if custom.option(id).is_some()
            )
        });

    match missing {
        Some(custom) => Err(CartError::MissingRequired {
            id: custom.id.clone(),
            name: custom.name.clone(),
        }),
        None => Ok(()),
    }
}

/// The first option of every required radio, what the detail view starts with
pub fn default_selections(item: &MenuItem) -> Selections {
    item.customizations
        .iter()
        .filter(|custom| custom.required && custom.kind == CustomizationKind::Radio)
        .filter_map(|custom| {
            let first = custom.options.first()?;
            Some((custom.id.clone(), Selection::Single(first.id.clone())))
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub menu_item: MenuItem,
    pub quantity: u32,
    #[serde(rename = "selectedCustomizations")]
    pub selections: Selections,
    #[serde(default)]
    pub special_instructions: String,
}

impl CartItem {
    pub fn unit_price(&self) -> i64 {
        unit_price(&self.menu_item, &self.selections)
    }

    pub fn line_total(&self) -> i64 {
        self.unit_price() * i64::from(self.quantity)
    }

    /// "Crust Type: Thin Crust, Extra Toppings: Olives"
    pub fn describe_selections(&self) -> String {
        let mut parts = vec![];
        for custom in &self.menu_item.customizations {
            let names = match self.selections.get(&custom.id) {
                Some(Selection::Single(id)) => custom
                    .option(id)
                    .map(|opt| opt.name.clone())
                    .into_iter()
                    .collect::<Vec<_>>(),
                Some(Selection::Multiple(ids)) => ids
                    .iter()
                    .filter_map(|id| custom.option(id))
                    .map(|opt| opt.name.clone())
                    .collect(),
                None => continue,
            };
            if !names.is_empty() {
                parts.push(format!("{}: {}", custom.name, names.join(", ")));
            }
        }
        parts.join(", ")
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    const STORE_KEY: &'static str = "cart";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            items: store.get_json(Self::STORE_KEY).unwrap_or_default(),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.set_json(Self::STORE_KEY, &self.items)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds one of `item`, returning the new line's id
    pub fn add(
        &mut self,
        item: &MenuItem,
        selections: Selections,
        special_instructions: impl ToString,
    ) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        log::debug!("adding {} to the cart as {id}", item.name);
        self.items.push(CartItem {
            id: id.clone(),
            menu_item: item.clone(),
            quantity: 1,
            selections,
            special_instructions: special_instructions.to_string(),
        });
        id
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let len = self.items.len();
        self.items.retain(|item| item.id != id);
        len != self.items.len()
    }

    /// A quantity of zero removes the line
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }

        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear()
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn subtotal(&self) -> i64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{menu::Catalog, store::MemoryStore};

    fn single(id: &str) -> Selection {
        Selection::Single(id.into())
    }

    fn multiple(ids: &[&str]) -> Selection {
        Selection::Multiple(ids.iter().map(|s| s.to_string()).collect())
    }

    fn pizza() -> MenuItem {
        Catalog::builtin().unwrap().find("item_001").unwrap().clone()
    }

    #[test]
    fn unit_price_adds_adjustments() {
        let pizza = pizza();
        assert_eq!(unit_price(&pizza, &Selections::new()), 1699);

        let selections = Selections::from([
            ("crust_type".into(), single("gf")),
            ("extra_toppings".into(), multiple(&["olives", "pepperoni"])),
        ]);
        assert_eq!(unit_price(&pizza, &selections), 1699 + 400 + 200 + 300);
    }

    #[test]
    fn unit_price_ignores_nonsense() {
        let pizza = pizza();
        let selections = Selections::from([
            ("crust_type".into(), multiple(&["gf"])),
            ("extra_toppings".into(), single("olives")),
            ("sauce".into(), single("bbq")),
        ]);
        assert_eq!(unit_price(&pizza, &selections), 1699);

        let selections = Selections::from([
            ("crust_type".into(), single("deep-dish")),
            ("extra_toppings".into(), multiple(&["anchovies", "olives"])),
        ]);
        assert_eq!(unit_price(&pizza, &selections), 1699 + 200);
    }

    #[test]
    fn required_radios() {
        let pizza = pizza();
        assert_eq!(
            validate_selections(&pizza, &Selections::new()),
            Err(CartError::MissingRequired {
                id: "crust_type".into(),
                name: "Crust Type".into()
            })
        );

        let bad = Selections::from([("crust_type".into(), single("deep-dish"))]);
        assert!(validate_selections(&pizza, &bad).is_err());

        let defaults = default_selections(&pizza);
        assert_eq!(defaults.get("crust_type"), Some(&single("thin")));
        assert!(validate_selections(&pizza, &defaults).is_ok());

        let cake = Catalog::builtin().unwrap().find("item_006").unwrap().clone();
        assert!(validate_selections(&cake, &Selections::new()).is_ok());
    }

    #[test]
    fn cart_lines() {
        let pizza = pizza();
        let mut cart = Cart::new();
        let a = cart.add(&pizza, default_selections(&pizza), "");
        let b = cart.add(
            &pizza,
            Selections::from([("crust_type".into(), single("thick"))]),
            "well done",
        );
        assert_ne!(a, b);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.subtotal(), 1699 + 1899);

        assert!(cart.update_quantity(&b, 3));
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.subtotal(), 1699 + 1899 * 3);

        assert!(cart.update_quantity(&a, 0));
        assert_eq!(cart.items().len(), 1);
        assert!(!cart.update_quantity("missing", 2));
        assert!(!cart.remove(&a));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn cart_persists() {
        let pizza = pizza();
        let mut cart = Cart::new();
        cart.add(
            &pizza,
            Selections::from([
                ("crust_type".into(), single("gf")),
                ("extra_toppings".into(), multiple(&["olives"])),
            ]),
            "no basil",
        );

        let mut store = MemoryStore::new();
        cart.save(&mut store);
        assert!(store.get("cart").unwrap().contains("selectedCustomizations"));

        let restored = Cart::load(&store);
        assert_eq!(restored, cart);
        assert_eq!(restored.subtotal(), 1699 + 400 + 200);
    }

    #[test]
    fn describes_choices() {
        let pizza = pizza();
        let mut cart = Cart::new();
        cart.add(
            &pizza,
            Selections::from([
                ("crust_type".into(), single("thin")),
                ("extra_toppings".into(), multiple(&["mushrooms", "olives"])),
            ]),
            "",
        );
        assert_eq!(
            cart.items()[0].describe_selections(),
            "Crust Type: Thin Crust, Extra Toppings: Mushrooms, Olives"
        );
    }
}
