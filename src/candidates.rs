//! Turning the menu or a list of names into the candidates a wheel spins over.

use crate::{
    menu::{Category, DietaryTag, MenuItem},
    store::KeyValueStore,
};

/// The menu wheel stops drawing slices after this many items
pub const MENU_WHEEL_SLICES: usize = 12;

#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<T> {
    pub label: String,
    pub payload: T,
}

impl<T> Candidate<T> {
    pub fn new(label: impl ToString, payload: T) -> Self {
        Self {
            label: label.to_string(),
            payload,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn all() -> impl Iterator<Item = Self> {
        std::iter::once(Self::All).chain(Category::ALL.into_iter().map(Self::Only))
    }

    pub const fn to_key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "all" => Some(Self::All),
            key => Category::parse(key).map(Self::Only),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.heading(),
        }
    }

    fn matches(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == *category,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DietaryFilter {
    #[default]
    All,
    Vegetarian,
    Vegan,
    /// neither vegetarian nor vegan
    NonVeg,
}

impl DietaryFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Vegetarian, Self::Vegan, Self::NonVeg];

    pub const fn to_key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::NonVeg => "non-veg",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.to_key() == key)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::NonVeg => "Non-Veg",
        }
    }

    fn matches(&self, item: &MenuItem) -> bool {
        let veggie = || item.has_tag(DietaryTag::Vegetarian);
        let vegan = || item.has_tag(DietaryTag::Vegan);
        match self {
            Self::All => true,
            Self::Vegetarian => veggie(),
            Self::Vegan => vegan(),
            Self::NonVeg => !veggie() && !vegan(),
        }
    }
}

/// Price bands, in cents
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PriceFilter {
    #[default]
    All,
    Under20,
    Between20And50,
    Above50,
}

impl PriceFilter {
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Under20,
        Self::Between20And50,
        Self::Above50,
    ];

    const LOW: i64 = 2000;
    const HIGH: i64 = 5000;

    pub const fn to_key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Under20 => "under-200",
            Self::Between20And50 => "200-500",
            Self::Above50 => "above-500",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.to_key() == key)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Prices",
            Self::Under20 => "Under $20",
            Self::Between20And50 => "$20-$50",
            Self::Above50 => "Above $50",
        }
    }

    fn matches(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Under20 => item.price < Self::LOW,
            Self::Between20And50 => (Self::LOW..=Self::HIGH).contains(&item.price),
            Self::Above50 => item.price > Self::HIGH,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MenuFilter {
    pub category: CategoryFilter,
    pub dietary: DietaryFilter,
    pub price: PriceFilter,
}

impl MenuFilter {
    const CATEGORY_KEY: &'static str = "spinWheel_category";
    const DIETARY_KEY: &'static str = "spinWheel_dietary";
    const PRICE_KEY: &'static str = "spinWheel_price";

    /// Unavailable items never match
    pub fn matches(&self, item: &MenuItem) -> bool {
        item.available
            && self.category.matches(item)
            && self.dietary.matches(item)
            && self.price.matches(item)
    }

    /// Restores the filters saved by the last spin, unknown values fall back to `All`
    pub fn load(store: &impl KeyValueStore) -> Self {
        fn read<T: Default>(
            store: &impl KeyValueStore,
            key: &str,
            parse: fn(&str) -> Option<T>,
        ) -> T {
            store
                .get(key)
                .as_deref()
                .and_then(parse)
                .unwrap_or_default()
        }

        Self {
            category: read(store, Self::CATEGORY_KEY, CategoryFilter::from_key),
            dietary: read(store, Self::DIETARY_KEY, DietaryFilter::from_key),
            price: read(store, Self::PRICE_KEY, PriceFilter::from_key),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.set(Self::CATEGORY_KEY, self.category.to_key().to_string());
        store.set(Self::DIETARY_KEY, self.dietary.to_key().to_string());
        store.set(Self::PRICE_KEY, self.price.to_key().to_string());
    }
}

/// Every available item matching `filter`, in menu order
pub fn resolve_menu<'a>(
    items: impl IntoIterator<Item = &'a MenuItem>,
    filter: &MenuFilter,
) -> Vec<Candidate<MenuItem>> {
    items
        .into_iter()
        .filter(|item| filter.matches(item))
        .map(|item| Candidate::new(&item.name, item.clone()))
        .collect()
}

/// Trimmed, non-empty names, in entry order
pub fn resolve_names<S: AsRef<str>>(entries: &[S]) -> Vec<Candidate<String>> {
    entries
        .iter()
        .map(|entry| entry.as_ref().trim())
        .filter(|name| !name.is_empty())
        .map(|name| Candidate::new(name, name.to_string()))
        .collect()
}

/// The "who pays?" form, between 2 and 10 people
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameList {
    entries: Vec<String>,
}

impl Default for NameList {
    fn default() -> Self {
        Self::new()
    }
}

impl NameList {
    pub const MIN_FIELDS: usize = 2;
    pub const MAX_FIELDS: usize = 10;

    pub fn new() -> Self {
        Self {
            entries: vec![String::new(); Self::MIN_FIELDS],
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [String] {
        &mut self.entries
    }

    pub fn can_add(&self) -> bool {
        self.entries.len() < Self::MAX_FIELDS
    }

    pub fn can_remove(&self) -> bool {
        self.entries.len() > Self::MIN_FIELDS
    }

    pub fn add_field(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        self.entries.push(String::new());
        true
    }

    pub fn remove_field(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    pub fn candidates(&self) -> Vec<Candidate<String>> {
        resolve_names(&self.entries)
    }

    pub fn reset(&mut self) {
        *self = Self::new()
    }
}
