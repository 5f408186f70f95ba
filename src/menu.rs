use serde::{Deserialize, Serialize};

pub const MENU_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"), //
    "/data/menu.json"
));

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Appetizer,
    Main,
    Dessert,
    Beverage,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Appetizer, Self::Main, Self::Dessert, Self::Beverage];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Appetizer => "appetizer",
            Self::Main => "main",
            Self::Dessert => "dessert",
            Self::Beverage => "beverage",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == input)
    }

    /// Plural heading, "Appetizers"
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Appetizer => "Appetizers",
            Self::Main => "Mains",
            Self::Dessert => "Desserts",
            Self::Beverage => "Beverages",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Vegan,
    Vegetarian,
    GlutenFree,
    Keto,
    DairyFree,
}

impl DietaryTag {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vegan => "vegan",
            Self::Vegetarian => "vegetarian",
            Self::GlutenFree => "gluten-free",
            Self::Keto => "keto",
            Self::DairyFree => "dairy-free",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomizationKind {
    /// pick exactly one
    Radio,
    /// pick any number
    Checkbox,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOption {
    pub id: String,
    pub name: String,
    /// cents, added per unit
    pub price_adjustment: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CustomizationKind,
    pub required: bool,
    pub options: Vec<CustomOption>,
}

impl Customization {
    pub fn option(&self, id: &str) -> Option<&CustomOption> {
        self.options.iter().find(|opt| opt.id == id)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// cents
    pub price: i64,
    /// minutes
    pub prep_time: u32,
    pub calories: u32,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub dietary: Vec<DietaryTag>,
    pub spice_level: u8,
    pub popular: bool,
    pub available: bool,
    #[serde(default)]
    pub customizations: Vec<Customization>,
    #[serde(default, rename = "nutritionalInfo")]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub rating: f32,
    pub review_count: u32,
}

impl MenuItem {
    pub fn has_tag(&self, tag: DietaryTag) -> bool {
        self.dietary.contains(&tag)
    }

    pub fn customization(&self, id: &str) -> Option<&Customization> {
        self.customizations.iter().find(|c| c.id == id)
    }

    /// "🌶🌶" for a spice level of 2
    pub fn spice_repr(&self) -> String {
        "🌶".repeat(self.spice_level.min(3) as usize)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        use anyhow::Context as _;
        serde_json::from_str(json)
            .map(Self::new)
            .with_context(|| "cannot parse the menu catalog")
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(MENU_JSON)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn by_category(&self, category: Option<Category>) -> impl Iterator<Item = &MenuItem> + '_ {
        self.items
            .iter()
            .filter(move |item| category.map_or(true, |c| item.category == c))
    }

    pub fn popular(&self) -> impl Iterator<Item = &MenuItem> + '_ {
        self.items
            .iter()
            .filter(|item| item.popular && item.available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.items().len(), 6);

        let pizza = catalog.find("item_001").unwrap();
        assert_eq!(pizza.name, "Margherita Pizza");
        assert_eq!(pizza.price, 1699);
        assert_eq!(pizza.category, Category::Main);
        assert!(pizza.has_tag(DietaryTag::Vegetarian));

        let crust = pizza.customization("crust_type").unwrap();
        assert_eq!(crust.kind, CustomizationKind::Radio);
        assert!(crust.required);
        assert_eq!(crust.option("gf").unwrap().price_adjustment, 400);

        let salmon = catalog.find("item_002").unwrap();
        assert_eq!(salmon.dietary, vec![DietaryTag::GlutenFree, DietaryTag::Keto]);
        assert_eq!(salmon.nutrition.protein, 48);
    }

    #[test]
    fn filter_by_category() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.by_category(None).count(), 6);
        assert_eq!(catalog.by_category(Some(Category::Main)).count(), 4);
        assert_eq!(catalog.by_category(Some(Category::Beverage)).count(), 0);
        assert_eq!(catalog.popular().count(), 5);
    }

    #[test]
    fn category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("soup"), None);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(Catalog::from_json("{").is_err());
    }
}
