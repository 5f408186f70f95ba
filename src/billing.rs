#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RestaurantSettings {
    pub name: String,
    pub tax_rate: f64,
    pub service_charge: f64,
    pub currency: String,
    pub accepts_orders: bool,
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        Self {
            name: String::from("Bella Vista Bistro"),
            tax_rate: 0.08,
            service_charge: 0.05,
            currency: String::from("USD"),
            accepts_orders: true,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TipPreset {
    #[default]
    Fifteen,
    Eighteen,
    Twenty,
    TwentyFive,
}

impl TipPreset {
    pub const ALL: [Self; 4] = [Self::Fifteen, Self::Eighteen, Self::Twenty, Self::TwentyFive];

    pub const fn rate(&self) -> f64 {
        match self {
            Self::Fifteen => 0.15,
            Self::Eighteen => 0.18,
            Self::Twenty => 0.20,
            Self::TwentyFive => 0.25,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fifteen => "15%",
            Self::Eighteen => "18%",
            Self::Twenty => "20%",
            Self::TwentyFive => "25%",
        }
    }
}

/// A percentage of the subtotal, or a fixed amount in cents
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tip {
    Preset(TipPreset),
    Custom(i64),
}

impl Default for Tip {
    fn default() -> Self {
        Self::Preset(TipPreset::default())
    }
}

impl Tip {
    pub const NONE: Self = Self::Custom(0);

    /// Cents owed on `subtotal`. Nothing is owed on an empty subtotal.
    pub fn amount(&self, subtotal: i64) -> i64 {
        if subtotal <= 0 {
            return 0;
        }
        match self {
            Self::Preset(preset) => round_cents(subtotal as f64 * preset.rate()),
            Self::Custom(cents) => (*cents).max(0),
        }
    }
}

/// Order amounts in cents
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: i64,
    pub tax: i64,
    pub service_charge: i64,
    pub tip: i64,
    pub total: i64,
}

impl Totals {
    /// Tax and service charge are taken off the subtotal
    pub fn compute(subtotal: i64, settings: &RestaurantSettings, tip: Tip) -> Self {
        let part = |rate: f64| round_cents(subtotal as f64 * rate);

        let tax = part(settings.tax_rate);
        let service_charge = part(settings.service_charge);
        let tip = tip.amount(subtotal);

        Self {
            subtotal,
            tax,
            service_charge,
            tip,
            total: subtotal + tax + service_charge + tip,
        }
    }
}

/// Rounds half away from zero
fn round_cents(cents: f64) -> i64 {
    cents.round() as i64
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BillError {
    #[error("a bill is split between {min} and {max} people, not {found}")]
    PeopleOutOfRange {
        min: usize,
        max: usize,
        found: usize,
    },
}

pub const MIN_SPLIT: usize = 2;
pub const MAX_SPLIT: usize = 10;

/// Splits `total` cents into `people` shares that add back up to `total`.
///
/// Leftover cents go to the first shares.
pub fn split_equally(total: i64, people: usize) -> Result<Vec<i64>, BillError> {
    if !(MIN_SPLIT..=MAX_SPLIT).contains(&people) {
        return Err(BillError::PeopleOutOfRange {
            min: MIN_SPLIT,
            max: MAX_SPLIT,
            found: people,
        });
    }

    let n = people as i64;
    let (base, remainder) = (total.div_euclid(n), total.rem_euclid(n));
    Ok((0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect())
}

/// `$12.34` for dollars, `12.34 EUR` for anything else
pub fn format_money(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let amount = format!("{}.{:02}", abs / 100, abs % 100);
    match currency {
        "USD" => format!("{sign}${amount}"),
        currency => format!("{sign}{amount} {currency}"),
    }
}
