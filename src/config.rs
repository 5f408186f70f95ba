use anyhow::Context;

use crate::billing::RestaurantSettings;

/// Overrides for the restaurant's settings, read from the environment
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnvConfig {
    pub name: Option<String>,
    pub tax_rate: Option<f64>,
    pub service_charge: Option<f64>,
    pub currency: Option<String>,
}

impl EnvConfig {
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    fn load_with(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get_env = |key: &str| get(key).filter(|s| !s.trim().is_empty());

        let get_rate = |key: &str| -> anyhow::Result<Option<f64>> {
            let value = match get_env(key) {
                Some(value) => value,
                None => return Ok(None),
            };
            let rate = value
                .trim()
                .parse::<f64>()
                .with_context(|| anyhow::anyhow!("`{key}` should be a number, got `{value}`"))?;
            anyhow::ensure!(
                (0.0..=1.0).contains(&rate),
                "`{key}` should be a fraction between 0 and 1, got {rate}"
            );
            Ok(Some(rate))
        };

        Ok(Self {
            name: get_env("BISTRO_NAME"),
            tax_rate: get_rate("BISTRO_TAX_RATE")?,
            service_charge: get_rate("BISTRO_SERVICE_CHARGE")?,
            currency: get_env("BISTRO_CURRENCY").map(|s| s.trim().to_uppercase()),
        })
    }

    pub fn apply(&self, settings: &mut RestaurantSettings) {
        if let Some(name) = &self.name {
            settings.name = name.clone();
        }
        if let Some(rate) = self.tax_rate {
            settings.tax_rate = rate;
        }
        if let Some(rate) = self.service_charge {
            settings.service_charge = rate;
        }
        if let Some(currency) = &self.currency {
            settings.currency = currency.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<EnvConfig> {
        let env = pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        EnvConfig::load_with(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_env_changes_nothing() {
        let config = load(&[]).unwrap();
        assert_eq!(config, EnvConfig::default());

        let mut settings = RestaurantSettings::default();
        config.apply(&mut settings);
        assert_eq!(settings, RestaurantSettings::default());
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("BISTRO_NAME", "Chez Rust"),
            ("BISTRO_TAX_RATE", "0.1"),
            ("BISTRO_SERVICE_CHARGE", " 0 "),
            ("BISTRO_CURRENCY", "eur"),
        ])
        .unwrap();

        let mut settings = RestaurantSettings::default();
        config.apply(&mut settings);
        assert_eq!(settings.name, "Chez Rust");
        assert_eq!(settings.tax_rate, 0.1);
        assert_eq!(settings.service_charge, 0.0);
        assert_eq!(settings.currency, "EUR");
    }

    #[test]
    fn bad_rates_are_errors() {
        let err = load(&[("BISTRO_TAX_RATE", "lots")]).unwrap_err();
        assert!(err.to_string().contains("BISTRO_TAX_RATE"));

        assert!(load(&[("BISTRO_SERVICE_CHARGE", "5")]).is_err());
    }
}
