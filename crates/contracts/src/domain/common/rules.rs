use serde::{Deserialize, Serialize};

/// Границы валидации по сущностям.
///
/// Любую группу можно переопределить в секции `[validation]` конфигурации.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub province: NameRules,
    pub city: NameRules,
    pub brand: NameRules,
    pub product: ProductRules,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            province: NameRules::default(),
            city: NameRules::default(),
            brand: NameRules {
                name_min: 3,
                name_max: 255,
            },
            product: ProductRules::default(),
        }
    }
}

/// Ограничения на наименование
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameRules {
    pub name_min: usize,
    pub name_max: usize,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            name_min: 1,
            name_max: 255,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRules {
    pub name_min: usize,
    pub name_max: usize,
    pub description_max: usize,
    pub price_min: f64,
    pub price_max: f64,
    pub quantity_min: i64,
    pub quantity_max: i64,
}

impl Default for ProductRules {
    fn default() -> Self {
        Self {
            name_min: 1,
            name_max: 255,
            description_max: 2000,
            price_min: 100.0,
            price_max: 100_000_000.0,
            quantity_min: 0,
            quantity_max: 100_000,
        }
    }
}
