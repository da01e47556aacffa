use crate::domain::common::{
    timestamp, format_decimal, parse_decimal, parse_integer, EntityForm, FieldDescriptor, FieldKind,
    FieldRule, Resource, ValidationRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Models
// ============================================================================

/// Строка списка товаров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Детальная модель товара
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub brand_id: String,
    #[serde(default)]
    pub brand_name: Option<String>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Форма товара. Числовые поля хранят сырой ввод до валидации.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub brand_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub brand_id: String,
}

impl EntityForm for ProductForm {
    type Payload = ProductPayload;

    fn descriptors(rules: &ValidationRules) -> Vec<FieldDescriptor<Self>> {
        let r = &rules.product;
        vec![
            FieldDescriptor::new("name", "Наименование", FieldKind::Text, |f: &ProductForm| {
                f.name.as_str()
            })
            .rule(FieldRule::Required)
            .rule(FieldRule::MinLength(r.name_min))
            .rule(FieldRule::MaxLength(r.name_max)),
            FieldDescriptor::new("description", "Описание", FieldKind::Text, |f: &ProductForm| {
                f.description.as_str()
            })
            .rule(FieldRule::Required)
            .rule(FieldRule::MaxLength(r.description_max)),
            FieldDescriptor::new("price", "Цена", FieldKind::Decimal, |f: &ProductForm| {
                f.price.as_str()
            })
            .rule(FieldRule::Required)
            .rule(FieldRule::Min(r.price_min))
            .rule(FieldRule::Max(r.price_max)),
            FieldDescriptor::new("quantity", "Количество", FieldKind::Integer, |f: &ProductForm| {
                f.quantity.as_str()
            })
            .rule(FieldRule::Required)
            .rule(FieldRule::Min(r.quantity_min as f64))
            .rule(FieldRule::Max(r.quantity_max as f64)),
            FieldDescriptor::new("brandId", "Бренд", FieldKind::Reference, |f: &ProductForm| {
                f.brand_id.as_str()
            })
            .rule(FieldRule::Required),
        ]
    }

    fn to_payload(&self) -> Self::Payload {
        ProductPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: parse_decimal(&self.price).unwrap_or_default(),
            quantity: parse_integer(&self.quantity).unwrap_or_default(),
            brand_id: self.brand_id.trim().to_string(),
        }
    }
}

// ============================================================================
// Resource
// ============================================================================

pub struct ProductResource;

impl Resource for ProductResource {
    type Item = Product;
    type Detail = ProductDetail;
    type Form = ProductForm;

    fn aggregate_index() -> &'static str {
        "a004_product"
    }

    fn collection_path() -> &'static str {
        "/api/Products"
    }

    fn element_name() -> &'static str {
        "товар"
    }

    fn list_name() -> &'static str {
        "Товары"
    }

    fn item_id(item: &Product) -> &str {
        &item.id
    }

    fn item_label(item: &Product) -> &str {
        &item.name
    }

    fn form_from_detail(detail: &ProductDetail) -> ProductForm {
        ProductForm {
            name: detail.name.clone(),
            description: detail.description.clone(),
            price: format_decimal(detail.price),
            quantity: detail.quantity.to_string(),
            brand_id: detail.brand_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::validate;

    fn filled() -> ProductForm {
        ProductForm {
            name: "Kopi".to_string(),
            description: "Arabica 250g".to_string(),
            price: "45000".to_string(),
            quantity: "12".to_string(),
            brand_id: "b-1".to_string(),
        }
    }

    #[test]
    fn test_valid_product_payload() {
        let payload = validate(&filled(), &ValidationRules::default()).unwrap();
        assert_eq!(payload.price, 45000.0);
        assert_eq!(payload.quantity, 12);
        assert_eq!(payload.brand_id, "b-1");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["brandId"], "b-1");
    }

    #[test]
    fn test_price_bounds_follow_rules() {
        let mut form = filled();
        form.price = "50".to_string();
        let errors = validate(&form, &ValidationRules::default()).unwrap_err();
        assert_eq!(errors.get("price"), Some("Поле «Цена»: значение не меньше 100"));

        let mut rules = ValidationRules::default();
        rules.product.price_min = 1.0;
        assert!(validate(&form, &rules).is_ok());
    }

    #[test]
    fn test_quantity_must_be_integer() {
        let mut form = filled();
        form.quantity = "1.5".to_string();
        let errors = validate(&form, &ValidationRules::default()).unwrap_err();
        assert_eq!(
            errors.get("quantity"),
            Some("Поле «Количество» должно быть целым числом")
        );
    }

    #[test]
    fn test_form_from_detail_roundtrips_numbers() {
        let detail = ProductDetail {
            id: "p-1".to_string(),
            name: "Kopi".to_string(),
            description: "Arabica".to_string(),
            price: 45000.0,
            quantity: 3,
            brand_id: "b-1".to_string(),
            brand_name: Some("Kapal Api".to_string()),
        };
        let form = ProductResource::form_from_detail(&detail);
        assert_eq!(form.price, "45000");
        assert_eq!(form.quantity, "3");
    }
}
