use crate::domain::common::{
    timestamp, EntityForm, FieldDescriptor, FieldKind, FieldRule, Resource, ValidationRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Models
// ============================================================================

/// Бренд товара
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandForm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPayload {
    pub name: String,
}

impl EntityForm for BrandForm {
    type Payload = BrandPayload;

    fn descriptors(rules: &ValidationRules) -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("name", "Наименование", FieldKind::Text, |f: &BrandForm| {
                f.name.as_str()
            })
            .rule(FieldRule::Required)
            .rule(FieldRule::MinLength(rules.brand.name_min))
            .rule(FieldRule::MaxLength(rules.brand.name_max)),
        ]
    }

    fn to_payload(&self) -> Self::Payload {
        BrandPayload {
            name: self.name.trim().to_string(),
        }
    }
}

// ============================================================================
// Resource
// ============================================================================

pub struct BrandResource;

impl Resource for BrandResource {
    type Item = Brand;
    type Detail = Brand;
    type Form = BrandForm;

    fn aggregate_index() -> &'static str {
        "a003_brand"
    }

    fn collection_path() -> &'static str {
        "/api/Brands"
    }

    fn element_name() -> &'static str {
        "бренд"
    }

    fn list_name() -> &'static str {
        "Бренды"
    }

    fn item_id(item: &Brand) -> &str {
        &item.id
    }

    fn item_label(item: &Brand) -> &str {
        &item.name
    }

    fn form_from_detail(detail: &Brand) -> BrandForm {
        BrandForm {
            name: detail.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::validate;

    #[test]
    fn test_brand_name_bounds() {
        let rules = ValidationRules::default();
        let short = BrandForm {
            name: "Ac".to_string(),
        };
        let errors = validate(&short, &rules).unwrap_err();
        assert!(errors.get("name").is_some());

        let ok = BrandForm {
            name: " Acme Corp ".to_string(),
        };
        assert_eq!(
            validate(&ok, &rules),
            Ok(BrandPayload {
                name: "Acme Corp".to_string()
            })
        );
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = BrandPayload {
            name: "Acme Corp".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"name":"Acme Corp"}"#
        );
    }

    #[test]
    fn test_brand_without_created_at() {
        let brand: Brand = serde_json::from_str(r#"{"id":"1","name":"Acme"}"#).unwrap();
        assert_eq!(brand.name, "Acme");
        assert!(brand.created_at.is_none());
    }

    #[test]
    fn test_created_at_without_zone_keeps_list() {
        let json = r#"[
            {"id":"1","name":"Acme","createdAt":"2024-03-15T14:02:26.123"},
            {"id":"2","name":"Bee"},
            {"id":"3","name":"Cee","createdAt":"не дата"},
            {"id":"4","name":"Dee","createdAt":null}
        ]"#;
        let brands: Vec<Brand> = serde_json::from_str(json).unwrap();
        assert_eq!(brands.len(), 4);
        assert_eq!(
            brands[0].created_at.map(|d| d.format("%d.%m.%Y %H:%M:%S").to_string()),
            Some("15.03.2024 14:02:26".to_string())
        );
        assert!(brands[1].created_at.is_none());
        assert!(brands[2].created_at.is_none());
        assert!(brands[3].created_at.is_none());
    }
}
