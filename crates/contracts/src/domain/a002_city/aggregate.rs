use crate::domain::common::{
    timestamp, EntityForm, FieldDescriptor, FieldKind, FieldRule, Resource, ValidationRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Models
// ============================================================================

/// Строка списка городов (с денормализованным именем провинции)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub province_name: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Детальная модель города
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDetail {
    pub id: String,
    pub name: String,
    pub province_id: String,
    #[serde(default)]
    pub province_name: Option<String>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityForm {
    pub name: String,
    pub province_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPayload {
    pub name: String,
    pub province_id: String,
}

impl EntityForm for CityForm {
    type Payload = CityPayload;

    fn descriptors(rules: &ValidationRules) -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("name", "Наименование", FieldKind::Text, |f: &CityForm| {
                f.name.as_str()
            })
            .rule(FieldRule::Required)
            .rule(FieldRule::MinLength(rules.city.name_min))
            .rule(FieldRule::MaxLength(rules.city.name_max)),
            FieldDescriptor::new(
                "provinceId",
                "Провинция",
                FieldKind::Reference,
                |f: &CityForm| f.province_id.as_str(),
            )
            .rule(FieldRule::Required),
        ]
    }

    fn to_payload(&self) -> Self::Payload {
        CityPayload {
            name: self.name.trim().to_string(),
            province_id: self.province_id.trim().to_string(),
        }
    }
}

// ============================================================================
// Resource
// ============================================================================

pub struct CityResource;

impl Resource for CityResource {
    type Item = City;
    type Detail = CityDetail;
    type Form = CityForm;

    fn aggregate_index() -> &'static str {
        "a002_city"
    }

    fn collection_path() -> &'static str {
        "/api/Cities"
    }

    fn element_name() -> &'static str {
        "город"
    }

    fn list_name() -> &'static str {
        "Города"
    }

    fn item_id(item: &City) -> &str {
        &item.id
    }

    fn item_label(item: &City) -> &str {
        &item.name
    }

    fn form_from_detail(detail: &CityDetail) -> CityForm {
        CityForm {
            name: detail.name.clone(),
            province_id: detail.province_id.clone(),
        }
    }
}
