use crate::domain::common::{
    timestamp, EntityForm, FieldDescriptor, FieldKind, FieldRule, Resource, ValidationRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Models
// ============================================================================

/// Провинция (верхний уровень адресного справочника)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvinceForm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvincePayload {
    pub name: String,
}

impl EntityForm for ProvinceForm {
    type Payload = ProvincePayload;

    fn descriptors(rules: &ValidationRules) -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("name", "Наименование", FieldKind::Text, |f: &ProvinceForm| {
                f.name.as_str()
            })
            .rule(FieldRule::Required)
            .rule(FieldRule::MinLength(rules.province.name_min))
            .rule(FieldRule::MaxLength(rules.province.name_max)),
        ]
    }

    fn to_payload(&self) -> Self::Payload {
        ProvincePayload {
            name: self.name.trim().to_string(),
        }
    }
}

// ============================================================================
// Resource
// ============================================================================

pub struct ProvinceResource;

impl Resource for ProvinceResource {
    type Item = Province;
    type Detail = Province;
    type Form = ProvinceForm;

    fn aggregate_index() -> &'static str {
        "a001_province"
    }

    fn collection_path() -> &'static str {
        "/api/Provinces"
    }

    fn element_name() -> &'static str {
        "провинцию"
    }

    fn list_name() -> &'static str {
        "Провинции"
    }

    fn item_id(item: &Province) -> &str {
        &item.id
    }

    fn item_label(item: &Province) -> &str {
        &item.name
    }

    fn form_from_detail(detail: &Province) -> ProvinceForm {
        ProvinceForm {
            name: detail.name.clone(),
        }
    }
}
