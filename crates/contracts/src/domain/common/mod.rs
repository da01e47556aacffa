//! Общие типы и трейты для всех сущностей

pub mod resource;
pub mod rules;
pub mod timestamp;
pub mod validation;

// Re-exports
pub use resource::Resource;
pub use rules::{NameRules, ProductRules, ValidationRules};
pub use validation::{
    format_decimal, parse_decimal, parse_integer, validate, EntityForm, FieldDescriptor,
    FieldErrors, FieldKind, FieldRule,
};
