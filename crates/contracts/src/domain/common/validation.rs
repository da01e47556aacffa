//! Клиентская валидация форм.
//!
//! Каждая форма описывает свои поля один раз через [`FieldDescriptor`]:
//! имя на проводе, подпись, тип значения, правила и функцию доступа к сырому вводу.
//! [`validate`] проходит по описаниям и либо возвращает типизированный payload,
//! либо первую нарушенную причину для каждого поля.
//!
//! Валидация здесь только для удобства пользователя: бэкенд остаётся источником истины.

use super::rules::ValidationRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Тип значения поля
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Decimal,
    Integer,
    /// Ссылка на родительскую сущность (id из пикера)
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
}

/// Описание одного поля формы
pub struct FieldDescriptor<F> {
    /// Имя поля в JSON (camelCase)
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: Vec<FieldRule>,
    pub accessor: fn(&F) -> &str,
}

impl<F> FieldDescriptor<F> {
    pub fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        accessor: fn(&F) -> &str,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            rules: Vec::new(),
            accessor,
        }
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Проверить поле, вернуть сообщение первого нарушенного правила
    pub fn check(&self, form: &F) -> Option<String> {
        let raw = (self.accessor)(form).trim();

        if raw.is_empty() {
            if self.rules.contains(&FieldRule::Required) {
                return Some(format!("Поле «{}» обязательно для заполнения", self.label));
            }
            return None;
        }

        let number = match self.kind {
            FieldKind::Decimal => match parse_decimal(raw) {
                Some(v) => Some(v),
                None => return Some(format!("Поле «{}» должно быть числом", self.label)),
            },
            FieldKind::Integer => match parse_integer(raw) {
                Some(v) => Some(v as f64),
                None => {
                    return Some(format!("Поле «{}» должно быть целым числом", self.label))
                }
            },
            FieldKind::Text | FieldKind::Reference => None,
        };

        let length = raw.chars().count();
        for rule in &self.rules {
            let violated = match *rule {
                FieldRule::Required => None,
                FieldRule::MinLength(min) if length < min => {
                    Some(format!("Поле «{}»: не менее {} символов", self.label, min))
                }
                FieldRule::MaxLength(max) if length > max => {
                    Some(format!("Поле «{}»: не более {} символов", self.label, max))
                }
                FieldRule::Min(min) if number.is_some_and(|v| v < min) => {
                    Some(format!("Поле «{}»: значение не меньше {}", self.label, min))
                }
                FieldRule::Max(max) if number.is_some_and(|v| v > max) => {
                    Some(format!("Поле «{}»: значение не больше {}", self.label, max))
                }
                _ => None,
            };
            if violated.is_some() {
                return violated;
            }
        }
        None
    }
}

/// Ошибки полей: имя поля -> сообщение
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сохраняет только первое сообщение для поля
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Ошибки полей от бэкенда. ASP.NET отдаёт ключи в PascalCase ("Name", "BrandId"),
    /// формы используют camelCase.
    pub fn from_server(errors: &BTreeMap<String, Vec<String>>) -> Self {
        let mut result = Self::new();
        for (field, messages) in errors {
            if let Some(message) = messages.first() {
                result.insert(camel_case(field), message.clone());
            }
        }
        result
    }
}

fn camel_case(field: &str) -> String {
    let field = field.trim_start_matches("$.");
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Форма сущности: сырой ввод пользователя плюс описание полей
pub trait EntityForm: Clone + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Тело запроса POST/PUT
    type Payload: Serialize + Clone + PartialEq + std::fmt::Debug + 'static;

    fn descriptors(rules: &ValidationRules) -> Vec<FieldDescriptor<Self>>;

    /// Вызывается только после успешной валидации
    fn to_payload(&self) -> Self::Payload;
}

/// Проверить форму по её описаниям
pub fn validate<F: EntityForm>(form: &F, rules: &ValidationRules) -> Result<F::Payload, FieldErrors> {
    let mut errors = FieldErrors::new();
    for descriptor in F::descriptors(rules) {
        if let Some(message) = descriptor.check(form) {
            errors.insert(descriptor.name, message);
        }
    }

    if errors.is_empty() {
        Ok(form.to_payload())
    } else {
        Err(errors)
    }
}

/// Разбор числа из поля ввода: пробелы-разделители и десятичная запятая допускаются
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    let normalized: String = raw.trim().chars().filter(|c| !c.is_whitespace()).collect();
    normalized.parse::<i64>().ok()
}

/// Число для поля ввода: без дробной части, если она нулевая
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct SampleForm {
        title: String,
        amount: String,
    }

    impl EntityForm for SampleForm {
        type Payload = (String, f64);

        fn descriptors(_rules: &ValidationRules) -> Vec<FieldDescriptor<Self>> {
            vec![
                FieldDescriptor::new("title", "Название", FieldKind::Text, |f: &SampleForm| {
                    f.title.as_str()
                })
                .rule(FieldRule::Required)
                .rule(FieldRule::MinLength(2))
                .rule(FieldRule::MaxLength(5)),
                FieldDescriptor::new("amount", "Сумма", FieldKind::Decimal, |f: &SampleForm| {
                    f.amount.as_str()
                })
                .rule(FieldRule::Min(10.0))
                .rule(FieldRule::Max(20.0)),
            ]
        }

        fn to_payload(&self) -> Self::Payload {
            (
                self.title.trim().to_string(),
                parse_decimal(&self.amount).unwrap_or_default(),
            )
        }
    }

    fn check(title: &str, amount: &str) -> Result<(String, f64), FieldErrors> {
        let form = SampleForm {
            title: title.to_string(),
            amount: amount.to_string(),
        };
        validate(&form, &ValidationRules::default())
    }

    #[test]
    fn test_valid_form_returns_payload() {
        assert_eq!(check(" abc ", "15"), Ok(("abc".to_string(), 15.0)));
    }

    #[test]
    fn test_required_reported_before_length() {
        let errors = check("   ", "15").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("title"),
            Some("Поле «Название» обязательно для заполнения")
        );
    }

    #[test]
    fn test_length_bounds_count_chars() {
        assert!(check("ёж", "15").is_ok());
        let errors = check("a", "15").unwrap_err();
        assert_eq!(errors.get("title"), Some("Поле «Название»: не менее 2 символов"));
        let errors = check("abcdef", "15").unwrap_err();
        assert_eq!(errors.get("title"), Some("Поле «Название»: не более 5 символов"));
    }

    #[test]
    fn test_optional_numeric_field() {
        assert!(check("abc", "").is_ok());
        let errors = check("abc", "12x").unwrap_err();
        assert_eq!(errors.get("amount"), Some("Поле «Сумма» должно быть числом"));
        let errors = check("abc", "9,5").unwrap_err();
        assert_eq!(errors.get("amount"), Some("Поле «Сумма»: значение не меньше 10"));
        let errors = check("abc", "21").unwrap_err();
        assert_eq!(errors.get("amount"), Some("Поле «Сумма»: значение не больше 20"));
    }

    #[test]
    fn test_errors_for_every_field() {
        let errors = check("", "100").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("title").is_some());
        assert!(errors.get("amount").is_some());
    }

    #[test]
    fn test_from_server_normalizes_keys() {
        let mut server = BTreeMap::new();
        server.insert(
            "BrandId".to_string(),
            vec!["Brand not found".to_string(), "second".to_string()],
        );
        server.insert("Name".to_string(), vec![]);
        let errors = FieldErrors::from_server(&server);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("brandId"), Some("Brand not found"));
    }

    #[test]
    fn test_number_helpers() {
        assert_eq!(parse_decimal("1 000,50"), Some(1000.5));
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_integer(" 42 "), Some(42));
        assert_eq!(parse_integer("4.2"), None);
        assert_eq!(format_decimal(1500.0), "1500");
        assert_eq!(format_decimal(12.25), "12.25");
    }
}
