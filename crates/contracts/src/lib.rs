//! Общие контракты между фронтендом и REST API бэкенда:
//! модели сущностей, формы, правила валидации и формат ошибок.

pub mod domain;
pub mod shared;
