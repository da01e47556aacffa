pub mod api;
pub mod date_utils;
pub mod entity;
pub mod form;
pub mod format;
pub mod icons;
pub mod list_page;
pub mod list_utils;
pub mod modal;
pub mod mutation;
pub mod notify;
pub mod picker;
pub mod remote;
