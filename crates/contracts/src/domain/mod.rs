pub mod a001_province;
pub mod a002_city;
pub mod a003_brand;
pub mod a004_product;
pub mod common;
