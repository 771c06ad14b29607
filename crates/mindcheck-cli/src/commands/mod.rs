pub mod quiz;
pub mod validate;
