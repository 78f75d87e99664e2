pub mod api;
pub mod finance;
