pub mod http;
pub mod mirror;
pub mod persistence;
