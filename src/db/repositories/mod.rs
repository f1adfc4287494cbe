pub mod anime;
pub mod user;
