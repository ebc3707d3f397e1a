pub mod greeting;
pub mod types;
