pub mod models;
pub mod timestamp;

pub use models::*;
