pub mod export;
pub(crate) mod health;
pub mod upload;

pub use health::health_check;
