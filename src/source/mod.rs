pub mod contract;
pub mod manager;
pub mod models;
pub mod native;
pub mod subsonic;

pub use crate::config::SourceKind;
