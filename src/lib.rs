pub mod app;
pub mod cli;
pub mod config;
pub mod gifts;
pub mod script;
pub mod ui;

pub use config::{AppConfig, ConfigLoader, ConfigPaths};
pub use gifts::{max_id, reduce, GiftId, GiftList, GiftRecord, ListAction};
