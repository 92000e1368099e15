//! Loading of the two document families into domain types.

pub mod daily_loader;
pub mod error;
pub mod history_loader;
