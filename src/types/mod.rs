pub mod comfort_level;
pub mod daily_snapshot;
pub mod site_history;
pub mod site_record;
pub mod timestamp;
