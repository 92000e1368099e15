//! Immutable view models and the navigator that swaps them.

pub mod home_view;
pub mod navigator;
pub mod route;
pub mod site_detail_view;
