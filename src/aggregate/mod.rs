pub mod site_aggregator;
pub mod trends;
