pub mod aggregate;
pub mod normalize;
pub mod source;

pub mod stats_service;
pub mod stats_service_impl;
pub use stats_service::{StatsError, StatsService};
pub use stats_service_impl::OpenDataStatsService;
