//! Fuel Track Core Library
//!
//! Record model, entry validation, offline-first repository and metrics
//! shared by the Fuel Track client and server.

pub mod cache;
pub mod entry;
pub mod gateway;
pub mod metrics;
pub mod models;
pub mod repository;

pub use cache::{CacheError, FileCacheStore, STORAGE_KEY};
pub use entry::{RecordInput, ValidationError};
pub use gateway::{ApiConnection, ApiResponse, GatewayError, HttpRecordGateway, RecordGateway};
pub use metrics::{
    efficiency_series, price_series, summary_statistics, time_series, MetricField, SeriesPoint,
    SummaryStatistics,
};
pub use models::{
    compute_distance_since_last, compute_efficiency, compute_total_amount, sort_by_date_desc,
    FuelRecord, RecordId, ServiceType,
};
pub use repository::{RepositoryError, SyncRecordRepository};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
