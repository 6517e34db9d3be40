use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::service_type::ServiceType;

/// A single fuel purchase.
///
/// `total_amount` and `km_since_last_visit` are snapshots taken when the
/// record is saved; nothing recomputes them from sibling records later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub gas_station_name: String,
    pub service_type: ServiceType,
    pub price_per_gallon: f64,
    pub gallons: f64,
    pub total_amount: f64,
    pub odometer_reading: f64,
    pub km_since_last_visit: f64,
}

impl FuelRecord {
    /// Kilometers per gallon for this fill-up, or 0 when it cannot be derived.
    pub fn efficiency(&self) -> f64 {
        compute_efficiency(self)
    }
}

pub fn compute_total_amount(price_per_gallon: f64, gallons: f64) -> f64 {
    price_per_gallon * gallons
}

/// Distance driven since the previous fill-up; never negative.
pub fn compute_distance_since_last(current_odometer: f64, previous_odometer: Option<f64>) -> f64 {
    match previous_odometer {
        Some(previous) => (current_odometer - previous).max(0.0),
        None => 0.0,
    }
}

/// Kilometers per gallon. Returns 0 instead of dividing by zero or yielding
/// a non-finite value.
pub fn compute_efficiency(record: &FuelRecord) -> f64 {
    if record.km_since_last_visit > 0.0 && record.gallons > 0.0 {
        let efficiency = record.km_since_last_visit / record.gallons;
        if efficiency.is_finite() {
            return efficiency;
        }
    }
    0.0
}

/// Newest first. Stable, so records sharing a date keep their relative order.
pub fn sort_by_date_desc(records: &mut [FuelRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
