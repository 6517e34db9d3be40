//! Entry workflow: turns user-entered values into a `FuelRecord`.
//!
//! Validation happens here, before the repository sees anything. A record
//! that fails validation is never written anywhere.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    compute_distance_since_last, compute_total_amount, FuelRecord, RecordId, ServiceType,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter gas station name")]
    EmptyStationName,

    #[error("Please enter valid price per gallon")]
    InvalidPrice,

    #[error("Please enter valid amount of gallons")]
    InvalidGallons,

    #[error("Please enter valid odometer reading")]
    InvalidOdometer,

    #[error("Odometer reading must be greater than last reading ({current} <= {last})")]
    OdometerNotIncreasing { last: f64, current: f64 },
}

/// Values collected by the presentation layer for a new or edited record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInput {
    pub date: DateTime<Utc>,
    pub gas_station_name: String,
    pub service_type: ServiceType,
    pub price_per_gallon: f64,
    pub gallons: f64,
    pub odometer_reading: f64,
}

impl RecordInput {
    /// Pre-fills an input from an existing record, as the edit form does.
    pub fn from_record(record: &FuelRecord) -> Self {
        Self {
            date: record.date,
            gas_station_name: record.gas_station_name.clone(),
            service_type: record.service_type,
            price_per_gallon: record.price_per_gallon,
            gallons: record.gallons,
            odometer_reading: record.odometer_reading,
        }
    }

    /// Checks the entered values.
    ///
    /// `last_odometer` is the most recent reading in the collection; pass
    /// `None` when editing or when there are no records yet.
    pub fn validate(&self, last_odometer: Option<f64>) -> Result<(), ValidationError> {
        if self.gas_station_name.trim().is_empty() {
            return Err(ValidationError::EmptyStationName);
        }
        if !is_positive(self.price_per_gallon) {
            return Err(ValidationError::InvalidPrice);
        }
        if !is_positive(self.gallons) {
            return Err(ValidationError::InvalidGallons);
        }
        if !is_positive(self.odometer_reading) {
            return Err(ValidationError::InvalidOdometer);
        }
        if let Some(last) = last_odometer {
            if self.odometer_reading <= last {
                return Err(ValidationError::OdometerNotIncreasing {
                    last,
                    current: self.odometer_reading,
                });
            }
        }
        Ok(())
    }

    /// Validates and builds a brand new record with a fresh id.
    pub fn into_new_record(self, last_odometer: Option<f64>) -> Result<FuelRecord, ValidationError> {
        self.validate(last_odometer)?;

        Ok(FuelRecord {
            id: RecordId::next(),
            date: self.date,
            gas_station_name: self.gas_station_name.trim().to_string(),
            service_type: self.service_type,
            price_per_gallon: self.price_per_gallon,
            gallons: self.gallons,
            total_amount: compute_total_amount(self.price_per_gallon, self.gallons),
            odometer_reading: self.odometer_reading,
            km_since_last_visit: compute_distance_since_last(self.odometer_reading, last_odometer),
        })
    }

    /// Validates and applies the edit to `existing`.
    ///
    /// The id and `km_since_last_visit` are carried over unchanged; the total
    /// is recomputed from the edited price and gallons.
    pub fn apply_edit(self, existing: &FuelRecord) -> Result<FuelRecord, ValidationError> {
        self.validate(None)?;

        Ok(FuelRecord {
            id: existing.id.clone(),
            date: self.date,
            gas_station_name: self.gas_station_name.trim().to_string(),
            service_type: self.service_type,
            price_per_gallon: self.price_per_gallon,
            gallons: self.gallons,
            total_amount: compute_total_amount(self.price_per_gallon, self.gallons),
            odometer_reading: self.odometer_reading,
            km_since_last_visit: existing.km_since_last_visit,
        })
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
