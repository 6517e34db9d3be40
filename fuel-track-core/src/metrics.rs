//! Aggregations over a record collection for presentation.
//!
//! Everything here is pure: no I/O, no errors, no division by zero.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{compute_efficiency, sort_by_date_desc, FuelRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_spent: f64,
    pub total_gallons: f64,
    pub total_distance: f64,
    /// Mean over records with positive efficiency only.
    pub average_efficiency: f64,
    pub average_price_per_gallon: f64,
    pub record_count: usize,
}

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub date: DateTime<Utc>,
    pub value: f64,
}

pub fn summary_statistics(records: &[FuelRecord]) -> SummaryStatistics {
    if records.is_empty() {
        return SummaryStatistics::default();
    }

    let total_spent = records.iter().map(|r| r.total_amount).sum();
    let total_gallons = records.iter().map(|r| r.gallons).sum();
    let total_distance = records.iter().map(|r| r.km_since_last_visit).sum();
    let average_price_per_gallon =
        records.iter().map(|r| r.price_per_gallon).sum::<f64>() / records.len() as f64;

    let efficiencies: Vec<f64> = records
        .iter()
        .map(compute_efficiency)
        .filter(|e| *e > 0.0)
        .collect();
    let average_efficiency = if efficiencies.is_empty() {
        0.0
    } else {
        efficiencies.iter().sum::<f64>() / efficiencies.len() as f64
    };

    SummaryStatistics {
        total_spent,
        total_gallons,
        total_distance,
        average_efficiency,
        average_price_per_gallon,
        record_count: records.len(),
    }
}

/// Projects records onto chronologically ascending chart points.
///
/// The collection is put in the repository's newest-first order and then
/// reversed, so callers may pass it in any order.
pub fn time_series<F>(records: &[FuelRecord], selector: F) -> Vec<SeriesPoint>
where
    F: Fn(&FuelRecord) -> f64,
{
    let mut ordered = records.to_vec();
    sort_by_date_desc(&mut ordered);
    ordered.reverse();

    ordered
        .iter()
        .map(|r| SeriesPoint {
            label: r.date.format("%b %-d").to_string(),
            date: r.date,
            value: selector(r),
        })
        .collect()
}

/// Efficiency over time, skipping records without a usable efficiency.
pub fn efficiency_series(records: &[FuelRecord]) -> Vec<SeriesPoint> {
    let mut points = time_series(records, compute_efficiency);
    points.retain(|p| p.value > 0.0);
    points
}

pub fn price_series(records: &[FuelRecord]) -> Vec<SeriesPoint> {
    time_series(records, |r| r.price_per_gallon)
}

/// Named selectors for charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Efficiency,
    Price,
    Spent,
    Gallons,
    Distance,
}

impl MetricField {
    pub fn series(&self, records: &[FuelRecord]) -> Vec<SeriesPoint> {
        match self {
            MetricField::Efficiency => efficiency_series(records),
            MetricField::Price => price_series(records),
            MetricField::Spent => time_series(records, |r| r.total_amount),
            MetricField::Gallons => time_series(records, |r| r.gallons),
            MetricField::Distance => time_series(records, |r| r.km_since_last_visit),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricField::Efficiency => "km/gal",
            MetricField::Price => "per gal",
            MetricField::Spent => "total",
            MetricField::Gallons => "gal",
            MetricField::Distance => "km",
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricField::Efficiency => write!(f, "efficiency"),
            MetricField::Price => write!(f, "price"),
            MetricField::Spent => write!(f, "spent"),
            MetricField::Gallons => write!(f, "gallons"),
            MetricField::Distance => write!(f, "distance"),
        }
    }
}

impl FromStr for MetricField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "efficiency" => Ok(MetricField::Efficiency),
            "price" => Ok(MetricField::Price),
            "spent" => Ok(MetricField::Spent),
            "gallons" => Ok(MetricField::Gallons),
            "distance" => Ok(MetricField::Distance),
            _ => Err(format!(
                "Invalid metric '{}'. Valid options: efficiency, price, spent, gallons, distance",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceType;
    use chrono::TimeZone;

    fn record(id: &str, month: u32, day: u32, price: f64, gallons: f64, km: f64) -> FuelRecord {
        FuelRecord {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2025, month, day, 12, 0, 0).unwrap(),
            gas_station_name: "Shell".to_string(),
            service_type: ServiceType::FullService,
            price_per_gallon: price,
            gallons,
            total_amount: price * gallons,
            odometer_reading: 1000.0 + km,
            km_since_last_visit: km,
        }
    }

    #[test]
    fn test_empty_statistics_are_zero() {
        let stats = summary_statistics(&[]);
        assert_eq!(stats, SummaryStatistics::default());
        assert_eq!(stats.record_count, 0);
        assert_eq!(stats.average_efficiency, 0.0);
        assert_eq!(stats.average_price_per_gallon, 0.0);
    }

    #[test]
    fn test_first_record_excluded_from_average_efficiency() {
        let records = vec![
            record("2", 1, 8, 5.0, 20.0, 400.0),
            record("1", 1, 1, 5.0, 10.0, 0.0),
        ];

        let stats = summary_statistics(&records);
        assert_eq!(stats.record_count, 2);
        assert_eq!(stats.total_spent, 150.0);
        assert_eq!(stats.total_gallons, 30.0);
        assert_eq!(stats.total_distance, 400.0);
        assert_eq!(stats.average_efficiency, 20.0);
        assert_eq!(stats.average_price_per_gallon, 5.0);
    }

    #[test]
    fn test_average_efficiency_over_positive_records() {
        let records = vec![
            record("1", 1, 1, 5.0, 10.0, 0.0),
            record("2", 1, 2, 5.0, 10.0, 300.0),
            record("3", 1, 3, 6.0, 10.0, 100.0),
        ];

        let stats = summary_statistics(&records);
        assert_eq!(stats.average_efficiency, 20.0);
        assert!((stats.average_price_per_gallon - 16.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_series_is_chronological() {
        let records = vec![
            record("c", 3, 15, 7.0, 10.0, 0.0),
            record("b", 2, 1, 6.0, 10.0, 0.0),
            record("a", 1, 5, 5.0, 10.0, 0.0),
        ];

        let points = price_series(&records);
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 5", "Feb 1", "Mar 15"]);
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_time_series_custom_selector() {
        let records = vec![
            record("b", 1, 2, 5.0, 4.0, 0.0),
            record("a", 1, 1, 5.0, 2.0, 0.0),
        ];
        let points = time_series(&records, |r| r.total_amount);
        assert_eq!(points[0].value, 10.0);
        assert_eq!(points[1].value, 20.0);
    }

    #[test]
    fn test_efficiency_series_skips_zero_points() {
        let records = vec![
            record("2", 1, 8, 5.0, 20.0, 400.0),
            record("1", 1, 1, 5.0, 10.0, 0.0),
        ];
        let points = efficiency_series(&records);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 20.0);
        assert_eq!(points[0].label, "Jan 8");
    }

    #[test]
    fn test_metric_field_parse_and_series() {
        let field: MetricField = "Distance".parse().unwrap();
        assert_eq!(field, MetricField::Distance);
        assert!("odometer".parse::<MetricField>().is_err());

        let records = vec![record("1", 1, 1, 5.0, 10.0, 250.0)];
        assert_eq!(field.series(&records)[0].value, 250.0);
        assert_eq!(field.to_string(), "distance");
    }
}
