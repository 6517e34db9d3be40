use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use fuel_track_core::{FuelRecord, RecordInput, ServiceType};
use std::io::{self, Write};

use super::{OutputFormat, RecordRepository};
use crate::config::Config;

#[derive(Args)]
pub struct RecordCommand {
    #[command(subcommand)]
    pub command: RecordSubcommand,
}

#[derive(Subcommand)]
pub enum RecordSubcommand {
    /// Record a fuel purchase
    Add {
        /// Gas station name
        #[arg(long)]
        station: String,

        /// Price per gallon
        #[arg(long)]
        price: f64,

        /// Gallons purchased
        #[arg(long)]
        gallons: f64,

        /// Odometer reading (km)
        #[arg(long)]
        odometer: f64,

        /// Service type (full, self)
        #[arg(long, default_value = "full")]
        service: String,

        /// Purchase date (YYYY-MM-DD or RFC 3339), defaults to now
        #[arg(long, short)]
        date: Option<String>,
    },

    /// List all records, newest first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a record's details
    Show {
        /// Record ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit an existing record
    Edit {
        /// Record ID
        id: String,

        /// New gas station name
        #[arg(long)]
        station: Option<String>,

        /// New price per gallon
        #[arg(long)]
        price: Option<f64>,

        /// New gallons
        #[arg(long)]
        gallons: Option<f64>,

        /// New odometer reading (km)
        #[arg(long)]
        odometer: Option<f64>,

        /// New service type (full, self)
        #[arg(long)]
        service: Option<String>,

        /// New purchase date (YYYY-MM-DD or RFC 3339)
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl RecordCommand {
    pub async fn run(
        &self,
        repo: &RecordRepository,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let currency = &config.currency.value;

        match &self.command {
            RecordSubcommand::Add {
                station,
                price,
                gallons,
                odometer,
                service,
                date,
            } => {
                let date = match date {
                    Some(d) => parse_date(d)?,
                    None => Utc::now(),
                };
                let service_type: ServiceType = service.parse()?;

                let input = RecordInput {
                    date,
                    gas_station_name: station.clone(),
                    service_type,
                    price_per_gallon: *price,
                    gallons: *gallons,
                    odometer_reading: *odometer,
                };

                let last_odometer = repo.last_odometer_reading().await?;
                let record = input.into_new_record(last_odometer)?;
                repo.create(&record).await?;

                println!("Record saved successfully:");
                println!();
                print!("{}", render_record(&record, currency));
                match last_odometer {
                    Some(last) => println!(
                        "\nPrevious: {:.0} km -> Current: {:.0} km = {:.0} km driven",
                        last, record.odometer_reading, record.km_since_last_visit
                    ),
                    None => println!(
                        "\nThis is your first record - km since last visit will be 0"
                    ),
                }
                Ok(())
            }

            RecordSubcommand::List { format } => {
                let records = repo.on_enter().await?;

                if records.is_empty() {
                    println!("No records found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&records)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<10}  {:<20}  {:<12}  {:>9}  {:>7}  {:>10}  {:>9}  {:>6}  {:>6}  ID",
                            "DATE", "STATION", "SERVICE", "PRICE/GAL", "GAL", "TOTAL", "ODOMETER",
                            "KM", "KM/GAL"
                        );
                        println!("{}", "-".repeat(120));
                        for record in &records {
                            println!("{}", render_row(record, currency));
                        }
                        println!("\nTotal: {} record(s)", records.len());
                    }
                }
                Ok(())
            }

            RecordSubcommand::Show { id, format } => {
                let record = find_record(repo, id).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&record)?);
                    }
                    OutputFormat::Text => {
                        println!("ID: {}", record.id);
                        print!("{}", render_record(&record, currency));
                    }
                }
                Ok(())
            }

            RecordSubcommand::Edit {
                id,
                station,
                price,
                gallons,
                odometer,
                service,
                date,
            } => {
                let has_updates = station.is_some()
                    || price.is_some()
                    || gallons.is_some()
                    || odometer.is_some()
                    || service.is_some()
                    || date.is_some();

                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let existing = find_record(repo, id).await?;
                let mut input = RecordInput::from_record(&existing);

                if let Some(station) = station {
                    input.gas_station_name = station.clone();
                }
                if let Some(price) = price {
                    input.price_per_gallon = *price;
                }
                if let Some(gallons) = gallons {
                    input.gallons = *gallons;
                }
                if let Some(odometer) = odometer {
                    input.odometer_reading = *odometer;
                }
                if let Some(service) = service {
                    input.service_type = service.parse()?;
                }
                if let Some(date) = date {
                    input.date = parse_date(date)?;
                }

                let updated = input.apply_edit(&existing)?;
                repo.update(&updated).await?;

                println!("Record updated successfully:");
                println!();
                print!("{}", render_record(&updated, currency));
                Ok(())
            }

            RecordSubcommand::Delete { id, force } => {
                let record = find_record(repo, id).await?;

                // Confirm deletion unless --force is used
                if !force {
                    print!(
                        "Delete record from {} at {}? [y/N] ",
                        record.date.format("%Y-%m-%d"),
                        record.gas_station_name
                    );
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                repo.delete(&record.id).await?;
                println!("Deleted record: {}", record.id);
                Ok(())
            }
        }
    }
}

async fn find_record(
    repo: &RecordRepository,
    id: &str,
) -> Result<FuelRecord, Box<dyn std::error::Error>> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| format!("Record not found: {}", id).into())
}

/// Accepts a plain date (midnight UTC) or a full RFC 3339 timestamp.
fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| {
            format!(
                "Invalid date format '{}'. Use YYYY-MM-DD or RFC 3339.",
                value
            )
        })
}

fn render_record(record: &FuelRecord, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} - {}\n",
        record.date.format("%Y-%m-%d"),
        record.gas_station_name
    ));
    out.push_str(&format!("{}\n", "=".repeat(30)));
    out.push_str(&format!("Service:          {}\n", record.service_type));
    out.push_str(&format!(
        "Price/Gallon:     {}{:.2}\n",
        currency, record.price_per_gallon
    ));
    out.push_str(&format!("Gallons:          {:.2}\n", record.gallons));
    out.push_str(&format!(
        "Total:            {}{:.2}\n",
        currency, record.total_amount
    ));
    out.push_str(&format!(
        "Odometer:         {:.0} km\n",
        record.odometer_reading
    ));
    out.push_str(&format!(
        "Since last visit: {:.0} km\n",
        record.km_since_last_visit
    ));

    let efficiency = record.efficiency();
    if efficiency > 0.0 {
        out.push_str(&format!("Efficiency:       {:.2} km/gal\n", efficiency));
    }
    out
}

fn render_row(record: &FuelRecord, currency: &str) -> String {
    let station = if record.gas_station_name.chars().count() > 20 {
        let truncated: String = record.gas_station_name.chars().take(17).collect();
        format!("{}...", truncated)
    } else {
        record.gas_station_name.clone()
    };

    let efficiency = record.efficiency();
    let efficiency = if efficiency > 0.0 {
        format!("{:.2}", efficiency)
    } else {
        "-".to_string()
    };

    format!(
        "{:<10}  {:<20}  {:<12}  {:>9}  {:>7.2}  {:>10}  {:>9.0}  {:>6.0}  {:>6}  {}",
        record.date.format("%Y-%m-%d"),
        station,
        record.service_type.to_string(),
        format!("{}{:.2}", currency, record.price_per_gallon),
        record.gallons,
        format!("{}{:.2}", currency, record.total_amount),
        record.odometer_reading,
        record.km_since_last_visit,
        efficiency,
        record.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(km: f64) -> FuelRecord {
        FuelRecord {
            id: "1735171200000".to_string(),
            date: Utc.with_ymd_and_hms(2025, 12, 26, 0, 0, 0).unwrap(),
            gas_station_name: "Estacion Puma Carretera a El Salvador".to_string(),
            service_type: ServiceType::SelfService,
            price_per_gallon: 32.5,
            gallons: 10.0,
            total_amount: 325.0,
            odometer_reading: 15_400.0,
            km_since_last_visit: km,
        }
    }

    #[test]
    fn test_parse_plain_date() {
        let parsed = parse_date("2025-12-26").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 12, 26, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_date() {
        let parsed = parse_date("2025-12-26T08:15:00-06:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 12, 26, 14, 15, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid_date() {
        let err = parse_date("26/12/2025").unwrap_err();
        assert!(err.contains("Invalid date format"));
    }

    #[test]
    fn test_render_record_shows_efficiency_only_when_positive() {
        assert!(render_record(&record(400.0), "Q").contains("Efficiency:       40.00 km/gal"));
        assert!(!render_record(&record(0.0), "Q").contains("Efficiency"));
        assert!(render_record(&record(0.0), "Q").contains("Total:            Q325.00"));
    }

    #[test]
    fn test_render_row_truncates_station() {
        let row = render_row(&record(400.0), "Q");
        assert!(row.contains("Estacion Puma Car..."));
        assert!(row.contains("Q32.50"));
        assert!(row.ends_with("1735171200000"));
    }
}
