use clap::Args;
use fuel_track_core::{summary_statistics, SummaryStatistics};

use super::{OutputFormat, RecordRepository};
use crate::config::Config;

#[derive(Args)]
pub struct StatsCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl StatsCommand {
    pub async fn run(
        &self,
        repo: &RecordRepository,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let records = repo.on_enter().await?;
        let stats = summary_statistics(&records);

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            OutputFormat::Text => {
                print!("{}", render_summary(&stats, &config.currency.value));
            }
        }
        Ok(())
    }
}

fn render_summary(stats: &SummaryStatistics, currency: &str) -> String {
    if stats.record_count == 0 {
        return "No records yet. Add one with `fuel record add`.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("Fuel Summary\n");
    out.push_str("============\n\n");
    out.push_str(&format!("Records:            {}\n", stats.record_count));
    out.push_str(&format!(
        "Total spent:        {}{:.2}\n",
        currency, stats.total_spent
    ));
    out.push_str(&format!("Total gallons:      {:.2}\n", stats.total_gallons));
    out.push_str(&format!("Total distance:     {:.0} km\n", stats.total_distance));
    if stats.average_efficiency > 0.0 {
        out.push_str(&format!(
            "Average efficiency: {:.2} km/gal\n",
            stats.average_efficiency
        ));
    } else {
        out.push_str("Average efficiency: -\n");
    }
    out.push_str(&format!(
        "Average price:      {}{:.2}/gal\n",
        currency, stats.average_price_per_gallon
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_summary() {
        let out = render_summary(&SummaryStatistics::default(), "Q");
        assert!(out.starts_with("No records yet"));
    }

    #[test]
    fn test_render_summary_with_currency() {
        let stats = SummaryStatistics {
            total_spent: 650.0,
            total_gallons: 20.0,
            total_distance: 400.0,
            average_efficiency: 40.0,
            average_price_per_gallon: 32.5,
            record_count: 2,
        };
        let out = render_summary(&stats, "Q");
        assert!(out.contains("Records:            2"));
        assert!(out.contains("Total spent:        Q650.00"));
        assert!(out.contains("Average efficiency: 40.00 km/gal"));
        assert!(out.contains("Average price:      Q32.50/gal"));
    }

    #[test]
    fn test_render_summary_without_efficiency() {
        let stats = SummaryStatistics {
            total_spent: 325.0,
            total_gallons: 10.0,
            average_price_per_gallon: 32.5,
            record_count: 1,
            ..Default::default()
        };
        assert!(render_summary(&stats, "$").contains("Average efficiency: -"));
    }
}
