use clap::Args;
use fuel_track_core::{MetricField, SeriesPoint};

use super::{OutputFormat, RecordRepository};

const BAR_WIDTH: usize = 40;

#[derive(Args)]
pub struct ChartCommand {
    /// Metric to plot (efficiency, price, spent, gallons, distance)
    pub metric: MetricField,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ChartCommand {
    pub async fn run(&self, repo: &RecordRepository) -> Result<(), Box<dyn std::error::Error>> {
        let records = repo.on_enter().await?;
        let points = self.metric.series(&records);

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&points)?);
            }
            OutputFormat::Text => {
                if points.is_empty() {
                    println!("No data to chart for {}", self.metric);
                    return Ok(());
                }
                println!("{} ({})", self.metric, self.metric.unit());
                println!();
                print!("{}", render_bars(&points));
            }
        }
        Ok(())
    }
}

/// Horizontal bars scaled to the largest value.
fn render_bars(points: &[SeriesPoint]) -> String {
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let label_width = points.iter().map(|p| p.label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for point in points {
        let width = if max > 0.0 {
            ((point.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<lw$}  {:>10.2}  {}\n",
            point.label,
            point.value,
            "#".repeat(width),
            lw = label_width
        ));
    }
    out
}
