//! Regions command - list the bundled regional baselines.

use clap::Args;
use console::style;

use nkcheck_core::region::all_cities;

/// Arguments for the regions command.
#[derive(Args)]
pub struct RegionsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text table
    Text,
}

pub async fn run(args: RegionsArgs) -> anyhow::Result<()> {
    let cities = all_cities();

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cities)?);
        }
        OutputFormat::Text => {
            println!(
                "{}",
                style("Bundled regional baselines (€/m²/month)").bold()
            );
            println!(
                "{:<7} {:<20} {:<24} {:>8} {:>7} {:>7} {:>7}",
                "PLZ", "City", "State", "Heating", "Water", "Waste", "Maint."
            );
            for city in &cities {
                println!(
                    "{:<7} {:<20} {:<24} {:>8} {:>7} {:>7} {:>7}",
                    city.postal_code,
                    city.city,
                    city.state,
                    city.baseline_costs.heating,
                    city.baseline_costs.water,
                    city.baseline_costs.waste,
                    city.baseline_costs.maintenance,
                );
            }
            println!(
                "\nOther postal codes resolve through the place API to state averages."
            );
        }
    }

    Ok(())
}
