//! Extract command - recover bill fields from OCR text without analyzing.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use nkcheck_core::{BillDraft, BillParser};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file with OCR text of the bill
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let text = fs::read_to_string(&args.input)?;

    let draft = BillParser::new().parse(&text);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&draft)?,
        OutputFormat::Text => format_text(&draft),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let missing = draft.missing_fields();
    if !missing.is_empty() {
        eprintln!(
            "{} Missing fields: {}",
            style("!").yellow(),
            missing.join(", ")
        );
    }

    Ok(())
}

fn format_text(draft: &BillDraft) -> String {
    let mut output = String::new();

    let field = |value: Option<String>| value.unwrap_or_else(|| "not found".to_string());

    output.push_str(&format!(
        "Postal code: {}\n",
        field(draft.postal_code.clone())
    ));
    output.push_str(&format!(
        "Floor area:  {}\n",
        field(draft.floor_area_sqm.map(|a| format!("{a} m²")))
    ));
    output.push_str(&format!(
        "Period:      {}\n",
        field(draft.period.map(|p| format!("{} - {}", p.start, p.end)))
    ));
    output.push('\n');

    let cost = |value: Option<rust_decimal::Decimal>| field(value.map(|v| format!("{v} €")));
    output.push_str(&format!("Heating:     {}\n", cost(draft.costs.heating)));
    output.push_str(&format!("Water:       {}\n", cost(draft.costs.water)));
    output.push_str(&format!("Waste:       {}\n", cost(draft.costs.waste)));
    output.push_str(&format!("Maintenance: {}\n", cost(draft.costs.maintenance)));
    output.push_str(&format!("Electricity: {}\n", cost(draft.costs.electricity)));
    output.push_str(&format!("Total:       {}\n", cost(draft.total_amount)));

    output
}
