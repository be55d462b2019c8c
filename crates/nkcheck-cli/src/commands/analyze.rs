//! Analyze command - full pipeline from OCR text to a comparison report.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, info};

use nkcheck_core::models::bill::DraftCosts;
use nkcheck_core::{
    AnalysisResult, AnalyzerConfig, Band, BillAnalyzer, BillDraft, BillParser, BillRecord,
    BillingPeriod, DataQuality, HttpEnergyLookup, HttpResolver, StaticEnergyLookup,
    StaticResolver,
};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input file with OCR text of the bill
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Use only the bundled baseline table, no network lookups
    #[arg(long)]
    offline: bool,

    /// Skip the energy price lookup
    #[arg(long)]
    no_energy: bool,

    /// Postal code, overriding the extracted value
    #[arg(long)]
    plz: Option<String>,

    /// Floor area in m², overriding the extracted value
    #[arg(long)]
    area: Option<Decimal>,

    /// Billing period as DD.MM.YYYY-DD.MM.YYYY, overriding the extracted value
    #[arg(long)]
    period: Option<String>,

    /// Heating costs in €, overriding the extracted value
    #[arg(long)]
    heating: Option<Decimal>,

    /// Water costs in €, overriding the extracted value
    #[arg(long)]
    water: Option<Decimal>,

    /// Waste collection costs in €, overriding the extracted value
    #[arg(long)]
    waste: Option<Decimal>,

    /// Maintenance costs in €, overriding the extracted value
    #[arg(long)]
    maintenance: Option<Decimal>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text report
    Text,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        AnalyzerConfig::from_file(std::path::Path::new(path))?
    } else {
        AnalyzerConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let text = fs::read_to_string(&args.input)?;

    info!("Analyzing bill from {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );

    pb.set_message("Extracting bill fields...");
    let draft = BillParser::new().parse(&text);
    let draft = draft.merge(corrections(&args)?);

    let missing = draft.missing_fields();
    if !missing.is_empty() {
        pb.finish_and_clear();
        anyhow::bail!(
            "Could not extract required fields: {}.\n\
             Supply them manually, e.g. --plz 10115 --area 75 \
             --period 01.01.2024-31.12.2024 --heating 1350",
            missing.join(", ")
        );
    }

    let record = draft.into_record(None)?;
    debug!(plz = %record.postal_code, "bill validated");

    pb.set_message("Comparing against regional baselines...");
    let result = if args.offline {
        let analyzer: BillAnalyzer<_, StaticEnergyLookup> =
            BillAnalyzer::new(StaticResolver::new(), &config);
        analyzer.analyze(&record).await?
    } else {
        let resolver = HttpResolver::new(&config)?;
        let mut analyzer: BillAnalyzer<_, HttpEnergyLookup> =
            BillAnalyzer::new(resolver, &config);
        if !args.no_energy {
            analyzer = analyzer.with_energy(HttpEnergyLookup::new(&config)?);
        }
        analyzer.analyze(&record).await?
    };

    pb.finish_and_clear();

    let output = format_result(&record, &result, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total analysis time: {:?}", start.elapsed());

    Ok(())
}

/// Build a correction draft from the override flags.
fn corrections(args: &AnalyzeArgs) -> anyhow::Result<BillDraft> {
    let period = args.period.as_deref().map(parse_period).transpose()?;

    Ok(BillDraft {
        postal_code: args.plz.clone(),
        floor_area_sqm: args.area,
        period,
        costs: DraftCosts {
            heating: args.heating,
            water: args.water,
            waste: args.waste,
            maintenance: args.maintenance,
            electricity: None,
        },
        total_amount: None,
    })
}

fn parse_period(s: &str) -> anyhow::Result<BillingPeriod> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| anyhow::anyhow!("Period must be DD.MM.YYYY-DD.MM.YYYY, got {s:?}"))?;

    let start = NaiveDate::parse_from_str(start.trim(), "%d.%m.%Y")?;
    let end = NaiveDate::parse_from_str(end.trim(), "%d.%m.%Y")?;

    Ok(BillingPeriod::new(start, end)?)
}

fn format_result(
    record: &BillRecord,
    result: &AnalysisResult,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => format_text(record, result),
    }
}

fn format_csv(result: &AnalysisResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["category", "user", "baseline", "deviation_pct", "band"])?;

    let rows = [
        ("heating", &result.comparisons.heating),
        ("water", &result.comparisons.water),
        ("waste", &result.comparisons.waste),
        ("maintenance", &result.comparisons.maintenance),
        ("total", &result.comparisons.total),
    ];
    for (category, comparison) in rows {
        wtr.write_record([
            category,
            &comparison.user_amount.to_string(),
            &comparison.baseline_amount.to_string(),
            &comparison.deviation_pct.to_string(),
            &band_label(comparison.band).to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &BillRecord, result: &AnalysisResult) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str(&format!(
        "Utility cost analysis for {} {} ({})\n",
        result.profile.postal_code, result.profile.city, result.profile.state
    ));
    output.push_str(&format!(
        "Baseline: {} [{}]\n",
        result.profile.data_source,
        quality_label(result.profile.data_quality)
    ));
    output.push_str(&format!(
        "Period: {} months, {} m², confidence {}%\n\n",
        result.normalized.months_in_period, record.floor_area_sqm, result.confidence
    ));

    output.push_str("Costs in €/m²/month        yours  baseline\n");
    let rows = [
        ("Heating", &result.comparisons.heating),
        ("Water", &result.comparisons.water),
        ("Waste collection", &result.comparisons.waste),
        ("Maintenance", &result.comparisons.maintenance),
        ("Total", &result.comparisons.total),
    ];
    for (label, comparison) in rows {
        let line = format!(
            "  {:<22} {:>8} {:>8}   {}",
            label, comparison.user_amount, comparison.baseline_amount, comparison.message
        );
        output.push_str(&format!("{}\n", colorize(comparison.band, &line)));
    }

    if result.savings.potential_annual > Decimal::ZERO {
        output.push_str(&format!(
            "\n{} Savings potential: {} €/year\n",
            style("!").yellow(),
            result.savings.potential_annual
        ));
        for recommendation in &result.savings.recommendations {
            output.push_str(&format!("  - {recommendation}\n"));
        }
    } else {
        output.push_str(&format!(
            "\n{} No significant savings potential found.\n",
            style("✓").green()
        ));
    }

    if let Some(energy) = &result.energy {
        output.push_str(&format!(
            "\nElectricity price: {} €/kWh ({})\n",
            energy.electricity_price_eur_kwh, energy.source
        ));
    }

    Ok(output)
}

fn band_label(band: Band) -> &'static str {
    match band {
        Band::Low => "low",
        Band::Average => "average",
        Band::High => "high",
        Band::VeryHigh => "very_high",
    }
}

fn quality_label(quality: DataQuality) -> &'static str {
    match quality {
        DataQuality::OfficialLocal => "official local data",
        DataQuality::StateAverage => "state average",
        DataQuality::Estimated => "estimated",
    }
}

fn colorize(band: Band, line: &str) -> String {
    match band {
        Band::Low => style(line).green().to_string(),
        Band::Average => line.to_string(),
        Band::High => style(line).yellow().to_string(),
        Band::VeryHigh => style(line).red().to_string(),
    }
}
