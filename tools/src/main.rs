//! series-runner: headless generator for benefits-agency series.
//!
//! Usage:
//!   series-runner --territory "Guyane" --seed 12345
//!   series-runner --choice 4 --out reunion.csv
//!   series-runner --list
//!   series-runner --summarize benefits_guyane_2002_2025.csv --json

use anyhow::Result;
use benefits_core::{
    config::{resolve, select_by_choice, RunConfig, Territory},
    era::EraSchedule,
    export,
    field::Field,
    generator,
    series::YearlySeries,
    summary::SeriesSummary,
};
use std::env;
use std::path::{Path, PathBuf};

/// Machine-readable result of a generation run.
#[derive(serde::Serialize)]
struct RunReport<'a> {
    config:  &'a RunConfig,
    output:  PathBuf,
    summary: SeriesSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--list") {
        print_menu();
        return Ok(());
    }

    let json = args.iter().any(|a| a == "--json");

    if let Some(path) = string_arg(&args, "--summarize") {
        let territory = string_arg(&args, "--territory").unwrap_or("default");
        let profile = resolve(territory);
        let series = export::read_csv_file(Path::new(path))?;
        let summary = SeriesSummary::compute(&profile, &series);
        if json {
            println!("{}", summary.to_json()?);
        } else {
            print_summary(&summary);
        }
        return Ok(());
    }

    let config = build_config(&args);
    let profile = resolve(&config.territory);

    if !json {
        println!("Benefits agency series: series-runner");
        println!("  territory: {}", config.territory);
        println!("  profile:   {}", profile.display_name());
        println!("  years:     {}-{}", config.start_year, config.end_year);
        println!("  seed:      {}", config.seed);
        println!("  noise:     {}", config.noise);
        println!();
    }

    let series = generator::generate(
        &profile,
        config.start_year,
        config.end_year,
        &config.rng_bank(),
    )?;

    let output = config.output_path();
    export::write_csv_file(&series, &output)?;
    let summary = SeriesSummary::compute(&profile, &series);

    if json {
        let report = RunReport { config: &config, output, summary };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Data written to {}", output.display());
        println!();
        print_preview(&series);
        print_summary(&summary);
    }
    Ok(())
}

fn build_config(args: &[String]) -> RunConfig {
    let defaults = RunConfig::default();
    let territory = match (string_arg(args, "--territory"), string_arg(args, "--choice")) {
        (Some(name), _) => name.to_string(),
        (None, Some(choice)) => select_by_choice(choice).name().to_string(),
        (None, None) => defaults.territory.clone(),
    };

    RunConfig {
        territory,
        start_year: parse_arg(args, "--start-year", defaults.start_year),
        end_year:   parse_arg(args, "--end-year", defaults.end_year),
        seed:       parse_arg(args, "--seed", defaults.seed),
        noise:      !args.iter().any(|a| a == "--no-noise"),
        output:     string_arg(args, "--out").map(Into::into),
    }
}

fn print_menu() {
    println!("Available territories:");
    for (i, territory) in Territory::ALL.iter().enumerate() {
        println!("  {}. {territory}", i + 1);
    }
}

fn print_preview(series: &YearlySeries) {
    let columns = [
        Field::AllocataireCount,
        Field::TotalRevenue,
        Field::TotalExpenses,
        Field::AccountBalance,
    ];
    print!("  {:>6}", "year");
    for field in columns {
        print!(" {:>20}", field.column());
    }
    println!();
    for record in series.records().iter().take(5) {
        print!("  {:>6}", record.year);
        for field in columns {
            print!(" {:>20.2}", record.get(field));
        }
        println!();
    }
    println!();
}

fn print_summary(s: &SeriesSummary) {
    let or_na = |v: Option<f64>, unit: &str| {
        v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}{unit}"))
    };
    let period = match (s.start_year, s.end_year) {
        (Some(a), Some(b)) => format!("{a}-{b}"),
        _ => "empty".to_string(),
    };

    println!("=== SUMMARY: {} ({period}) ===", s.territory);
    println!();
    println!("General");
    println!("  avg revenue:       {} M", or_na(s.mean_of(Field::TotalRevenue), ""));
    println!("  avg expenses:      {} M", or_na(s.mean_of(Field::TotalExpenses), ""));
    println!("  avg balance:       {} M", or_na(s.mean_of(Field::AccountBalance), ""));
    println!(
        "  avg allocataires:  {}",
        s.mean_of(Field::AllocataireCount)
            .map_or_else(|| "n/a".to_string(), |v| format!("{v:.0}"))
    );
    println!();
    println!("Growth ({period})");
    println!("  revenue:           {}", or_na(s.revenue_growth_pct, "%"));
    println!("  allocataires:      {}", or_na(s.allocataire_growth_pct, "%"));
    println!();
    println!("Financial structure");
    println!("  social contrib.:   {} of revenue", or_na(s.social_contribution_share_pct, "%"));
    println!("  state contrib.:    {} of revenue", or_na(s.state_contribution_share_pct, "%"));
    println!("  benefits paid:     {} of expenses", or_na(s.benefits_share_pct, "%"));
    println!();
    println!("Performance");
    println!("  coverage rate:     {}", or_na(s.coverage_rate_pct, "%"));
    println!("  management ratio:  {}", or_na(s.management_ratio_pct, "%"));
    println!("  final balance:     {} M", or_na(s.final_balance, ""));
    println!();
    let tags: Vec<&str> = s.tags.iter().map(|t| t.as_str()).collect();
    println!("Profile tags: {}", tags.join(", "));
    println!();
    println!("Timeline");
    for era in EraSchedule::standard().eras() {
        println!("  • {}: {}", era.period, era.label);
    }
    println!();
    println!("Recommendations");
    for line in &s.recommendations {
        println!("  • {line}");
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy + std::fmt::Display>(
    args: &[String],
    flag: &str,
    default: T,
) -> T {
    let Some(raw) = string_arg(args, flag) else {
        return default;
    };
    raw.parse().unwrap_or_else(|_| {
        log::warn!("ignoring unparsable {flag} value {raw:?}; using {default}");
        default
    })
}
