//! Pension simulator CLI
//!
//! Runs simulation `CODE` from `config_CODE.txt` and `populacao_inicial_CODE.txt`
//! and writes `populacao_final_CODE.txt`.

use anyhow::{Context, Result};
use clap::Parser;
use pension_sim::scenario::{write_summary_json, SimulationFiles};
use pension_sim::SimulationRunner;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pension_sim")]
#[command(about = "Simulate a population and its pay-as-you-go pension fund year by year")]
struct Args {
    /// Simulation code naming the input and output files
    code: String,

    /// Directory holding the simulation files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Write the final population here instead of populacao_final_CODE.txt
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a per-year table after the run
    #[arg(long)]
    summary: bool,

    /// Write the run summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut files = SimulationFiles::for_code(&args.dir, &args.code);
    if let Some(output) = args.output {
        files.final_population = output;
    }

    let runner = SimulationRunner::new();
    let stdout = std::io::stdout();
    let result = runner
        .run_files(&files, &mut stdout.lock())
        .with_context(|| format!("simulation {} failed", args.code))?;

    if args.summary {
        println!();
        println!("{:>6} {:>10} {:>7} {:>7} {:>7} {:>14} {:>14} {:>16}",
            "Year", "Population", "Births", "Deaths", "Dropped", "Contributions", "Payouts", "Fund");
        println!("{}", "-".repeat(88));
        for record in &result.records {
            println!("{:>6} {:>10} {:>7} {:>7} {:>7} {:>14.1} {:>14.1} {:>16.1}",
                record.year,
                record.population,
                record.births,
                record.deaths,
                record.dropped,
                record.contributions,
                record.payouts,
                record.fund,
            );
        }

        let summary = result.summary();
        println!("\nSummary:");
        println!("  Years simulated: {}", summary.periods_run);
        println!("  Minimum fund: {:.1}", summary.min_fund);
        match summary.first_deficit_year {
            Some(year) => println!("  First deficit year: {} ({} deficit years)", year, summary.deficit_years),
            None => println!("  Fund never went negative"),
        }
    }

    if let Some(path) = args.json {
        write_summary_json(&path, &result.summary())
            .with_context(|| format!("writing summary to {}", path.display()))?;
        println!("Summary written to: {}", path.display());
    }

    Ok(())
}
