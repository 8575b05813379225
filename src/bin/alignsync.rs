//! AlignSync - Alignment Evaluation and Sonification

use std::process;

use anyhow::Context;
use clap::Parser;

use alignsync::annot::{orchestra_start_end, parse_info_file, verify_scenario_dir};
use alignsync::config::Command;
use alignsync::error::AlignSyncError;
use alignsync::eval::evaluate_batch;
use alignsync::sonify::sonify_batch;
use alignsync::{init_logging, Args, Config};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_args_and_config(&args)?;

    match &args.command {
        Command::Eval => run_eval(&config),
        Command::Sonify => run_sonify(&config),
        Command::Info { scenario_dir } => run_info(&config, scenario_dir),
    }
}

fn run_eval(config: &Config) -> anyhow::Result<()> {
    println!("=== Alignment Evaluation ===");
    println!("Scenarios: {}", config.dirs.scenarios.display());
    println!("Experiment: {}", config.dirs.experiment.display());
    println!("Output: {}", config.dirs.output.display());
    println!("============================\n");

    let report = evaluate_batch(config).context("batch evaluation failed")?;

    for id in &report.passed {
        println!("  {}  ok", id);
    }
    for (id, message) in &report.failed {
        println!("  {}  FAILED: {}", id, message);
    }
    println!(
        "\n{} passed, {} failed",
        report.passed.len(),
        report.failed.len()
    );
    Ok(())
}

fn run_sonify(config: &Config) -> anyhow::Result<()> {
    println!("=== Sonification ===");
    println!("Scenarios: {}", config.dirs.scenarios.display());
    println!("Experiment: {}", config.dirs.experiment.display());
    println!("Output: {}", config.dirs.output.display());
    println!("Workers: {}", config.workers());
    println!("Downsample: {}", config.downsample());
    println!("====================\n");

    let report = sonify_batch(config).context("batch sonification failed")?;

    for id in &report.rendered {
        println!("  {}  rendered", id);
    }
    for id in &report.skipped {
        println!("  {}  skipped (exists)", id);
    }
    for (id, message) in &report.failed {
        println!("  {}  FAILED: {}", id, message);
    }
    println!(
        "\n{} rendered, {} skipped, {} failed",
        report.rendered.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(())
}

fn run_info(config: &Config, scenario_dir: &std::path::Path) -> anyhow::Result<()> {
    verify_scenario_dir(scenario_dir)
        .with_context(|| format!("invalid scenario directory {}", scenario_dir.display()))?;
    let info = parse_info_file(scenario_dir.join("scenario.info"))?;

    println!("=== Scenario {} ===", info.id);
    println!("Movement: {}", info.movement_id());
    println!("Piano: {}", info.piano.display());
    println!("Orchestra: {}", info.orchestra.display());
    println!("Mixed: {}", info.mixed.display());
    println!("Measures: {} - {}", info.measure_start, info.measure_end);
    println!(
        "Piano query: {:.2}s - {:.2}s",
        info.piano_query.0, info.piano_query.1
    );
    println!(
        "Orchestra query: {:.2}s - {:.2}s",
        info.orchestra_query.0, info.orchestra_query.1
    );

    match orchestra_start_end(&info, &config.reference.audio_summary) {
        Ok((start, end)) => println!("Orchestra global timestamps: {:.2}s - {:.2}s", start, end),
        Err(AlignSyncError::MissingGlobalTimestamps(id)) => {
            println!("Orchestra global timestamps: not declared for {}", id)
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
