//! `u-powersim` command-line front end.
//!
//! Generates a seeded workload, runs one policy (or all four with
//! `--compare`), prints a report and optionally writes CSV files.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use u_powersim::config::SimulationConfig;
use u_powersim::report::{self, ComparisonTable, ConsoleReport};
use u_powersim::scheduler::SchedulerKind;
use u_powersim::simulation::{RunKpi, SimulationStats};
use u_powersim::validation::validate_workload;

/// Energy-aware scheduling simulator.
#[derive(Debug, Parser)]
#[command(name = "u-powersim", version, about)]
struct Cli {
    /// Scheduler type: RR (Round-Robin), Priority, FCFS, DVFS
    #[arg(long, value_parser = parse_kind)]
    scheduler: Option<SchedulerKind>,

    /// Number of tasks to simulate [default: 50]
    #[arg(long)]
    tasks: Option<usize>,

    /// Maximum simulation time in ticks [default: 10000]
    #[arg(long)]
    duration: Option<u64>,

    /// Output CSV file for results
    #[arg(long)]
    output: Option<PathBuf>,

    /// Compare all available schedulers
    #[arg(long)]
    compare: bool,

    /// Random seed for task generation [default: 42]
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum task duration [default: 50]
    #[arg(long)]
    min_duration: Option<u32>,

    /// Maximum task duration [default: 500]
    #[arg(long)]
    max_duration: Option<u32>,

    /// Round-Robin time quantum in ticks [default: 10]
    #[arg(long)]
    quantum: Option<u32>,

    /// Run the Priority scheduler without preemption
    #[arg(long)]
    non_preemptive: bool,

    /// Idle ticks tolerated after all work is done [default: 1000]
    #[arg(long)]
    max_idle: Option<u64>,

    /// Load settings from a JSON file (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

fn parse_kind(s: &str) -> Result<SchedulerKind, String> {
    s.parse().map_err(|e: u_powersim::error::ConfigError| e.to_string())
}

impl Cli {
    /// Resolves the final configuration: defaults, then file, then flags.
    fn into_config(self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(kind) = self.scheduler {
            config.scheduler = kind;
        }
        if let Some(n) = self.tasks {
            config.num_tasks = n;
        }
        if let Some(d) = self.duration {
            config.simulation_duration = d;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(min) = self.min_duration {
            config.min_task_duration = min;
        }
        if let Some(max) = self.max_duration {
            config.max_task_duration = max;
        }
        if let Some(q) = self.quantum {
            config.quantum = q;
        }
        if let Some(idle) = self.max_idle {
            config.max_idle_ticks = idle;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        config.compare |= self.compare;
        config.json |= self.json;
        config.verbose |= self.verbose;
        if self.non_preemptive {
            config.preemptive = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(default)
        .parse_default_env()
        .init();
}

fn run(config: &SimulationConfig) -> Result<Vec<SimulationStats>> {
    let tasks = config.generate_tasks();
    if let Err(errors) = validate_workload(&tasks) {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        bail!("invalid workload: {}", messages.join("; "));
    }
    info!("generated {} tasks (seed {})", tasks.len(), config.seed);

    Ok(config
        .policies()
        .into_iter()
        .map(|kind| config.engine(kind).run(&tasks, config.simulation_duration))
        .collect())
}

fn write_outputs(config: &SimulationConfig, results: &[SimulationStats]) -> Result<()> {
    let Some(output) = &config.output else {
        return Ok(());
    };

    report::write_summary_csv(output, results)?;
    println!("Results saved to: {}", output.display());

    if let [stats] = results {
        let task_path = report::task_csv_path(output);
        report::write_task_csv(&task_path, stats)?;
        println!("Task details saved to: {}", task_path.display());
    }
    Ok(())
}

fn print_results(config: &SimulationConfig, results: &[SimulationStats]) -> Result<()> {
    if config.json {
        let json = serde_json::to_string_pretty(results).context("serializing statistics")?;
        println!("{json}");
        return Ok(());
    }

    if config.compare {
        if config.verbose {
            for stats in results {
                print!("{}", ConsoleReport(stats));
            }
        }
        print!("{}", ComparisonTable(results));

        let kpis: Vec<RunKpi> = results.iter().map(RunKpi::calculate).collect();
        if let Some(best) = RunKpi::most_efficient(&kpis) {
            println!(
                "Lowest energy per completed task: {} ({})",
                kpis[best].scheduler_name,
                report::format_energy(kpis[best].energy_per_task_joules)
            );
        }
    } else {
        for stats in results {
            print!("{}", ConsoleReport(stats));
        }
    }
    Ok(())
}

fn main() {
    let result = Cli::parse().into_config().and_then(|config| {
        init_logging(config.verbose);
        if !config.json {
            println!("PowerProfile: Energy-Aware Scheduling Simulator\n");
        }
        let results = run(&config)?;
        print_results(&config, &results)?;
        write_outputs(&config, &results)
    });

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
