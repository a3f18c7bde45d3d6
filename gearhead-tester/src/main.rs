mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use gearhead_game::GameConfig;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use logic::{GameplayStrategy, RunRecord, SimulationReport, resolve_seed_inputs, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Best odds first
    Cautious,
    /// Hardest event every turn
    Aggressive,
    /// Odds weighed against remaining durability
    Balanced,
    /// Uniformly random choices
    Random,
    /// Every strategy above
    All,
}

impl StrategyArg {
    fn strategies(self) -> Vec<GameplayStrategy> {
        match self {
            Self::Cautious => vec![GameplayStrategy::Cautious],
            Self::Aggressive => vec![GameplayStrategy::Aggressive],
            Self::Balanced => vec![GameplayStrategy::Balanced],
            Self::Random => vec![GameplayStrategy::Random],
            Self::All => GameplayStrategy::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "gearhead-tester", version = "0.1.0")]
#[command(about = "Automated playtesting for the Gearhead car-tuning simulation")]
struct Args {
    /// Seeds to run (comma-separated; ranges like 1..10 or 1..=10)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of autoplay games per seed and strategy
    #[arg(long, default_value_t = 10)]
    iterations: u64,

    /// Strategy to play with
    #[arg(long, value_enum, default_value_t = StrategyArg::All)]
    strategy: StrategyArg,

    /// Turn limit per game
    #[arg(long, default_value_t = 100)]
    max_turns: u32,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List all available strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_strategies(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let game_config = GameConfig::default();
    let records = run_all(&args, &game_config, &seeds)?;

    let report = SimulationReport::new(seeds, args.iterations, args.max_turns, &records);
    write_report(&args, &report, &records, start_time.elapsed())?;
    Ok(())
}

fn maybe_list_strategies(args: &Args) -> Result<bool> {
    if !args.list_strategies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available strategies:")?;
    for strategy in GameplayStrategy::ALL {
        writeln!(
            output_target.writer(),
            "  {:12} - {}",
            strategy.label().to_lowercase(),
            strategy.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🏎️  Gearhead Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn run_all(args: &Args, game_config: &GameConfig, seeds: &[u64]) -> Result<Vec<RunRecord>> {
    let mut records = Vec::new();
    for strategy in args.strategy.strategies() {
        if args.verbose {
            println!(
                "{} {} ({} seeds x {} iterations)",
                "▶".green(),
                strategy.label().bold(),
                seeds.len(),
                args.iterations
            );
        }
        let runs = logic::run_strategy(
            game_config,
            strategy,
            seeds,
            args.iterations,
            args.max_turns,
        )
        .with_context(|| format!("{strategy} strategy failed"))?;
        log::info!("{strategy}: {} runs complete", runs.len());
        records.extend(runs);
    }
    Ok(records)
}

fn write_report(
    args: &Args,
    report: &SimulationReport,
    records: &[RunRecord],
    elapsed: Duration,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Console => logic::reports::generate_console_report(
            &mut output_target,
            report,
            records,
            elapsed,
            args.verbose,
        )?,
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, report)?,
        ReportFormat::Markdown => {
            logic::reports::generate_markdown_report(&mut output_target, report)?;
        }
    }
    output_target.flush_inner()?;
    if let Some(path) = &args.output {
        println!("📝 Report written to {}", path.display());
    }
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
