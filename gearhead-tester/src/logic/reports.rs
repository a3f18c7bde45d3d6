use anyhow::Result;
use colored::Colorize;
use gearhead_game::StatKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use super::policy::GameplayStrategy;
use super::simulation::RunRecord;

/// Mean of each vehicle stat across runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatMeans {
    pub speed: f64,
    pub acceleration: f64,
    pub handling: f64,
    pub durability: f64,
    pub fuel_efficiency: f64,
}

impl StatMeans {
    #[must_use]
    pub const fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Speed => self.speed,
            StatKind::Acceleration => self.acceleration,
            StatKind::Handling => self.handling,
            StatKind::Durability => self.durability,
            StatKind::FuelEfficiency => self.fuel_efficiency,
        }
    }

    fn describe(&self) -> String {
        StatKind::ALL
            .iter()
            .map(|kind| format!("{}={:.1}", kind.label(), self.get(*kind)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Per-strategy roll-up of autoplay runs.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAggregate {
    pub strategy: GameplayStrategy,
    pub runs: usize,
    pub survival_rate: f64,
    pub mean_turns: f64,
    pub mean_wins: f64,
    pub mean_parts_earned: f64,
    pub mean_installed: f64,
    pub final_stats: StatMeans,
}

/// Full report written by the JSON formatter.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: String,
    pub seeds: Vec<u64>,
    pub iterations: u64,
    pub max_turns: u32,
    pub strategies: Vec<StrategyAggregate>,
}

impl SimulationReport {
    #[must_use]
    pub fn new(seeds: Vec<u64>, iterations: u64, max_turns: u32, records: &[RunRecord]) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            seeds,
            iterations,
            max_turns,
            strategies: aggregate(records),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Group records by strategy and average them.
#[must_use]
pub fn aggregate(records: &[RunRecord]) -> Vec<StrategyAggregate> {
    let mut grouped: BTreeMap<GameplayStrategy, Vec<&RunRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.strategy).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(strategy, runs)| {
            let n = runs.len();
            let stat = |kind: StatKind| {
                mean(total(&runs, |r| f64::from(r.summary.stats.get(kind))), n)
            };
            #[allow(clippy::cast_precision_loss)]
            let installed = total(&runs, |r| r.summary.installed.len() as f64);
            StrategyAggregate {
                strategy,
                runs: n,
                survival_rate: mean(total(&runs, |r| if r.survived { 1.0 } else { 0.0 }), n),
                mean_turns: mean(total(&runs, |r| f64::from(r.summary.turns)), n),
                mean_wins: mean(total(&runs, |r| f64::from(r.summary.wins)), n),
                mean_parts_earned: mean(total(&runs, |r| f64::from(r.parts_earned)), n),
                mean_installed: mean(installed, n),
                final_stats: StatMeans {
                    speed: stat(StatKind::Speed),
                    acceleration: stat(StatKind::Acceleration),
                    handling: stat(StatKind::Handling),
                    durability: stat(StatKind::Durability),
                    fuel_efficiency: stat(StatKind::FuelEfficiency),
                },
            }
        })
        .collect()
}

fn total(runs: &[&RunRecord], f: impl Fn(&RunRecord) -> f64) -> f64 {
    runs.iter().copied().map(f).sum()
}

pub fn generate_console_report<W: Write>(
    out: &mut W,
    report: &SimulationReport,
    records: &[RunRecord],
    total_duration: Duration,
    verbose: bool,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Autoplay Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;
    writeln!(out, "Seeds: {}", report.seeds.len())?;
    writeln!(out, "Iterations per seed: {}", report.iterations)?;
    writeln!(out, "Turn limit: {}", report.max_turns)?;
    writeln!(out, "Total runs: {}", records.len())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for agg in &report.strategies {
        let survival = agg.survival_rate * 100.0;
        let survival_label = format!("{survival:.1}%");
        let survival_label = if survival >= 50.0 {
            survival_label.green()
        } else {
            survival_label.red()
        };
        writeln!(out, "{}", agg.strategy.label().bold())?;
        writeln!(out, "   Runs: {}", agg.runs)?;
        writeln!(out, "   Survival rate: {survival_label}")?;
        writeln!(out, "   Mean turns survived: {:.1}", agg.mean_turns)?;
        writeln!(out, "   Mean wins: {:.1}", agg.mean_wins)?;
        writeln!(out, "   Mean parts earned: {:.1}", agg.mean_parts_earned)?;
        writeln!(out, "   Mean parts installed: {:.1}", agg.mean_installed)?;
        writeln!(out, "   Final stats: {}", agg.final_stats.describe())?;
        writeln!(out)?;
    }

    if verbose {
        writeln!(out, "{}", "🔍 Individual Runs".bright_yellow().bold())?;
        writeln!(out, "{}", "==================".yellow())?;
        for record in records {
            let status = if record.survived {
                "✅ SURVIVED".green()
            } else {
                "💥 DESTROYED".red()
            };
            writeln!(
                out,
                "{status} {} seed {} #{}: {} turns, {} wins, {} installed",
                record.strategy,
                record.summary.seed,
                record.iteration,
                record.summary.turns,
                record.summary.wins,
                record.summary.installed.len()
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report<W: Write>(out: &mut W, report: &SimulationReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(out: &mut W, report: &SimulationReport) -> Result<()> {
    writeln!(out, "# Gearhead Autoplay Results\n")?;
    writeln!(out, "_Generated {}_\n", report.generated_at)?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Seeds**: {}", report.seeds.len())?;
    writeln!(out, "- **Iterations per seed**: {}", report.iterations)?;
    writeln!(out, "- **Turn limit**: {}\n", report.max_turns)?;

    writeln!(out, "## Strategies\n")?;
    writeln!(
        out,
        "| Strategy | Runs | Survival | Turns | Wins | Earned | Installed | Speed | Accel | Handling | Durability | Fuel |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|---|---|---|---|")?;
    for agg in &report.strategies {
        let s = &agg.final_stats;
        writeln!(
            out,
            "| {} | {} | {:.1}% | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} |",
            agg.strategy,
            agg.runs,
            agg.survival_rate * 100.0,
            agg.mean_turns,
            agg.mean_wins,
            agg.mean_parts_earned,
            agg.mean_installed,
            s.speed,
            s.acceleration,
            s.handling,
            s.durability,
            s.fuel_efficiency
        )?;
    }
    Ok(())
}
