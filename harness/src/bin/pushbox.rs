use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use pushbox_harness::report_dir::{read_report_dir, write_report_dir};
use pushbox_harness::runner::{replay_verify, run_level};
use pushbox_harness::worlds::catalog;
use pushbox_kernel::carrier::direction::Direction;
use pushbox_kernel::carrier::level::{parse_level, render_level};
use pushbox_search::policy::DeepeningPolicy;

#[derive(Parser)]
#[command(name = "pushbox")]
#[command(about = "Iterative-deepening push-puzzle solver")]
struct Cmd {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a level and print the solution
    Solve {
        #[command(flatten)]
        source: LevelSource,
        /// Stop deepening once a bound reaches this depth
        #[arg(long, default_value_t = DeepeningPolicy::default().depth_limit)]
        depth_limit: u32,
        /// Increment between depth bounds
        #[arg(long, default_value_t = DeepeningPolicy::default().step)]
        step: u32,
        /// Cap on node visits across all iterations
        #[arg(long)]
        max_visits: Option<u64>,
        /// Print the full run report as JSON
        #[arg(long)]
        json: bool,
        /// Write run_report.json and report_digest.txt into this directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the built-in levels
    Levels,
    /// Re-verify a report directory written by `solve --out`
    Replay {
        #[arg(long)]
        dir: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct LevelSource {
    /// Built-in level name (see `pushbox levels`)
    #[arg(long)]
    level: Option<String>,
    /// XSB level file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl LevelSource {
    fn load(&self) -> Result<String> {
        match (&self.level, &self.file) {
            (Some(name), _) => catalog::find(name)
                .map(|l| l.text.to_string())
                .with_context(|| format!("unknown level {name:?}")),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display())),
            (None, None) => bail!("one of --level or --file is required"),
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cmd.action {
        Action::Solve {
            source,
            depth_limit,
            step,
            max_visits,
            json,
            out,
        } => {
            let mut policy = DeepeningPolicy::new(depth_limit, step);
            policy.max_visits = max_visits;
            solve(&source.load()?, &policy, json, out.as_deref())
        }
        Action::Levels => {
            levels();
            Ok(())
        }
        Action::Replay { dir } => replay(&dir),
    }
}

fn solve(text: &str, policy: &DeepeningPolicy, json: bool, out: Option<&Path>) -> Result<()> {
    let outcome = run_level(text, policy)?;
    if let Some(dir) = out {
        write_report_dir(&outcome, dir)?;
        tracing::info!(dir = %dir.display(), digest = %outcome.report_digest, "report written");
    }

    if json {
        println!("{}", String::from_utf8(outcome.report_bytes)?);
        return Ok(());
    }

    print!("{}", render_level(&outcome.start));
    match (&outcome.solve.solution, &outcome.lurd) {
        (Some(chain), Some(lurd)) => {
            println!("solved in {} moves: {lurd}", chain.len());
        }
        _ => println!(
            "no solution found ({})",
            outcome.solve.termination_reason.kind()
        ),
    }
    println!(
        "visits: {} over {} iterations",
        outcome.solve.total_visits(),
        outcome.solve.iterations.len()
    );
    Ok(())
}

fn levels() {
    for level in catalog::LEVELS {
        let note = if level.solvable { "" } else { " (unsolvable)" };
        println!("{}{note}", level.name);
        print!("{}", level.text);
        println!();
    }
}

fn replay(dir: &Path) -> Result<()> {
    let loaded = read_report_dir(dir)?;
    let text = loaded.value["level"]["text"]
        .as_str()
        .context("report has no level text")?;
    let start = parse_level(text)?;

    let Some(lurd) = loaded.value["lurd"].as_str() else {
        println!("{}: no solution recorded, digest ok", loaded.digest);
        return Ok(());
    };
    let chain = Direction::parse_lurd(lurd)
        .map_err(|at| anyhow::anyhow!("bad LURD character at offset {at}"))?;
    replay_verify(&start, &chain)?;
    println!("{}: {} moves verified", loaded.digest, chain.len());
    Ok(())
}
