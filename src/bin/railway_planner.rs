//! Command-line front end.
//!
//! Reads a track description, prices the cheapest track and writes one
//! result line to `railway_planner_output.txt`. Every failure, including a
//! wrong argument count, is reported through that same file.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use railway_planner::parse::load_description;
use railway_planner::report::{Report, OUTPUT_FILE};
use railway_planner::{CostTableEngine, SolverBuilder, Strategy};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "RailWayPlanner", version, about, long_about = None)]
struct Args {
    /// Track description file
    input: PathBuf,

    /// Where to write the result line
    #[arg(long, default_value = OUTPUT_FILE)]
    output: PathBuf,

    /// Solver to use; `auto` picks by target length and longest piece
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Log the pieces of one cheapest track (dense solver only)
    #[arg(long)]
    show_plan: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Auto,
    Dense,
    Rolling,
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            init_logging("warn");
            tracing::warn!("{}", err.kind());
            return finish(Report::Usage, Path::new(OUTPUT_FILE));
        }
    };
    init_logging(&args.log_level);
    let report = run(&args);
    finish(report, &args.output)
}

fn run(args: &Args) -> Report {
    if !args.input.is_file() {
        tracing::warn!(path = %args.input.display(), "input file not found");
        return Report::MissingFile;
    }
    let model = match load_description(&args.input) {
        Ok(model) => model,
        Err(err) => {
            tracing::warn!("{err}");
            return Report::from(&err);
        }
    };
    tracing::info!(
        target_length = model.target_length(),
        connectors = model.num_connections(),
        pieces = model.pieces().len(),
        "loaded description"
    );

    if args.show_plan {
        let engine = CostTableEngine::new(&model);
        let plan = engine.plan();
        if let Some(plan) = &plan {
            for (step, &idx) in plan.pieces.iter().enumerate() {
                let piece = &model.pieces()[idx];
                let symbol = |c| model.alphabet().symbol(c).unwrap_or('?');
                tracing::info!(
                    step,
                    line = idx + railway_planner::parse::FIRST_PIECE_LINE,
                    left = %symbol(piece.left),
                    right = %symbol(piece.right),
                    length = piece.length,
                    price = piece.price,
                    "plan"
                );
            }
        }
        return plan.map(|p| p.price).into();
    }

    let builder = SolverBuilder::new(&model);
    let solver = match args.strategy {
        StrategyArg::Auto => builder.build(),
        StrategyArg::Dense => builder.with_strategy(Strategy::Dense).build(),
        StrategyArg::Rolling => builder.with_strategy(Strategy::Rolling).build(),
    };
    solver.solve().into()
}

fn finish(report: Report, output: &Path) -> ExitCode {
    if let Err(err) = report.write_to(output) {
        tracing::error!(path = %output.display(), "failed to write result: {err}");
        return ExitCode::FAILURE;
    }
    tracing::info!(%report, "done");
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
