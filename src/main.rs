use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fpuzzles_lines::game::{
    export_puzzle, import_puzzle, BruteForceSolver, ClassicSudoku, EvaluationContext,
    PuzzleDocument, Settings,
};
use fpuzzles_lines::model::{CellId, EvaluationMode};
use fpuzzles_lines::{PuzzleError, Result};
use itertools::Itertools;
use log::{error, info};

#[derive(Parser)]
#[command(author, version, about = "Candidate checker for renban, whispers and lockout lines", long_about = None)]
struct Args {
    /// Puzzle document (decompressed JSON)
    puzzle: PathBuf,

    /// Only report this cell, e.g. R1C1
    #[arg(short = 'c', long = "cell")]
    cell: Option<String>,

    /// Test filled cells like empty ones
    #[arg(short = 'b', long = "brute-force")]
    brute_force: bool,

    /// Count solutions and print the first one
    #[arg(short = 's', long = "solve")]
    solve: bool,

    /// Print the document re-exported with cosmetic fallbacks
    #[arg(short = 'e', long = "export")]
    export: bool,

    /// Settings file path
    #[arg(long = "settings")]
    settings: Option<PathBuf>,
}

fn init_logging() {
    env_logger::init();
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::load(&args.settings.clone().unwrap_or_else(Settings::settings_path));
    if Settings::is_debug_mode() {
        info!("Settings: {:?}", settings);
    }

    let contents = std::fs::read_to_string(&args.puzzle).map_err(|source| PuzzleError::ReadFile {
        path: args.puzzle.clone(),
        source,
    })?;
    let mut document = PuzzleDocument::from_json(&contents)?;
    let (grid, registry) = import_puzzle(&mut document)?;
    info!("Loaded {}x{} puzzle with {} line constraint(s)", grid.size(), grid.size(), registry.len());

    if args.export {
        println!("{}", export_puzzle(&grid, &registry).to_json()?);
        return Ok(());
    }

    let mode = if args.brute_force {
        EvaluationMode::BruteForce
    } else {
        EvaluationMode::Interactive
    };
    let ctx = EvaluationContext::new(&grid, &registry, &ClassicSudoku);
    let cells: Vec<CellId> = match &args.cell {
        Some(cell) => vec![CellId::parse(cell)?],
        None => grid.cells().filter(|&cell| args.brute_force || !grid.is_filled(cell)).collect(),
    };
    let separator = if grid.size() > 9 { "," } else { "" };
    for cell in cells {
        if !grid.contains(cell) {
            return Err(PuzzleError::CellOutOfRange {
                cell: cell.to_string(),
                size: grid.size(),
            });
        }
        println!("{}: {}", cell, ctx.candidates(cell, mode).iter().join(separator));
    }

    if args.solve {
        let solver = BruteForceSolver::from_settings(&registry, &ClassicSudoku, &settings);
        let result = solver.search(&grid, settings.solution_limit, settings.seed);
        println!("{}", result.summary());
        if let Some(solution) = result.first {
            println!("{:?}", solution);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
