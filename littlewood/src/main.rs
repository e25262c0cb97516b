//! Littlewood polynomial root enumerator.
//!
//! Keeps its state in the working directory: `state.json` records the last
//! stored coefficient code and `Roots/Degree_<d>/` holds the root blocks, so
//! repeated `--run` invocations continue where the previous one stopped.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use littlewood::audit::audit_degree;
use littlewood::enumerate::run_blocks;
use littlewood::exit_codes;
use littlewood::io::config::load_config;
use littlewood::io::paths::WorkspacePaths;
use littlewood::io::progress::peek_progress;
use littlewood::logging;
use littlewood::render::render_to_file;

#[derive(Parser)]
#[command(
    name = "littlewood",
    version,
    about = "Enumerate Littlewood polynomials, store their roots, and render them"
)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(true)
        .args(["run", "progress", "render", "audit"])
))]
struct Cli {
    /// Compute and store this many blocks, resuming from `state.json`.
    #[arg(long, value_name = "BLOCKS")]
    run: Option<u32>,
    /// Print the last stored degree and coefficient code.
    #[arg(long)]
    progress: bool,
    /// Render stored roots of one degree as a PNG.
    #[arg(long)]
    render: bool,
    /// Degree to render (defaults to the degree in `state.json`).
    #[arg(long, value_name = "DEGREE", requires = "render")]
    degree: Option<u32>,
    /// Image path (defaults to `render.output` from `littlewood.toml`).
    #[arg(long, value_name = "PATH", requires = "render")]
    output: Option<PathBuf>,
    /// Check that every code of a degree is stored exactly once.
    #[arg(long, value_name = "DEGREE")]
    audit: Option<u32>,
    /// Working directory holding `state.json` and `Roots/`.
    #[arg(long, short = 'C', value_name = "DIR", default_value = ".")]
    workdir: PathBuf,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = WorkspacePaths::new(&cli.workdir);
    let config = load_config(&paths.config_path)?;

    if let Some(blocks) = cli.run {
        let outcome = run_blocks(&paths.root, &config.solver.solver(), blocks, |block| {
            println!(
                "block: degree={} number={} records={} codes={}..={}",
                block.id.degree, block.id.number, block.records, block.first_code, block.last_code
            );
        })?;
        println!(
            "run: blocks={} degree={} coeff_code={}",
            outcome.blocks_flushed, outcome.progress.degree, outcome.progress.coeff_code
        );
    }

    if cli.progress {
        match peek_progress(&paths.progress_path)? {
            Some(state) => println!(
                "progress: degree={} coeff_code={}",
                state.degree, state.coeff_code
            ),
            None => println!("progress: none"),
        }
    }

    if let Some(degree) = cli.audit {
        let audit = audit_degree(&paths, degree)?;
        println!(
            "audit: degree={} blocks={} records={} complete={} missing={} duplicates={}",
            audit.degree,
            audit.blocks,
            audit.records,
            audit.is_complete(),
            audit.missing.len(),
            audit.duplicates.len()
        );
        for error in &audit.block_errors {
            eprintln!("warning: {}", error);
        }
    }

    if cli.render {
        let degree = match cli.degree {
            Some(degree) => degree,
            None => peek_progress(&paths.progress_path)?
                .unwrap_or_default()
                .degree,
        };
        let output = paths.resolve(
            cli.output
                .as_deref()
                .unwrap_or(config.render.output.as_path()),
        );
        let (path, points) = render_to_file(&paths, degree, &config.render, &output)?;
        println!(
            "render: degree={} points={} output={}",
            degree,
            points,
            path.display()
        );
    }

    Ok(())
}
