//! Command line driver for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use life_engine::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{
        find_pattern, load_snapshot_from_file, write_pattern_library, FileStore,
        PersistenceAdapter, SimulationEngine, PATTERNS,
    },
    utils::{apply_click, density, init_logging, ColorOutput, RunReport, TextRenderer, TextStyle},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Conway's Game of Life on a bounded board")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log filter directive (overrides config, overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Advance a board a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Snapshot to start from; a random board is used when absent
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Board width for a random board (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Board height for a random board (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Seed for the random board (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Report format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Save the final board to this snapshot file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print born/died for every generation
        #[arg(long)]
        show_each: bool,
    },

    /// Write a new snapshot file
    New {
        /// Snapshot file to create
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = 20)]
        width: usize,

        #[arg(long, default_value_t = 20)]
        height: usize,

        /// Fill cells at random instead of leaving them dead
        #[arg(short, long)]
        random: bool,

        /// Seed for --random
        #[arg(short, long)]
        seed: Option<u64>,

        /// Start from a built-in pattern (ignores --width/--height)
        #[arg(short, long, conflicts_with = "random")]
        pattern: Option<String>,
    },

    /// Flip a single cell in a snapshot
    Toggle {
        /// Snapshot file to edit
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        row: usize,

        #[arg(short, long)]
        col: usize,

        /// Where to write the result (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a snapshot with coordinates
    Show {
        /// Snapshot file to display
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Create the default configuration and the pattern library
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", e)));
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config,
            input,
            width,
            height,
            generations,
            seed,
            format,
            output,
            show_each,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                generations,
                seed,
                format: format.map(OutputFormat::from),
                show_each_generation: show_each,
                snapshot_path: output,
                log_level: cli.log_level,
            };
            run_command(config, input, overrides)
        }
        Commands::New {
            output,
            width,
            height,
            random,
            seed,
            pattern,
        } => {
            start_logging(cli.log_level.as_deref())?;
            new_command(output, width, height, random, seed, pattern)
        }
        Commands::Toggle {
            input,
            row,
            col,
            output,
        } => {
            start_logging(cli.log_level.as_deref())?;
            toggle_command(input, row, col, output)
        }
        Commands::Show { input } => {
            start_logging(cli.log_level.as_deref())?;
            show_command(input)
        }
        Commands::Setup { directory, force } => {
            start_logging(cli.log_level.as_deref())?;
            setup_command(directory, force)
        }
    }
}

fn start_logging(level: Option<&str>) -> Result<()> {
    init_logging(level.unwrap_or("info")).context("Failed to initialize logging")
}

/// Seeded generator; a seed is drawn and returned when none is given so runs can be replayed
fn seeded_rng(seed: Option<u64>) -> (ChaCha8Rng, u64) {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    (ChaCha8Rng::seed_from_u64(seed), seed)
}

fn run_command(
    config_path: PathBuf,
    input: Option<PathBuf>,
    overrides: CliOverrides,
) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        Settings::default()
    };
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    start_logging(Some(&settings.logging.level))?;
    if !config_path.exists() {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
    }

    let (mut engine, seed) = match input {
        Some(path) => {
            let snapshot = FileStore::new(&path).load()?;
            let engine = SimulationEngine::from_snapshot(&snapshot)
                .with_context(|| format!("Failed to load board from {}", path.display()))?;
            (engine, None)
        }
        None => {
            let mut engine = SimulationEngine::create(settings.board.width, settings.board.height)?;
            let (mut rng, seed) = seeded_rng(settings.simulation.seed);
            engine.randomize(&mut rng);
            info!(seed, "random board generated");
            (engine, Some(seed))
        }
    };

    let start_time = Instant::now();
    let results = engine.run(settings.simulation.generations);
    info!(
        generations = results.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "run finished"
    );

    let report = RunReport::new(&engine, seed, results);
    match settings.output.format {
        OutputFormat::Text => {
            println!("{}", TextRenderer::render(engine.board(), TextStyle::Compact));
            print!("{}", report.format_text(settings.output.show_each_generation));
        }
        OutputFormat::Json => {
            println!("{}", report.to_json().context("Failed to serialize run report")?);
        }
    }

    if let Some(path) = settings.output.snapshot_path {
        FileStore::new(&path).save(&engine.snapshot())?;
        eprintln!("{}", ColorOutput::success(&format!("Board saved to {}", path.display())));
    }

    Ok(())
}

fn new_command(
    output: PathBuf,
    width: usize,
    height: usize,
    random: bool,
    seed: Option<u64>,
    pattern: Option<String>,
) -> Result<()> {
    let engine = if let Some(name) = pattern {
        let pattern = find_pattern(&name).with_context(|| {
            let names: Vec<_> = PATTERNS.iter().map(|p| p.name).collect();
            format!("Unknown pattern '{}', expected one of: {}", name, names.join(", "))
        })?;
        SimulationEngine::from_board(pattern.to_board()?)
    } else {
        let mut engine = SimulationEngine::create(width, height)?;
        if random {
            let (mut rng, seed) = seeded_rng(seed);
            engine.randomize(&mut rng);
            println!("Seed: {}", seed);
        }
        engine
    };

    FileStore::new(&output).save(&engine.snapshot())?;
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Created {}x{} board with {} living cells: {}",
            engine.width(),
            engine.height(),
            engine.population(),
            output.display()
        ))
    );

    Ok(())
}

fn toggle_command(input: PathBuf, row: usize, col: usize, output: Option<PathBuf>) -> Result<()> {
    let snapshot = load_snapshot_from_file(&input)?;
    let mut engine = SimulationEngine::from_snapshot(&snapshot)
        .with_context(|| format!("Failed to load board from {}", input.display()))?;

    let state = apply_click(&mut engine, row, col)
        .with_context(|| format!("Cannot toggle cell in {}", input.display()))?;

    let target = output.unwrap_or(input);
    FileStore::new(&target).save(&engine.snapshot())?;
    println!("Cell ({}, {}) is now {:?}", row, col, state);

    Ok(())
}

fn show_command(input: PathBuf) -> Result<()> {
    let snapshot = load_snapshot_from_file(&input)?;
    let board = snapshot
        .to_board()
        .with_context(|| format!("Invalid board in {}", input.display()))?;

    println!("Board ({}x{}):", board.width(), board.height());
    println!("{}", TextRenderer::render(&board, TextStyle::WithCoords));
    println!("Living cells: {}", board.population());
    println!(
        "Density: {:.1}%",
        density(board.population(), board.width() * board.height())
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display()))
        );
    }

    let written = write_pattern_library(&patterns_dir).context("Failed to write pattern library")?;
    println!("Created {} patterns in: {}", written.len(), patterns_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: life_engine run --input {}", patterns_dir.join("glider.txt").display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_engine::CellState;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_engine",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
            "--format",
            "json",
        ]);
        assert!(cli.is_ok());

        let conflicting = Cli::try_parse_from([
            "life_engine",
            "new",
            "--output",
            "b.txt",
            "--random",
            "--pattern",
            "glider",
        ]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/block.txt").exists());
    }

    #[test]
    fn test_setup_keeps_existing_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config/default.yaml");
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let mut edited = Settings::default();
        edited.simulation.generations = 42;
        edited.to_file(&config_path).unwrap();

        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        let kept = Settings::from_file(&config_path).unwrap();
        assert_eq!(kept.simulation.generations, 42);
    }

    #[test]
    fn test_run_from_snapshot_writes_output() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("blinker.txt");
        let output = temp_dir.path().join("out/after.txt");
        std::fs::write(&input, "3\n3\n000\n111\n000\n").unwrap();

        let overrides = CliOverrides {
            generations: Some(1),
            snapshot_path: Some(output.clone()),
            ..CliOverrides::default()
        };
        run_command(temp_dir.path().join("missing.yaml"), Some(input), overrides).unwrap();

        let board = load_snapshot_from_file(&output).unwrap().to_board().unwrap();
        assert_eq!(board.living_cells(), vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_new_and_toggle_commands() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("board.txt");

        new_command(path.clone(), 4, 3, false, None, None).unwrap();
        toggle_command(path.clone(), 2, 3, None).unwrap();

        let board = load_snapshot_from_file(&path).unwrap().to_board().unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.get(2, 3), CellState::Alive);
        assert_eq!(board.population(), 1);

        assert!(toggle_command(path, 3, 0, None).is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let (mut a, seed) = seeded_rng(Some(11));
        let (mut b, _) = seeded_rng(Some(seed));
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
