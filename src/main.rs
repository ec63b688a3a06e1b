//! Terminal host for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_rewind::{
    build_controller,
    config::{default_config_path, CliOverrides, OutputFormat, Settings},
    game_of_life::create_example_patterns,
    simulation::{Action, ActionInput, CommandTable, Dispatch, SimulationController, StepPacer},
    utils::{GridFormatter, Tone, CLEAR_SCREEN},
};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "game_of_life_rewind")]
#[command(about = "Conway's Game of Life with step, skip and rewind")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation for a number of generations
    Run {
        /// Configuration file path
        #[arg(short, long, default_value_os_t = default_config_path())]
        config: PathBuf,

        /// Starting pattern file (replaces the random first generation)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Generations to run
        #[arg(short, long, default_value_t = 50)]
        generations: usize,

        /// Grid rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (overrides config)
        #[arg(long)]
        cols: Option<usize>,

        /// Percentage of cells alive at start (overrides config)
        #[arg(long)]
        probability: Option<u8>,

        /// Generations per second (overrides config)
        #[arg(short, long)]
        rate: Option<f64>,

        /// RNG seed for a reproducible first generation
        #[arg(long)]
        seed: Option<u64>,

        /// Final status format (overrides config)
        #[arg(long, value_parser = parse_format)]
        format: Option<OutputFormat>,

        /// Do not print the board after each generation
        #[arg(long)]
        no_render: bool,

        /// Step as fast as possible instead of at the configured rate
        #[arg(long)]
        instant: bool,
    },

    /// Interactive session driven by commands on stdin
    Play {
        /// Configuration file path
        #[arg(short, long, default_value_os_t = default_config_path())]
        config: PathBuf,

        /// Starting pattern file
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// RNG seed for reproducible randomisation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_format(value: &str) -> std::result::Result<OutputFormat, String> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!("unknown format '{}', expected text or json", other)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            pattern,
            generations,
            rows,
            cols,
            probability,
            rate,
            seed,
            format,
            no_render,
            instant,
        } => {
            let overrides = CliOverrides {
                rows,
                cols,
                seed_probability: probability,
                generations_per_second: rate,
                seed,
                format,
                no_render,
            };
            let settings = load_settings(&config, &overrides)?;
            run_command(&settings, pattern.as_deref(), generations, instant)
        }
        Commands::Play {
            config,
            pattern,
            seed,
        } => {
            let overrides = CliOverrides {
                seed,
                ..CliOverrides::default()
            };
            let settings = load_settings(&config, &overrides)?;
            play_command(&settings, pattern.as_deref())
        }
        Commands::Setup { directory, force } => {
            init_logging("info");
            setup_command(directory, force)
        }
    }
}

fn init_logging(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    // A second initialisation (e.g. from tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    if !config_path.exists() {
        println!(
            "{}",
            Tone::Warning.paint(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
    }
    let mut settings = Settings::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(overrides);
    init_logging(&settings.logging.level);

    settings
        .validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

fn print_frame(controller: &SimulationController) {
    print!(
        "{}{}",
        CLEAR_SCREEN,
        GridFormatter::format_grid_compact(controller.current())
    );
    println!("{}", GridFormatter::format_status(&controller.status()));
}

fn run_command(
    settings: &Settings,
    pattern: Option<&Path>,
    generations: usize,
    instant: bool,
) -> Result<()> {
    let mut controller =
        build_controller(settings, pattern).context("Failed to create simulation")?;
    let render = settings.output.render;

    if render {
        print_frame(&controller);
    }

    let started = Instant::now();
    let mut pacer = StepPacer::new(started);
    let mut completed = 0;
    controller.start();

    while completed < generations {
        if instant {
            controller.step_once();
        } else {
            let now = Instant::now();
            if !pacer.tick(&mut controller, now) {
                let wait = pacer.time_until_due(now, controller.step_interval());
                std::thread::sleep(wait.max(Duration::from_millis(1)));
                continue;
            }
        }
        completed += 1;

        if render {
            print_frame(&controller);
        }
    }

    controller.stop();
    log::info!(
        "Ran {} generations in {:.3}s",
        completed,
        started.elapsed().as_secs_f64()
    );

    let report = GridFormatter::render_status(&controller.status(), settings.output.format)?;
    println!("{}", report);
    Ok(())
}

const PLAY_HELP: &str = "\
Commands:
  toggle             start or stop the simulation
  tick               advance one scheduled generation while running
  step               advance one generation
  next [n]           skip ahead n generations
  prev [n]           rewind n generations
  random             new random generation
  clear              kill every cell
  rate <r>           generations per second
  revive <row> <col> bring a cell to life (stopped only)
  kill <row> <col>   kill a cell (stopped only)
  show               print the board with coordinates
  status             print the status line
  help               show this text
  quit               leave";

/// Outcome of one line of interactive input
#[derive(Debug, PartialEq, Eq)]
enum LineOutcome {
    Redraw,
    Message(String),
    Quit,
}

/// Interactive session state: the controller plus the front end's input fields
struct Session {
    controller: SimulationController,
    table: CommandTable,
    input: ActionInput,
    pacer: StepPacer,
}

impl Session {
    fn new(controller: SimulationController, settings: &Settings) -> Self {
        Self {
            controller,
            table: CommandTable::default(),
            input: ActionInput {
                generations: settings.simulation.jump_generations,
                generations_per_second: settings.simulation.generations_per_second,
            },
            pacer: StepPacer::new(Instant::now()),
        }
    }

    fn handle_line(&mut self, line: &str) -> Result<LineOutcome> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(LineOutcome::Message(String::new()));
        };
        let args: Vec<&str> = words.collect();

        match command {
            "quit" | "exit" => Ok(LineOutcome::Quit),
            "help" => Ok(LineOutcome::Message(PLAY_HELP.to_string())),
            "show" => Ok(LineOutcome::Message(GridFormatter::format_grid_with_coords(
                self.controller.current(),
            ))),
            "status" => Ok(LineOutcome::Message(GridFormatter::format_status(
                &self.controller.status(),
            ))),
            "tick" => {
                if self.pacer.tick(&mut self.controller, Instant::now()) {
                    Ok(LineOutcome::Redraw)
                } else {
                    Ok(LineOutcome::Message("No generation due".to_string()))
                }
            }
            "step" => {
                if self.controller.is_running() {
                    return Ok(LineOutcome::Message(Tone::Warning.paint(
                        "Stop the simulation before stepping manually",
                    )));
                }
                self.controller.step_once();
                Ok(LineOutcome::Redraw)
            }
            "revive" | "kill" => self.edit_cell(command == "revive", &args),
            other => {
                let action: Action = other.parse()?;
                self.apply_argument(action, args.first().copied())?;
                match self.table.dispatch(action, &mut self.controller, &self.input) {
                    Dispatch::Applied => {
                        if matches!(action, Action::StartStop | Action::Randomize | Action::Clear) {
                            self.pacer.restart(Instant::now());
                        }
                        Ok(LineOutcome::Redraw)
                    }
                    Dispatch::Disabled => Ok(LineOutcome::Message(Tone::Warning.paint(&format!(
                        "'{}' is disabled while the simulation runs",
                        action
                    )))),
                    Dispatch::Unbound => Ok(LineOutcome::Message(Tone::Warning.paint(&format!(
                        "'{}' has no binding",
                        action
                    )))),
                }
            }
        }
    }

    /// Update the numeric input field an action reads from
    fn apply_argument(&mut self, action: Action, argument: Option<&str>) -> Result<()> {
        let Some(text) = argument else {
            return Ok(());
        };
        match action {
            Action::Previous | Action::Next => {
                self.input.generations = text
                    .parse()
                    .with_context(|| format!("'{}' is not a generation count", text))?;
            }
            Action::Rate => {
                self.input.generations_per_second = text
                    .parse()
                    .with_context(|| format!("'{}' is not a rate", text))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn edit_cell(&mut self, alive: bool, args: &[&str]) -> Result<LineOutcome> {
        if !self.controller.is_editable() {
            return Ok(LineOutcome::Message(Tone::Warning.paint(
                "Cells can only be edited while the simulation is stopped",
            )));
        }

        let [row, col] = args else {
            anyhow::bail!("Expected a row and a column");
        };
        let row: usize = row.parse().with_context(|| format!("'{}' is not a row", row))?;
        let col: usize = col.parse().with_context(|| format!("'{}' is not a column", col))?;

        match self.controller.set_alive(row, col, alive) {
            Ok(()) => Ok(LineOutcome::Redraw),
            Err(e) => Ok(LineOutcome::Message(Tone::Warning.paint(&e.to_string()))),
        }
    }
}

fn play_command(settings: &Settings, pattern: Option<&Path>) -> Result<()> {
    let controller = build_controller(settings, pattern).context("Failed to create simulation")?;
    let mut session = Session::new(controller, settings);

    print_frame(&session.controller);
    println!("{}", Tone::Info.paint("Type 'help' for commands"));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match session.handle_line(&line) {
            Ok(LineOutcome::Quit) => break,
            Ok(LineOutcome::Redraw) => print_frame(&session.controller),
            Ok(LineOutcome::Message(text)) => {
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
            Err(e) => println!("{}", Tone::Error.paint(&format!("{:#}", e))),
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", Tone::Info.paint("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Small board for watching the example patterns in a terminal
    let small_path = config_dir.join("small.yaml");
    if !small_path.exists() || force {
        let mut small = Settings::default();
        small.grid.rows = 20;
        small.grid.cols = 40;
        small.simulation.generations_per_second = 5.0;
        small.to_file(&small_path)?;
        println!("Created: {}", small_path.display());
    }

    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    println!("\n{}", Tone::Success.paint("Setup complete!"));
    println!("\nNext steps:");
    println!(
        "  cargo run -- run --config {} --pattern {}",
        small_path.display(),
        patterns_dir.join("glider.txt").display()
    );
    println!("  cargo run -- play --config {}", small_path.display());

    Ok(())
}
