use std::{
    error::Error,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{Args, Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use mazestep::{
    app::{App, GenerateOptions, Renderer, RunStatus},
    generators::Generator,
    maze::{Charset, Grid},
    solvers::{Heuristic, SearchReport, Solver},
};

#[derive(Parser, Debug)]
#[command(name = "mazestep")]
#[command(about = "Generate mazes and watch search algorithms solve them, one step at a time")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Character used for walls in maze files
    #[arg(long, global = true, default_value_t = '%')]
    wall: char,

    /// Character used for passages in maze files
    #[arg(long, global = true, default_value_t = ' ')]
    passage: char,

    /// Character used for the start cell in maze files
    #[arg(long, global = true, default_value_t = 'S')]
    start: char,

    /// Character used for the finish cell in maze files
    #[arg(long, global = true, default_value_t = 'F')]
    finish: char,

    /// Delay between animation steps, in milliseconds
    #[arg(long, global = true, default_value_t = 10)]
    delay_ms: u64,

    /// File that receives log output (filter with MAZESTEP_LOG)
    #[arg(long, global = true, default_value = "mazestep.log")]
    log_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Carve a new maze
    Generate {
        #[command(flatten)]
        maze: MazeArgs,
        /// Write the maze to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Draw each step in the terminal
        #[arg(long)]
        animate: bool,
    },
    /// Solve a maze read from a file
    Solve {
        file: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long)]
        animate: bool,
    },
    /// Carve a new maze, then solve it
    Run {
        #[command(flatten)]
        maze: MazeArgs,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        animate: bool,
    },
}

#[derive(Args, Debug)]
struct MazeArgs {
    /// rdfs or rpa
    #[arg(long, default_value = "rdfs")]
    generator: Generator,

    /// Number of rows, odd and at least 3
    #[arg(long, default_value_t = 21)]
    height: usize,

    /// Number of columns, odd and at least 3
    #[arg(long, default_value_t = 41)]
    width: usize,

    /// Probability in [0, 1] of knocking down each interior wall afterwards
    #[arg(long, default_value_t = 0.0)]
    loop_chance: f64,

    #[arg(long)]
    seed: Option<u64>,
}

impl MazeArgs {
    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            generator: self.generator,
            height: self.height,
            width: self.width,
            loop_chance: self.loop_chance,
            seed: self.seed,
        }
    }
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// dfs, bfs, ucs or astar
    #[arg(long, default_value = "astar")]
    solver: Solver,

    /// Heuristic for A*: euclidean or manhattan
    #[arg(long, default_value = "euclidean")]
    heuristic: Heuristic,
}

fn init_logging(path: &Path) -> std::io::Result<WorkerGuard> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("log file path has no file name: {}", path.display()),
        )
    })?;

    // The terminal belongs to the renderer, so logs only go to the file
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("MAZESTEP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn print_report(report: &SearchReport) {
    if report.solution.is_empty() {
        println!("{}: no path found", report.solver);
    } else {
        println!("{}: path cost {}", report.solver, report.solution_cost);
    }
    println!("Nodes expanded: {}", report.nodes_expanded);
    println!("Steps: {}", report.steps);
}

/// Run `body` with the terminal in raw mode, restoring it afterwards even on error.
fn with_terminal<T>(
    app: &App,
    body: impl FnOnce(&mut Renderer) -> mazestep::Result<T>,
) -> Result<T, Box<dyn Error>> {
    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let mut renderer = Renderer::new(app.render_refresh_time);
    let result = body(&mut renderer).and_then(|value| {
        renderer.status("Press any key to exit")?;
        App::wait_for_key()?;
        Ok(value)
    });
    App::restore_terminal(&mut stdout)?;
    Ok(result?)
}

/// Fall back to headless mode when the grid would not fit on screen.
fn can_animate(animate: bool, height: usize, width: usize) -> std::io::Result<bool> {
    if animate && !Renderer::fits(height, width)? {
        eprintln!(
            "Terminal too small for a {}x{} maze, running without animation",
            height, width
        );
        return Ok(false);
    }
    Ok(animate)
}

fn write_grid(app: &App, grid: &Grid, output: Option<&Path>) -> mazestep::Result<()> {
    match output {
        Some(path) => {
            grid.save(path, &app.charset)?;
            println!("Maze written to {}", path.display());
        }
        None => print!("{}", grid.to_text(&app.charset)),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli.log_file)?;

    let mut app = App {
        charset: Charset::new(cli.wall, cli.passage, cli.start, cli.finish)?,
        render_refresh_time: Duration::from_millis(cli.delay_ms),
        ..App::default()
    };

    match cli.command {
        Command::Generate {
            maze,
            output,
            animate,
        } => {
            let options = maze.options();
            let grid = if can_animate(animate, options.height, options.width)? {
                let (grid, status) =
                    with_terminal(&app, |renderer| app.animate_generation(renderer, &options))?;
                if status == RunStatus::Cancelled {
                    println!("Generation cancelled");
                    return Ok(());
                }
                grid
            } else {
                app.generate(&options)?
            };
            write_grid(&app, &grid, output.as_deref())?;
        }
        Command::Solve {
            file,
            search,
            animate,
        } => {
            app.heuristic = search.heuristic;
            let grid = Grid::load(&file, &app.charset)?;
            let report = if can_animate(animate, grid.height(), grid.width())? {
                let (report, status) = with_terminal(&app, |renderer| {
                    renderer.draw_grid(&grid)?;
                    app.animate_solving(renderer, &grid, search.solver)
                })?;
                if status == RunStatus::Cancelled {
                    println!("Search cancelled");
                }
                report
            } else {
                app.solve(&grid, search.solver)?
            };
            print_report(&report);
        }
        Command::Run {
            maze,
            search,
            output,
            animate,
        } => {
            app.heuristic = search.heuristic;
            let options = maze.options();
            let (grid, report) = if can_animate(animate, options.height, options.width)? {
                let outcome = with_terminal(&app, |renderer| {
                    let (grid, status) = app.animate_generation(renderer, &options)?;
                    if status == RunStatus::Cancelled {
                        return Ok(None);
                    }
                    let (report, _) = app.animate_solving(renderer, &grid, search.solver)?;
                    Ok(Some((grid, report)))
                })?;
                match outcome {
                    Some(outcome) => outcome,
                    None => {
                        println!("Generation cancelled");
                        return Ok(());
                    }
                }
            } else {
                let grid = app.generate(&options)?;
                let report = app.solve(&grid, search.solver)?;
                (grid, report)
            };
            if let Some(path) = output.as_deref() {
                write_grid(&app, &grid, Some(path))?;
            }
            print_report(&report);
        }
    }
    Ok(())
}
