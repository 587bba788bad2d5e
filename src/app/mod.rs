mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    terminal::{self, ClearType},
};
use rand::Rng;

pub use renderer::{Glyph, Renderer};

use crate::{
    error::Result,
    generators::{Generator, MazeGenerator, get_rng},
    maze::{Charset, Grid, Position},
    solvers::{Heuristic, MazeSolver, SearchReport, Solver},
};

/// Whether an animated run went all the way through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// The user pressed Esc; the algorithm was simply not stepped any further
    Cancelled,
}

/// Parameters for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub generator: Generator,
    pub height: usize,
    pub width: usize,
    /// Probability of opening each interior wall after carving
    pub loop_chance: f64,
    pub seed: Option<u64>,
}

/// One row of a profiling batch.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub generator: Generator,
    pub solver: Solver,
    pub seed: u64,
    pub report: SearchReport,
    pub generate_time: Duration,
    pub solve_time: Duration,
}

pub struct App {
    /// Characters used when reading and writing mazes
    pub charset: Charset,
    /// Time to wait between animation steps
    pub render_refresh_time: Duration,
    /// How long to wait for a key press between steps
    pub input_poll_timeout: Duration,
    /// Heuristic handed to A*
    pub heuristic: Heuristic,
}

impl Default for App {
    fn default() -> Self {
        Self {
            charset: Charset::default(),
            render_refresh_time: Duration::from_millis(10),
            input_poll_timeout: Duration::ZERO,
            heuristic: Heuristic::default(),
        }
    }
}

impl App {
    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Check, without blocking, whether the user asked to stop.
    fn cancel_requested(&self) -> std::io::Result<bool> {
        while event::poll(self.input_poll_timeout)? {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    tracing::debug!("[app] Esc key pressed, stopping run");
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Block until the user presses any key.
    pub fn wait_for_key() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { kind, .. }) = event::read()? {
                if kind == event::KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }

    pub fn new_generator(&self, options: &GenerateOptions) -> Result<MazeGenerator<impl Rng>> {
        MazeGenerator::new(
            options.generator,
            options.height,
            options.width,
            get_rng(options.seed),
        )
    }

    /// Carve, place start and finish, then open loops. Nothing is drawn.
    pub fn generate(&self, options: &GenerateOptions) -> Result<Grid> {
        let mut generator = self.new_generator(options)?;
        generator.run()?;
        generator.randomize_start_and_finish()?;
        generator.loopify(options.loop_chance)?;
        tracing::info!(
            "Generated {}x{} maze with {}",
            options.height,
            options.width,
            options.generator
        );
        Ok(generator.into_grid())
    }

    /// Solve without drawing.
    pub fn solve(&self, grid: &Grid, solver: Solver) -> Result<SearchReport> {
        let report = MazeSolver::new(grid, solver, self.heuristic)?.run();
        tracing::info!(
            "{} finished: cost {}, {} nodes expanded",
            solver,
            report.solution_cost,
            report.nodes_expanded
        );
        Ok(report)
    }

    /// Generate step by step, drawing each carved cell.
    ///
    /// On cancel the partially carved grid is returned as is.
    pub fn animate_generation(
        &self,
        renderer: &mut Renderer,
        options: &GenerateOptions,
    ) -> Result<(Grid, RunStatus)> {
        let mut generator = self.new_generator(options)?;
        renderer.draw_grid(generator.grid())?;
        renderer.status(&format!("Generating with {} (Esc to stop)", options.generator))?;

        while !generator.is_finished() {
            if self.cancel_requested()? {
                return Ok((generator.into_grid(), RunStatus::Cancelled));
            }
            if let Some(cells) = generator.step()? {
                let grid = generator.grid();
                renderer.draw_cells(cells.into_iter().map(|p| (p, Glyph::from(grid[p]))))?;
                renderer.pause();
            }
        }

        let (start, finish) = generator.randomize_start_and_finish()?;
        let opened = generator.loopify(options.loop_chance)?;
        let grid = generator.into_grid();
        renderer.draw_cells(
            opened
                .into_iter()
                .chain([start, finish])
                .map(|p| (p, Glyph::from(grid[p]))),
        )?;
        tracing::info!(
            "Generated {}x{} maze with {}",
            options.height,
            options.width,
            options.generator
        );
        Ok((grid, RunStatus::Completed))
    }

    /// Solve step by step, drawing the frontier as it grows and then the path.
    pub fn animate_solving(
        &self,
        renderer: &mut Renderer,
        grid: &Grid,
        solver: Solver,
    ) -> Result<(SearchReport, RunStatus)> {
        let mut search = MazeSolver::new(grid, solver, self.heuristic)?;
        renderer.status(&format!("Solving with {} (Esc to stop)", solver))?;
        let endpoints = [search.start(), search.finish()];
        let is_endpoint = |p: &Position| endpoints.contains(p);

        while !search.is_finished() {
            if self.cancel_requested()? {
                return Ok((search.report(), RunStatus::Cancelled));
            }
            if let Some(cells) = search.step() {
                renderer.draw_cells(
                    cells
                        .into_iter()
                        .filter(|p| !is_endpoint(p))
                        .map(|p| (p, Glyph::Visited)),
                )?;
                renderer.pause();
            }
        }

        for &p in search.solution().iter().filter(|&p| !is_endpoint(p)) {
            renderer.draw_cells([(p, Glyph::Route)])?;
            renderer.pause();
        }
        let report = search.report();
        let summary = if report.solution.is_empty() {
            format!("{}: no path found ({} nodes expanded)", solver, report.nodes_expanded)
        } else {
            format!(
                "{}: path cost {}, {} nodes expanded",
                solver, report.solution_cost, report.nodes_expanded
            )
        };
        renderer.status(&summary)?;
        tracing::info!("{}", summary);
        Ok((report, RunStatus::Completed))
    }

    /// Profiling mode: run every generator and solver combination for each seed
    /// without rendering.
    pub fn profile(
        &self,
        height: usize,
        width: usize,
        loop_chance: f64,
        seeds: std::ops::Range<u64>,
    ) -> Result<Vec<ProfileRecord>> {
        let mut records = Vec::new();
        for generator in Generator::ALL {
            for seed in seeds.clone() {
                let options = GenerateOptions {
                    generator,
                    height,
                    width,
                    loop_chance,
                    seed: Some(seed),
                };
                let started = Instant::now();
                let grid = self.generate(&options)?;
                let generate_time = started.elapsed();

                for solver in Solver::ALL {
                    let started = Instant::now();
                    let report = self.solve(&grid, solver)?;
                    records.push(ProfileRecord {
                        generator,
                        solver,
                        seed,
                        report,
                        generate_time,
                        solve_time: started.elapsed(),
                    });
                }
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_places_endpoints() {
        let app = App::default();
        let options = GenerateOptions {
            generator: Generator::Prim,
            height: 15,
            width: 21,
            loop_chance: 0.1,
            seed: Some(11),
        };
        let grid = app.generate(&options).unwrap();
        assert!(grid.start().is_some());
        assert!(grid.finish().is_some());
        let report = app.solve(&grid, Solver::AStar).unwrap();
        assert!(!report.solution.is_empty());
    }

    #[test]
    fn test_generate_rejects_even_dimensions() {
        let app = App::default();
        let options = GenerateOptions {
            generator: Generator::Rdfs,
            height: 14,
            width: 21,
            loop_chance: 0.0,
            seed: Some(0),
        };
        assert!(app.generate(&options).is_err());
    }

    #[test]
    fn test_profile_covers_every_combination() {
        let app = App::default();
        let records = app.profile(9, 11, 0.0, 0..2).unwrap();
        assert_eq!(records.len(), Generator::ALL.len() * Solver::ALL.len() * 2);
        // Every solver finds the single path of a perfect maze
        for chunk in records.chunks(Solver::ALL.len()) {
            assert!(
                chunk
                    .windows(2)
                    .all(|w| w[0].report.solution == w[1].report.solution)
            );
        }
    }
}
