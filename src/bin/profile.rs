use std::time::Duration;

use mazestep::app::App;

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::default();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_seeds = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(5);
    let size = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(101);
    let loop_chance = args.next().and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.05);

    let records = app.profile(size, size, loop_chance, 0..num_seeds)?;

    println!(
        "{:<38} {:<28} {:>5} {:>6} {:>9} {:>10} {:>10}",
        "generator", "solver", "seed", "cost", "expanded", "gen (ms)", "solve (ms)"
    );
    for record in &records {
        println!(
            "{:<38} {:<28} {:>5} {:>6} {:>9} {:>10.3} {:>10.3}",
            record.generator.to_string(),
            record.solver.to_string(),
            record.seed,
            record.report.solution_cost,
            record.report.nodes_expanded,
            millis(record.generate_time),
            millis(record.solve_time),
        );
    }
    Ok(())
}
