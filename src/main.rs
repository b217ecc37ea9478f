use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use routeplanner::{read_map_file, QueueKind, RoutePlanner};

#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Load a road map and print the shortest route between two locations.", long_about = None)]
struct Cli {
    /// Path to the road map file (.locations / .roads sections)
    #[arg(short, long)]
    map: String,

    /// Name of the start location
    #[arg(short, long)]
    from: String,

    /// Names of one or more goal locations, all routed from the same start
    #[arg(short, long, required = true, num_args = 1..)]
    to: Vec<String>,

    /// Priority queue used by Dijkstra's algorithm
    #[arg(short, long, value_enum, default_value_t = QueueKind::Lazy)]
    queue: QueueKind,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let (map, report) = read_map_file(&cli.map).with_context(|| format!("reading {}", &cli.map))?;
    if report.skipped > 0 {
        warn!("Skipped {} of {} lines in {}", report.skipped, report.lines, &cli.map);
    }
    info!(
        "Road map: {} locations, {} directed roads",
        map.graph().len(),
        map.graph().edge_count()
    );

    let mut planner = RoutePlanner::with_queue(map.graph(), cli.queue);
    for goal in &cli.to {
        let route = planner.compute_route_by_name(&cli.from, goal);
        println!("{} to {}:", cli.from, goal);
        if route.is_empty() {
            println!("  no route");
            continue;
        }
        for section in map.describe(&route) {
            println!("  {}", section);
        }
        if let Some(crow) = map.crow_flies_km(&route) {
            println!("  ({:.1} km as the crow flies)", crow);
        }
    }
    Ok(())
}
