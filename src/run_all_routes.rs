use anyhow::{Context, Result};
use clap::Parser;
use csv::Writer;
use routeplanner::{read_map_file, QueueKind, RoutePlanner};

#[derive(Parser, Debug)]
#[command(name = "all-routes")]
#[command(about = "Load a road map and print the shortest route between every pair of locations.", long_about = None)]
struct Cli {
    /// Path to the road map file
    #[arg(short, long)]
    map: String,

    #[arg(short, long, value_enum, default_value_t = QueueKind::Lazy)]
    queue: QueueKind,

    /// Output CSV (start, goal, stops, distance_km). If omitted, prints every route to stdout.
    #[arg(short, long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let (map, _) = read_map_file(&cli.map).with_context(|| format!("reading {}", &cli.map))?;
    let mut planner = RoutePlanner::with_queue(map.graph(), cli.queue);

    let Some(out_path) = cli.out else {
        map.print_all_routes(&mut planner, |line| println!("{}", line));
        return Ok(());
    };

    let mut wtr = Writer::from_path(&out_path).with_context(|| format!("creating CSV {}", &out_path))?;
    wtr.write_record(["start", "goal", "stops", "distance_km"])?;
    let names = map.location_names();
    let mut rows = 0;
    for start in &names {
        for goal in &names {
            let route = planner.compute_route_by_name(start, goal);
            let distance = match route.total_cost() {
                Some(km) => format!("{:.1}", km),
                None => String::from("inf"),
            };
            let stops = route
                .iter()
                .map(|s| map.location(s.vertex).name.as_str())
                .collect::<Vec<_>>()
                .join(" > ");
            wtr.write_record([*start, *goal, stops.as_str(), distance.as_str()])?;
            rows += 1;
        }
    }
    wtr.flush()?;
    println!(
        "Wrote {} routes from {} Dijkstra runs to {}",
        rows,
        planner.runs(),
        out_path
    );
    Ok(())
}
