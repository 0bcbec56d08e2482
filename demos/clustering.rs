//! Drive the engine the way a canvas UI would: clicks, a seeded run, a stepped run.
//!
//! `RUST_LOG=lloyd=debug cargo run --example clustering` shows every round.

use lloyd::{Engine, EngineConfig, Step};
use tracing_subscriber::EnvFilter;

fn print_state(engine: &Engine) {
    for c in engine.centroids() {
        let members = engine.members(c.cluster_id).count();
        println!(
            "  cluster {} at ({:6.1}, {:6.1}) with {} points",
            c.cluster_id, c.x, c.y, members
        );
    }
}

fn main() -> lloyd::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EngineConfig::new()
        .with_num_clusters(3)
        .with_dispersion_threshold(120.0)
        .with_seed(42);
    let mut engine = Engine::new(config)?;

    // Three groups of clicks plus one stray point.
    let clicks = [
        // Near (100, 100)
        (100.0, 100.0),
        (110.0, 95.0),
        (95.0, 112.0),
        (104.0, 104.0),
        // Near (400, 250)
        (400.0, 250.0),
        (410.0, 240.0),
        (392.0, 258.0),
        (405.0, 262.0),
        // Near (650, 120)
        (650.0, 120.0),
        (660.0, 130.0),
        (640.0, 115.0),
        (655.0, 108.0),
        // Stray
        (380.0, 470.0),
    ];
    for (x, y) in clicks {
        engine.add_point(x, y)?;
    }
    let color = engine.add_categorical_point("blue")?;
    println!(
        "categorical {:?} encoded as {:?} at ({:.1}, {:.1})",
        color.original_value, color.numeric_value, color.x, color.y
    );

    // The first run only seeds clusters, like the "Initialize Clusters" button.
    let seeded = engine.run()?;
    println!("\n=== {:?} ===", seeded.status);
    print_state(&engine);

    // The second run is stepped, one redraw per round.
    engine.begin_run()?;
    loop {
        match engine.step()? {
            Step::Round { completed } => println!("\n--- round {completed} ---"),
            Step::Finished { rounds, split } => {
                println!("\n=== finished after {rounds} rounds ===");
                for (parent, child) in &split.splits {
                    println!("  cluster {parent} split off cluster {child}");
                }
                break;
            }
        }
        print_state(&engine);
    }
    print_state(&engine);

    Ok(())
}
