use circlesim::{Scenario, ScenarioConfig};
use circlesim::{bench_broad_phase, bench_step, bench_step_curve};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless gravity and collision simulation of circles in a box")]
struct Args {
    /// Scenario file name under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Number of steps to run, overrides the scenario's `run.steps`
    #[arg(short = 'n', long)]
    steps: Option<usize>,

    /// Run the benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_broad_phase();
        bench_step();
        bench_step_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let steps = args.steps.unwrap_or(scenario_cfg.run.steps);
    let log_every = scenario_cfg.run.log_every;

    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    let mut collisions = 0;
    for _ in 0..steps {
        let report = scenario.step();
        collisions += report.collisions;

        let sys = &scenario.system;
        if log_every > 0 && sys.steps % log_every as u64 == 0 {
            let p = sys.momentum();
            info!(
                "step {:6}  t = {:9.3}  kinetic = {:12.4}  momentum = ({:9.4}, {:9.4})  collisions = {}",
                sys.steps,
                sys.t,
                sys.kinetic_energy(),
                p.x,
                p.y,
                report.collisions
            );
        }
    }

    info!(
        "finished {} steps, {} collisions resolved, {} occupied cells",
        scenario.system.steps,
        collisions,
        scenario.grid.occupied_cells()
    );

    Ok(())
}
