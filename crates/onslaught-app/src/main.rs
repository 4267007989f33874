use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use onslaught_app::autopilot;
use onslaught_app::state::{AppError, AppState};
use onslaught_core::commands::SimCommand;
use onslaught_core::enums::SchedulerPhase;
use onslaught_sim::engine::SimConfig;

const DEFAULT_RUN_SECS: u64 = 60;

fn main() {
    init_tracing();

    let run_for = Duration::from_secs(parse_run_secs(std::env::args().nth(1)));
    if let Err(err) = run(run_for) {
        error!(error = %err, "run_failed");
        std::process::exit(1);
    }
}

fn run(run_for: Duration) -> Result<(), AppError> {
    let mut app = AppState::new();
    app.start(SimConfig::default())?;
    app.send(SimCommand::StartWaves)?;
    info!(seconds = run_for.as_secs(), "encounter running");

    let started = Instant::now();
    let mut last_wave = None;
    while started.elapsed() < run_for {
        std::thread::sleep(autopilot::FIRE_INTERVAL);
        let Some(snapshot) = app.snapshot()? else {
            continue;
        };

        let wave = (snapshot.scheduler.loop_count, snapshot.scheduler.wave_index);
        if last_wave != Some(wave) {
            last_wave = Some(wave);
            info!(
                label = snapshot.wave_label.as_deref().unwrap_or("-"),
                loop_count = wave.0,
                alive = snapshot.agents.len(),
                "wave progress"
            );
        }
        if snapshot.scheduler.phase == SchedulerPhase::Finished {
            info!("wave sequence finished");
            break;
        }

        if let Some(shot) = autopilot::next_shot(&snapshot) {
            app.send(shot)?;
        }
    }

    if let Some(snapshot) = app.snapshot()? {
        match serde_json::to_string(&snapshot.scheduler) {
            Ok(json) => info!(status = %json, tick = snapshot.time.tick, "final scheduler state"),
            Err(err) => warn!(error = %err, "could not encode final state"),
        }
    }
    app.shutdown()
}

fn parse_run_secs(arg: Option<String>) -> u64 {
    match arg {
        None => DEFAULT_RUN_SECS,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, default = DEFAULT_RUN_SECS, "invalid run length; using default");
            DEFAULT_RUN_SECS
        }),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
