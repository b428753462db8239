use std::thread;
use std::time::Duration;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use marktime::config::TimerConfig;
use marktime::utils::format_duration_secs;
use mark_timer::{MarkData, Timer};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn load_config() -> anyhow::Result<TimerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading timer config from {}", path);
            TimerConfig::load_from_file(&path)
        }
        None => Ok(TimerConfig::default()),
    }
}

fn run_workload(timer: &mut Timer) -> anyhow::Result<()> {
    for (step, pause_ms) in [("load", 12u64), ("parse", 5), ("process", 20)] {
        thread::sleep(Duration::from_millis(pause_ms));

        let mut data = MarkData::new();
        data.insert("pause_ms".to_string(), json!(pause_ms));
        timer.mark(step, data)?;
    }

    // repeated key, stored under a disambiguated key
    thread::sleep(Duration::from_millis(3));
    timer.mark_key("process")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Starting {} v{}", marktime::NAME, marktime::VERSION);

    let config = load_config()?;
    let mut timer = config.build();
    run_workload(&mut timer)?;

    let pending = timer.since_last(None);
    let total = timer.stop()?;

    for (key, mark) in timer.marks("") {
        info!(
            key,
            since_start = %format_duration_secs(mark.since_start().unwrap_or_default()),
            since_last = %format_duration_secs(mark.since_last().unwrap_or_default()),
            data = %serde_json::Value::Object(mark.data.clone()),
            "mark"
        );
    }

    match timer.diff(&["load".into(), "process".into()]) {
        Ok(span) => info!("load -> process: {}", format_duration_secs(span)),
        Err(e) => warn!("Could not diff marks: {}", e),
    }

    info!(
        "Timer {} stopped after {} ({} pending before stop)",
        timer.name(),
        format_duration_secs(total),
        format_duration_secs(pending)
    );
    Ok(())
}
