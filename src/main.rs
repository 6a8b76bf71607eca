use anyhow::Result;
use loadgen_metrics::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    tracing::info!("{}", version::banner());
    let app_config = config::AppConfig::load()?;

    let report = pipeline::run(&app_config)?;
    tracing::info!(
        records = report.records,
        first = ?report.first,
        last = ?report.last,
        files = report.written.len(),
        "synthetic data generated"
    );
    for path in &report.written {
        tracing::info!(path = %path.display(), "wrote");
    }
    tracing::info!("preview:\n{}", report.preview);

    Ok(())
}
