use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Overrides the default filter, e.g. `DINO_TRAY_LOG=dino_tray=trace`.
const LOG_ENV: &str = "DINO_TRAY_LOG";

/// Library and host at `debug`, the windowing dependencies at `warn`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy("dino_tray=debug")
    })
}

/// Installs the global subscriber. In release builds logs also go to a
/// daily file; keep the returned guard alive to flush it.
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_env_filter(env_filter())
        .finish();

    #[cfg(not(debug_assertions))]
    let (subscriber, guard) = {
        use tracing_subscriber::layer::SubscriberExt;

        let (layer, guard) = file::layer()?;
        (subscriber.with(layer), Some(guard))
    };
    #[cfg(debug_assertions)]
    let guard = None;

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!("Initialized Logger");

    Ok(guard)
}

#[cfg(not(debug_assertions))]
mod file {
    use std::path::{Path, PathBuf};
    use std::time::{Duration, SystemTime};

    use anyhow::Context;
    use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
    use tracing_subscriber::fmt::format::{DefaultFields, Format};
    use tracing_subscriber::fmt::Layer;

    pub type FileLayer<S> = Layer<S, DefaultFields, Format, NonBlocking>;

    /// Rolling log files are named `tray.log.<date>`.
    const PREFIX: &str = "tray.log";

    const RETENTION: Duration = Duration::from_secs(60 * 60 * 24 * 30);

    /// Next to the chat client's own data, under `$data_dir/dino/tray-logs`.
    fn logs_dir() -> anyhow::Result<PathBuf> {
        let dir = dirs::data_dir().context("Failed to get $data_dir path")?;
        Ok(dir.join("dino").join("tray-logs"))
    }

    fn remove_old_logs(dir: &Path) {
        let now = SystemTime::now();

        for entry in std::fs::read_dir(dir).ok().into_iter().flatten() {
            let Ok(entry) = entry else {
                continue;
            };
            let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
                continue;
            };

            if now.duration_since(modified).unwrap_or_default() > RETENTION {
                let _ = std::fs::remove_file(entry.path());
            }
        }
    }

    pub fn layer<S>() -> anyhow::Result<(FileLayer<S>, WorkerGuard)> {
        let dir = logs_dir()?;
        remove_old_logs(&dir);

        let appender = tracing_appender::rolling::daily(&dir, PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = Layer::default()
            // no ansi coloring in the log file
            .with_ansi(false)
            .with_writer(writer);

        Ok((layer, guard))
    }
}
