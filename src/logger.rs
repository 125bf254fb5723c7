use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::time, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// When `RUST_LOG` is set it is used as given. Otherwise everything logs at
/// `warn`, and this crate at `debug` in debug builds or `info` in release
/// builds. Call once, early in startup.
pub fn init() -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(time::uptime()),
        )
        .with(env_filter(rust_log.as_deref())?)
        .try_init()?;
    Ok(())
}

fn env_filter(rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());
    let filter = match rust_log {
        Some(directives) => builder.parse(directives)?,
        None => {
            let crate_level = if cfg!(debug_assertions) {
                "life_canvas=debug"
            } else {
                "life_canvas=info"
            };
            builder.parse("")?.add_directive(crate_level.parse()?)
        }
    };
    Ok(filter)
}
