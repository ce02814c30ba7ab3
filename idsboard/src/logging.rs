use time::macros::format_description;
use time::UtcOffset;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "idsboard=info,idsboard_api=info,idsboard_core=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging() {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let enable_colors = console::user_attended();

    let full_fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(enable_colors)
        .with_timer(OffsetTime::new(
            offset,
            format_description!("[day].[month].[year] [hour]:[minute]:[second]"),
        ))
        .with_filter(env_filter());

    let compact_fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(enable_colors)
        .with_target(false)
        .with_timer(OffsetTime::new(
            offset,
            format_description!("[hour]:[minute]:[second]"),
        ))
        .with_filter(env_filter());

    let r = tracing_subscriber::registry();

    let r = r.with(if !console::user_attended() {
        Some(full_fmt_layer)
    } else {
        None
    });
    let r = r.with(if console::user_attended() {
        Some(compact_fmt_layer)
    } else {
        None
    });

    r.init();
}
