use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ログ出力を初期化（stderr、`RUST_LOG` があればそれを優先）
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "image_curator=debug" } else { "image_curator=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    // 二重初期化（テストなど）は無視
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
