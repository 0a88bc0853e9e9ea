use env_logger::{Builder, Env};

/// Initializes the process-wide logger: second timestamps, no module
/// path, `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
