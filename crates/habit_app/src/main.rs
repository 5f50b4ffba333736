use habit_app::app::{init_logging, run, AppConfig};

fn main() {
    init_logging();
    let config = AppConfig::from_env().unwrap_or_default();
    if let Err(err) = run(config) {
        tracing::error!(%err, "habit dashboard failed");
        eprintln!("Failed to build habit dashboard: {err:#}");
        std::process::exit(1);
    }
}
