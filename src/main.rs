use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use neuroboost::Storage;

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .init();
}

fn main() -> glib::ExitCode {
    init_tracing();

    let storage = match Storage::open_default() {
        Ok(storage) => storage,
        Err(err) => {
            tracing::error!("cannot locate a data directory: {err}");
            return glib::ExitCode::FAILURE;
        }
    };
    tracing::info!(path = %storage.root().display(), "using data directory");

    neuroboost::ui::app::run(storage)
}
