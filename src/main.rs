use clap::Parser;
use tracing_subscriber::EnvFilter;

use build_cut::cli::{orchestration, Cli};
use build_cut::{ui, BuildCutError};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = orchestration::dispatch(cli) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(exit_code(&e));
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BuildCutError>()
        .map(BuildCutError::exit_code)
        .unwrap_or(1)
}
