use std::process::ExitCode;

use statoo::app::App;
use statoo::check::report;
use statoo::config::args;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("STATOO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let config = match args::parse_from(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(config, std::io::stdout());
    match app.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("check failed: {err:?}");
            eprintln!("{}", report(&err));
            ExitCode::FAILURE
        }
    }
}
