use crate::config::{Cli, ServerConfig};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use clap::Parser;
use tracing::{error, info, info_span, warn};

mod config;
mod domain;
mod errors;
mod handlers;
mod model;
mod responses;
mod router;
mod state;
mod telemetry;


fn main() {
    // 1️⃣ Resolve configuration (flags, then env, then defaults)
    let config = match ServerConfig::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    telemetry::init(config.debug);

    let addr = config.addr;
    let workers = config.workers;
    let state = AppState::new(config);

    info!(
        model_path = %state.models.path().display(),
        model_present = state.models.model_present(),
        policy = ?state.models.policy(),
        "model location resolved"
    );
    if !state.models.model_present() {
        warn!("model file is missing; predictions will fail until it is in place");
    }

    // 2️⃣ Start the server
    info!(%addr, workers, "starting server at http://{addr}");
    let server = Server::bind(&addr).max_workers(workers);

    // 3️⃣ Serve requests, passing the state into the closure
    let result = server.serve(move |req: astra::Request, _info| {
        let span = info_span!("request", method = %req.method(), path = %req.uri().path());
        let _guard = span.enter();

        match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => {
                let status = err.status();
                if status >= 500 {
                    error!(status, error = %err, "request failed");
                } else {
                    warn!(status, error = %err, "request rejected");
                }
                error_to_response(err)
            }
        }
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
        std::process::exit(1);
    }

    info!("server shut down cleanly");
}
