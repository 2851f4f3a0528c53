use std::sync::Arc;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use service::auth::TracingNavigator;
use service::health::api_status;
use service::AppContext;

fn init_logging() {
    // .env first so RUST_LOG applies
    dotenv().ok();
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
    info!(service = "status", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let run_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    let cfg = match configs::ClientConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "status", event = "config_invalid", error = %e, "failed to load client config");
            return std::process::ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "status", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "status", event = "start", %run_id, version, base_url = %cfg.api.base_url, "probing backend");

    rt.block_on(async move {
        let ctx = match AppContext::from_config(&cfg, Arc::new(TracingNavigator)).await {
            Ok(ctx) => ctx,
            Err(e) => {
                error!(service = "status", event = "context_failed", error = %e, "failed to open session storage");
                return std::process::ExitCode::FAILURE;
            }
        };

        let status = api_status(&ctx.api).await;
        println!("{status}");
        info!(
            service = "status",
            event = "done",
            %run_id,
            authenticated = ctx.auth.is_authenticated().await,
            "backend probe finished"
        );
        std::process::ExitCode::SUCCESS
    })
}
