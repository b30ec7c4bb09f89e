mod cli;
mod context;
mod methods;


use std::sync::Arc;

use lantern_common::LanternError;
use lantern_config::LanternConfig;
use lantern_rpc::{DecodeLimits, RpcService};
use lantern_window::{HeadlessBackend, WindowTemplate};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::context::WindowService;

fn init_logging(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    match directive.parse::<Directive>() {
        Ok(d) => filter = filter.add_directive(d),
        Err(_) => {
            if let Ok(d) = lantern_config::LogLevel::Info.directive().parse::<Directive>() {
                filter = filter.add_directive(d);
            }
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn window_backend(config: &LanternConfig) -> HeadlessBackend {
    let template = WindowTemplate {
        title: config.window.title.clone(),
        width: config.window.width,
        height: config.window.height,
        url: config.window.url.clone(),
    };
    let backend = HeadlessBackend::new(template);
    match config.window.max_windows {
        0 => backend,
        limit => backend.with_max_windows(limit as usize),
    }
}

async fn run(config: LanternConfig) -> lantern_common::Result<()> {
    let service = Arc::new(WindowService::new(window_backend(&config)));
    let table =
        methods::method_table(&service).map_err(|e| LanternError::Server(e.to_string()))?;
    tracing::info!("Method table ready ({} methods)", table.len());

    let rpc = Arc::new(RpcService::new(table).with_limits(DecodeLimits {
        max_depth: config.server.max_value_depth as usize,
    }));
    let router = lantern_rpc::router(rpc, config.server.max_body_bytes as usize);

    let listener = lantern_rpc::bind(&config.server.bind_addr())
        .await
        .map_err(|e| LanternError::Server(e.to_string()))?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Initiating graceful shutdown");
    };
    let served = lantern_rpc::serve(listener, router, shutdown).await;

    service.shutdown();
    tracing::info!("Graceful shutdown complete");
    served.map_err(|e| LanternError::Server(e.to_string()))
}

fn load_config(args: &Args) -> (LanternConfig, Option<String>) {
    let (mut config, warning) = match lantern_config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (LanternConfig::default(), Some(e.to_string())),
    };
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = u32::from(port);
    }
    (config, warning)
}

#[tokio::main]
async fn main() {
    let args = cli::parse();
    let (config, config_warning) = load_config(&args);

    if args.print_config {
        println!("{}", lantern_config::config_to_json(&config));
        return;
    }

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    init_logging(&directive);

    tracing::info!("Lantern v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = config_warning {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if let Err(e) = run(config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
