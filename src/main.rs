use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::response::Response;
use axum::routing::any;
use clap::Parser;
use profile_feed::config::cli::CliArgs;
use profile_feed::utils::logger;
use profile_feed::{EnvIdentity, InboundRequest, RequestRouter, Settings};
use std::sync::Arc;

async fn dispatch(State(router): State<Arc<RequestRouter>>, request: Request) -> Response {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost")
        .to_string();
    let url = format!("http://{}{}", host, request.uri());
    let inbound = InboundRequest::new(request.method().clone(), url);

    let outbound = router.handle(&inbound).await;

    let mut response = Response::new(Body::from(outbound.body));
    *response.status_mut() = outbound.status;
    *response.headers_mut() = outbound.headers;
    response
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting profile-feed");

    let settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if args.verbose {
        tracing::debug!("Settings: {:?}", settings);
    }

    let router = match RequestRouter::from_settings(settings, Arc::new(EnvIdentity)) {
        Ok(router) => Arc::new(router),
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let app = axum::Router::new()
        .route("/", any(dispatch))
        .with_state(router);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    tracing::info!("🚀 Listening on http://{}", args.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
