#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use profile_feed::adapters::lambda_event::{to_inbound, to_proxy_response};
#[cfg(feature = "lambda")]
use profile_feed::config::lambda::settings_from_env;
#[cfg(feature = "lambda")]
use profile_feed::utils::logger;
#[cfg(feature = "lambda")]
use profile_feed::{EnvIdentity, RequestRouter};
#[cfg(feature = "lambda")]
use serde_json::Value;
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn function_handler(
    router: Arc<RequestRouter>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let inbound = to_inbound(&event.payload);
    let response = router.handle(&inbound).await;

    // Lambda 在回傳後會凍結執行環境，先等背景快取寫入完成
    let flushed = router.background().drain().await;
    if flushed > 0 {
        tracing::debug!("Flushed {} background task(s)", flushed);
    }

    Ok(to_proxy_response(response))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let settings = settings_from_env().map_err(|e| Box::new(e) as Error)?;
    let router = Arc::new(
        RequestRouter::from_settings(settings, Arc::new(EnvIdentity))
            .map_err(|e| Box::new(e) as Error)?,
    );
    tracing::info!("Starting profile-feed Lambda function");

    run(service_fn(move |event: LambdaEvent<Value>| {
        function_handler(router.clone(), event)
    }))
    .await
}
