//! AWS Lambda handler for loan and savings calculations
//!
//! Accepts a calculation request (or an array of them) as the JSON body of a
//! Lambda Function URL invocation and returns the paginated result.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use credicalc::config::CalculatorConfig;
use credicalc::service::{handle_body, ServiceReply};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Function URL response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HttpResponse {
    status_code: u16,
    headers: BTreeMap<&'static str, &'static str>,
    body: String,
}

fn cors_headers() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
    ])
}

fn json_response(reply: &ServiceReply) -> HttpResponse {
    HttpResponse {
        status_code: reply.status,
        headers: cors_headers(),
        body: reply.body.to_string(),
    }
}

/// Shared config: `credicalc.json` beside the binary when present, else defaults
fn config() -> &'static CalculatorConfig {
    static CONFIG: OnceLock<CalculatorConfig> = OnceLock::new();
    CONFIG.get_or_init(|| match CalculatorConfig::load(None) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("falling back to default config: {}", e);
            CalculatorConfig::default()
        }
    })
}

async fn respond(request: LambdaFunctionUrlRequest) -> Result<HttpResponse, Error> {
    let start = std::time::Instant::now();

    // CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(HttpResponse {
            status_code: 200,
            headers: cors_headers(),
            body: String::new(),
        });
    }

    if request.is_base64_encoded {
        return Ok(json_response(&ServiceReply {
            status: 400,
            body: serde_json::json!({ "error": "request body must be JSON text" }),
        }));
    }

    // Batches fan out on rayon; keep that work off the async workers
    let body = request.body.unwrap_or_default();
    let reply = tokio::task::spawn_blocking(move || handle_body(&body, config())).await?;
    log::info!(
        "handled request: status={} elapsed_ms={}",
        reply.status,
        start.elapsed().as_millis()
    );

    Ok(json_response(&reply))
}

async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<HttpResponse, Error> {
    respond(event.payload).await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
