//! Conversion between API Gateway / Function URL proxy events and the router types.

use crate::domain::model::{InboundRequest, OutboundResponse};
use serde_json::{json, Map, Value};

fn header<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    event
        .get("headers")
        .and_then(Value::as_object)?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| value.as_str())
}

/// Accepts both payload v2 (`requestContext.http`) and v1 (`httpMethod`) events.
pub fn to_inbound(event: &Value) -> InboundRequest {
    let method = event
        .pointer("/requestContext/http/method")
        .or_else(|| event.get("httpMethod"))
        .and_then(Value::as_str)
        .and_then(|m| http::Method::from_bytes(m.as_bytes()).ok())
        .unwrap_or(http::Method::GET);

    let path = event
        .get("rawPath")
        .or_else(|| event.get("path"))
        .and_then(Value::as_str)
        .unwrap_or("/");
    let query = event
        .get("rawQueryString")
        .and_then(Value::as_str)
        .filter(|q| !q.is_empty());
    let host = header(event, "host")
        .or_else(|| {
            event
                .pointer("/requestContext/domainName")
                .and_then(Value::as_str)
        })
        .unwrap_or("localhost");

    let url = match query {
        Some(query) => format!("https://{}{}?{}", host, path, query),
        None => format!("https://{}{}", host, path),
    };

    InboundRequest::new(method, url)
}

pub fn to_proxy_response(response: OutboundResponse) -> Value {
    let headers: Map<String, Value> = response
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), Value::String(v.to_string())))
        })
        .collect();

    json!({
        "statusCode": response.status.as_u16(),
        "headers": headers,
        "body": String::from_utf8_lossy(&response.body),
        "isBase64Encoded": false,
    })
}
