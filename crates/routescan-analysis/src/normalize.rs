//! Projection of internal parser records onto the public `Route` shape.
//!
//! Rules: normalize the path once more, drop empty `headers`/`query`/`body`,
//! format `name = "METHOD path"`, keep `filePath` absolute.

use std::collections::BTreeMap;

use routescan_core::types::{HttpMethod, Route, RouteOrigin};
use serde_json::Value;

use crate::extractors::next_common::NextHandlerRecord;
use crate::extractors::trpc::procedures::TrpcMethod;
use crate::extractors::trpc::{TrpcProcedure, TRPC_MOUNT_PATH};
use crate::patterns::segments;

pub fn next_record(record: &NextHandlerRecord, origin: RouteOrigin) -> Route {
    let path = segments::normalize_path(&record.route_path);
    Route {
        name: format!("{} {}", record.method, path),
        method: record.method,
        path,
        file_path: record.file.to_string_lossy().into_owned(),
        origin,
        headers: none_if_empty(record.headers.clone()),
        query: none_if_empty(record.query_params.clone()),
        body: if record.method.carries_body() {
            record.body_example.clone()
        } else {
            None
        },
    }
}

pub fn trpc_procedure(procedure: &TrpcProcedure) -> Route {
    let raw = if procedure.router.is_empty() {
        format!("{TRPC_MOUNT_PATH}/{}", procedure.procedure)
    } else {
        format!("{TRPC_MOUNT_PATH}/{}.{}", procedure.router, procedure.procedure)
    };
    let path = segments::normalize_path(&raw);
    let method = match procedure.method {
        TrpcMethod::Mutation => HttpMethod::Post,
        TrpcMethod::Query | TrpcMethod::Subscription => HttpMethod::Get,
    };
    let (body, query) = match method {
        HttpMethod::Post => (procedure.body_example.clone(), None),
        _ => (
            None,
            procedure.body_example.as_deref().and_then(project_query),
        ),
    };
    Route {
        name: format!("{method} {path}"),
        method,
        path,
        file_path: procedure.file.clone(),
        origin: RouteOrigin::Trpc,
        headers: none_if_empty(procedure.headers.clone()),
        query,
        body,
    }
}

/// Project a body example onto query parameters: each top-level key whose
/// value is a primitive becomes a string-valued entry; object- and
/// array-valued keys are dropped.
fn project_query(body: &str) -> Option<BTreeMap<String, String>> {
    let Ok(Value::Object(map)) = serde_json::from_str(body) else {
        return None;
    };
    let mut out = BTreeMap::new();
    for (key, value) in map {
        let rendered = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => continue,
        };
        out.insert(key, rendered);
    }
    (!out.is_empty()).then_some(out)
}

fn none_if_empty(map: BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    (!map.is_empty()).then_some(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_projection_keeps_primitives_only() {
        let query = project_query(r#"{"limit":0,"q":"string","nested":{"a":1},"ids":[1]}"#).unwrap();
        assert_eq!(query.get("limit").map(String::as_str), Some("0"));
        assert_eq!(query.get("q").map(String::as_str), Some("string"));
        assert!(!query.contains_key("nested"));
        assert!(!query.contains_key("ids"));
    }

    #[test]
    fn query_projection_of_all_objects_is_none() {
        assert!(project_query(r#"{"nested":{"a":1}}"#).is_none());
        assert!(project_query("[1,2]").is_none());
    }
}
