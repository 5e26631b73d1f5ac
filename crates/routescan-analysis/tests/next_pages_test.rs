//! Next.js Pages Router extraction: method inference from the dispatcher
//! body and URL derivation rules.

use std::fs;
use std::path::Path;

use routescan_analysis::{ExtractorOptions, NextPagesExtractor, RouteExtractor};
use routescan_core::types::{HttpMethod, RouteOrigin};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tsconfig.json", "{}");
    dir
}

fn extract(dir: &TempDir) -> Vec<routescan_core::types::Route> {
    NextPagesExtractor::new(ExtractorOptions::default())
        .extract(dir.path())
        .unwrap()
}

/// Equality comparisons against `req.method` yield one route per method.
#[test]
fn multi_method_dispatcher() {
    let dir = workspace();
    write(
        dir.path(),
        "pages/api/items.ts",
        r#"export default function handler(req, res) {
  if (req.method === 'GET') { res.status(200).json([]); }
  if (req.method === 'POST') { res.status(201).end(); }
  res.status(405).end();
}
"#,
    );

    let routes = extract(&dir);
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].method, HttpMethod::Get);
    assert_eq!(routes[1].method, HttpMethod::Post);
    for route in &routes {
        assert_eq!(route.path, "/api/items");
        assert_eq!(route.origin, RouteOrigin::NextPage);
    }
}

/// `switch (req.method)` cases are recognized, and catch-all files convert
/// their segment.
#[test]
fn switch_dispatch_on_catch_all() {
    let dir = workspace();
    write(
        dir.path(),
        "pages/api/blog/[...slug].ts",
        r#"export default function handler(req, res) {
  switch (req.method) {
    case 'GET':
      return res.json({});
    case 'DELETE':
      return res.status(204).end();
    default:
      return res.status(405).end();
  }
}
"#,
    );

    let routes = extract(&dir);
    let methods: Vec<HttpMethod> = routes.iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
    assert!(routes.iter().all(|r| r.path == "/api/blog/:slug*"));
}

/// `pages/api/index.ts` maps to `/api`.
#[test]
fn index_file_maps_to_api_root() {
    let dir = workspace();
    write(
        dir.path(),
        "pages/api/index.ts",
        r#"export default function handler(req, res) {
  if (req.method === 'GET') { res.json({ ok: true }); }
}
"#,
    );

    let routes = extract(&dir);
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].path, "/api");
}

/// The dispatcher may be a named `handler` export or a default-exported
/// identifier; the first parameter name is honored in method checks.
#[test]
fn dispatcher_forms() {
    let dir = workspace();
    write(
        dir.path(),
        "pages/api/named.ts",
        r#"export function handler(request, res) {
  if (request.method === 'PUT') { res.end(); }
}
"#,
    );
    write(
        dir.path(),
        "pages/api/indirect.ts",
        r#"const impl = (r, res) => {
  if (r.method === 'PATCH') { res.end(); }
};
export default impl;
"#,
    );

    let routes = extract(&dir);
    let mut summary: Vec<(String, String)> = routes
        .iter()
        .map(|r| (r.method.to_string(), r.path.clone()))
        .collect();
    summary.sort();
    assert_eq!(
        summary,
        vec![
            ("PATCH".to_string(), "/api/indirect".to_string()),
            ("PUT".to_string(), "/api/named".to_string()),
        ]
    );
}

/// An exported `methods` array declares accepted methods without body
/// inspection.
#[test]
fn methods_array_export() {
    let dir = workspace();
    write(
        dir.path(),
        "pages/api/upload.ts",
        r#"export const methods = ['POST'];
export default function handler(req, res) { res.end(); }
"#,
    );

    let routes = extract(&dir);
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].method, HttpMethod::Post);
}

/// A dispatcher with no recognizable method dispatch is omitted rather than
/// guessed at.
#[test]
fn ambiguous_dispatcher_yields_nothing() {
    let dir = workspace();
    write(
        dir.path(),
        "pages/api/any.ts",
        "export default function handler(req, res) { res.end(); }\n",
    );

    assert!(extract(&dir).is_empty());
}

/// POST bodies are inferred from `.parse` on a visible schema, same as the
/// App Router.
#[test]
fn body_inference_in_pages_handler() {
    let dir = workspace();
    write(
        dir.path(),
        "pages/api/users.ts",
        r#"import { z } from "zod";
const createUser = z.object({ email: z.string(), admin: z.boolean() });
export default function handler(req, res) {
  if (req.method === 'POST') {
    const input = createUser.parse(req.body);
    res.json(input);
  }
}
"#,
    );

    let routes = extract(&dir);
    assert_eq!(routes.len(), 1);
    assert_eq!(
        routes[0].body.as_deref(),
        Some(r#"{"email":"string","admin":false}"#)
    );
}

/// tRPC adapter files under pages/api are adapters, not endpoints.
#[test]
fn skips_trpc_adapter() {
    let dir = workspace();
    write(
        dir.path(),
        "pages/api/trpc/[trpc].ts",
        r#"import { createNextApiHandler } from "@trpc/server/adapters/next";
export default createNextApiHandler({});
"#,
    );

    assert!(extract(&dir).is_empty());
}
