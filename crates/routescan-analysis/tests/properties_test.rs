//! Universal properties every emitted route must satisfy, checked over a
//! mixed fixture plus generated inputs.

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use routescan_analysis::patterns::segments::{convert_segments, normalize_path};
use routescan_analysis::{extract_all_routes, ExtractorOptions};
use routescan_core::types::HttpMethod;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// One workspace exercising all three extractors.
fn mixed_workspace() -> TempDir {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tsconfig.json", "{}");
    write(
        dir.path(),
        "app/api/users/[id]/route.ts",
        r#"import { z } from "zod";
const schema = z.object({ name: z.string(), tags: z.array(z.string()) });
export async function POST(req: Request) {
  const body = schema.parse(await req.json());
  return Response.json(body);
}
export function GET() { return new Response() }
"#,
    );
    write(
        dir.path(),
        "pages/api/blog/[...slug].ts",
        r#"export default function handler(req, res) {
  switch (req.method) {
    case 'GET': return res.json({});
    case 'DELETE': return res.status(204).end();
  }
}
"#,
    );
    write(
        dir.path(),
        "server/routers.ts",
        r#"import { z } from "zod";
import { router, publicProcedure } from "./trpc";

const postRouter = router({
  byId: publicProcedure.input(z.object({ id: z.string() })).query(() => null),
  create: publicProcedure.input(z.object({ title: z.string() })).mutation(() => null),
});

export const appRouter = router({ post: postRouter });
"#,
    );
    dir
}

#[test]
fn paths_are_normalized_and_bracket_free() {
    let dir = mixed_workspace();
    let routes = extract_all_routes(dir.path(), &ExtractorOptions::default()).unwrap();
    assert!(!routes.is_empty());
    for route in &routes {
        assert!(route.path.starts_with('/'), "{}", route.path);
        assert!(!route.path.contains("//"), "{}", route.path);
        assert!(!route.path.contains('['), "{}", route.path);
        assert!(!route.path.contains(']'), "{}", route.path);
    }
}

#[test]
fn bodyless_methods_never_carry_a_body() {
    let dir = mixed_workspace();
    let routes = extract_all_routes(dir.path(), &ExtractorOptions::default()).unwrap();
    for route in &routes {
        if matches!(
            route.method,
            HttpMethod::Get | HttpMethod::Head | HttpMethod::Options | HttpMethod::Delete
        ) {
            assert!(route.body.is_none(), "{} carries a body", route.name);
        }
    }
}

#[test]
fn trpc_routes_are_json_under_mount_path() {
    let dir = mixed_workspace();
    let routes = extract_all_routes(dir.path(), &ExtractorOptions::default()).unwrap();
    let trpc: Vec<_> = routes
        .iter()
        .filter(|r| r.origin == routescan_core::types::RouteOrigin::Trpc)
        .collect();
    assert!(!trpc.is_empty());
    for route in trpc {
        assert!(route.path.starts_with("/api/trpc/"), "{}", route.path);
        assert_eq!(
            route.headers.as_ref().unwrap().get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }
}

#[test]
fn every_inferred_body_is_valid_json() {
    let dir = mixed_workspace();
    let routes = extract_all_routes(dir.path(), &ExtractorOptions::default()).unwrap();
    let mut bodies = 0;
    for route in &routes {
        if let Some(body) = &route.body {
            serde_json::from_str::<serde_json::Value>(body).unwrap();
            bodies += 1;
        }
    }
    assert!(bodies >= 2);
}

#[test]
fn extraction_is_deterministic() {
    let dir = mixed_workspace();
    let first = extract_all_routes(dir.path(), &ExtractorOptions::default()).unwrap();
    let second = extract_all_routes(dir.path(), &ExtractorOptions::default()).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn every_dynamic_segment_appears_once() {
    let dir = mixed_workspace();
    let routes = extract_all_routes(dir.path(), &ExtractorOptions::default()).unwrap();
    let user_routes: Vec<_> = routes
        .iter()
        .filter(|r| r.path.contains(":id"))
        .collect();
    assert!(!user_routes.is_empty());
    for route in user_routes {
        assert_eq!(route.path.matches(":id").count(), 1);
    }
}

proptest! {
    /// Normalized paths always start with `/`, contain no `//` runs, and
    /// only the root keeps a trailing slash.
    #[test]
    fn normalize_path_invariants(raw in "[a-z0-9/]{0,40}") {
        let normalized = normalize_path(&raw);
        prop_assert!(normalized.starts_with('/'));
        prop_assert!(!normalized.contains("//"));
        prop_assert!(normalized == "/" || !normalized.ends_with('/'));
    }

    /// Normalization is idempotent.
    #[test]
    fn normalize_path_idempotent(raw in "[a-z0-9/]{0,40}") {
        let once = normalize_path(&raw);
        prop_assert_eq!(normalize_path(&once), once);
    }

    /// Each bracket form converts to its colon form exactly once per
    /// segment, leaving no brackets behind.
    #[test]
    fn segment_conversion(name in "[a-z][a-z0-9]{0,8}", prefix in "[a-z]{1,6}") {
        let required = convert_segments(&format!("{prefix}/[{name}]"));
        prop_assert_eq!(required, format!("{prefix}/:{name}"));

        let catch_all = convert_segments(&format!("{prefix}/[...{name}]"));
        prop_assert_eq!(catch_all, format!("{prefix}/:{name}*"));

        let optional = convert_segments(&format!("{prefix}/[[...{name}]]"));
        prop_assert_eq!(optional, format!("{prefix}/:{name}?"));
    }
}
