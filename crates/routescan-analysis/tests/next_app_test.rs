//! Next.js App Router extraction: verb exports, dynamic segments, schema
//! bodies, and the skip rules.

use std::fs;
use std::path::Path;

use routescan_analysis::{ExtractorOptions, NextAppExtractor, RouteExtractor};
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
    NextAppExtractor::new(ExtractorOptions::default())
        .extract(dir.path())
        .unwrap()
}

/// A static route file with one exported GET handler yields exactly one
/// bare route.
#[test]
fn static_route_single_get_handler() {
    let dir = workspace();
    write(
        dir.path(),
        "app/api/health/route.ts",
        "export function GET() { return new Response() }\n",
    );

    let routes = extract(&dir);
    assert_eq!(routes.len(), 1);
    let route = &routes[0];
    assert_eq!(route.method, HttpMethod::Get);
    assert_eq!(route.path, "/api/health");
    assert_eq!(route.origin, RouteOrigin::NextApp);
    assert_eq!(route.name, "GET /api/health");
    assert!(route.headers.is_none());
    assert!(route.query.is_none());
    assert!(route.body.is_none());
    assert!(route.file_path.ends_with("app/api/health/route.ts"));
    assert!(Path::new(&route.file_path).is_absolute());
}

/// Dynamic segment conversion plus body inference from a schema passed to
/// `.parse`.
#[test]
fn dynamic_route_with_body_schema() {
    let dir = workspace();
    write(
        dir.path(),
        "app/api/users/[id]/route.ts",
        r#"import { z } from "zod";
const schema = z.object({ name: z.string(), age: z.number().optional() });
export async function POST(req: Request) {
  const body = schema.parse(await req.json());
  return Response.json(body);
}
"#,
    );

    let routes = extract(&dir);
    assert_eq!(routes.len(), 1);
    let route = &routes[0];
    assert_eq!(route.method, HttpMethod::Post);
    assert_eq!(route.path, "/api/users/:id");
    assert_eq!(route.body.as_deref(), Some(r#"{"name":"string","age":0}"#));
    assert_eq!(
        route.headers.as_ref().unwrap().get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

/// Catch-all and optional catch-all directories convert to `:x*` / `:x?`.
#[test]
fn catch_all_segments() {
    let dir = workspace();
    write(
        dir.path(),
        "app/api/files/[...path]/route.ts",
        "export function GET() {}\n",
    );
    write(
        dir.path(),
        "app/api/docs/[[...slug]]/route.ts",
        "export function GET() {}\n",
    );

    let routes = extract(&dir);
    let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
    assert!(paths.contains(&"/api/files/:path*"));
    assert!(paths.contains(&"/api/docs/:slug?"));
}

/// Verb-named arrow exports and re-exports both count as handlers.
#[test]
fn const_and_reexport_handlers() {
    let dir = workspace();
    write(
        dir.path(),
        "app/api/webhooks/route.ts",
        "export const POST = async (req: Request) => new Response();\n",
    );
    write(
        dir.path(),
        "app/api/legacy/route.ts",
        "export { GET } from \"../shared\";\n",
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
            ("GET".to_string(), "/api/legacy".to_string()),
            ("POST".to_string(), "/api/webhooks".to_string()),
        ]
    );
}

/// A `methods` string-array export declares one handler per listed verb.
#[test]
fn methods_array_export() {
    let dir = workspace();
    write(
        dir.path(),
        "app/api/batch/route.ts",
        "export const methods = [\"GET\", \"POST\"];\nexport const dynamic = \"force-dynamic\";\n",
    );

    let routes = extract(&dir);
    let methods: Vec<HttpMethod> = routes.iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);
    assert!(routes.iter().all(|r| r.path == "/api/batch"));
}

/// `searchParams.get` calls surface as string-typed query parameters.
#[test]
fn query_params_from_search_params() {
    let dir = workspace();
    write(
        dir.path(),
        "app/api/search/route.ts",
        r#"export function GET(req: Request) {
  const url = new URL(req.url);
  const q = url.searchParams.get("q");
  const page = url.searchParams.get("page");
  return Response.json({ q, page });
}
"#,
    );

    let routes = extract(&dir);
    let query = routes[0].query.as_ref().unwrap();
    assert_eq!(query.get("q").map(String::as_str), Some("string"));
    assert_eq!(query.get("page").map(String::as_str), Some("string"));
}

/// tRPC adapter files and layout route groups never produce Next.js routes.
#[test]
fn skips_adapters_and_route_groups() {
    let dir = workspace();
    write(
        dir.path(),
        "app/api/trpc/[trpc]/route.ts",
        r#"import { fetchRequestHandler } from "@trpc/server/adapters/fetch";
export function GET() {}
export function POST() {}
"#,
    );
    write(
        dir.path(),
        "app/(payload)/admin/[[...segments]]/route.ts",
        "export function GET() {}\n",
    );

    assert!(extract(&dir).is_empty());
}

/// An unrecognized schema omits the body instead of guessing.
#[test]
fn unknown_schema_omits_body() {
    let dir = workspace();
    write(
        dir.path(),
        "app/api/upload/route.ts",
        r#"const schema = makeCustomValidator();
export async function POST(req: Request) {
  const body = schema.parse(await req.json());
  return Response.json(body);
}
"#,
    );

    let routes = extract(&dir);
    assert_eq!(routes.len(), 1);
    assert!(routes[0].body.is_none());
    // The handler still parses JSON, so the content type is known.
    assert!(routes[0].headers.is_some());
}

/// Without a compiler config the parser reports zero routes; a missing root
/// is a caller error.
#[test]
fn tsconfig_gate_and_bad_root() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "app/api/health/route.ts",
        "export function GET() {}\n",
    );
    let routes = NextAppExtractor::new(ExtractorOptions::default())
        .extract(dir.path())
        .unwrap();
    assert!(routes.is_empty());

    let err = NextAppExtractor::new(ExtractorOptions::default())
        .extract(Path::new("/no/such/workspace"));
    assert!(err.is_err());
}

/// The `src/` prefix is transparent to URL derivation.
#[test]
fn src_prefix_is_stripped() {
    let dir = workspace();
    write(
        dir.path(),
        "src/app/api/ping/route.ts",
        "export function GET() {}\n",
    );
    let routes = extract(&dir);
    assert_eq!(routes[0].path, "/api/ping");
}
