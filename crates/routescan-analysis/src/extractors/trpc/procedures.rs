//! Builder-chain analysis for tRPC procedures.

use serde::Serialize;
use tree_sitter::Node;

use crate::ast;

/// Procedure kind recovered from the terminal chain link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrpcMethod {
    Query,
    Mutation,
    Subscription,
}

/// Visibility tag derived from the chain's base identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Admin,
    Unknown,
}

/// What a builder chain declared, with AST references for later schema
/// interpretation.
#[derive(Debug, Clone)]
pub struct ProcedureChain<'t> {
    pub method: TrpcMethod,
    pub visibility: Visibility,
    pub input_schema: Option<Node<'t>>,
    pub has_input: bool,
    pub has_output: bool,
    pub handler: Option<Node<'t>>,
}

/// Walk a builder chain from the outermost call inward. `None` when no
/// `query`/`mutation`/`subscription` link is found: the property is not a
/// procedure.
pub fn analyze<'t>(expr: Node<'t>, src: &str) -> Option<ProcedureChain<'t>> {
    let mut current = ast::unwrap_expression(expr);
    let mut method = None;
    let mut input_schema = None;
    let mut has_input = false;
    let mut has_output = false;
    let mut handler = None;

    loop {
        let Some((receiver, property, arguments)) = ast::member_call(current, src) else {
            break;
        };
        let arguments = ast::call_arguments(arguments);
        match property {
            "input" => {
                has_input = true;
                if input_schema.is_none() {
                    input_schema = arguments.first().copied();
                }
            }
            "output" => has_output = true,
            "query" => {
                method.get_or_insert(TrpcMethod::Query);
                capture_handler(&mut handler, arguments.first().copied());
            }
            "mutation" => {
                method.get_or_insert(TrpcMethod::Mutation);
                capture_handler(&mut handler, arguments.first().copied());
            }
            "subscription" => {
                method.get_or_insert(TrpcMethod::Subscription);
                capture_handler(&mut handler, arguments.first().copied());
            }
            // `.use(middleware)`, `.meta({...})` and friends pass through.
            _ => {}
        }
        current = ast::unwrap_expression(receiver);
    }

    Some(ProcedureChain {
        method: method?,
        visibility: visibility_of(current, src),
        input_schema,
        has_input,
        has_output,
        handler,
    })
}

fn capture_handler<'t>(slot: &mut Option<Node<'t>>, arg: Option<Node<'t>>) {
    if slot.is_some() {
        return;
    }
    if let Some(node) = arg.map(ast::unwrap_expression) {
        if ast::is_function_like(node) {
            *slot = Some(node);
        }
    }
}

/// The base identifier of the chain names the procedure's visibility.
fn visibility_of(base: Node<'_>, src: &str) -> Visibility {
    let name = match base.kind() {
        "identifier" => ast::text(base, src),
        "member_expression" => base
            .child_by_field_name("property")
            .map(|p| ast::text(p, src))
            .unwrap_or(""),
        _ => return Visibility::Unknown,
    };
    match name {
        "publicProcedure" => Visibility::Public,
        "privateProcedure" => Visibility::Private,
        "protectedProcedure" => Visibility::Protected,
        "adminProcedure" => Visibility::Admin,
        _ => Visibility::Unknown,
    }
}
