//! Validator-schema interpretation.
//!
//! Walks fluent builder chains (`z.object({…})`, `z.string()`, modifier
//! wrappers) and synthesizes a JSON example value. The builder DSL is open;
//! shapes are modeled as a small tagged set and anything outside it
//! terminates that sub-walk with "omit". Every emitted example is built as a
//! `serde_json::Value`, so serialization always yields valid JSON.

use serde_json::{Map, Value};
use tree_sitter::Node;

use crate::ast;

/// Tagged view of one link in a builder chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaTag {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Enum,
    Literal,
    Default,
    Optional,
    Nullable,
    Describe,
    Unknown,
}

fn tag_for(property: &str) -> SchemaTag {
    match property {
        "object" => SchemaTag::Object,
        "array" => SchemaTag::Array,
        "string" => SchemaTag::String,
        "number" => SchemaTag::Number,
        "boolean" => SchemaTag::Boolean,
        "enum" => SchemaTag::Enum,
        "literal" => SchemaTag::Literal,
        "default" => SchemaTag::Default,
        "optional" => SchemaTag::Optional,
        "nullable" => SchemaTag::Nullable,
        "describe" => SchemaTag::Describe,
        _ => SchemaTag::Unknown,
    }
}

/// Interpret a schema expression into an example value. `None` means the
/// shape was not recognized; callers omit the field rather than guessing.
pub fn interpret(expr: Node<'_>, src: &str) -> Option<Value> {
    let expr = ast::unwrap_expression(expr);
    let (receiver, property, arguments) = ast::member_call(expr, src)?;
    let arguments = ast::call_arguments(arguments);

    match tag_for(property) {
        SchemaTag::String => Some(Value::String("string".to_string())),
        SchemaTag::Number => Some(Value::from(0)),
        SchemaTag::Boolean => Some(Value::Bool(false)),
        SchemaTag::Literal => arguments
            .first()
            .and_then(|a| ast::literal_value(*a, src)),
        SchemaTag::Enum => enum_example(arguments.first().copied(), src),
        SchemaTag::Array => arguments
            .first()
            .and_then(|a| interpret(*a, src))
            .map(|inner| Value::Array(vec![inner])),
        SchemaTag::Object => object_example(arguments.first().copied(), src),
        // `.default(v)` emits v verbatim; a computed default falls back to
        // the wrapped schema's example.
        SchemaTag::Default => arguments
            .first()
            .and_then(|a| json_literal(*a, src))
            .or_else(|| interpret(receiver, src)),
        SchemaTag::Optional | SchemaTag::Nullable | SchemaTag::Describe => {
            interpret(receiver, src)
        }
        SchemaTag::Unknown => None,
    }
}

/// Interpret a schema reference: a builder chain directly, or an identifier
/// declared in the same file.
pub fn resolve_and_interpret(expr: Node<'_>, root: Node<'_>, src: &str) -> Option<Value> {
    let expr = ast::unwrap_expression(expr);
    if expr.kind() == "identifier" {
        let decl = ast::find_declaration(root, ast::text(expr, src), src)?;
        return interpret(decl, src);
    }
    interpret(expr, src)
}

/// Serialize the inferred example for `expr` as a JSON document.
pub fn extract_body_from_schema(expr: Node<'_>, root: Node<'_>, src: &str) -> Option<String> {
    resolve_and_interpret(expr, root, src).map(|v| v.to_string())
}

fn enum_example(arg: Option<Node<'_>>, src: &str) -> Option<Value> {
    let array = ast::unwrap_expression(arg?);
    if array.kind() != "array" {
        return None;
    }
    let first = ast::named_children(array).into_iter().next()?;
    ast::literal_value(first, src)
}

fn object_example(arg: Option<Node<'_>>, src: &str) -> Option<Value> {
    let object = ast::unwrap_expression(arg?);
    if object.kind() != "object" {
        return None;
    }
    let mut map = Map::new();
    for prop in ast::named_children(object) {
        if prop.kind() != "pair" {
            continue;
        }
        let Some(key) = ast::pair_key(prop, src) else {
            continue;
        };
        let Some(value) = prop.child_by_field_name("value") else {
            continue;
        };
        // Unrecognized sub-schemas drop the key, never substitute.
        if let Some(example) = interpret(value, src) {
            map.insert(key, example);
        }
    }
    Some(Value::Object(map))
}

/// JSON value of a literal expression tree: primitives plus object and array
/// literals whose leaves are themselves literals.
fn json_literal(node: Node<'_>, src: &str) -> Option<Value> {
    let node = ast::unwrap_expression(node);
    match node.kind() {
        "object" => {
            let mut map = Map::new();
            for prop in ast::named_children(node) {
                if prop.kind() != "pair" {
                    return None;
                }
                let key = ast::pair_key(prop, src)?;
                let value = json_literal(prop.child_by_field_name("value")?, src)?;
                map.insert(key, value);
            }
            Some(Value::Object(map))
        }
        "array" => {
            let mut items = Vec::new();
            for item in ast::named_children(node) {
                items.push(json_literal(item, src)?);
            }
            Some(Value::Array(items))
        }
        _ => ast::literal_value(node, src),
    }
}
