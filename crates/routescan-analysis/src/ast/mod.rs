//! Syntactic navigation over tree-sitter TypeScript/JavaScript trees.
//!
//! All helpers are read-only and operate on `(node, source)` pairs. They
//! recognize shapes, never evaluate: anything dynamic yields `None` and the
//! caller omits the corresponding output.

use serde_json::Value;
use tree_sitter::Node;

/// Source text covered by a node.
pub fn text<'a>(node: Node<'_>, src: &'a str) -> &'a str {
    &src[node.byte_range()]
}

/// 1-based line of the node start.
pub fn line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// Number of source lines the node spans.
pub fn line_span(node: Node<'_>) -> u32 {
    (node.end_position().row - node.start_position().row) as u32 + 1
}

/// Named children of a node, in order.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Pre-order walk of a subtree.
pub fn walk_tree<'t, F: FnMut(Node<'t>)>(node: Node<'t>, f: &mut F) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_tree(child, f);
    }
}

/// Strip wrapper nodes that carry no runtime meaning: parentheses, `as` and
/// `satisfies` casts, non-null assertions, `await`.
pub fn unwrap_expression(mut node: Node<'_>) -> Node<'_> {
    loop {
        match node.kind() {
            "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression"
            | "await_expression" => match node.named_child(0) {
                Some(inner) => node = inner,
                None => return node,
            },
            _ => return node,
        }
    }
}

/// Literal value of a string, or of a template string with no substitutions.
pub fn string_value(node: Node<'_>, src: &str) -> Option<String> {
    match node.kind() {
        "string" => {
            let mut out = String::new();
            for child in named_children(node) {
                match child.kind() {
                    "string_fragment" | "escape_sequence" => out.push_str(text(child, src)),
                    _ => {}
                }
            }
            Some(out)
        }
        "template_string" => {
            let children = named_children(node);
            if children.iter().any(|c| c.kind() == "template_substitution") {
                return None;
            }
            let raw = text(node, src);
            Some(raw.trim_matches('`').to_string())
        }
        _ => None,
    }
}

fn number_value(raw: &str) -> Option<Value> {
    let cleaned = raw.replace('_', "");
    if let Ok(n) = cleaned.parse::<i64>() {
        return Some(Value::from(n));
    }
    cleaned.parse::<f64>().ok().and_then(|f| {
        serde_json::Number::from_f64(f).map(Value::Number)
    })
}

/// JSON value of a primitive literal expression, `None` for anything computed.
pub fn literal_value(node: Node<'_>, src: &str) -> Option<Value> {
    let node = unwrap_expression(node);
    match node.kind() {
        "string" | "template_string" => string_value(node, src).map(Value::String),
        "number" => number_value(text(node, src)),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        "unary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            let argument = node.child_by_field_name("argument")?;
            if text(operator, src) == "-" && argument.kind() == "number" {
                number_value(&format!("-{}", text(argument, src)))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Property key of an object-literal pair: identifier or string form.
pub fn pair_key(pair: Node<'_>, src: &str) -> Option<String> {
    let key = pair.child_by_field_name("key")?;
    match key.kind() {
        "property_identifier" | "identifier" => Some(text(key, src).to_string()),
        "string" => string_value(key, src),
        _ => None,
    }
}

/// Whether a node is a function-valued expression or declaration.
pub fn is_function_like(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "arrow_function"
            | "function_expression"
            | "function"
            | "function_declaration"
            | "generator_function"
            | "generator_function_declaration"
    )
}

/// Name of the first parameter of a function-like node, if it is a plain
/// identifier (destructured parameters yield `None`).
pub fn first_parameter_name(node: Node<'_>, src: &str) -> Option<String> {
    if let Some(single) = node.child_by_field_name("parameter") {
        return Some(text(single, src).to_string());
    }
    let params = node.child_by_field_name("parameters")?;
    let first = named_children(params).into_iter().next()?;
    let pattern = match first.kind() {
        "identifier" => first,
        "required_parameter" | "optional_parameter" => first.child_by_field_name("pattern")?,
        _ => return None,
    };
    (pattern.kind() == "identifier").then(|| text(pattern, src).to_string())
}

/// For `receiver.prop(args)`: `(receiver, property name, arguments node)`.
pub fn member_call<'t, 'a>(node: Node<'t>, src: &'a str) -> Option<(Node<'t>, &'a str, Node<'t>)> {
    if node.kind() != "call_expression" {
        return None;
    }
    let callee = unwrap_expression(node.child_by_field_name("function")?);
    if callee.kind() != "member_expression" {
        return None;
    }
    let object = callee.child_by_field_name("object")?;
    let property = callee.child_by_field_name("property")?;
    let arguments = node.child_by_field_name("arguments")?;
    Some((object, text(property, src), arguments))
}

/// Named argument nodes of an `arguments` node.
pub fn call_arguments<'t>(arguments: Node<'t>) -> Vec<Node<'t>> {
    named_children(arguments)
        .into_iter()
        .filter(|n| n.kind() != "comment")
        .collect()
}

/// An exported binding discovered at the top level of a file.
#[derive(Debug, Clone)]
pub struct Export<'t> {
    /// Exported (public) name; `None` for anonymous default exports.
    pub name: Option<String>,
    /// Local identifier, when it differs or when the export is a specifier.
    pub local: Option<String>,
    /// Declaration, initializer, or specifier node.
    pub node: Node<'t>,
    pub is_default: bool,
    /// Module specifier for re-exports (`export { GET } from "./impl"`).
    pub source: Option<String>,
}

/// Collect every top-level export of a file, in source order.
pub fn collect_exports<'t>(root: Node<'t>, src: &str) -> Vec<Export<'t>> {
    let mut out = Vec::new();
    for stmt in named_children(root) {
        if stmt.kind() != "export_statement" {
            continue;
        }
        let is_default = {
            let mut cursor = stmt.walk();
            let has_default = stmt.children(&mut cursor).any(|c| c.kind() == "default");
            has_default
        };
        let source = stmt
            .child_by_field_name("source")
            .and_then(|n| string_value(n, src));

        if let Some(decl) = stmt.child_by_field_name("declaration") {
            match decl.kind() {
                "function_declaration"
                | "generator_function_declaration"
                | "class_declaration" => {
                    let name = decl
                        .child_by_field_name("name")
                        .map(|n| text(n, src).to_string());
                    out.push(Export {
                        local: name.clone(),
                        name,
                        node: decl,
                        is_default,
                        source: None,
                    });
                }
                "lexical_declaration" | "variable_declaration" => {
                    for declarator in named_children(decl) {
                        if declarator.kind() != "variable_declarator" {
                            continue;
                        }
                        let name = declarator
                            .child_by_field_name("name")
                            .filter(|n| n.kind() == "identifier")
                            .map(|n| text(n, src).to_string());
                        let node = declarator
                            .child_by_field_name("value")
                            .unwrap_or(declarator);
                        out.push(Export {
                            local: name.clone(),
                            name,
                            node,
                            is_default: false,
                            source: None,
                        });
                    }
                }
                _ => {}
            }
            continue;
        }

        // `export default <expr>;`
        if let Some(value) = stmt.child_by_field_name("value") {
            let local = (value.kind() == "identifier").then(|| text(value, src).to_string());
            out.push(Export {
                name: None,
                local,
                node: value,
                is_default: true,
                source: None,
            });
            continue;
        }

        // `export { A, B as C } [from "…"]`
        let mut cursor = stmt.walk();
        for clause in stmt.children(&mut cursor) {
            if clause.kind() != "export_clause" {
                continue;
            }
            for spec in named_children(clause) {
                if spec.kind() != "export_specifier" {
                    continue;
                }
                let local = spec
                    .child_by_field_name("name")
                    .map(|n| text(n, src).to_string());
                let exported = spec
                    .child_by_field_name("alias")
                    .map(|n| text(n, src).to_string())
                    .or_else(|| local.clone());
                out.push(Export {
                    name: exported,
                    local: local.clone(),
                    node: spec,
                    is_default: local.as_deref() == Some("default"),
                    source: source.clone(),
                });
            }
        }
    }
    out
}

/// Resolve an identifier to its top-level declaration within the same file.
/// Returns the initializer for `const x = …`, the declaration node for
/// functions and classes.
pub fn find_declaration<'t>(root: Node<'t>, name: &str, src: &str) -> Option<Node<'t>> {
    for stmt in named_children(root) {
        let decl = if stmt.kind() == "export_statement" {
            match stmt.child_by_field_name("declaration") {
                Some(d) => d,
                None => continue,
            }
        } else {
            stmt
        };
        match decl.kind() {
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration" => {
                if decl
                    .child_by_field_name("name")
                    .map(|n| text(n, src) == name)
                    .unwrap_or(false)
                {
                    return Some(decl);
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                for declarator in named_children(decl) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    let matches = declarator
                        .child_by_field_name("name")
                        .map(|n| n.kind() == "identifier" && text(n, src) == name)
                        .unwrap_or(false);
                    if matches {
                        return declarator
                            .child_by_field_name("value")
                            .map(unwrap_expression)
                            .or(Some(declarator));
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// The file's leading directive (`"use server"`, `"use client"`), if its
/// first non-comment statement is a string literal.
pub fn first_directive(root: Node<'_>, src: &str) -> Option<String> {
    for stmt in named_children(root) {
        match stmt.kind() {
            "comment" | "hash_bang_line" => continue,
            "expression_statement" => {
                let inner = named_children(stmt).into_iter().next()?;
                return string_value(inner, src);
            }
            _ => return None,
        }
    }
    None
}
