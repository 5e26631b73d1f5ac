//! Router-composition resolution over the mount graph.
//!
//! Routers are nodes, mounts are parent→child edges labeled with the
//! property name. Each router's fully-qualified dotted path is computed by a
//! depth-first walk with an in-progress set; an edge pointing back into an
//! ancestor returns the current node's own name without descending, so
//! cycles yield a stable, non-prefixed path instead of an error.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use routescan_core::types::collections::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

/// A named reference from a parent router to a child router.
#[derive(Debug, Clone, Serialize)]
pub struct RouterMountEdge {
    /// Enclosing router's declared identifier.
    pub parent: String,
    /// Key under which the child was mounted.
    pub property: String,
    /// Identifier expression the child was referenced by.
    pub target: String,
}

/// Presentational router name: strip a trailing `Router`, lowercase the
/// first letter. May be empty for degenerate identifiers.
pub fn normalize_router_name(identifier: &str) -> String {
    let stripped = identifier.strip_suffix("Router").unwrap_or(identifier);
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Name derivation with fallbacks: normalized identifier, else the file's
/// basename, else the containing directory's basename, else the raw
/// identifier.
pub fn derive_router_name(identifier: &str, file_rel: &str) -> String {
    let normalized = normalize_router_name(identifier);
    if !normalized.is_empty() {
        return normalized;
    }
    let mut components = file_rel.rsplit('/');
    if let Some(file) = components.next() {
        let stem = file.rsplit_once('.').map(|(s, _)| s).unwrap_or(file);
        let from_stem = normalize_router_name(stem);
        if !from_stem.is_empty() {
            return from_stem;
        }
    }
    if let Some(dir) = components.next() {
        let from_dir = normalize_router_name(dir);
        if !from_dir.is_empty() {
            return from_dir;
        }
    }
    identifier.to_string()
}

/// The mount graph of one parse invocation.
pub struct MountGraph {
    graph: DiGraph<String, String>,
    /// Declared and normalized names both index the same node.
    index: FxHashMap<String, NodeIndex>,
}

impl MountGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: FxHashMap::default(),
        }
    }

    /// Register a router by declared identifier. Idempotent.
    pub fn add_router(&mut self, declared: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(declared) {
            return idx;
        }
        let idx = self.graph.add_node(declared.to_string());
        self.index.insert(declared.to_string(), idx);
        let normalized = normalize_router_name(declared);
        if !normalized.is_empty() {
            self.index.entry(normalized).or_insert(idx);
        }
        idx
    }

    /// Add a mount edge. The child is looked up by the declared target, the
    /// normalized target, the property label, then the normalized property;
    /// an unresolvable target is logged and dropped.
    pub fn add_mount(&mut self, edge: &RouterMountEdge) {
        let Some(&parent) = self.index.get(&edge.parent) else {
            debug!("mount edge from unknown router {}", edge.parent);
            return;
        };
        let child = self
            .index
            .get(&edge.target)
            .or_else(|| self.index.get(&normalize_router_name(&edge.target)))
            .or_else(|| self.index.get(&edge.property))
            .or_else(|| self.index.get(&normalize_router_name(&edge.property)))
            .copied();
        match child {
            Some(child) => {
                self.graph.add_edge(parent, child, edge.property.clone());
            }
            None => {
                debug!(
                    "dangling mount {}.{} -> {}",
                    edge.parent, edge.property, edge.target
                );
            }
        }
    }

    /// Fully-qualified dotted path for every router, keyed by declared
    /// identifier. Roots resolve to the empty string.
    pub fn resolve_paths(&self) -> FxHashMap<String, String> {
        let mut memo: FxHashMap<NodeIndex, String> = FxHashMap::default();
        for idx in self.graph.node_indices() {
            let mut in_progress = FxHashSet::default();
            self.resolve(idx, &mut memo, &mut in_progress);
        }
        self.graph
            .node_indices()
            .map(|idx| (self.graph[idx].clone(), memo[&idx].clone()))
            .collect()
    }

    fn resolve(
        &self,
        idx: NodeIndex,
        memo: &mut FxHashMap<NodeIndex, String>,
        in_progress: &mut FxHashSet<NodeIndex>,
    ) -> String {
        if let Some(path) = memo.get(&idx) {
            return path.clone();
        }
        if !in_progress.insert(idx) {
            debug!("cycle in router composition at {}", self.graph[idx]);
            return normalize_router_name(&self.graph[idx]);
        }

        // Multiple incoming edges tie-break on source-scan order.
        let incoming = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .min_by_key(|e| e.id());
        let path = match incoming {
            None => String::new(),
            Some(edge) => {
                let parent = self.resolve(edge.source(), memo, in_progress);
                if parent.is_empty() {
                    edge.weight().clone()
                } else {
                    format!("{parent}.{}", edge.weight())
                }
            }
        };

        in_progress.remove(&idx);
        memo.insert(idx, path.clone());
        path
    }
}

impl Default for MountGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(parent: &str, property: &str, target: &str) -> RouterMountEdge {
        RouterMountEdge {
            parent: parent.to_string(),
            property: property.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn name_normalization() {
        assert_eq!(normalize_router_name("userRouter"), "user");
        assert_eq!(normalize_router_name("AppRouter"), "app");
        assert_eq!(normalize_router_name("router"), "router");
        assert_eq!(normalize_router_name("Router"), "");
    }

    #[test]
    fn derive_falls_back_to_file() {
        assert_eq!(derive_router_name("Router", "server/routers/posts.ts"), "posts");
        assert_eq!(derive_router_name("userRouter", "x/y.ts"), "user");
    }

    #[test]
    fn simple_chain_resolves() {
        let mut graph = MountGraph::new();
        graph.add_router("appRouter");
        graph.add_router("userRouter");
        graph.add_router("settingsRouter");
        graph.add_mount(&edge("appRouter", "user", "userRouter"));
        graph.add_mount(&edge("userRouter", "settings", "settingsRouter"));

        let paths = graph.resolve_paths();
        assert_eq!(paths["appRouter"], "");
        assert_eq!(paths["userRouter"], "user");
        assert_eq!(paths["settingsRouter"], "user.settings");
    }

    #[test]
    fn orphan_resolves_to_empty() {
        let mut graph = MountGraph::new();
        graph.add_router("loneRouter");
        let paths = graph.resolve_paths();
        assert_eq!(paths["loneRouter"], "");
    }

    #[test]
    fn tie_break_uses_first_edge() {
        let mut graph = MountGraph::new();
        graph.add_router("appRouter");
        graph.add_router("adminRouter");
        graph.add_router("userRouter");
        graph.add_mount(&edge("appRouter", "user", "userRouter"));
        graph.add_mount(&edge("adminRouter", "impersonated", "userRouter"));

        let paths = graph.resolve_paths();
        assert_eq!(paths["userRouter"], "user");
    }

    #[test]
    fn cycle_is_tolerated() {
        let mut graph = MountGraph::new();
        graph.add_router("aRouter");
        graph.add_router("bRouter");
        graph.add_mount(&edge("aRouter", "b", "bRouter"));
        graph.add_mount(&edge("bRouter", "a", "aRouter"));

        let paths = graph.resolve_paths();
        // Stable, non-prefixed names; no panic, no infinite recursion.
        assert!(paths["aRouter"].ends_with('a'));
        assert!(paths["bRouter"].contains('b'));
    }

    #[test]
    fn dangling_target_is_dropped() {
        let mut graph = MountGraph::new();
        graph.add_router("appRouter");
        graph.add_mount(&edge("appRouter", "ghost", "ghostRouter"));
        let paths = graph.resolve_paths();
        assert_eq!(paths.len(), 1);
    }
}
