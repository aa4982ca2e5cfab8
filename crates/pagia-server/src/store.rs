use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A step in a workflow. Nodes are opaque to the server — nothing here
/// executes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Skill the node would invoke, if any.
    #[serde(default)]
    pub skill: Option<String>,
}

/// A directed dependency between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of structural validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Structural checks only: a name, unique node ids, edges that point at
/// existing nodes.
pub fn validate(def: &WorkflowDefinition) -> ValidationReport {
    let mut errors = Vec::new();

    if def.name.trim().is_empty() {
        errors.push("workflow name is empty".to_string());
    }

    let mut seen = std::collections::HashSet::new();
    for node in &def.nodes {
        if !seen.insert(node.id.as_str()) {
            errors.push(format!("duplicate node id: {}", node.id));
        }
    }

    for edge in &def.edges {
        if !seen.contains(edge.from.as_str()) {
            errors.push(format!("edge references unknown node: {}", edge.from));
        }
        if !seen.contains(edge.to.as_str()) {
            errors.push(format!("edge references unknown node: {}", edge.to));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// In-memory workflow storage. Nothing is persisted across restarts.
#[derive(Debug, Clone, Default)]
pub struct WorkflowStore {
    workflows: Arc<DashMap<String, WorkflowDefinition>>,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, def: WorkflowDefinition) {
        self.workflows.insert(def.id.clone(), def);
    }

    pub fn get(&self, id: &str) -> Option<WorkflowDefinition> {
        self.workflows.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &str) -> Option<WorkflowDefinition> {
        self.workflows.remove(id).map(|(_, def)| def)
    }

    /// All workflows, sorted by creation time for stable listings.
    pub fn list(&self) -> Vec<WorkflowDefinition> {
        let mut all: Vec<_> = self
            .workflows
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|def| def.created_at);
        all
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> WorkflowDefinition {
        WorkflowDefinition {
            id: "w1".into(),
            name: "test".into(),
            description: String::new(),
            nodes,
            edges,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn node(id: &str) -> WorkflowNode {
        WorkflowNode {
            id: id.into(),
            label: None,
            skill: None,
        }
    }

    #[test]
    fn validate_ok() {
        let report = validate(&def(
            vec![node("a"), node("b")],
            vec![WorkflowEdge {
                from: "a".into(),
                to: "b".into(),
            }],
        ));
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn validate_empty_name() {
        let mut d = def(vec![], vec![]);
        d.name = "  ".into();
        let report = validate(&d);
        assert!(!report.valid);
        assert!(report.errors[0].contains("name"));
    }

    #[test]
    fn validate_duplicate_node_ids() {
        let report = validate(&def(vec![node("a"), node("a")], vec![]));
        assert!(!report.valid);
        assert!(report.errors[0].contains("duplicate"));
    }

    #[test]
    fn validate_dangling_edge() {
        let report = validate(&def(
            vec![node("a")],
            vec![WorkflowEdge {
                from: "a".into(),
                to: "ghost".into(),
            }],
        ));
        assert!(!report.valid);
        assert!(report.errors[0].contains("ghost"));
    }

    #[test]
    fn store_roundtrip() {
        let store = WorkflowStore::new();
        assert!(store.is_empty());

        store.insert(def(vec![], vec![]));
        assert_eq!(store.len(), 1);
        assert!(store.get("w1").is_some());
        assert!(store.get("w2").is_none());

        assert!(store.remove("w1").is_some());
        assert!(store.is_empty());
    }
}
