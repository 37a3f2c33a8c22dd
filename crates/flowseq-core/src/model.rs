//! Records returned by the landscape modeling API.
//!
//! Only the fields the exporter reads are declared; everything else in the
//! upstream payloads is ignored during deserialization.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;

/// A flow as it appears in the flow listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlowSummary {
    pub id: String,
    pub name: String,
}

/// A flow with its steps.
///
/// Steps are keyed by step id. The map keeps the order in which the API sent
/// them, which only matters for steps sharing the same [`FlowStep::index`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    pub name: String,
    /// Diagram every step of this flow is placed on.
    pub diagram_id: String,
    #[serde(default)]
    pub steps: IndexMap<String, FlowStep>,
}

impl Flow {
    /// Returns the steps sorted by ascending [`FlowStep::index`].
    ///
    /// The sort is stable, so steps with equal indices keep their source order.
    pub fn ordered_steps(&self) -> Vec<&FlowStep> {
        let mut steps: Vec<&FlowStep> = self.steps.values().collect();
        steps.sort_by_key(|step| step.index);
        steps
    }
}

/// One interaction within a [`Flow`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStep {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    /// Diagram object the interaction starts from.
    pub origin_id: String,
    /// Diagram object the interaction goes to. `None` marks a self-interaction.
    #[serde(default)]
    pub target_id: Option<String>,
    pub index: i64,
}

impl FlowStep {
    /// Whether the step only involves its origin.
    pub fn is_self_interaction(&self) -> bool {
        self.target_id.is_none()
    }
}

/// A diagram together with all objects placed on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Diagram {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: HashMap<String, DiagramObject>,
}

impl Diagram {
    /// Looks up an object placed on this diagram.
    pub fn object(&self, object_id: &str) -> Option<&DiagramObject> {
        self.objects.get(object_id)
    }
}

/// Placement of a [`ModelObject`] on a specific diagram.
///
/// Diagrams also carry placements that show no model object (areas, notes),
/// so `model_id` is only checked for the objects a flow actually uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramObject {
    #[serde(default)]
    pub id: String,
    /// The model object this placement shows.
    #[serde(default)]
    pub model_id: Option<String>,
}

/// A modeled entity such as a system, app or actor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelObject {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "f1",
            "name": "Checkout",
            "diagramId": "d1",
            "handleId": "ignored",
            "steps": {
                "s1": {
                    "id": "s1",
                    "type": "outgoing",
                    "description": "Add item",
                    "originId": "o1",
                    "targetId": "o2",
                    "index": 1
                },
                "s2": {
                    "id": "s2",
                    "type": "self-action",
                    "description": "Recalculate",
                    "originId": "o2",
                    "targetId": null,
                    "index": 0
                }
            }
        }"#;

        let flow: Flow = serde_json::from_str(json).unwrap();
        assert_eq!(flow.diagram_id, "d1");
        assert_eq!(flow.steps.len(), 2);
        assert_eq!(flow.steps["s1"].target_id.as_deref(), Some("o2"));
        assert!(flow.steps["s2"].is_self_interaction());
        assert_eq!(flow.steps["s2"].kind, "self-action");
    }

    #[test]
    fn test_ordered_steps_sorts_by_index() {
        let json = r#"{
            "id": "f1", "name": "n", "diagramId": "d1",
            "steps": {
                "a": {"id": "a", "type": "outgoing", "originId": "o", "index": 7},
                "b": {"id": "b", "type": "outgoing", "originId": "o", "index": -2},
                "c": {"id": "c", "type": "outgoing", "originId": "o", "index": 3}
            }
        }"#;

        let flow: Flow = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = flow.ordered_steps().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn test_ordered_steps_keeps_source_order_on_ties() {
        let json = r#"{
            "id": "f1", "name": "n", "diagramId": "d1",
            "steps": {
                "z": {"id": "z", "type": "outgoing", "originId": "o", "index": 1},
                "a": {"id": "a", "type": "outgoing", "originId": "o", "index": 1},
                "m": {"id": "m", "type": "outgoing", "originId": "o", "index": 0}
            }
        }"#;

        let flow: Flow = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = flow.ordered_steps().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["m", "z", "a"]);
    }

    #[test]
    fn test_missing_target_defaults_to_self_interaction() {
        let step: FlowStep = serde_json::from_str(
            r#"{"id": "s", "type": "self-action", "originId": "o", "index": 0}"#,
        )
        .unwrap();
        assert!(step.is_self_interaction());
        assert!(step.description.is_empty());
    }

    #[test]
    fn test_diagram_object_lookup() {
        let diagram: Diagram = serde_json::from_str(
            r#"{"id": "d1", "objects": {"o1": {"id": "o1", "modelId": "m1", "shape": "box"}}}"#,
        )
        .unwrap();
        assert_eq!(
            diagram.object("o1").and_then(|o| o.model_id.as_deref()),
            Some("m1")
        );
        assert!(diagram.object("o2").is_none());
    }

    #[test]
    fn test_diagram_tolerates_placements_without_model() {
        let diagram: Diagram = serde_json::from_str(
            r#"{"id": "d", "objects": {
                "a": {"id": "a", "modelId": "ma"},
                "note": {"id": "note", "shape": "area"}
            }}"#,
        )
        .unwrap();
        assert_eq!(
            diagram.object("a").and_then(|o| o.model_id.as_deref()),
            Some("ma")
        );
        assert_eq!(diagram.object("note").map(|o| o.model_id.is_none()), Some(true));
    }
}
