//! In-memory landscape API shared by the integration tests.

#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap};

use serde_json::{Value, json};

use flowseq::{
    ApiError, LandscapeApi,
    model::{Diagram, Flow, FlowSummary, ModelObject},
};

/// Fake API that serves fixed records and records every call.
#[derive(Default)]
pub struct FakeApi {
    flows: Vec<FlowSummary>,
    flow_details: HashMap<String, Flow>,
    diagrams: HashMap<String, Diagram>,
    model_objects: HashMap<String, ModelObject>,
    calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a flow from its JSON representation.
    pub fn with_flow(mut self, flow: Value) -> Self {
        let flow: Flow = serde_json::from_value(flow).expect("Invalid flow fixture");
        self.flows.push(FlowSummary {
            id: flow.id.clone(),
            name: flow.name.clone(),
        });
        self.flow_details.insert(flow.id.clone(), flow);
        self
    }

    /// Lists a flow without being able to serve its detail.
    pub fn with_listed_flow(mut self, id: &str, name: &str) -> Self {
        self.flows.push(FlowSummary {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// Registers a diagram whose objects map object id to model id.
    pub fn with_diagram(mut self, id: &str, objects: &[(&str, &str)]) -> Self {
        let objects: serde_json::Map<String, Value> = objects
            .iter()
            .map(|(object_id, model_id)| {
                (
                    object_id.to_string(),
                    json!({"id": object_id, "modelId": model_id}),
                )
            })
            .collect();
        let diagram: Diagram = serde_json::from_value(json!({"id": id, "objects": objects}))
            .expect("Invalid diagram fixture");
        self.diagrams.insert(id.to_string(), diagram);
        self
    }

    /// Registers a diagram from its JSON representation.
    pub fn with_diagram_json(mut self, diagram: Value) -> Self {
        let diagram: Diagram = serde_json::from_value(diagram).expect("Invalid diagram fixture");
        self.diagrams.insert(diagram.id.clone(), diagram);
        self
    }

    pub fn with_model_object(mut self, id: &str, name: &str) -> Self {
        self.model_objects.insert(
            id.to_string(),
            ModelObject {
                id: id.to_string(),
                name: name.to_string(),
            },
        );
        self
    }

    /// Every call made so far, as `method:argument`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn not_found(path: String) -> ApiError {
        ApiError::Status {
            url: format!("fake://{path}"),
            status: 404,
        }
    }
}

impl LandscapeApi for FakeApi {
    fn list_flows(&self) -> Result<Vec<FlowSummary>, ApiError> {
        self.record("flows".to_string());
        Ok(self.flows.clone())
    }

    fn flow(&self, flow_id: &str) -> Result<Flow, ApiError> {
        self.record(format!("flow:{flow_id}"));
        self.flow_details
            .get(flow_id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("flows/{flow_id}")))
    }

    fn diagram(&self, diagram_id: &str) -> Result<Diagram, ApiError> {
        self.record(format!("diagram:{diagram_id}"));
        self.diagrams
            .get(diagram_id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("diagrams/{diagram_id}")))
    }

    fn model_object(&self, model_object_id: &str) -> Result<ModelObject, ApiError> {
        self.record(format!("model_object:{model_object_id}"));
        self.model_objects
            .get(model_object_id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("model/objects/{model_object_id}")))
    }
}

/// The two-step checkout flow: a self-interaction on the cart at index 0 and
/// a user-to-cart call at index 1, listed in reverse order.
pub fn checkout_api() -> FakeApi {
    FakeApi::new()
        .with_flow(json!({
            "id": "flow-1",
            "name": "Checkout",
            "diagramId": "d1",
            "steps": {
                "step-a": {
                    "id": "step-a",
                    "type": "outgoing",
                    "description": "Add item",
                    "originId": "obj-user",
                    "targetId": "obj-cart",
                    "index": 1
                },
                "step-b": {
                    "id": "step-b",
                    "type": "self-action",
                    "description": "Recalculate",
                    "originId": "obj-cart",
                    "targetId": null,
                    "index": 0
                }
            }
        }))
        .with_diagram("d1", &[("obj-user", "u1"), ("obj-cart", "c1")])
        .with_model_object("u1", "User")
        .with_model_object("c1", "Cart")
}
