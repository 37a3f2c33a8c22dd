//! Memoized lookups of diagrams and model objects.
//!
//! A [`LookupCache`] lives for a single export. Diagrams are cached whole,
//! keyed by diagram id, so every object placed on an already fetched diagram
//! resolves without another request. Model objects are cached by id. Nothing
//! is ever evicted.

use std::collections::{HashMap, hash_map::Entry};

use log::debug;

use flowseq_core::model::{Diagram, DiagramObject, ModelObject};

use crate::{FlowseqError, api::LandscapeApi};

/// Per-run cache in front of a [`LandscapeApi`].
#[derive(Debug, Default)]
pub struct LookupCache {
    diagrams: HashMap<String, Diagram>,
    model_objects: HashMap<String, ModelObject>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the cache with a diagram, replacing any cached copy.
    pub fn insert_diagram(&mut self, diagram: Diagram) {
        self.diagrams.insert(diagram.id.clone(), diagram);
    }

    /// Seeds the cache with a model object, replacing any cached copy.
    pub fn insert_model_object(&mut self, model_object: ModelObject) {
        self.model_objects
            .insert(model_object.id.clone(), model_object);
    }

    pub fn diagram(&self, diagram_id: &str) -> Option<&Diagram> {
        self.diagrams.get(diagram_id)
    }

    pub fn model_object(&self, model_object_id: &str) -> Option<&ModelObject> {
        self.model_objects.get(model_object_id)
    }

    pub fn diagram_count(&self) -> usize {
        self.diagrams.len()
    }

    pub fn model_object_count(&self) -> usize {
        self.model_objects.len()
    }

    /// Resolves an object placed on a diagram.
    ///
    /// Fetches the whole diagram on the first lookup into it.
    ///
    /// # Errors
    ///
    /// Returns [`FlowseqError::Api`] if the diagram cannot be fetched, or
    /// [`FlowseqError::MissingDiagramObject`] if the diagram has no such object.
    pub fn resolve_diagram_object<A>(
        &mut self,
        api: &A,
        diagram_id: &str,
        object_id: &str,
    ) -> Result<&DiagramObject, FlowseqError>
    where
        A: LandscapeApi + ?Sized,
    {
        let diagram: &Diagram = match self.diagrams.entry(diagram_id.to_string()) {
            Entry::Occupied(entry) => {
                debug!(diagram_id; "Diagram cache hit");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(diagram_id; "Diagram cache miss");
                entry.insert(api.diagram(diagram_id)?)
            }
        };

        diagram
            .object(object_id)
            .ok_or_else(|| FlowseqError::MissingDiagramObject {
                diagram_id: diagram_id.to_string(),
                object_id: object_id.to_string(),
            })
    }

    /// Resolves a model object, fetching it on the first lookup.
    ///
    /// # Errors
    ///
    /// Returns [`FlowseqError::Api`] if the object cannot be fetched.
    pub fn resolve_model_object<A>(
        &mut self,
        api: &A,
        model_object_id: &str,
    ) -> Result<&ModelObject, FlowseqError>
    where
        A: LandscapeApi + ?Sized,
    {
        let model_object: &ModelObject = match self.model_objects.entry(model_object_id.to_string())
        {
            Entry::Occupied(entry) => {
                debug!(model_object_id; "Model object cache hit");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(model_object_id; "Model object cache miss");
                entry.insert(api.model_object(model_object_id)?)
            }
        };

        Ok(model_object)
    }
}
