//! Resolution of a named flow into a sequence diagram.
//!
//! The resolver finds the flow by name, fetches its steps and walks them in
//! ascending index order. Every step's origin and target diagram objects are
//! resolved to model objects through the [`LookupCache`], which become the
//! participants of the resulting [`SequenceDiagram`].

use log::{debug, info, trace};

use flowseq_core::{
    model::{Flow, FlowStep},
    sequence::{SequenceDiagram, SequenceInteraction, SequenceParticipant},
};

use crate::{FlowseqError, api::LandscapeApi, cache::LookupCache};

/// Builds [`SequenceDiagram`]s from flows of one landscape version.
pub struct FlowResolver<'a, A: LandscapeApi + ?Sized> {
    api: &'a A,
    cache: LookupCache,
}

impl<'a, A: LandscapeApi + ?Sized> FlowResolver<'a, A> {
    /// Create a resolver with an empty cache.
    pub fn new(api: &'a A) -> Self {
        Self::with_cache(api, LookupCache::new())
    }

    /// Create a resolver on top of an existing, possibly pre-seeded, cache.
    pub fn with_cache(api: &'a A, cache: LookupCache) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn into_cache(self) -> LookupCache {
        self.cache
    }

    /// Resolve the flow called `flow_name` into a sequence diagram.
    ///
    /// # Errors
    ///
    /// Returns `FlowseqError` for:
    /// - Failure to list flows ([`FlowseqError::Api`])
    /// - No flow with that exact name ([`FlowseqError::FlowNotFound`])
    /// - Failure to fetch the flow detail ([`FlowseqError::FlowFetch`])
    /// - Failure to resolve any step's objects, including a step object
    ///   that shows no model object ([`FlowseqError::MalformedDiagramObject`])
    pub fn resolve(&mut self, flow_name: &str) -> Result<SequenceDiagram, FlowseqError> {
        let flow_id = self.find_flow_id(flow_name)?;
        let flow = self.fetch_flow(&flow_id)?;
        self.build(&flow)
    }

    /// Look up the id of the flow whose name is exactly `flow_name`.
    ///
    /// The first match in listing order wins.
    pub fn find_flow_id(&self, flow_name: &str) -> Result<String, FlowseqError> {
        let flows = self.api.list_flows()?;
        debug!(flow_count = flows.len(); "Listed flows");

        let flow = flows
            .into_iter()
            .find(|flow| flow.name == flow_name)
            .ok_or_else(|| FlowseqError::FlowNotFound {
                name: flow_name.to_string(),
            })?;

        info!(flow_name, flow_id = flow.id.as_str(); "Found flow");
        Ok(flow.id)
    }

    pub fn fetch_flow(&self, flow_id: &str) -> Result<Flow, FlowseqError> {
        let flow = self
            .api
            .flow(flow_id)
            .map_err(|source| FlowseqError::FlowFetch {
                flow_id: flow_id.to_string(),
                source,
            })?;
        trace!(flow:?; "Fetched flow");
        Ok(flow)
    }

    /// Build the sequence diagram for an already fetched flow.
    pub fn build(&mut self, flow: &Flow) -> Result<SequenceDiagram, FlowseqError> {
        let mut diagram = SequenceDiagram::new(flow.name.as_str());

        for step in flow.ordered_steps() {
            let interaction = self.resolve_step(&flow.diagram_id, step, &mut diagram)?;
            trace!(interaction:% = interaction; "Resolved step");
            diagram.add_interaction(interaction);
        }

        info!(
            flow_name = flow.name.as_str(),
            participants = diagram.participants().count(),
            interactions = diagram.interactions().count();
            "Flow resolved"
        );

        Ok(diagram)
    }

    fn resolve_step(
        &mut self,
        diagram_id: &str,
        step: &FlowStep,
        diagram: &mut SequenceDiagram,
    ) -> Result<SequenceInteraction, FlowseqError> {
        let origin_model_id = self.model_id_of(diagram_id, &step.origin_id)?;
        let target_model_id = step
            .target_id
            .as_deref()
            .map(|target_id| self.model_id_of(diagram_id, target_id))
            .transpose()?;

        let origin = self.participant(&origin_model_id)?;
        let target = target_model_id
            .map(|model_id| self.participant(&model_id))
            .transpose()?;

        let source_id = origin.id().to_string();
        let target_id = target.as_ref().map(|t| t.id().to_string());

        diagram.add_participant(origin);
        if let Some(target) = target {
            diagram.add_participant(target);
        }

        Ok(SequenceInteraction::new(
            step.id.as_str(),
            step.kind.as_str(),
            step.description.as_str(),
            source_id,
            target_id,
        ))
    }

    fn model_id_of(&mut self, diagram_id: &str, object_id: &str) -> Result<String, FlowseqError> {
        let object = self
            .cache
            .resolve_diagram_object(self.api, diagram_id, object_id)?;
        object
            .model_id
            .clone()
            .ok_or_else(|| FlowseqError::MalformedDiagramObject {
                diagram_id: diagram_id.to_string(),
                object_id: object_id.to_string(),
            })
    }

    fn participant(&mut self, model_object_id: &str) -> Result<SequenceParticipant, FlowseqError> {
        let model_object = self.cache.resolve_model_object(self.api, model_object_id)?;
        Ok(SequenceParticipant::new(
            model_object.id.as_str(),
            model_object.name.as_str(),
        ))
    }
}
