//! Sequence diagram aggregate and its text serialization.
//!
//! A [`SequenceDiagram`] owns the participants and the ordered interactions
//! of one exported flow. The key abstractions are:
//!
//! - [`SequenceParticipant`]: a deduplicated actor, keyed by model object id
//! - [`SequenceInteraction`]: one arrow between participants, possibly self-directed
//!
//! Participants keep their insertion order, and interactions keep the order in
//! which they were added. [`SequenceDiagram::generate`] relies on both orders
//! to produce deterministic output.

use std::fmt::{self, Write};

use indexmap::IndexMap;
use log::trace;

/// A participant in a sequence diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceParticipant {
    id: String,
    name: String,
}

impl SequenceParticipant {
    /// Creates a participant from a model object id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SequenceParticipant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

/// One arrow in a sequence diagram.
///
/// An interaction without a target is a self-interaction and is drawn from
/// the source back to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceInteraction {
    id: String,
    kind: String,
    description: String,
    source_id: String,
    target_id: Option<String>,
}

impl SequenceInteraction {
    /// Creates an interaction.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier of the originating flow step
    /// * `kind` - Interaction kind as reported upstream
    /// * `description` - Label drawn on the arrow
    /// * `source_id` - Participant id the arrow starts from
    /// * `target_id` - Participant id the arrow points to, or `None` for a self-interaction
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
        source_id: impl Into<String>,
        target_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            description: description.into(),
            source_id: source_id.into(),
            target_id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    pub fn is_self_interaction(&self) -> bool {
        self.target_id.is_none()
    }
}

impl fmt::Display for SequenceInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - {} - {}",
            self.id,
            self.kind,
            self.description,
            self.source_id,
            self.target_id.as_deref().unwrap_or("-"),
        )
    }
}

/// Sequence diagram built from a single flow.
///
/// The diagram is the sole owner of its participants and interactions.
#[derive(Debug, Clone)]
pub struct SequenceDiagram {
    name: String,
    participants: IndexMap<String, SequenceParticipant>,
    interactions: Vec<SequenceInteraction>,
}

impl SequenceDiagram {
    /// Creates an empty diagram named after its flow.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            participants: IndexMap::new(),
            interactions: Vec::new(),
        }
    }

    /// Returns the flow name the diagram was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a participant unless one with the same id is already present.
    ///
    /// The first participant registered for an id wins; later names for the
    /// same id are ignored. Returns `true` if the participant was added.
    pub fn add_participant(&mut self, participant: SequenceParticipant) -> bool {
        if self.participants.contains_key(participant.id()) {
            return false;
        }
        self.participants
            .insert(participant.id().to_string(), participant);
        true
    }

    /// Appends an interaction to the end of the timeline.
    pub fn add_interaction(&mut self, interaction: SequenceInteraction) {
        self.interactions.push(interaction);
    }

    /// Returns an iterator over participants in insertion order.
    pub fn participants(&self) -> impl Iterator<Item = &SequenceParticipant> {
        self.participants.values()
    }

    /// Returns an iterator over interactions in timeline order.
    pub fn interactions(&self) -> impl Iterator<Item = &SequenceInteraction> {
        self.interactions.iter()
    }

    pub fn participant(&self, id: &str) -> Option<&SequenceParticipant> {
        self.participants.get(id)
    }

    /// Serializes the diagram into mermaid sequence diagram text.
    ///
    /// Lines are tab-indented below the header. Self-interactions are drawn as
    /// a dashed arrow from the source back to itself. The output only depends
    /// on the current contents of the diagram.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowseq_core::sequence::{SequenceDiagram, SequenceInteraction, SequenceParticipant};
    ///
    /// let mut diagram = SequenceDiagram::new("Checkout");
    /// diagram.add_participant(SequenceParticipant::new("c1", "Cart"));
    /// diagram.add_interaction(SequenceInteraction::new("s1", "self-action", "Recalculate", "c1", None));
    ///
    /// assert_eq!(
    ///     diagram.generate(),
    ///     "sequenceDiagram\n\tautonumber\n\tparticipant c1 as Cart\n\tc1 -->> c1: Recalculate\n",
    /// );
    /// ```
    pub fn generate(&self) -> String {
        let mut out = String::from("sequenceDiagram\n\tautonumber\n");

        // Writing to a String cannot fail
        for participant in self.participants() {
            let _ = writeln!(
                out,
                "\tparticipant {} as {}",
                participant.id(),
                participant.name()
            );
        }

        for interaction in self.interactions() {
            let source = interaction.source_id();
            let _ = match interaction.target_id() {
                Some(target) => {
                    writeln!(out, "\t{source} ->> {target}: {}", interaction.description())
                }
                None => writeln!(out, "\t{source} -->> {source}: {}", interaction.description()),
            };
        }

        trace!(diagram = self.name.as_str(), lines = out.lines().count(); "Generated sequence text");

        out
    }
}

impl fmt::Display for SequenceDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
