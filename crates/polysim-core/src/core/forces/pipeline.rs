use super::Modifier;
use super::oseen::OseenTensor;
use crate::core::models::system::System;
use tracing::{trace, warn};

/// An ordered collection of modifiers, applied in insertion order.
///
/// The order is significant: see the [module documentation](super) for how it
/// interacts with hydrodynamic coupling.
#[derive(Debug, Default)]
pub struct Pipeline {
    modifiers: Vec<Box<dyn Modifier>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a modifier to the end of the pipeline.
    pub fn push<M>(&mut self, modifier: M)
    where
        M: Modifier + 'static,
    {
        self.modifiers.push(Box::new(modifier));
    }

    pub fn push_boxed(&mut self, modifier: Box<dyn Modifier>) {
        self.modifiers.push(modifier);
    }

    /// Builder-style [`Pipeline::push`].
    pub fn with<M>(mut self, modifier: M) -> Self
    where
        M: Modifier + 'static,
    {
        self.push(modifier);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Modifier names in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.modifiers.iter().map(|m| m.name()).collect()
    }

    /// The longest `min_chain_length` among the modifiers, with the modifier
    /// that demands it.
    pub fn required_chain_length(&self) -> Option<(usize, &'static str)> {
        self.modifiers
            .iter()
            .map(|m| (m.min_chain_length(), m.name()))
            .max_by_key(|(len, _)| *len)
    }

    pub fn initialize(&mut self, system: &System) {
        for modifier in self.modifiers.iter_mut() {
            modifier.initialize(system);
        }
    }

    /// Runs every modifier, in order, against one stage buffer.
    pub fn apply(&mut self, stage: &mut System) {
        for modifier in self.modifiers.iter_mut() {
            trace!(modifier = modifier.name(), "Applying modifier.");
            modifier.apply(stage);
        }
    }
}

/// Assembles a [`Pipeline`] from three explicit sections.
///
/// - `coupled` modifiers run first, so the Oseen tensor mixes their contribution;
/// - the optional `hydrodynamics` stage is the Oseen tensor itself;
/// - `uncoupled` modifiers run last and are added on top of the coupled field.
///
/// Order within each section is preserved.
#[derive(Debug, Default)]
pub struct StagedPipelineBuilder {
    coupled: Vec<Box<dyn Modifier>>,
    hydrodynamics: Option<OseenTensor>,
    uncoupled: Vec<Box<dyn Modifier>>,
}

impl StagedPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coupled<M>(mut self, modifier: M) -> Self
    where
        M: Modifier + 'static,
    {
        self.coupled.push(Box::new(modifier));
        self
    }

    pub fn coupled_boxed(mut self, modifier: Box<dyn Modifier>) -> Self {
        self.coupled.push(modifier);
        self
    }

    pub fn hydrodynamics(mut self, oseen: OseenTensor) -> Self {
        self.hydrodynamics = Some(oseen);
        self
    }

    pub fn uncoupled<M>(mut self, modifier: M) -> Self
    where
        M: Modifier + 'static,
    {
        self.uncoupled.push(Box::new(modifier));
        self
    }

    pub fn uncoupled_boxed(mut self, modifier: Box<dyn Modifier>) -> Self {
        self.uncoupled.push(modifier);
        self
    }

    pub fn build(self) -> Pipeline {
        if self.hydrodynamics.is_some() && self.coupled.is_empty() {
            warn!("Hydrodynamic coupling has no coupled modifiers before it; it will only mix the rates it is given.");
        }

        let mut pipeline = Pipeline::new();
        self.coupled.into_iter().for_each(|m| pipeline.push_boxed(m));
        if let Some(oseen) = self.hydrodynamics {
            pipeline.push(oseen);
        }
        self.uncoupled.into_iter().for_each(|m| pipeline.push_boxed(m));
        pipeline
    }
}
