//! Strategy registry
//!
//! Provides [`InsertionEngine`], which holds one strategy per
//! [`SnippetKind`]. The built-in heuristics are registered by
//! [`InsertionEngine::from_config`]; any of them can be replaced with
//! [`InsertionEngine::register`].

use crate::config::AnchorConfig;
use crate::icons::IconStrategy;
use crate::imports::ImportStrategy;
use crate::list::ListEntryStrategy;
use crate::routes::RouteStrategy;
use crate::strategy::{Insertion, InsertionError, InsertionStrategy, SnippetKind};
use std::collections::BTreeMap;

/// Registry of insertion strategies, keyed by snippet kind
#[derive(Debug, Default)]
pub struct InsertionEngine {
    strategies: BTreeMap<SnippetKind, Box<dyn InsertionStrategy>>,
}

impl InsertionEngine {
    /// Create empty engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Create engine with the built-in heuristic strategies
    ///
    /// # Errors
    /// Returns `InsertionError` if any anchor setting is unusable.
    pub fn from_config(config: &AnchorConfig) -> Result<Self, InsertionError> {
        let mut engine = Self::new();
        engine.register(Box::new(ImportStrategy::new(config)?));
        engine.register(Box::new(RouteStrategy::new(config)?));
        engine.register(Box::new(IconStrategy::new(config)?));
        engine.register(Box::new(ListEntryStrategy::new(config)?));
        Ok(engine)
    }

    /// Register a strategy, replacing any existing one for its kind
    ///
    /// Returns the replaced strategy, if any.
    pub fn register(
        &mut self,
        strategy: Box<dyn InsertionStrategy>,
    ) -> Option<Box<dyn InsertionStrategy>> {
        self.strategies.insert(strategy.kind(), strategy)
    }

    /// Strategy for `kind`
    #[inline]
    #[must_use]
    pub fn strategy(&self, kind: SnippetKind) -> Option<&dyn InsertionStrategy> {
        self.strategies.get(&kind).map(|s| &**s)
    }

    /// Check if a strategy is registered for `kind`
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: SnippetKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// Get number of registered strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if engine is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Apply the strategy for `kind` to `text`
    ///
    /// # Errors
    /// Returns `InsertionError::NoStrategy` if nothing is registered for
    /// `kind`. A missing anchor is reported in the returned outcome instead.
    pub fn apply(
        &self,
        kind: SnippetKind,
        text: &str,
        snippets: &[&str],
    ) -> Result<Insertion, InsertionError> {
        let strategy = self
            .strategy(kind)
            .ok_or(InsertionError::NoStrategy(kind))?;
        Ok(strategy.apply(text, snippets))
    }
}
