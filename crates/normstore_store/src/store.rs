//! The entity store facade.
//!
//! An `EntityStore` owns exactly one [`State`] and one [`StoreConfig`].
//! There is no global registry: whoever constructs the store owns it and
//! hands out [`Actions`] and [`Getters`] bound to it.

use normstore_foundation::Result;
use normstore_state::State;
use tracing::debug;

use crate::actions::Actions;
use crate::config::StoreConfig;
use crate::getters::Getters;

/// A normalized entity store.
///
/// Mutation goes through [`EntityStore::actions`] and reads through
/// [`EntityStore::getters`]. Access is single-writer; hosts that share a
/// store across threads must serialize access themselves (e.g. behind a
/// `Mutex`).
#[derive(Debug, Default)]
pub struct EntityStore {
    state: State,
    config: StoreConfig,
}

impl EntityStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        debug!(store = config.name(), "entity store created");
        Self {
            state: State::new(),
            config,
        }
    }

    /// Returns the store name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.config.name()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the configuration for calls that drive its hooks.
    pub fn config_mut(&mut self) -> &mut StoreConfig {
        &mut self.config
    }

    /// Returns the write API bound to this store.
    pub fn actions(&mut self) -> Actions<'_> {
        Actions::new(&mut self.state, &mut self.config)
    }

    /// Returns the query API bound to this store.
    #[must_use]
    pub fn getters(&self) -> Getters<'_> {
        Getters::new(&self.state)
    }

    /// Replaces the state with a fresh empty one. Hooks are kept.
    pub fn reset(&mut self) {
        debug!(store = self.config.name(), entities = self.state.len(), "store reset");
        self.state = State::new();
    }

    /// Returns a copy of the current state.
    ///
    /// O(1): the copy shares structure with the live state.
    #[must_use]
    pub fn snapshot(&self) -> State {
        self.state.clone()
    }

    /// Replaces the current state wholesale, returning the old one.
    pub fn restore(&mut self, state: State) -> State {
        debug!(store = self.config.name(), entities = state.len(), "store restored");
        std::mem::replace(&mut self.state, state)
    }

    /// Runs `f` against the actions and rolls the state back if it fails.
    ///
    /// Batch actions such as [`Actions::create_many`] keep whatever they
    /// applied before an error. Wrapping them here makes the whole closure
    /// all-or-nothing. Hooks that already fired are not undone.
    ///
    /// # Errors
    ///
    /// Returns the closure's error after restoring the state it started from.
    pub fn with_rollback<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Actions<'_>) -> Result<T>,
    {
        let snapshot = self.snapshot();
        let result = f(&mut self.actions());
        if result.is_err() {
            debug!(store = self.config.name(), "rolling back failed batch");
            self.state = snapshot;
        }
        result
    }
}
