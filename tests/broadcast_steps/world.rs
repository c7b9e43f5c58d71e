//! Shared world state for broadcast BDD scenarios.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use observer_set::observer_set::{
    domain::{DispatchSummary, MessageName},
    ports::Observer,
    services::{DispatchResult, ObserverRegistry},
};
use rstest::fixture;

/// Observer interface exercised by the scenarios.
pub trait ScenarioObserver: Observer + Send + Sync {
    /// Handles the required change message.
    fn changed(&self);

    /// Handles the optional tick message.
    fn tick(&self) {}
}

/// Registry type used by the BDD world.
pub type ScenarioRegistry = ObserverRegistry<dyn ScenarioObserver>;

/// Side effect run by an observer after it records a change.
pub type Reaction = Box<dyn Fn() + Send + Sync>;

/// Ordered record of observer invocations.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn record(&self, entry: String) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Drains and returns the recorded calls.
    ///
    /// # Errors
    ///
    /// Returns an error when the log mutex is poisoned.
    pub fn take(&self) -> Result<Vec<String>, eyre::Report> {
        let mut entries = self
            .0
            .lock()
            .map_err(|_| eyre::eyre!("call log mutex poisoned"))?;
        Ok(std::mem::take(&mut *entries))
    }
}

/// Observer whose capabilities and reactions are scripted by steps.
pub struct ScriptedObserver {
    name: String,
    implements: Vec<String>,
    log: CallLog,
    reactions: Mutex<Vec<Reaction>>,
}

impl ScriptedObserver {
    /// Attaches a reaction that runs whenever this observer handles a change.
    pub fn react(&self, reaction: Reaction) {
        self.reactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reaction);
    }
}

impl Observer for ScriptedObserver {
    fn responds_to(&self, message: &MessageName) -> bool {
        self.implements.iter().any(|name| message == name.as_str())
    }
}

impl ScenarioObserver for ScriptedObserver {
    fn changed(&self) {
        self.log.record(format!("{}:changed", self.name));
        let reactions = self
            .reactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for reaction in reactions.iter() {
            reaction();
        }
    }

    fn tick(&self) {
        self.log.record(format!("{}:tick", self.name));
    }
}

/// Scenario world for broadcast behaviour tests.
#[derive(Default)]
pub struct BroadcastWorld {
    /// Registry under test, built by the first given step.
    pub registry: Option<Arc<ScenarioRegistry>>,
    /// Required message declared for the registry.
    pub required: Option<String>,
    /// Calls made by every observer in the scenario.
    pub log: CallLog,
    /// Strong references keeping the scenario's observers alive.
    pub observers: HashMap<String, Arc<ScriptedObserver>>,
    /// Result of the last broadcast.
    pub last_result: Option<DispatchResult<DispatchSummary>>,
}

impl BroadcastWorld {
    /// Returns the registry built for the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no registry has been declared yet.
    pub fn registry(&self) -> Result<Arc<ScenarioRegistry>, eyre::Report> {
        self.registry
            .clone()
            .ok_or_else(|| eyre::eyre!("no registry in scenario world"))
    }

    /// Looks up a scenario observer by name.
    ///
    /// # Errors
    ///
    /// Returns an error when no observer with that name was created.
    pub fn observer(&self, name: &str) -> Result<Arc<ScriptedObserver>, eyre::Report> {
        self.observers
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("unknown observer '{name}'"))
    }

    /// Creates an observer implementing the required message (when
    /// `conforming`) plus the listed optional messages.
    ///
    /// # Errors
    ///
    /// Returns an error when no registry has been declared yet.
    pub fn spawn(
        &mut self,
        name: &str,
        conforming: bool,
        optional: &[&str],
    ) -> Result<Arc<ScriptedObserver>, eyre::Report> {
        let required = self
            .required
            .clone()
            .ok_or_else(|| eyre::eyre!("no required message in scenario world"))?;
        let mut implements: Vec<String> = optional.iter().map(|m| (*m).to_owned()).collect();
        if conforming {
            implements.push(required);
        }
        let observer = Arc::new(ScriptedObserver {
            name: name.to_owned(),
            implements,
            log: self.log.clone(),
            reactions: Mutex::new(Vec::new()),
        });
        self.observers.insert(name.to_owned(), Arc::clone(&observer));
        Ok(observer)
    }

    /// Registers a named observer with the scenario registry.
    ///
    /// # Errors
    ///
    /// Returns an error when the registry or observer is missing.
    pub fn register(&self, name: &str) -> Result<(), eyre::Report> {
        let observer: Arc<dyn ScenarioObserver> = self.observer(name)?;
        self.registry()?.add(&observer);
        Ok(())
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BroadcastWorld {
    BroadcastWorld::default()
}

/// Splits a comma separated step argument into trimmed entries.
#[must_use]
pub fn split_list(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}
