//! Per-container render generations.
//!
//! Highlight timers cannot be cancelled once scheduled. Instead every render
//! into a container bumps that container's generation, and each timer
//! callback carries the generation it was scheduled under. A callback whose
//! generation is no longer current does nothing.

use std::cell::RefCell;
use std::collections::HashMap;

/// Render counter value captured by scheduled callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

/// Generation counters keyed by container id.
#[derive(Debug, Default)]
pub struct GenerationRegistry {
    counters: HashMap<String, u64>,
}

impl GenerationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new render in `container_id`, invalidating older callbacks.
    pub fn advance(&mut self, container_id: &str) -> Generation {
        let counter = self.counters.entry(container_id.to_owned()).or_insert(0);
        *counter += 1;
        Generation(*counter)
    }

    /// Whether `generation` is still the latest render of `container_id`.
    pub fn is_current(&self, container_id: &str, generation: Generation) -> bool {
        self.counters.get(container_id).copied() == Some(generation.0)
    }
}

thread_local! {
    static REGISTRY: RefCell<GenerationRegistry> = RefCell::new(GenerationRegistry::new());
}

/// Advance the shared registry for `container_id`.
pub fn advance(container_id: &str) -> Generation {
    REGISTRY.with(|registry| registry.borrow_mut().advance(container_id))
}

/// Check a generation against the shared registry.
pub fn is_current(container_id: &str, generation: Generation) -> bool {
    REGISTRY.with(|registry| registry.borrow().is_current(container_id, generation))
}
