//! Shared observation channel for a stripping run.
//!
//! The walker updates the channel as it processes types; a host UI thread
//! polls it concurrently through a shared [`std::sync::Arc`]. The walker is
//! the only writer, so fraction updates use plain load/store pairs.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    RwLock,
};

use crate::{Error, Result};

/// Progress state of one stripping run.
///
/// Completion is a fraction in `0.0..=1.0`, stored as `f32` bits in an
/// atomic. The current action is a short human-readable description of the
/// type being exported. Component types (types deriving from the configured
/// component base) accumulate in an append-only list.
pub struct StripProgress {
    fraction: AtomicU32,
    action: RwLock<String>,
    components: boxcar::Vec<String>,
}

impl Default for StripProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl StripProgress {
    /// Create a fresh channel at zero progress.
    #[must_use]
    pub fn new() -> Self {
        StripProgress {
            fraction: AtomicU32::new(0.0_f32.to_bits()),
            action: RwLock::new(String::new()),
            components: boxcar::Vec::new(),
        }
    }

    /// Completion fraction of the run, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        f32::from_bits(self.fraction.load(Ordering::Relaxed))
    }

    /// Reset the completion fraction.
    pub fn set_fraction(&self, fraction: f32) {
        self.fraction.store(fraction.to_bits(), Ordering::Relaxed);
    }

    /// Advance the completion fraction by `delta`. Single-writer; observers
    /// only ever read.
    pub fn add_fraction(&self, delta: f32) {
        let next = self.fraction() + delta;
        self.fraction.store(next.to_bits(), Ordering::Relaxed);
    }

    /// Description of the action currently in flight.
    pub fn current_action(&self) -> Result<String> {
        self.action
            .read()
            .map(|action| action.clone())
            .map_err(|e| Error::LockError(format!("Progress action poisoned: {e}")))
    }

    /// Replace the description of the action currently in flight.
    pub fn set_action(&self, action: impl Into<String>) -> Result<()> {
        let mut slot = self
            .action
            .write()
            .map_err(|e| Error::LockError(format!("Progress action poisoned: {e}")))?;
        *slot = action.into();
        Ok(())
    }

    /// Record a discovered component type by qualified name.
    pub fn add_component(&self, name: String) {
        self.components.push(name);
    }

    /// Component types recorded so far, in discovery order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(_, name)| name.as_str())
    }

    /// Number of component types recorded so far
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_accumulates() {
        let progress = StripProgress::new();
        assert_eq!(progress.fraction(), 0.0);
        progress.add_fraction(0.25);
        progress.add_fraction(0.25);
        assert!((progress.fraction() - 0.5).abs() < f32::EPSILON);
        progress.set_fraction(0.0);
        assert_eq!(progress.fraction(), 0.0);
    }

    #[test]
    fn action_and_components_are_observable() {
        let progress = StripProgress::new();
        progress.set_action("Exporting Game.Bomb").unwrap();
        assert_eq!(progress.current_action().unwrap(), "Exporting Game.Bomb");

        progress.add_component("Game.Bomb".to_string());
        progress.add_component("Game.Timer".to_string());
        let names: Vec<_> = progress.components().collect();
        assert_eq!(names, vec!["Game.Bomb", "Game.Timer"]);
        assert_eq!(progress.component_count(), 2);
    }
}
