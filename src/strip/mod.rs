//! The stripping engine: turns a module's type graph back into compilable,
//! declaration-only C# source.
//!
//! The engine is layered bottom-up:
//!
//! - [`signature`]: renders type, method and constructor signatures
//! - [`classify`]: derives access modifier and modifier keyword text
//! - [`stripper`]: the per-type emission state machine
//! - [`walker`]: drives a whole module into an output directory tree
//! - [`progress`]: the shared observation channel a host UI can poll
//!
//! A run is configured through [`StripOptions`] and observed through
//! [`progress::StripProgress`]; the first error aborts the run and surfaces
//! to the host unchanged.

pub mod classify;
pub mod progress;
pub mod signature;
pub mod stripper;
pub mod walker;

use std::path::PathBuf;

/// Configuration for one stripping run.
///
/// `output_root` is where per-module directory trees are created.
/// `base_path` bounds the recursive directory creation: ancestors at or
/// above it are assumed to exist and are never created.
pub struct StripOptions {
    /// Root directory stripped sources are written under
    pub output_root: PathBuf,
    /// Directory the recursive creation stops at
    pub base_path: PathBuf,
    /// Emit inspector-hiding attributes on non-serialized fields
    pub strict_hiding: bool,
    /// Qualified name of the engine component base class; types deriving
    /// from it are recorded on the progress channel
    pub component_base: String,
}

impl StripOptions {
    /// Options writing under `output_root` with strict hiding enabled.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        let output_root = output_root.into();
        StripOptions {
            base_path: output_root.clone(),
            output_root,
            strict_hiding: true,
            component_base: "UnityEngine.MonoBehaviour".to_string(),
        }
    }

    /// Set the directory recursive creation stops at.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Enable or disable the inspector-hiding pass.
    #[must_use]
    pub fn strict_hiding(mut self, strict_hiding: bool) -> Self {
        self.strict_hiding = strict_hiding;
        self
    }

    /// Override the component base class recorded types must derive from.
    #[must_use]
    pub fn component_base(mut self, component_base: &str) -> Self {
        self.component_base = component_base.to_string();
        self
    }
}
