//! Trait configuration loaded from TOML.
//!
//! Link (connection) genes and neuron (node) genes each get their own
//! [`TraitSpecTable`]. Every spec is validated while the file is parsed, so a
//! malformed entry is reported here rather than during evolution.
//!
//! ## Example
//!
//! ```toml
//! [link_traits.plasticity]
//! type = "real"
//! min = 0.0
//! max = 1.0
//! mutation_probability = 0.1
//! replace_probability = 0.2
//! perturb_power = 0.05
//!
//! [neuron_traits.kind]
//! type = "text"
//! candidates = ["excitatory", "inhibitory"]
//! weights = [4.0, 1.0]
//! mutation_probability = 0.05
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::spec::TraitSpecTable;

/// Trait specs for both gene kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitConfig {
    /// Traits carried by every connection gene.
    #[serde(default)]
    pub link_traits: TraitSpecTable,
    /// Traits carried by every node gene.
    #[serde(default)]
    pub neuron_traits: TraitSpecTable,
}

impl TraitConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::Toml`](crate::TraitError::Toml) for malformed TOML
    /// or an invalid spec. The message names the offending trait.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        debug!(
            link_traits = config.link_traits.len(),
            neuron_traits = config.neuron_traits.len(),
            "loaded trait configuration"
        );
        Ok(config)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`TraitError::Io`](crate::TraitError::Io) if the file cannot be
    /// read, otherwise the errors of [`from_toml_str`](Self::from_toml_str).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading trait configuration");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
