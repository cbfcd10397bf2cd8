//! Parser configuration.
//!
//! Embedders that keep their settings in TOML can load the parser's section
//! directly:
//!
//! ```toml
//! # Refuse input until the session has been confirmed
//! require_confirmation = true
//! ```

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Makes [`crate::ControlMachine::try_process`] reject input until
    /// [`crate::ControlMachine::confirm`] has succeeded.
    ///
    /// [`crate::ControlMachine::feed`] and [`crate::ControlMachine::process`]
    /// never check confirmation regardless of this setting.
    pub require_confirmation: bool,
}

impl ControlConfig {
    pub fn from_toml(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }
}
