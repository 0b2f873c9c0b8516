use serde::{Deserialize, Serialize};

/// Root configuration structure for mixin-remap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapConfig {
    /// How unrecognized features are reported
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Interface member rename policy
    #[serde(default)]
    pub interfaces: InterfaceConfig,
}

/// What to do when the remapper meets a feature it does not implement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFeatureMode {
    /// Abort remapping with a missing feature error
    #[default]
    Fail,
    /// Log a warning and leave the affected value untouched
    Warn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub missing_features: MissingFeatureMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    /// Refuse renames of members that an implemented interface declares
    #[serde(default = "default_forbid_member_renames")]
    pub forbid_member_renames: bool,

    /// Interfaces (internal names) whose members may be renamed regardless
    #[serde(default)]
    pub allow: Vec<String>,
}

pub fn default_forbid_member_renames() -> bool {
    true
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            forbid_member_renames: default_forbid_member_renames(),
            allow: Vec::new(),
        }
    }
}
