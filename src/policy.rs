//! Diagnostics policy.
//!
//! The policy is the single extension point for "an unimplemented or
//! unrecognized feature was encountered". Structural violations never go
//! through it. A policy is configured once per [`MixinRemapper`](crate::MixinRemapper)
//! and holds no mutable state.

use crate::config::{MissingFeatureMode, RemapConfig};
use crate::errors::{RemapError, Result};
use crate::injection::InjectionPoint;
use crate::targets::TargetSet;
use std::collections::HashSet;
use tracing::warn;

pub trait RemapPolicy: Send + Sync {
    /// Called whenever an unimplemented or unknown feature is encountered.
    ///
    /// Returning `Ok(())` makes the remapper continue on a best-effort
    /// basis, leaving the affected value untouched.
    fn log_unimplemented_feature(&self, description: &str) -> Result<()> {
        Err(RemapError::missing_feature(description))
    }

    /// Whether members of `interface` must keep their names when a mixin
    /// implementing it renames a shadowed or overwritten method.
    fn forbid_remapping_interface_members(&self, _interface: &str, _targets: &TargetSet) -> bool {
        true
    }

    /// Resolves an `@At` value to an injection point kind.
    fn lookup_injection_point(&self, value: &str) -> Option<InjectionPoint> {
        InjectionPoint::from_name(value)
    }
}

/// Aborts on every missing feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl RemapPolicy for FailFast {}

/// Logs missing features and keeps going.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAndContinue;

impl RemapPolicy for LogAndContinue {
    fn log_unimplemented_feature(&self, description: &str) -> Result<()> {
        warn!("{}", description);
        Ok(())
    }
}

/// Policy driven by [`RemapConfig`].
#[derive(Debug, Clone)]
pub struct ConfiguredPolicy {
    missing_features: MissingFeatureMode,
    forbid_interface_renames: bool,
    allowed_interfaces: HashSet<String>,
}

impl ConfiguredPolicy {
    pub fn from_config(config: &RemapConfig) -> Self {
        Self {
            missing_features: config.diagnostics.missing_features,
            forbid_interface_renames: config.interfaces.forbid_member_renames,
            allowed_interfaces: config.interfaces.allow.iter().cloned().collect(),
        }
    }

    pub fn with_missing_features(mut self, mode: MissingFeatureMode) -> Self {
        self.missing_features = mode;
        self
    }
}

impl Default for ConfiguredPolicy {
    fn default() -> Self {
        Self::from_config(&RemapConfig::default())
    }
}

impl RemapPolicy for ConfiguredPolicy {
    fn log_unimplemented_feature(&self, description: &str) -> Result<()> {
        match self.missing_features {
            MissingFeatureMode::Fail => Err(RemapError::missing_feature(description)),
            MissingFeatureMode::Warn => LogAndContinue.log_unimplemented_feature(description),
        }
    }

    fn forbid_remapping_interface_members(&self, interface: &str, _targets: &TargetSet) -> bool {
        self.forbid_interface_renames && !self.allowed_interfaces.contains(interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterfaceConfig;

    #[test]
    fn fail_fast_raises_missing_feature() {
        let err = FailFast.log_unimplemented_feature("Unknown key").unwrap_err();
        assert_eq!(err, RemapError::MissingFeature("Unknown key".into()));
        assert!(FailFast.forbid_remapping_interface_members("a/Api", &TargetSet::new()));
    }

    #[test]
    fn log_and_continue_swallows_missing_feature() {
        assert!(LogAndContinue.log_unimplemented_feature("Unknown key").is_ok());
    }

    #[test]
    fn configured_policy_honours_interface_allow_list() {
        let mut config = RemapConfig::default();
        config.interfaces = InterfaceConfig {
            forbid_member_renames: true,
            allow: vec!["a/Open".into()],
        };
        let policy = ConfiguredPolicy::from_config(&config);
        let targets = TargetSet::new();
        assert!(!policy.forbid_remapping_interface_members("a/Open", &targets));
        assert!(policy.forbid_remapping_interface_members("a/Closed", &targets));
        assert!(policy.log_unimplemented_feature("x").is_err());
        assert!(policy
            .with_missing_features(MissingFeatureMode::Warn)
            .log_unimplemented_feature("x")
            .is_ok());
    }

    #[test]
    fn built_in_injection_points_resolve_by_default() {
        assert_eq!(FailFast.lookup_injection_point("HEAD"), Some(InjectionPoint::Head));
        assert_eq!(FailFast.lookup_injection_point("NOPE"), None);
    }
}
