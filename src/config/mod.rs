//! Configuration for the remapper's diagnostics and interface policies.
//!
//! The configuration file is `.mixin-remap.toml`, discovered in the current
//! directory or one of its ancestors. All sections are optional:
//!
//! ```toml
//! [diagnostics]
//! missing_features = "warn"
//!
//! [interfaces]
//! forbid_member_renames = true
//! allow = ["com/example/api/Renamable"]
//! ```

mod core;
mod loader;

pub use core::{
    default_forbid_member_renames, DiagnosticsConfig, InterfaceConfig, MissingFeatureMode,
    RemapConfig,
};
pub use loader::{
    default_config_toml, directory_ancestors, load_config, load_config_from,
    load_config_from_path, parse_and_validate_config, ConfigError, CONFIG_FILE_NAME,
};

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, RemapConfig::default());
        assert!(config.interfaces.forbid_member_renames);
        assert_eq!(config.diagnostics.missing_features, MissingFeatureMode::Fail);
    }

    #[test]
    fn parses_all_sections() {
        let config = parse_and_validate_config(indoc! {r#"
            [diagnostics]
            missing_features = "warn"

            [interfaces]
            forbid_member_renames = false
            allow = ["com.example.Api", "com/example/Other"]
        "#})
        .unwrap();
        assert_eq!(config.diagnostics.missing_features, MissingFeatureMode::Warn);
        assert!(!config.interfaces.forbid_member_renames);
        assert_eq!(config.interfaces.allow, vec!["com/example/Api", "com/example/Other"]);
    }

    #[test]
    fn rejects_descriptor_style_interfaces() {
        let err = parse_and_validate_config(indoc! {r#"
            [interfaces]
            allow = ["Lcom/example/Api;"]
        "#})
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_modes() {
        let err = parse_and_validate_config("[diagnostics]\nmissing_features = \"explode\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn finds_config_in_ancestor_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[diagnostics]\nmissing_features = \"warn\"\n",
        )
        .unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(nested);
        assert_eq!(config.diagnostics.missing_features, MissingFeatureMode::Warn);
    }

    #[test]
    fn default_template_parses_back() {
        let config = parse_and_validate_config(&default_config_toml()).unwrap();
        assert_eq!(config, RemapConfig::default());
    }

    #[test]
    fn ancestors_are_bounded() {
        let dirs: Vec<_> = directory_ancestors("/a/b/c/d".into(), 2).collect();
        assert_eq!(dirs.len(), 2);
    }
}
