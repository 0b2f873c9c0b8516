use crate::config::{load_config, load_config_from_path, MissingFeatureMode};
use crate::host::{load_json, RemapReport};
use crate::mapping::{ClassHierarchy, MappingTable, RecordingSink};
use crate::model::ClassNode;
use crate::policy::ConfiguredPolicy;
use crate::MixinRemapper;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub struct RemapArgs {
    pub class: PathBuf,
    pub mappings: PathBuf,
    pub hierarchy: PathBuf,
    pub config: Option<PathBuf>,
    pub keep_going: bool,
    pub output: Option<PathBuf>,
}

/// Remaps the class in `args.class` and returns the report.
pub fn remap_class_file(args: &RemapArgs) -> Result<RemapReport> {
    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config(),
    };
    let mut policy = ConfiguredPolicy::from_config(&config);
    if args.keep_going {
        policy = policy.with_missing_features(MissingFeatureMode::Warn);
    }

    let mut class: ClassNode = load_json(&args.class)?;
    let mappings: MappingTable = load_json(&args.mappings)?;
    let hierarchy: ClassHierarchy = load_json(&args.hierarchy)?;
    let sink = RecordingSink::new();

    let class_name = class.name.clone();
    MixinRemapper::new(&mappings, &sink, &hierarchy)
        .with_policy(&policy)
        .remap_class(&mut class)
        .with_context(|| format!("Failed to remap {}", class_name))?;

    let renames = sink.into_renames();
    info!("{}: {} member renames", class_name, renames.len());
    Ok(RemapReport::new(class, renames))
}

pub fn run_remap(args: RemapArgs) -> Result<()> {
    let report = remap_class_file(&args)?;
    let json = report.to_json()?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
