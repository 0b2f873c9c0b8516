use crate::host::load_json;
use crate::mapping::{ClassHierarchy, MappingTable, RecordingSink};
use crate::selector::DescriptorFilter;
use crate::targets::TargetSet;
use crate::MixinRemapper;
use anyhow::Result;
use std::path::PathBuf;

pub struct ResolveArgs {
    pub selector: String,
    pub targets: Vec<String>,
    pub mappings: PathBuf,
    pub hierarchy: PathBuf,
    pub methods_only: bool,
}

/// Resolves one selector into its canonical target-namespace form.
pub fn resolve_selector(args: &ResolveArgs) -> Result<String> {
    let mappings: MappingTable = load_json(&args.mappings)?;
    let hierarchy: ClassHierarchy = load_json(&args.hierarchy)?;
    let sink = RecordingSink::new();

    let targets: TargetSet = args.targets.iter().map(|t| t.replace('.', "/")).collect();
    let filter = if args.methods_only {
        DescriptorFilter::MethodOnly
    } else {
        DescriptorFilter::Any
    };

    let prefix = format!("Cannot resolve '{}': ", args.selector);
    let resolved = MixinRemapper::new(&mappings, &sink, &hierarchy).remap_target_selector(
        &prefix,
        &args.selector,
        Some(&targets),
        &filter,
    )?;
    Ok(resolved)
}

pub fn run_resolve(args: ResolveArgs) -> Result<()> {
    println!("{}", resolve_selector(&args)?);
    Ok(())
}
