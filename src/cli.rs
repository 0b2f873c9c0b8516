use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mixin-remap")]
#[command(about = "Remaps member references inside mixin annotation metadata", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remap the annotation metadata of one mixin class
    Remap {
        /// Mixin class as JSON
        #[arg(long)]
        class: PathBuf,

        /// Mapping table as JSON
        #[arg(long)]
        mappings: PathBuf,

        /// Source-namespace class hierarchy as JSON
        #[arg(long)]
        hierarchy: PathBuf,

        /// Configuration file (defaults to the nearest .mixin-remap.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Log missing features instead of failing
        #[arg(long)]
        keep_going: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve one target selector against a set of target classes
    Resolve {
        /// Selector such as `foo()V` or `Lcom/example/T;count:I`
        selector: String,

        /// Target class, internal or dotted name
        #[arg(long = "target", required = true)]
        targets: Vec<String>,

        /// Mapping table as JSON
        #[arg(long)]
        mappings: PathBuf,

        /// Source-namespace class hierarchy as JSON
        #[arg(long)]
        hierarchy: PathBuf,

        /// Only infer methods
        #[arg(long)]
        methods_only: bool,
    },

    /// Initialize a configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
