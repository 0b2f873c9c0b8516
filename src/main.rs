use anyhow::Result;
use clap::Parser;
use mixin_remap::cli::{Cli, Commands};
use mixin_remap::commands::remap::RemapArgs;
use mixin_remap::commands::resolve::ResolveArgs;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(verbose: u8) {
    let directive = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let subscriber = fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Remap {
            class,
            mappings,
            hierarchy,
            config,
            keep_going,
            output,
        } => mixin_remap::commands::remap::run_remap(RemapArgs {
            class,
            mappings,
            hierarchy,
            config,
            keep_going,
            output,
        }),
        Commands::Resolve {
            selector,
            targets,
            mappings,
            hierarchy,
            methods_only,
        } => mixin_remap::commands::resolve::run_resolve(ResolveArgs {
            selector,
            targets,
            mappings,
            hierarchy,
            methods_only,
        }),
        Commands::Init { force } => mixin_remap::commands::init::init_config(force),
    }
}
