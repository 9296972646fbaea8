use anyhow::Result;
use clap::Parser;
use ndai::commands::{self, config::Config};
use std::path::PathBuf;

/// ndai - Non-Destructive Archive Installer
///
/// Moves the contents of extracted archive packages into their configured
/// target directory, once per distribution URL, without wiping what is
/// already there.
///
/// Targets come from the project's `extra.installer-paths` first, then from
/// the package's `extra.target-dir`.
///
/// Examples:
///   ndai install widget.json          # Relocate an extracted package
///   ndai status acme/widget           # Show the last relocated URL
#[derive(Parser, Debug)]
#[command(author, version = env!("NDAI_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root directory (defaults to the current directory)
    #[arg(
        long = "project-root",
        env = "NDAI_PROJECT_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub project_root: Option<PathBuf>,

    /// Vendor directory, relative to the project root
    #[arg(
        long = "vendor-dir",
        env = "NDAI_VENDOR_DIR",
        value_name = "PATH",
        default_value = "vendor",
        global = true
    )]
    pub vendor_dir: PathBuf,

    /// Project manifest (defaults to <project-root>/composer.json)
    #[arg(long = "project-file", value_name = "PATH", global = true)]
    pub project_file: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Install packages from their manifests
    Install(InstallArgs),

    /// Update a package from one manifest to another
    Update(UpdateArgs),

    /// Uninstall a package
    Uninstall(UninstallArgs),

    /// Show the last relocated URL of packages
    Status(StatusArgs),
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Package manifests (JSON)
    #[arg(value_name = "PACKAGE_JSON", required = true)]
    pub manifests: Vec<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Manifest of the currently installed package
    #[arg(value_name = "INITIAL_JSON")]
    pub initial: PathBuf,

    /// Manifest of the package to update to
    #[arg(value_name = "TARGET_JSON")]
    pub target: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct UninstallArgs {
    #[arg(value_name = "PACKAGE_JSON")]
    pub manifest: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Package names, e.g. "acme/widget"
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = ndai::runtime::RealRuntime;
    let config = Config::new(runtime, cli.project_root, cli.vendor_dir, cli.project_file)?;

    match cli.command {
        Commands::Install(args) => commands::install(config, &args.manifests)?,
        Commands::Update(args) => commands::update(config, &args.initial, &args.target)?,
        Commands::Uninstall(args) => commands::uninstall(config, &args.manifest)?,
        Commands::Status(args) => commands::status(config, &args.names)?,
    }
    Ok(())
}
