pub mod deploy_config;

pub use deploy_config::DeployConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dc-component")]
#[command(about = "Package, lint and deploy a custom component to the platform")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to dc-component.toml")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Zip the project tree, skipping build output and caches
    Package(PackageArgs),
    /// Upload an existing archive
    Upload {
        #[arg(long)]
        archive: Option<PathBuf>,
    },
    /// List uploaded custom components
    List,
    /// Print the platform logs for custom components
    Logs,
    /// Run the configured linters
    Lint {
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Lint, package and upload in one go
    Deploy {
        #[command(flatten)]
        package: PackageArgs,

        #[arg(long)]
        skip_lint: bool,
    },
    /// Boost and rank a JSON array of documents
    Rank {
        #[arg(long)]
        input: PathBuf,

        #[arg(long = "boost", value_name = "PATTERN=FACTOR", value_parser = parse_boost)]
        boosts: Vec<(String, f64)>,

        #[arg(long)]
        top_k: Option<usize>,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct PackageArgs {
    #[arg(long)]
    pub root: Option<PathBuf>,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[cfg(feature = "cli")]
impl PackageArgs {
    pub fn apply_to(&self, config: &mut DeployConfig) {
        if let Some(root) = &self.root {
            config.package.root = root.to_string_lossy().into_owned();
        }
        if let Some(output) = &self.output {
            config.package.output = output.to_string_lossy().into_owned();
        }
    }
}

/// `PATTERN=FACTOR`，以最後一個 `=` 分割，pattern 本身可含 `=`
#[cfg(feature = "cli")]
pub fn parse_boost(raw: &str) -> std::result::Result<(String, f64), String> {
    let (pattern, factor) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PATTERN=FACTOR, got `{}`", raw))?;
    if pattern.is_empty() {
        return Err("pattern cannot be empty".to_string());
    }
    let factor: f64 = factor
        .trim()
        .parse()
        .map_err(|e| format!("invalid boost factor `{}`: {}", factor, e))?;
    Ok((pattern.to_string(), factor))
}
