pub mod components;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, PackageArgs};

pub use components::{DocumentJoiner, DocumentPipeline, RegexBooster, StaticSource};
pub use config::DeployConfig;
pub use self::core::{archive::Packager, client::PlatformClient, deploy::DeployEngine, lint::LintRunner};
pub use utils::error::{ComponentError, Result};
