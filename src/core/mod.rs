pub mod archive;
pub mod client;
pub mod deploy;
pub mod lint;

pub use crate::domain::model::{ArchiveSummary, DeployReport, Document, LintReport};
pub use crate::domain::ports::{ConfigProvider, DocumentComponent, DocumentSource, PlatformApi};
pub use crate::utils::error::Result;
