use crate::core::archive::Packager;
use crate::core::lint::LintRunner;
use crate::core::PlatformApi;
use crate::domain::model::DeployReport;
use crate::utils::error::Result;

pub struct DeployEngine<P: PlatformApi> {
    packager: Packager,
    api: P,
    lint: Option<LintRunner>,
}

impl<P: PlatformApi> DeployEngine<P> {
    pub fn new(packager: Packager, api: P) -> Self {
        Self {
            packager,
            api,
            lint: None,
        }
    }

    pub fn with_lint(mut self, lint: LintRunner) -> Self {
        self.lint = Some(lint);
        self
    }

    pub async fn run(&self) -> Result<DeployReport> {
        tracing::info!("Starting deploy of {}", self.packager.root().display());

        // Lint
        if let Some(lint) = &self.lint {
            tracing::info!("Linting ({} commands)...", lint.commands().len());
            lint.run().await?;
        }

        // Package
        tracing::info!("Packaging...");
        let archive = self.packager.package()?;
        tracing::info!(
            "📦 {} files, {} bytes -> {}",
            archive.file_count,
            archive.bytes,
            archive.path.display()
        );

        // Upload
        tracing::info!("Uploading...");
        let response = self.api.upload(&archive.path).await?;

        Ok(DeployReport {
            archive,
            response,
            uploaded_at: chrono::Utc::now(),
        })
    }
}
