use clap::Parser;
use dc_custom_component::core::client::component_items;
use dc_custom_component::core::PlatformApi;
use dc_custom_component::utils::{logger, validation::Validate};
use dc_custom_component::{
    CliConfig, Command, ComponentError, DeployConfig, DeployEngine, DocumentJoiner,
    DocumentPipeline, LintRunner, Packager, PlatformClient, RegexBooster, Result, StaticSource,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI args: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, exit code {})",
            e,
            e.category(),
            e.exit_code()
        );
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let mut config = DeployConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Package(args) => {
            args.apply_to(&mut config);
            config.validate()?;

            let summary = packager(&config)?.package()?;
            println!(
                "📦 Packaged {} files ({} bytes) into {}",
                summary.file_count,
                summary.bytes,
                summary.path.display()
            );
        }
        Command::Upload { archive } => {
            config.validate()?;
            let archive = archive.unwrap_or_else(|| config.output());
            if !archive.is_file() {
                return Err(ComponentError::ValidationError {
                    message: format!(
                        "Archive {} not found, run `dc-component package` first",
                        archive.display()
                    ),
                });
            }

            let client = PlatformClient::from_config(&config)?;
            let response = client.upload(&archive).await?;
            tracing::info!("✅ Uploaded {}", archive.display());
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::List => {
            config.validate()?;
            let client = PlatformClient::from_config(&config)?;
            let response = client.list().await?;
            tracing::info!("Found {} components", component_items(&response).len());
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Logs => {
            config.validate()?;
            let client = PlatformClient::from_config(&config)?;
            print!("{}", client.logs().await?);
        }
        Command::Lint { root } => {
            if let Some(root) = root {
                config.package.root = root.to_string_lossy().into_owned();
            }
            config.validate()?;

            let report = LintRunner::new(config.lint.commands.clone(), config.root())
                .run()
                .await?;
            println!("✅ {} lint commands passed", report.commands_run.len());
        }
        Command::Deploy { package, skip_lint } => {
            package.apply_to(&mut config);
            config.validate()?;

            // 先確認 token，避免打包後才發現無法上傳
            let client = PlatformClient::from_config(&config)?;
            let mut engine = DeployEngine::new(packager(&config)?, client);
            if config.lint.enabled && !skip_lint {
                engine = engine.with_lint(LintRunner::new(
                    config.lint.commands.clone(),
                    config.root(),
                ));
            } else {
                tracing::info!("Skipping lint");
            }

            let report = engine.run().await?;
            println!(
                "✅ Deployed {} ({} files) at {}",
                report.archive.path.display(),
                report.archive.file_count,
                report.uploaded_at.to_rfc3339()
            );
            println!("{}", serde_json::to_string_pretty(&report.response)?);
        }
        Command::Rank {
            input,
            boosts,
            top_k,
        } => {
            config.validate()?;

            let rules = config
                .boost_rules()
                .map(|(pattern, boost)| (pattern.to_string(), boost))
                .chain(boosts);
            let booster = RegexBooster::new(rules)?;
            if booster.is_empty() {
                tracing::warn!("No boost rules configured, documents are only sorted");
            }

            let mut joiner = DocumentJoiner::new();
            if let Some(top_k) = top_k {
                joiner = joiner.with_top_k(top_k);
            }

            let pipeline = DocumentPipeline::new(StaticSource::from_json_file(&input)?)
                .add_component(booster)
                .add_component(joiner);
            let documents = pipeline.run("")?;
            println!("{}", serde_json::to_string_pretty(&documents)?);
        }
    }

    Ok(())
}

fn packager(config: &DeployConfig) -> Result<Packager> {
    Packager::new(config.root(), config.output(), &config.package.exclude)
}
