use crate::domain::model::LintReport;
use crate::utils::error::{ComponentError, Result};
use std::path::PathBuf;
use tokio::process::Command;

pub fn default_lint_commands() -> Vec<Vec<String>> {
    [
        vec!["ruff", "check", "."],
        vec!["black", "--check", "."],
        vec!["mypy", "src"],
    ]
    .into_iter()
    .map(|argv| argv.into_iter().map(String::from).collect())
    .collect()
}

/// 依序執行 lint 指令，第一個失敗即中止
pub struct LintRunner {
    commands: Vec<Vec<String>>,
    working_dir: PathBuf,
}

impl LintRunner {
    pub fn new(commands: Vec<Vec<String>>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            commands,
            working_dir: working_dir.into(),
        }
    }

    pub fn commands(&self) -> &[Vec<String>] {
        &self.commands
    }

    pub async fn run(&self) -> Result<LintReport> {
        let mut report = LintReport::default();

        for argv in &self.commands {
            let Some((program, args)) = argv.split_first() else {
                continue;
            };
            let command_line = argv.join(" ");
            tracing::info!("🔎 Running `{}`", command_line);

            let status = match Command::new(program)
                .args(args)
                .current_dir(&self.working_dir)
                .status()
                .await
            {
                Ok(status) => status,
                Err(source) => {
                    tracing::error!("Could not start `{}`: {}", command_line, source);
                    return Err(ComponentError::LintSpawnError {
                        command: command_line,
                        source,
                    });
                }
            };

            if !status.success() {
                return Err(ComponentError::LintError {
                    command: command_line,
                    code: status.code(),
                });
            }

            report.commands_run.push(command_line);
        }

        Ok(report)
    }
}
