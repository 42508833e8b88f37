//! `samcheck check`.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::check::{
    CheckContext, CheckSettings, OutputFormat, ScriptedPrompter, TerminalPrompter,
};
use crate::config::GlobalConfig;
use crate::constants::DEFAULT_TEMPLATE_FILE;
use crate::template::{BundledPolicyMap, LocalTranslator, SessionConfig, TemplateTransformer};

/// Analyse a template for bottlenecks and estimate its cost.
///
/// Without `--answers` every question is asked on the terminal.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Template to translate and validate
    #[arg(short, long, default_value = DEFAULT_TEMPLATE_FILE, value_name = "PATH")]
    template: PathBuf,

    /// Template to build the resource graph from (defaults to --template)
    #[arg(long, value_name = "PATH")]
    graph_template: Option<PathBuf>,

    /// AWS region handed to the translation engine
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// AWS credential profile handed to the translation engine
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// YAML file answering the questions by key instead of prompting
    #[arg(long, value_name = "FILE")]
    answers: Option<PathBuf>,

    /// Output format of the results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl CheckCommand {
    /// Run the check pipeline.
    ///
    /// Session settings come from the flags, then the environment, then the
    /// global configuration at `config_path`.
    ///
    /// # Errors
    ///
    /// Configuration, answers file and pipeline errors.
    pub async fn execute_with_config(self, config_path: Option<PathBuf>) -> Result<()> {
        let global = GlobalConfig::load_with_optional(config_path).await?;

        let session = SessionConfig::new(
            self.profile.or_else(|| global.profile.clone()),
            self.region.or_else(|| global.region.clone()),
        );
        let transformer = TemplateTransformer::new(
            Box::new(LocalTranslator),
            Box::new(BundledPolicyMap::with_extra(global.managed_policies.clone())),
        );
        let graph_template = self.graph_template.unwrap_or_else(|| self.template.clone());

        let context = CheckContext::new(self.template, graph_template, session)
            .with_settings(CheckSettings::from(&global))
            .with_format(self.format)
            .with_transformer(transformer);

        if let Some(path) = self.answers {
            context.run(&mut ScriptedPrompter::from_file(&path)?).await?;
        } else {
            context.run(&mut TerminalPrompter::new()).await?;
        }

        Ok(())
    }
}
