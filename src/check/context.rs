//! The `check` pipeline.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::bottlenecks::BottleNecks;
use super::calculation::{CheckCalculation, CheckSettings};
use super::pricing::CheckPricing;
use super::prompt::Prompter;
use super::results::{CheckResults, OutputFormat};
use crate::graph::{CheckGraph, parse_template};
use crate::template::{SessionConfig, Template, TemplateTransformer, read_template};

/// Everything one `check` run needs.
pub struct CheckContext {
    /// Template handed to the translation engine.
    pub template_path: PathBuf,
    /// Template the resource graph is built from.
    pub graph_template_path: PathBuf,
    /// Session handed to the translation engine.
    pub session: SessionConfig,
    /// Account settings for the calculations.
    pub settings: CheckSettings,
    /// Output format of the results.
    pub format: OutputFormat,
    transformer: TemplateTransformer,
}

impl CheckContext {
    /// Context using the bundled translation engine and policy map.
    #[must_use]
    pub fn new(template_path: PathBuf, graph_template_path: PathBuf, session: SessionConfig) -> Self {
        Self {
            template_path,
            graph_template_path,
            session,
            settings: CheckSettings::default(),
            format: OutputFormat::default(),
            transformer: TemplateTransformer::default(),
        }
    }

    /// Use `settings` for the calculations.
    #[must_use]
    pub fn with_settings(mut self, settings: CheckSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Print results in `format`.
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Use `transformer` instead of the bundled one.
    #[must_use]
    pub fn with_transformer(mut self, transformer: TemplateTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    /// Run the whole pipeline and return the analysed graph.
    ///
    /// Stages run strictly in order: transform, build graph, bottleneck
    /// questions, pricing questions, calculations, printing. The first error
    /// stops the run.
    ///
    /// # Errors
    ///
    /// Any error from any stage.
    pub async fn run<P: Prompter>(&self, prompter: &mut P) -> Result<CheckGraph> {
        self.transform_template()?;

        tracing::info!("... analyzing application template");
        let mut graph = parse_template(&self.graph_template_path).with_context(|| {
            format!("Failed to analyze {}", self.graph_template_path.display())
        })?;

        BottleNecks::new(&mut graph).ask_entry_point_question(prompter).await?;
        CheckPricing::new(&mut graph).ask_pricing_questions(prompter).await?;
        CheckCalculation::new(&mut graph, &self.settings).run_bottle_neck_calculations();
        CheckResults::new(&graph, self.format).print_bottle_neck_results()?;

        Ok(graph)
    }

    /// Load the template and run it through the translation engine.
    ///
    /// # Errors
    ///
    /// Loader errors, or [`CheckError::InvalidTemplate`](crate::core::CheckError::InvalidTemplate)
    /// from the engine.
    pub fn transform_template(&self) -> Result<Template> {
        let template = read_template(&self.template_path)?;
        let normalized = self.transformer.transform(&template, &self.session)?;
        tracing::debug!("Transformed {} into {} top-level keys", self.template_path.display(), normalized.len());
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::prompt::ScriptedPrompter;
    use crate::core::CheckError;
    use crate::test_utils::{API_TEMPLATE, write_template};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_full_run() {
        let temp = TempDir::new().unwrap();
        let path = write_template(temp.path(), "template.yaml", API_TEMPLATE);
        let context = CheckContext::new(path.clone(), path, SessionConfig::default())
            .with_format(OutputFormat::Json);
        let mut prompter = ScriptedPrompter::from_yaml(
            "ApiFunction.tps: 100\nApiFunction.duration: 250\nWorkerFunction.requests: 1000\n",
        )
        .unwrap();

        let graph = context.run(&mut prompter).await.unwrap();

        assert_eq!(graph.len(), 2);
        let api = &graph.nodes()[0].analysis;
        assert!(api.entry_point);
        assert_eq!(api.concurrency.map(|c| c.required), Some(25));
        assert_eq!(api.monthly_requests, Some(259_200_000));
        assert!(graph.nodes().iter().all(|n| n.analysis.cost.is_some()));
        assert_eq!(prompter.asked()[0], "entry_points");
    }

    #[tokio::test]
    async fn test_invalid_template_stops_before_questions() {
        let temp = TempDir::new().unwrap();
        let path = write_template(
            temp.path(),
            "template.yaml",
            "Resources:\n  FnA:\n    Type: AWS::Serverless::Function\n    Properties: {}\n",
        );
        let context = CheckContext::new(path.clone(), path, SessionConfig::default());
        let mut prompter = ScriptedPrompter::default();

        let err = context.run(&mut prompter).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<CheckError>(), Some(CheckError::InvalidTemplate { .. })));
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_missing_template() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("template.yaml");
        let context = CheckContext::new(path.clone(), path, SessionConfig::default());

        let err = context.run(&mut ScriptedPrompter::default()).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<CheckError>(), Some(CheckError::TemplateNotFound { .. })));
    }

    #[tokio::test]
    async fn test_graph_template_is_separate() {
        let temp = TempDir::new().unwrap();
        let template = write_template(temp.path(), "template.yaml", API_TEMPLATE);
        let graph_template = write_template(
            temp.path(),
            "built.yaml",
            "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n",
        );
        let context = CheckContext::new(template, graph_template, SessionConfig::default());

        let graph = context.run(&mut ScriptedPrompter::default()).await.unwrap();
        assert!(graph.is_empty());
    }
}
