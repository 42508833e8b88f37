//! Interactive questions.
//!
//! Every value the check stages need from the user goes through a
//! [`Prompter`]. [`TerminalPrompter`] asks on the terminal;
//! [`ScriptedPrompter`] answers from a prepared mapping so runs can be
//! scripted (`samcheck check --answers answers.yaml`) and tested.
//!
//! Answers file format, keyed by question key:
//!
//! ```yaml
//! entry_points: ApiFunction
//! ApiFunction.tps: 50
//! ApiFunction.duration: 200
//! ApiFunction.requests: 1000000
//! ```

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::constants::MAX_PROMPT_ATTEMPTS;
use crate::core::CheckError;

/// A question put to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Stable key, used to look answers up in scripted runs.
    pub key: String,
    /// Text shown to the user.
    pub text: String,
    /// Answer used when the user gives none.
    pub default: Option<String>,
}

impl Question {
    /// Question without a default.
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            default: None,
        }
    }

    /// Set the default answer.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn default_or_missing(&self) -> Result<String> {
        self.default.clone().ok_or_else(|| {
            CheckError::MissingAnswer {
                key: self.key.clone(),
            }
            .into()
        })
    }
}

/// Source of answers.
#[allow(async_fn_in_trait)]
pub trait Prompter {
    /// Answer `question`, returning the trimmed answer text.
    ///
    /// # Errors
    ///
    /// [`CheckError::MissingAnswer`] when there is neither an answer nor a
    /// default, or an I/O error from the underlying input.
    async fn ask(&mut self, question: &Question) -> Result<String>;
}

/// Asks questions on stderr and reads answers from stdin.
pub struct TerminalPrompter {
    input: Lines<BufReader<Stdin>>,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    /// Prompter over the process stdin and stderr.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Prompter for TerminalPrompter {
    async fn ask(&mut self, question: &Question) -> Result<String> {
        let prompt = match &question.default {
            Some(default) => format!("{} [{}]: ", question.text, default),
            None => format!("{}: ", question.text),
        };
        // stdout is reserved for the report
        let mut stderr = tokio::io::stderr();
        stderr.write_all(prompt.as_bytes()).await?;
        stderr.flush().await?;

        // EOF means nobody is going to answer
        let Some(line) = self.input.next_line().await? else {
            return question.default_or_missing();
        };

        let answer = line.trim();
        if answer.is_empty() {
            Ok(question.default.clone().unwrap_or_default())
        } else {
            Ok(answer.to_string())
        }
    }
}

/// Answers questions from a prepared key → answer mapping.
///
/// Questions without a prepared answer take their default.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: BTreeMap<String, String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// Prompter answering from `answers`.
    #[must_use]
    pub fn new(answers: BTreeMap<String, String>) -> Self {
        Self {
            answers,
            asked: Vec::new(),
        }
    }

    /// Prompter answering from the YAML mapping at `path`.
    ///
    /// Scalar values (strings, numbers, booleans) are accepted as answers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a YAML mapping, or
    /// holds a non-scalar answer.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid answers file {}", path.display()))
    }

    /// Prompter answering from YAML text.
    ///
    /// # Errors
    ///
    /// See [`ScriptedPrompter::from_file`].
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let answers: BTreeMap<String, Value> = serde_yaml::from_str(content)?;
        let answers = answers
            .into_iter()
            .map(|(key, value)| {
                let answer = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(CheckError::InvalidAnswer {
                            key,
                            answer: format!("{other:?}"),
                        });
                    }
                };
                Ok((key, answer))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self::new(answers))
    }

    /// Keys of the questions asked so far, in order.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, question: &Question) -> Result<String> {
        self.asked.push(question.key.clone());
        match self.answers.get(&question.key) {
            Some(answer) => {
                tracing::debug!("{} = {answer}", question.key);
                Ok(answer.trim().to_string())
            }
            None => question.default_or_missing(),
        }
    }
}

/// Ask `question` until `parse` accepts the answer.
///
/// Gives up after [`MAX_PROMPT_ATTEMPTS`] rejected answers.
///
/// # Errors
///
/// [`CheckError::InvalidAnswer`] carrying the last rejected answer, or any
/// error from the prompter.
pub async fn ask_parsed<P, T, F>(prompter: &mut P, question: &Question, parse: F) -> Result<T>
where
    P: Prompter,
    F: Fn(&str) -> Option<T>,
{
    let mut rejected = String::new();
    for attempt in 1..=MAX_PROMPT_ATTEMPTS {
        let answer = prompter.ask(question).await?;
        if let Some(value) = parse(&answer) {
            return Ok(value);
        }
        tracing::warn!(
            "Invalid answer '{answer}' for {} (attempt {attempt}/{MAX_PROMPT_ATTEMPTS})",
            question.key
        );
        rejected = answer;
    }

    Err(CheckError::InvalidAnswer {
        key: question.key.clone(),
        answer: rejected,
    }
    .into())
}

/// Ask for a non-negative, finite number.
///
/// # Errors
///
/// See [`ask_parsed`].
pub async fn ask_number<P: Prompter>(prompter: &mut P, question: &Question) -> Result<f64> {
    ask_parsed(prompter, question, |answer| {
        answer.parse::<f64>().ok().filter(|n| n.is_finite() && *n >= 0.0)
    })
    .await
}

/// Ask for a whole count. `1000000`, `1e6` and `1_000_000` are all accepted.
///
/// # Errors
///
/// See [`ask_parsed`].
pub async fn ask_count<P: Prompter>(prompter: &mut P, question: &Question) -> Result<u64> {
    ask_parsed(prompter, question, |answer| {
        let answer = answer.replace('_', "");
        answer.parse::<u64>().ok().or_else(|| {
            answer
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
                .map(|n| n as u64)
        })
    })
    .await
}
