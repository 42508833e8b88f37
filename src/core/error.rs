//! Error handling for samcheck
//!
//! This module provides the error types and user-friendly error reporting for
//! the `samcheck` tool. The error system is designed around two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`CheckError`] - Enumerated error types for every expected failure
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! Library functions return [`anyhow::Result`] with a [`CheckError`] inside, so
//! callers that care about the failure mode can `downcast_ref::<CheckError>()`
//! while everything else just propagates with `?`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use samcheck_cli::core::{CheckError, user_friendly_error};
//!
//! let error = anyhow::Error::from(CheckError::TemplateNotFound {
//!     path: "template.yaml".to_string(),
//! });
//! let context = user_friendly_error(error);
//! context.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for samcheck operations
///
/// # Error Categories
///
/// ## Template Loading
/// - [`TemplateNotFound`] - The template path does not exist
/// - [`TemplateParse`] - The file is not valid YAML/JSON or its root is not a mapping
///
/// ## Translation
/// - [`InvalidTemplate`] - The translation engine rejected the template
///
/// ## Graph Construction
/// - [`DuplicateResource`] - Two resources share a stack path and name
/// - [`NestedStackCycle`] - A nested stack includes one of its ancestors
///
/// ## Questioning
/// - [`MissingAnswer`] - No answer and no default for a question
/// - [`InvalidAnswer`] - An answer could not be interpreted
///
/// [`TemplateNotFound`]: CheckError::TemplateNotFound
/// [`TemplateParse`]: CheckError::TemplateParse
/// [`InvalidTemplate`]: CheckError::InvalidTemplate
/// [`DuplicateResource`]: CheckError::DuplicateResource
/// [`NestedStackCycle`]: CheckError::NestedStackCycle
/// [`MissingAnswer`]: CheckError::MissingAnswer
/// [`InvalidAnswer`]: CheckError::InvalidAnswer
#[derive(Error, Debug)]
pub enum CheckError {
    /// Template file does not exist
    ///
    /// Raised before any read or parse is attempted.
    #[error("Template at {path} is not found")]
    TemplateNotFound {
        /// The path that was looked up
        path: String,
    },

    /// Template file could not be parsed
    #[error("Failed to parse template {path}: {reason}")]
    TemplateParse {
        /// Path of the template that failed to parse
        path: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The translation engine rejected the template as structurally invalid
    ///
    /// `message` already carries the engine's top-level message followed by
    /// every underlying cause, see
    /// [`TranslationError::aggregated_message`](crate::template::TranslationError::aggregated_message).
    #[error("{message}")]
    InvalidTemplate {
        /// Aggregated diagnostic
        message: String,
    },

    /// Two graph nodes have the same identity
    #[error("Resource '{name}' is declared more than once in stack '{stack_path}'")]
    DuplicateResource {
        /// Stack path of the duplicated resource (empty for the root stack)
        stack_path: String,
        /// Logical id of the duplicated resource
        name: String,
    },

    /// A nested stack points back at one of its ancestors
    #[error("Nested stack template {path} includes itself")]
    NestedStackCycle {
        /// Template file that closes the cycle
        path: String,
    },

    /// A question had no answer and no default
    #[error("No answer provided for '{key}'")]
    MissingAnswer {
        /// Question key
        key: String,
    },

    /// An answer could not be interpreted
    #[error("Invalid answer '{answer}' for '{key}'")]
    InvalidAnswer {
        /// Question key
        key: String,
        /// The rejected answer
        answer: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for CheckError {
    fn clone(&self) -> Self {
        match self {
            Self::TemplateNotFound {
                path,
            } => Self::TemplateNotFound {
                path: path.clone(),
            },
            Self::TemplateParse {
                path,
                reason,
            } => Self::TemplateParse {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::InvalidTemplate {
                message,
            } => Self::InvalidTemplate {
                message: message.clone(),
            },
            Self::DuplicateResource {
                stack_path,
                name,
            } => Self::DuplicateResource {
                stack_path: stack_path.clone(),
                name: name.clone(),
            },
            Self::NestedStackCycle {
                path,
            } => Self::NestedStackCycle {
                path: path.clone(),
            },
            Self::MissingAnswer {
                key,
            } => Self::MissingAnswer {
                key: key.clone(),
            },
            Self::InvalidAnswer {
                key,
                answer,
            } => Self::InvalidAnswer {
                key: key.clone(),
                answer: answer.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error is not Clone
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Context attached to every error raised while loading a nested stack.
///
/// [`user_friendly_error`] looks it up to point at the nested stack
/// resource instead of the root template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedStackContext {
    /// Logical id of the nested stack resource
    pub name: String,
}

impl fmt::Display for NestedStackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load nested stack '{}'", self.name)
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CheckError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`CheckError`]
    #[must_use]
    pub const fn new(error: CheckError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`CheckError`] anywhere in the error chain, [`std::io::Error`]
/// and YAML parser errors. Anything else is reported with its full cause chain.
///
/// Context layers wrapped around a [`CheckError`] are kept in the details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(check_error) = error.chain().find_map(|e| e.downcast_ref::<CheckError>()) {
        let mut context = create_error_context(check_error.clone());

        let trail: Vec<String> = error
            .chain()
            .take_while(|e| !e.is::<CheckError>())
            .map(std::string::ToString::to_string)
            .collect();
        if !trail.is_empty() {
            let trail = trail.join(": ");
            context.details = Some(match context.details.take() {
                Some(details) => format!("{trail}. {details}"),
                None => trail,
            });
        }

        if let Some(nested) = error.downcast_ref::<NestedStackContext>() {
            context.suggestion = Some(format!(
                "Check the Location/TemplateURL of nested stack '{}' in the parent template",
                nested.name
            ));
        }
        return context;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CheckError::Other {
                    message: format!("Permission denied: {error:#}"),
                })
                .with_suggestion("Check the ownership and permissions of the template files")
                .with_details("samcheck needs read access to every template it analyzes");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CheckError::Other {
                    message: format!("File not found: {error:#}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(yaml_error) = error.downcast_ref::<serde_yaml::Error>() {
        return ErrorContext::new(CheckError::Other {
            message: format!("YAML parsing error: {yaml_error}"),
        })
        .with_suggestion("Check the YAML syntax of the file. Verify indentation and quoting");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(CheckError::Other {
        message,
    })
}

/// Map each [`CheckError`] variant to an [`ErrorContext`] with tailored suggestions.
fn create_error_context(error: CheckError) -> ErrorContext {
    match &error {
        CheckError::TemplateNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the template location with --template, or run samcheck from the directory containing template.yaml"),

        CheckError::TemplateParse { .. } => ErrorContext::new(error)
            .with_suggestion("Check the YAML/JSON syntax of the template. The top level must be a mapping")
            .with_details("Templates are parsed as YAML, which also accepts JSON documents"),

        CheckError::InvalidTemplate { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the listed resources and run the check again")
            .with_details("The template could not be translated into CloudFormation"),

        CheckError::DuplicateResource { .. } => ErrorContext::new(error)
            .with_suggestion("Rename one of the resources so every logical id is unique within its stack"),

        CheckError::NestedStackCycle { .. } => ErrorContext::new(error)
            .with_suggestion("Check the Location/TemplateURL properties of nested stacks for a loop"),

        CheckError::MissingAnswer { key } => {
            let suggestion = format!("Add a '{key}' entry to the answers file or run samcheck interactively");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        CheckError::InvalidAnswer { .. } => ErrorContext::new(error)
            .with_suggestion("Answer rates and durations with non-negative numbers and request counts with whole numbers"),

        CheckError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check ~/.samcheck/config.toml (or the file passed with --config) for syntax errors"),

        CheckError::IoError(_) | CheckError::Other { .. } => ErrorContext::new(error),
    }
}
