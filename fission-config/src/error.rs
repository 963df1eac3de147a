//! Error types for configuration loading and validation

use std::path::PathBuf;

use fission_core::SimulationError;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Unified configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not found error.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Configuration validation error.
    #[error("Invalid configuration:\n{}", format_validation_errors(.0))]
    Validation(#[source] ValidationErrors),

    /// Figment parsing error.
    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),

    /// Values passed validation but the core model still rejected them.
    #[error("Invalid simulation parameters: {0}")]
    Model(#[from] SimulationError),
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut output = String::new();
    write_validation_errors(&mut output, "", errors);
    output
}

/// Flattens nested struct errors into `Field 'a.b':` blocks.
fn write_validation_errors(output: &mut String, prefix: &str, errors: &ValidationErrors) {
    use std::fmt::Write;

    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in entries {
        let path = if prefix.is_empty() {
            field.to_string()
        } else if *field == "__all__" {
            prefix.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errors) => {
                let _ = writeln!(output, "Field '{}':", path);
                for error in errors {
                    let message = match &error.message {
                        Some(msg) => msg.to_string(),
                        None => error.code.to_string(),
                    };
                    let _ = writeln!(output, "  - {}", message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                write_validation_errors(output, &path, nested);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    write_validation_errors(output, &format!("{path}[{index}]"), nested);
                }
            }
        }
    }
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;
    use crate::FissionConfig;

    #[test]
    fn test_nested_errors_name_full_path() {
        let mut config = FissionConfig::default();
        config.simulation.probabilities.escape = 0.5;
        config.render.bar_color = "blue".into();

        let err = ConfigError::from(config.validate().unwrap_err());
        let message = err.to_string();
        assert!(message.contains("Field 'simulation.probabilities':"), "{message}");
        assert!(message.contains("expected 1.0"), "{message}");
        assert!(message.contains("Field 'render.bar_color':"), "{message}");
        assert!(message.contains("invalid_hex_color"), "{message}");
    }
}
