//! Output formatting and status reporting

use console::{style, Term};
use pagescope::PropertyValue;

use crate::error::CliResult;

/// Output format for read results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `path = value` lines
    #[default]
    Text,
    /// One JSON object keyed by path
    Json,
}

/// One property read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    /// Path as requested
    pub path: String,
    /// Value read
    pub value: PropertyValue,
}

impl Reading {
    /// Pair a path with its value
    #[must_use]
    pub fn new(path: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }
}

/// Render readings in the requested format
pub fn render_readings(
    readings: &[Reading],
    format: OutputFormat,
    use_color: bool,
) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(readings, use_color)),
        OutputFormat::Json => render_json(readings),
    }
}

fn render_text(readings: &[Reading], use_color: bool) -> String {
    let mut output = String::new();
    for reading in readings {
        let path = if use_color {
            style(&reading.path).cyan().to_string()
        } else {
            reading.path.clone()
        };
        output.push_str(&format!("{path} = {}\n", reading.value));
    }
    output
}

fn render_json(readings: &[Reading]) -> CliResult<String> {
    let mut object = serde_json::Map::new();
    for reading in readings {
        object.insert(reading.path.clone(), serde_json::to_value(&reading.value)?);
    }
    let mut json = serde_json::to_string_pretty(&serde_json::Value::Object(object))?;
    json.push('\n');
    Ok(json)
}

/// Status lines on stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Reporter {
    /// Create a reporter writing to stderr
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("ℹ").blue().to_string()
        } else {
            "INFO".to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }
}
