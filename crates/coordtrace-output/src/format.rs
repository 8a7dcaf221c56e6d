use std::fmt;
use std::str::FromStr;

use coordtrace_types::Error;

/// Graph export format, selected by the CLI's `--output-format` flag.
/// Kept distinct from `coordtrace_types::NetworkKind`'s own `FromStr`: this
/// parses a serialization choice, not a computation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    GraphMl,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::GraphMl => write!(f, "graphml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "graphml" => Ok(OutputFormat::GraphMl),
            other => Err(Error::InvalidMessage(format!(
                "unknown output format: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_formats_case_insensitively() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!(
            "GraphML".parse::<OutputFormat>().unwrap(),
            OutputFormat::GraphMl
        );
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
