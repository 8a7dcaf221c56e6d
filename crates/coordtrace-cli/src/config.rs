use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use serde::Deserialize;

use coordtrace_types::EngineConfig;

/// Mirror of `coordtrace.toml`'s `[engine]` table. Every field is optional:
/// a field absent from the file falls through to the environment, then the
/// built-in default, exactly like a field never set on the CLI does.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub engine: EngineFileConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineFileConfig {
    pub time_window: Option<f64>,
    pub min_edge_weight: Option<i64>,
    pub similarity_threshold: Option<f64>,
    pub min_document_size_similarity: Option<usize>,
    pub n_workers: Option<usize>,
}

impl FileConfig {
    /// Loads `coordtrace.toml` from the current directory. A missing file is
    /// not an error — it just means every field falls through to the next
    /// layer, same as the teacher's `Config::load_from` treats a missing
    /// workspace config.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("coordtrace.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Priority chain for one knob: CLI flag > `COORDTRACE_*` environment
/// variable > `coordtrace.toml` > built-in default.
fn resolve<T: FromStr>(cli: Option<T>, env_var: &str, file: Option<T>, default: T) -> T {
    cli.or_else(|| std::env::var(env_var).ok().and_then(|v| v.parse().ok()))
        .or(file)
        .unwrap_or(default)
}

pub struct EngineOverrides {
    pub time_window: Option<f64>,
    pub min_edge_weight: Option<i64>,
    pub similarity_threshold: Option<f64>,
    pub min_document_size_similarity: Option<usize>,
    pub resolved: bool,
    pub n_workers: Option<usize>,
}

pub fn resolve_engine_config(overrides: EngineOverrides, file: &FileConfig) -> EngineConfig {
    let default = EngineConfig::default();
    EngineConfig {
        time_window: resolve(
            overrides.time_window,
            "COORDTRACE_TIME_WINDOW",
            file.engine.time_window,
            default.time_window,
        ),
        min_edge_weight: resolve(
            overrides.min_edge_weight,
            "COORDTRACE_MIN_EDGE_WEIGHT",
            file.engine.min_edge_weight,
            default.min_edge_weight,
        ),
        similarity_threshold: resolve(
            overrides.similarity_threshold,
            "COORDTRACE_SIMILARITY_THRESHOLD",
            file.engine.similarity_threshold,
            default.similarity_threshold,
        ),
        min_document_size_similarity: resolve(
            overrides.min_document_size_similarity,
            "COORDTRACE_MIN_DOCUMENT_SIZE_SIMILARITY",
            file.engine.min_document_size_similarity,
            default.min_document_size_similarity,
        ),
        resolved: overrides.resolved,
        n_workers: resolve(
            overrides.n_workers,
            "COORDTRACE_N_WORKERS",
            file.engine.n_workers,
            default.n_workers,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = FileConfig::load_from(&dir.path().join("coordtrace.toml")).unwrap();
        assert!(config.engine.n_workers.is_none());
    }

    #[test]
    fn file_values_are_parsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coordtrace.toml");
        std::fs::write(&path, "[engine]\nn_workers = 8\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.engine.n_workers, Some(8));
    }

    #[test]
    fn cli_flag_wins_over_file_value() {
        let file = FileConfig {
            engine: EngineFileConfig {
                n_workers: Some(8),
                ..Default::default()
            },
        };
        let overrides = EngineOverrides {
            time_window: None,
            min_edge_weight: None,
            similarity_threshold: None,
            min_document_size_similarity: None,
            resolved: false,
            n_workers: Some(2),
        };
        let resolved = resolve_engine_config(overrides, &file);
        assert_eq!(resolved.n_workers, 2);
    }

    #[test]
    fn file_value_wins_over_default_when_no_cli_flag() {
        let file = FileConfig {
            engine: EngineFileConfig {
                n_workers: Some(8),
                ..Default::default()
            },
        };
        let overrides = EngineOverrides {
            time_window: None,
            min_edge_weight: None,
            similarity_threshold: None,
            min_document_size_similarity: None,
            resolved: false,
            n_workers: None,
        };
        let resolved = resolve_engine_config(overrides, &file);
        assert_eq!(resolved.n_workers, 8);
    }
}
