// src/config.rs
use crate::{
    combine::{discover_daily_files, parse_month},
    error::CsvSqlError,
};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

static BARE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let f = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_yaml::from_reader(f).with_context(|| format!("parsing config {}", path.display()))
}

/// Settings for the CSV-to-SQL converter. Missing keys take the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConvertConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub table_name: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("combined_output_Main.csv"),
            output_path: PathBuf::from("main_output.sql"),
            table_name: "my_table".to_string(),
        }
    }
}

impl ConvertConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let cfg: Self = load_yaml(path.as_ref())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// The table name is written into every statement unquoted, so it must
    /// be a bare identifier.
    pub fn validate(&self) -> Result<()> {
        let name = &self.table_name;
        if name.is_empty() {
            return Err(CsvSqlError::InvalidConfig("table_name is empty".into()).into());
        }
        if !BARE_IDENTIFIER.is_match(name) {
            return Err(CsvSqlError::InvalidConfig(format!(
                "table_name {:?} is not a bare identifier ([A-Za-z_][A-Za-z0-9_]*)",
                name
            ))
            .into());
        }
        Ok(())
    }
}

/// Settings for the daily CSV combiner.
///
/// `files` lists inputs explicitly; when empty, `<input_dir>/<prefix>_*.csv`
/// files dated within `month` (`YYYYMM`) are used instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CombineConfig {
    pub input_dir: PathBuf,
    pub prefix: String,
    pub month: Option<String>,
    pub files: Vec<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            prefix: "events".to_string(),
            month: None,
            files: Vec::new(),
            output_path: None,
        }
    }
}

impl CombineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let cfg: Self = load_yaml(path.as_ref())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() && self.month.is_none() {
            return Err(
                CsvSqlError::InvalidConfig("set either `files` or `month`".into()).into(),
            );
        }
        if let Some(m) = &self.month {
            parse_month(m)?;
        }
        Ok(())
    }

    /// Input files and output path for this run.
    pub fn resolve(&self) -> Result<(Vec<PathBuf>, PathBuf)> {
        self.validate()?;
        let month = self.month.as_deref().map(parse_month).transpose()?;

        let inputs = if self.files.is_empty() {
            // validate() guarantees a month here
            let month = month.ok_or_else(|| CsvSqlError::InvalidConfig("month missing".into()))?;
            discover_daily_files(&self.input_dir, &self.prefix, month)?
        } else {
            self.files.clone()
        };

        let output = match (&self.output_path, month) {
            (Some(p), _) => p.clone(),
            (None, Some(m)) => PathBuf::from(format!("combined_output_{}.csv", m.format("%b"))),
            (None, None) => PathBuf::from("combined_output.csv"),
        };
        Ok((inputs, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_convert_defaults() {
        let cfg = ConvertConfig::default();
        assert_eq!(cfg.table_name, "my_table");
        assert_eq!(cfg.output_path, PathBuf::from("main_output.sql"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_convert_partial_yaml() -> Result<()> {
        let tmp = NamedTempFile::new()?;
        fs::write(tmp.path(), "input_path: feb.csv\ntable_name: events\n")?;
        let cfg = ConvertConfig::load(tmp.path())?;
        assert_eq!(cfg.input_path, PathBuf::from("feb.csv"));
        assert_eq!(cfg.table_name, "events");
        assert_eq!(cfg.output_path, PathBuf::from("main_output.sql"));
        Ok(())
    }

    #[test]
    fn test_bad_table_names() {
        for bad in [
            "", "my table", "t;DROP", "\"t\"", "t(x)", "t--", "a/*", "a.b", "-x", "1t", "tëst",
        ] {
            let cfg = ConvertConfig {
                table_name: bad.to_string(),
                ..Default::default()
            };
            let err = cfg.validate().unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<CsvSqlError>(),
                    Some(CsvSqlError::InvalidConfig(_))
                ),
                "{:?} accepted",
                bad
            );
        }
    }

    #[test]
    fn test_good_table_names() {
        for good in ["my_table", "_t", "Events2025", "t_1"] {
            let cfg = ConvertConfig {
                table_name: good.to_string(),
                ..Default::default()
            };
            assert!(cfg.validate().is_ok(), "{:?} rejected", good);
        }
    }

    #[test]
    fn test_combine_needs_files_or_month() {
        assert!(CombineConfig::default().validate().is_err());
        let cfg = CombineConfig {
            month: Some("2025-13".into()),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_combine_resolve_by_month() -> Result<()> {
        let dir = tempdir()?;
        for name in ["events_20250302.csv", "events_20250301.csv", "events_20250228.csv"] {
            fs::write(dir.path().join(name), "a,b\n")?;
        }
        let cfg = CombineConfig {
            input_dir: dir.path().to_path_buf(),
            month: Some("202503".into()),
            ..Default::default()
        };
        let (inputs, output) = cfg.resolve()?;
        assert_eq!(
            inputs,
            vec![
                dir.path().join("events_20250301.csv"),
                dir.path().join("events_20250302.csv")
            ]
        );
        assert_eq!(output, PathBuf::from("combined_output_Mar.csv"));
        Ok(())
    }

    #[test]
    fn test_combine_explicit_files_yaml() -> Result<()> {
        let tmp = NamedTempFile::new()?;
        fs::write(
            tmp.path(),
            "files:\n  - events_20250223.csv\n  - events_20250224.csv\noutput_path: feb.csv\n",
        )?;
        let cfg = CombineConfig::load(tmp.path())?;
        let (inputs, output) = cfg.resolve()?;
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], PathBuf::from("events_20250223.csv"));
        assert_eq!(output, PathBuf::from("feb.csv"));
        Ok(())
    }
}
