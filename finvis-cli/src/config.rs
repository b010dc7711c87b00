use anyhow::{Context, Result, anyhow};
use finvis_finance::Frequency;
use finvis_ingest::{CsvParser, DateFormats, HeaderKeywords};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::state::Store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IANA zone used to decide what "today" is
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub import: ImportSection,
    #[serde(default)]
    pub recurring: RecurringSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSection {
    /// Replaces the built-in header keywords when set
    pub header_keywords: Option<Vec<String>>,
    /// Strict date formats in priority order, e.g. "DD/MM/YYYY"
    pub date_formats: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringSection {
    #[serde(default = "default_frequency")]
    pub default_frequency: Frequency,
}

impl Default for RecurringSection {
    fn default() -> Self {
        Self {
            default_frequency: default_frequency(),
        }
    }
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

fn default_frequency() -> Frequency {
    Frequency::Monthly
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            import: ImportSection::default(),
            recurring: RecurringSection::default(),
        }
    }
}

impl Config {
    /// Strict date formats from `import.date_formats`, or the built-in list.
    pub fn date_formats(&self) -> Result<DateFormats> {
        match &self.import.date_formats {
            Some(names) => DateFormats::from_names(names.iter().map(String::as_str))
                .map_err(|name| anyhow!("unknown date format '{name}'"))
                .context("import.date_formats in config.toml"),
            None => Ok(DateFormats::default()),
        }
    }

    /// Statement parser with any keyword/format overrides applied.
    pub fn parser(&self, source: impl Into<String>) -> Result<CsvParser> {
        let mut parser = CsvParser::new()
            .with_source(source)
            .with_date_formats(self.date_formats()?);
        if let Some(keywords) = &self.import.header_keywords {
            parser = parser.with_header_keywords(HeaderKeywords::new(keywords.iter().cloned()));
        }
        Ok(parser)
    }
}

pub fn load_config(store: &Store) -> Result<Config> {
    let p = store.config_path();
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(store: &Store, cfg: &Config) -> Result<()> {
    let p = store.config_path();
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(store: &Store) -> Result<()> {
    let p = store.config_path();
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(store, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        let cfg = load_config(&store).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.timezone, "America/Chicago");
        assert_eq!(cfg.recurring.default_frequency, Frequency::Monthly);
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        let mut cfg = Config::default();
        cfg.timezone = "Europe/Berlin".into();
        cfg.import.date_formats = Some(vec!["DD.MM.YYYY".into(), "YYYY-MM-DD".into()]);
        cfg.recurring.default_frequency = Frequency::BiWeekly;
        save_config(&store, &cfg).unwrap();
        assert_eq!(load_config(&store).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        fs::write(
            store.config_path(),
            "[import]\nheader_keywords = [\"fecha\", \"importe\"]\n",
        )
        .unwrap();
        let cfg = load_config(&store).unwrap();
        assert_eq!(cfg.timezone, "America/Chicago");

        let parser = cfg.parser("test").unwrap();
        let txns = parser.parse("Fecha,Concepto,Cargo,Abono\n2024-01-02,Pan,2.50,\n");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, -2.5);
    }

    #[test]
    fn test_day_first_override() {
        let mut cfg = Config::default();
        cfg.import.date_formats = Some(vec!["DD/MM/YYYY".into()]);
        let txns = cfg.parser("test").unwrap().parse("03/02/2024,Book,10.00,\n");
        assert_eq!(txns[0].iso_date(), "2024-02-03");
    }

    #[test]
    fn test_date_formats_default_and_override() {
        let cfg = Config::default();
        let m = cfg.date_formats().unwrap().normalize("03/02/2024").unwrap();
        assert_eq!(m.iso(), "2024-03-02");

        let mut cfg = Config::default();
        cfg.import.date_formats = Some(vec!["DD/MM/YYYY".into()]);
        let m = cfg.date_formats().unwrap().normalize("03/02/2024").unwrap();
        assert_eq!(m.iso(), "2024-02-03");
    }

    #[test]
    fn test_bad_format_name_rejected() {
        let mut cfg = Config::default();
        cfg.import.date_formats = Some(vec!["QQ/ZZ".into()]);
        assert!(cfg.parser("test").is_err());
    }
}
