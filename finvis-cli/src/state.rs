use anyhow::{Context, Result};
use chrono::NaiveDate;
use finvis_core::Ledger;
use finvis_finance::demo_ledger;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

pub const HOME_ENV: &str = "FINVIS_HOME";

/// `$FINVIS_HOME`, falling back to `~/.finvis`.
pub fn finvis_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".finvis"))
}

/// What the stored ledger currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Generated sample data, shown until the user adds their own
    #[default]
    Demo,
    User,
    Clear,
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataMode::Demo => "demo",
            DataMode::User => "user",
            DataMode::Clear => "clear",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub data_mode: DataMode,
}

/// On-disk home: `ledger.json`, `state.json`, `config.toml`.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn from_env() -> Result<Self> {
        Self::open(finvis_home()?)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.join("ledger.json")
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join("state.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config.toml")
    }

    pub fn read_state(&self) -> Result<AppState> {
        let p = self.state_path();
        if !p.exists() {
            return Ok(AppState::default());
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))
    }

    pub fn write_state(&self, state: &AppState) -> Result<()> {
        let p = self.state_path();
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
        Ok(())
    }

    fn read_ledger_file(&self) -> Result<Option<Ledger>> {
        let p = self.ledger_path();
        if !p.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        let ledger = Ledger::from_json(&s).with_context(|| format!("parse {}", p.display()))?;
        Ok(Some(ledger))
    }

    fn write_ledger_file(&self, ledger: &Ledger) -> Result<()> {
        let p = self.ledger_path();
        fs::write(&p, ledger.to_json()?).with_context(|| format!("write {}", p.display()))?;
        Ok(())
    }

    /// Current ledger and mode. A fresh home starts in demo mode with
    /// generated data, which is written out so ids stay stable.
    pub fn load(&self, today: NaiveDate) -> Result<(Ledger, DataMode)> {
        let mode = self.read_state()?.data_mode;
        match (mode, self.read_ledger_file()?) {
            (_, Some(ledger)) => Ok((ledger, mode)),
            (DataMode::Demo, None) => {
                let ledger = self.reset_demo(today)?;
                Ok((ledger, DataMode::Demo))
            }
            (mode, None) => Ok((Ledger::new(), mode)),
        }
    }

    /// Ledger that user changes apply to: demo data is dropped on the first
    /// user import or add.
    pub fn load_for_edit(&self, today: NaiveDate) -> Result<Ledger> {
        let (ledger, mode) = self.load(today)?;
        Ok(match mode {
            DataMode::User => ledger,
            DataMode::Demo | DataMode::Clear => Ledger::new(),
        })
    }

    pub fn save(&self, ledger: &Ledger, mode: DataMode) -> Result<()> {
        self.write_ledger_file(ledger)?;
        self.write_state(&AppState { data_mode: mode })
    }

    pub fn reset_demo(&self, today: NaiveDate) -> Result<Ledger> {
        let ledger = demo_ledger(today)?;
        self.save(&ledger, DataMode::Demo)?;
        Ok(ledger)
    }

    pub fn clear(&self) -> Result<()> {
        self.save(&Ledger::new(), DataMode::Clear)
    }
}
