// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Data Directory Wiring
// ─────────────────────────────────────────────────────────────────────
//! Process-wide data directories, with an optional census override
//! applied once at start-up.
//!
//! This is best-effort wiring: a missing override, or one pointing at a
//! directory that does not exist, leaves the defaults in place and is
//! never an error. Conversion never reads any of this.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use fpgroup_types::BridgeConfig;

/// Environment variable naming the installation's home directory.
pub const HOME_ENV: &str = "FPGROUP_HOME";

const DEFAULT_HOME: &str = "/usr/local/share/fpgroup";

static GLOBAL_DIRS: RwLock<Option<GlobalDirs>> = parking_lot::const_rwlock(None);

/// Locations of the installation's data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDirs {
    home: PathBuf,
    python_module: PathBuf,
    census: PathBuf,
}

impl Default for GlobalDirs {
    fn default() -> Self {
        let home = std::env::var_os(HOME_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME));
        Self::for_home(home)
    }
}

impl GlobalDirs {
    pub fn new(home: PathBuf, python_module: PathBuf, census: PathBuf) -> Self {
        Self {
            home,
            python_module,
            census,
        }
    }

    /// Standard layout below `home`: `python/` and `data/census/`.
    pub fn for_home(home: PathBuf) -> Self {
        let python_module = home.join("python");
        let census = home.join("data").join("census");
        Self::new(home, python_module, census)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn python_module(&self) -> &Path {
        &self.python_module
    }

    pub fn census(&self) -> &Path {
        &self.census
    }

    /// These dirs with `config.census_data_path` applied, if set.
    pub fn with_census_override(&self, config: &BridgeConfig) -> Self {
        match &config.census_data_path {
            Some(census) => Self::new(
                self.home.clone(),
                self.python_module.clone(),
                census.clone(),
            ),
            None => self.clone(),
        }
    }
}

/// Current process-wide dirs: the start-up override if one was applied,
/// the defaults otherwise.
pub fn global_dirs() -> GlobalDirs {
    GLOBAL_DIRS.read().clone().unwrap_or_default()
}

/// Apply the census override from `config`, best effort.
///
/// Returns `true` if the override took effect. Without a configured
/// path, or when the path is not an existing directory, nothing
/// changes.
pub fn initialize(config: &BridgeConfig) -> bool {
    let Some(census) = &config.census_data_path else {
        log::debug!("no census data path configured, keeping defaults");
        return false;
    };
    if !census.is_dir() {
        log::warn!(
            "census data path {} is not a directory, keeping defaults",
            census.display()
        );
        return false;
    }

    let mut dirs = GLOBAL_DIRS.write();
    let updated = dirs.clone().unwrap_or_default().with_census_override(config);
    log::info!("census data path set to {}", updated.census().display());
    *dirs = Some(updated);
    true
}
