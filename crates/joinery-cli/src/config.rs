//! Configuration for the CLI
//!
//! The settings a run uses are assembled in two layers: a TOML file (the
//! `--config` path, else the first file found by discovery, else the
//! built-in defaults) and the command-line overrides on top of it.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use joinery::{
    JoineryError,
    config::{AppConfig, RootSelection},
};

use crate::args::Args;

/// Discovered in the working directory before the platform directory
const LOCAL_CONFIG: &str = "joinery/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file `{}` does not exist", .0.display())]
    Missing(PathBuf),

    #[error("cannot read configuration file `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl From<ConfigError> for JoineryError {
    fn from(err: ConfigError) -> Self {
        JoineryError::Config(err.to_string())
    }
}

/// Where the file layer of the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Named with `--config`; it must exist
    Explicit(PathBuf),
    /// First existing discovery candidate
    Discovered(PathBuf),
    Defaults,
}

impl ConfigSource {
    fn locate(explicit: Option<&Path>, candidates: &[PathBuf]) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_path_buf());
        }
        candidates
            .iter()
            .find(|path| path.is_file())
            .map_or(Self::Defaults, |path| Self::Discovered(path.clone()))
    }

    fn load(&self) -> Result<AppConfig, ConfigError> {
        match self {
            Self::Explicit(path) | Self::Discovered(path) => {
                info!(path:% = path.display(), source:? = self; "Loading configuration");
                read_config(path)
            }
            Self::Defaults => {
                debug!("No configuration file found, using default configuration");
                Ok(AppConfig::default())
            }
        }
    }
}

/// Discovery candidates in priority order
fn discovery_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "joinery", "joinery") {
        Some(dirs) => candidates.push(dirs.config_dir().join("config.toml")),
        None => debug!("Could not determine platform-specific config directory"),
    }
    candidates
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::Missing(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Composition settings given on the command line. They win over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Overrides {
    root_selection: Option<RootSelection>,
    place_unconnected: bool,
    skip_validation: bool,
}

impl Overrides {
    fn from_args(args: &Args) -> Self {
        Self {
            root_selection: args.root_selection.map(RootSelection::from),
            place_unconnected: args.place_unconnected,
            skip_validation: args.no_validate,
        }
    }

    fn apply(self, config: AppConfig) -> AppConfig {
        if self == Self::default() {
            return config;
        }
        debug!(overrides:? = self; "Applying command-line overrides");

        let mut compose = config.compose().clone();
        if let Some(selection) = self.root_selection {
            compose = compose.with_root_selection(selection);
        }
        if self.place_unconnected {
            compose = compose.with_place_unconnected(true);
        }
        if self.skip_validation {
            compose = compose.with_validate(false);
        }
        AppConfig::new(compose, config.diagram().clone())
    }
}

/// Builds the configuration for a run.
///
/// The file layer comes from `--config`, else from `joinery/config.toml` in
/// the working directory, else from `config.toml` in the platform
/// configuration directory, else the defaults. Command-line overrides are
/// applied on top.
///
/// # Errors
///
/// Returns [`JoineryError::Config`], naming the offending path, when the
/// `--config` file does not exist or a configuration file cannot be read or
/// parsed.
pub fn load_config(args: &Args) -> Result<AppConfig, JoineryError> {
    let source = ConfigSource::locate(args.config.as_deref().map(Path::new), &discovery_candidates());
    let config = source.load()?;
    Ok(Overrides::from_args(args).apply(config))
}
