use crate::error::{EnumeratorError, Result};
use crate::spec::{EnumSpec, MarshalOptions};
use convert_case::{Case, Casing};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{env, fs, path::Path, path::PathBuf};
use tracing::{debug, error, info, trace};

pub const CONFIG_FILE_NAME: &str = "enumerator.toml";

static ENV_VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
        .expect("Invalid regex for environment variable substitution")
});

/// Settings shared by every enum in the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Base directory for enums without an explicit destination
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// License prepended to every generated file unless an enum overrides it
    #[serde(default)]
    pub copyright_file: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            copyright_file: None,
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

/// One `[[enums]]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnumConfig {
    pub type_name: String,
    pub package: String,
    pub values: Vec<String>,
    #[serde(default)]
    pub undefined_value: Option<String>,
    /// Defaults to `<output_dir>/<package>/<type_name in snake_case>.go`
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub copyright_file: Option<String>,
    #[serde(default)]
    pub marshalling: MarshalOptions,
}

/// Root of `enumerator.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnumeratorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub enums: Vec<EnumConfig>,
}

/// A parsed configuration together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: EnumeratorConfig,
}

impl EnumeratorConfig {
    /// Load configuration by searching for enumerator.toml in the current
    /// directory and its ancestors.
    pub fn new() -> Result<LoadedConfig> {
        let config_path = Self::find_config_file()?;
        info!("Found configuration file at: {:?}", config_path);
        Self::from_path(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn from_path(path: &Path) -> Result<LoadedConfig> {
        info!("Loading Enumerator configuration");
        dotenv::dotenv().ok();
        debug!("Environment variables loaded from .env if present");

        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            EnumeratorError::from(e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        let config = Self::parse(&contents)?;
        info!(
            "Configuration loaded successfully ({} enums)",
            config.enums.len()
        );

        Ok(LoadedConfig {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Load from `path` when given, otherwise search upward.
    pub fn load(path: Option<&Path>) -> Result<LoadedConfig> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::new(),
        }
    }

    /// Parses TOML and substitutes environment variables in path settings.
    pub fn parse(contents: &str) -> Result<EnumeratorConfig> {
        let mut config: EnumeratorConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            EnumeratorError::from(e)
        })?;

        debug!("Substituting environment variables in configuration");
        config.general.output_dir = Self::substitute_env_vars(&config.general.output_dir)?;
        if let Some(copyright) = &config.general.copyright_file {
            config.general.copyright_file = Some(Self::substitute_env_vars(copyright)?);
        }
        for entry in &mut config.enums {
            if let Some(destination) = &entry.destination {
                entry.destination = Some(Self::substitute_env_vars(destination)?);
            }
            if let Some(copyright) = &entry.copyright_file {
                entry.copyright_file = Some(Self::substitute_env_vars(copyright)?);
            }
        }

        Ok(config)
    }

    /// Searches for `enumerator.toml` starting from the current directory
    /// and traversing up to the root.
    fn find_config_file() -> Result<PathBuf> {
        let current_dir = env::current_dir()?;
        Self::find_config_file_from(&current_dir)
    }

    fn find_config_file_from(start: &Path) -> Result<PathBuf> {
        debug!("Starting config file search from: {:?}", start);

        for path in start.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.exists() {
                return Ok(config_path);
            }
        }

        error!("Configuration file '{}' not found in any parent directory.", CONFIG_FILE_NAME);
        Err(EnumeratorError::config(format!(
            "{} not found in current or any parent directory.",
            CONFIG_FILE_NAME
        )))
    }

    /// Expands `${VAR}` and `${VAR:-default}` in a path setting.
    ///
    /// The default applies when `VAR` is unset or empty, as in POSIX shells.
    /// Expanded text is inserted verbatim and never scanned again.
    fn substitute_env_vars(value: &str) -> Result<String> {
        let mut expanded = String::with_capacity(value.len());
        let mut last = 0;

        for cap in ENV_VAR_PATTERN.captures_iter(value) {
            let Some(token) = cap.get(0) else {
                continue;
            };
            let var_name = &cap[1];
            let default_value = cap.get(2).map(|m| m.as_str());

            let value_set = env::var(var_name).ok().filter(|v| !v.is_empty());
            let replacement = match (value_set, default_value) {
                (Some(val), _) => val,
                (None, Some(default)) => {
                    debug!(variable = var_name, default, "Path variable unset, using default");
                    default.to_string()
                }
                (None, None) => {
                    error!(variable = var_name, "Path variable unset in {}", CONFIG_FILE_NAME);
                    return Err(EnumeratorError::EnvVarNotSet(var_name.to_string()));
                }
            };

            expanded.push_str(&value[last..token.start()]);
            expanded.push_str(&replacement);
            last = token.end();
        }
        expanded.push_str(&value[last..]);

        if expanded != value {
            trace!("Expanded {:?} to {:?}", value, expanded);
        }
        Ok(expanded)
    }
}

impl LoadedConfig {
    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    /// Turns every `[[enums]]` entry into an [`EnumSpec`] with resolved paths.
    ///
    /// Fails when two entries would write to the same file.
    pub fn specs(&self) -> Result<Vec<EnumSpec>> {
        let base_dir = self.base_dir();
        let general = &self.config.general;
        let mut owners: HashMap<PathBuf, &str> = HashMap::new();
        let mut specs = Vec::with_capacity(self.config.enums.len());

        for entry in &self.config.enums {
            let destination = match &entry.destination {
                Some(destination) => base_dir.join(destination),
                None => base_dir
                    .join(&general.output_dir)
                    .join(&entry.package)
                    .join(format!("{}.go", entry.type_name.to_case(Case::Snake))),
            };

            if let Some(first) = owners.insert(destination.clone(), &entry.type_name) {
                return Err(EnumeratorError::DuplicateDestination {
                    path: destination,
                    first: first.to_string(),
                    second: entry.type_name.clone(),
                });
            }

            let copyright_file = entry
                .copyright_file
                .as_ref()
                .or(general.copyright_file.as_ref())
                .filter(|c| !c.is_empty())
                .map(|c| base_dir.join(c));

            specs.push(EnumSpec {
                destination,
                copyright_file,
                package: entry.package.clone(),
                type_name: entry.type_name.clone(),
                values: entry.values.clone(),
                undefined_value: entry.undefined_value.clone(),
                marshalling: entry.marshalling,
            });
        }

        debug!("Resolved {} enum specifications", specs.len());
        Ok(specs)
    }
}
