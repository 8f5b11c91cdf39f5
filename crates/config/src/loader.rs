use crate::{ConfigError, Result, Settings};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".graphiqlrc",
    ".graphiqlrc.yml",
    ".graphiqlrc.yaml",
    ".graphiqlrc.json",
];

/// Find a settings file by walking up the directory tree from the given start directory.
/// Returns the path to the settings file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load settings from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_settings(path: &Path) -> Result<Settings> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let settings = load_settings_from_str(&contents, path)?;
    tracing::info!(
        endpoint = settings.graphql_endpoint.as_deref().unwrap_or("<origin>"),
        has_nonce = settings.nonce.is_some(),
        "Settings loaded"
    );
    Ok(settings)
}

/// Load settings from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_settings_from_str(contents: &str, path: &Path) -> Result<Settings> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let value = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "" if file_name == ".graphiqlrc" => {
            // .graphiqlrc without extension - try YAML first, then JSON
            tracing::trace!("Trying YAML then JSON for .graphiqlrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    check_keys(&value, path)?;

    let settings: Settings = serde_json::from_value(value).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    validate_settings(&settings, path)?;
    Ok(settings)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<serde_json::Value> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<serde_json::Value> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Reject keys the settings do not know, suggesting the closest known key.
fn check_keys(value: &serde_json::Value, path: &Path) -> Result<()> {
    let Some(object) = value.as_object() else {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "expected a mapping at the top level".to_string(),
        });
    };

    for key in object.keys() {
        if Settings::KEYS.contains(&key.as_str()) {
            continue;
        }
        let message = match closest_key(key) {
            Some(known) => format!("unknown key '{key}', did you mean '{known}'?"),
            None => format!("unknown key '{key}'"),
        };
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        });
    }
    Ok(())
}

fn closest_key(key: &str) -> Option<&'static str> {
    Settings::KEYS
        .iter()
        .map(|known| (strsim::levenshtein(key, known), *known))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known)
}

/// Most retry attempts a config file may ask for.
const MAX_RETRY: u32 = 10;

#[tracing::instrument(skip(settings, path), fields(path = %path.display()))]
fn validate_settings(settings: &Settings, path: &Path) -> Result<()> {
    let invalid = |message: &str| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    if let Some(endpoint) = &settings.graphql_endpoint {
        if endpoint.trim().is_empty() {
            return Err(invalid("graphqlEndpoint must not be empty"));
        }
    }
    if settings.timeout == Some(0) {
        return Err(invalid("timeout must be at least 1 second"));
    }
    if settings.retry.is_some_and(|retry| retry > MAX_RETRY) {
        return Err(invalid(&format!("retry must be at most {MAX_RETRY}")));
    }
    if settings.headers.keys().any(|name| name.trim().is_empty()) {
        return Err(invalid("header names must not be empty"));
    }

    tracing::debug!("Settings validation passed");
    Ok(())
}
