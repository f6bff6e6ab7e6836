use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::utils::resolve_relative;

pub const CONFIG_FILE_NAME: &str = ".paraglotrc.json";

/// Tool configuration, read from `.paraglotrc.json`.
///
/// Locates the inlang project and the compiled message module; the locale
/// list itself lives in the inlang settings file (see `core::settings`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_inlang_project")]
    pub inlang_project: String,
    #[serde(default = "default_settings_file")]
    pub settings_file: String,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    #[serde(default = "default_message_qualifier")]
    pub message_qualifier: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
    #[serde(default = "default_compile_after_extract")]
    pub compile_after_extract: bool,
    #[serde(default = "default_compile_command")]
    pub compile_command: Vec<String>,
}

fn default_inlang_project() -> String {
    "./project.inlang".to_string()
}

fn default_settings_file() -> String {
    "settings.json".to_string()
}

fn default_out_dir() -> String {
    "./src/lib/paraglide".to_string()
}

fn default_message_qualifier() -> String {
    "m".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("$lib".to_string(), "./src/lib".to_string())])
}

fn default_compile_after_extract() -> bool {
    true
}

fn default_compile_command() -> Vec<String> {
    ["npx", "@inlang/paraglide-js", "compile"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inlang_project: default_inlang_project(),
            settings_file: default_settings_file(),
            out_dir: default_out_dir(),
            message_qualifier: default_message_qualifier(),
            includes: default_includes(),
            ignores: Vec::new(),
            aliases: default_aliases(),
            compile_after_extract: default_compile_after_extract(),
            compile_command: default_compile_command(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or `includes` is invalid,
    /// or if the message qualifier is not a plain identifier.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        let qualifier = &self.message_qualifier;
        let valid_qualifier = !qualifier.is_empty()
            && !qualifier.starts_with(|c: char| c.is_ascii_digit())
            && qualifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !valid_qualifier {
            bail!("Invalid 'messageQualifier': \"{}\"", qualifier);
        }

        Ok(())
    }

    /// Absolute path of the inlang settings file.
    pub fn settings_path(&self, root: &Path) -> PathBuf {
        resolve_relative(root, &self.inlang_project).join(&self.settings_file)
    }

    /// Absolute path of the compiled message module directory.
    pub fn out_dir_path(&self, root: &Path) -> PathBuf {
        resolve_relative(root, &self.out_dir)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config are resolved against.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
