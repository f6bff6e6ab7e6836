//! Inlang project settings: base locale, locale list, catalog path pattern.
//!
//! The settings file is cached keyed by its freshness stamp; any change to the
//! stamp re-reads it, which transitively changes every derived catalog path.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use serde::Deserialize;

use crate::core::{
    error::I18nError,
    stamp::{FreshnessStamp, StampSource},
};
use crate::diagnostics::DiagnosticSink;
use crate::utils::resolve_relative;

/// Resolved i18n configuration of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectI18nConfig {
    pub base_locale: String,
    /// Ordered, duplicate-free. [`ConfigResolver::resolve`] adds a missing base locale.
    pub locales: Vec<String>,
    /// Catalog path with a `{locale}` placeholder, relative to the project root.
    pub catalog_path_pattern: String,
}

impl ProjectI18nConfig {
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlangSettings {
    base_locale: String,
    locales: Vec<String>,
    #[serde(rename = "plugin.inlang.messageFormat")]
    message_format: MessageFormatPlugin,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageFormatPlugin {
    path_pattern: String,
}

/// Parse inlang settings JSON. Unknown fields are ignored.
pub fn parse_settings(content: &str) -> Result<ProjectI18nConfig, I18nError> {
    let settings: InlangSettings =
        serde_json::from_str(content).map_err(|e| I18nError::NotConfigured {
            reason: format!("settings file cannot be deserialized: {}", e),
        })?;

    let mut locales: Vec<String> = Vec::with_capacity(settings.locales.len());
    for locale in settings.locales {
        if !locales.contains(&locale) {
            locales.push(locale);
        }
    }
    if locales.is_empty() {
        return Err(I18nError::NotConfigured {
            reason: "settings file declares no locales".to_string(),
        });
    }
    if settings.base_locale.is_empty() {
        return Err(I18nError::NotConfigured {
            reason: "settings file declares an empty baseLocale".to_string(),
        });
    }
    if !settings.message_format.path_pattern.contains("{locale}") {
        return Err(I18nError::NotConfigured {
            reason: format!(
                "pathPattern \"{}\" has no {{locale}} placeholder",
                settings.message_format.path_pattern
            ),
        });
    }

    Ok(ProjectI18nConfig {
        base_locale: settings.base_locale,
        locales,
        catalog_path_pattern: settings.message_format.path_pattern,
    })
}

struct CachedSettings {
    stamp: FreshnessStamp,
    config: Arc<ProjectI18nConfig>,
}

/// Resolves the project's i18n configuration from the inlang settings file.
pub struct ConfigResolver {
    project_root: PathBuf,
    settings_path: PathBuf,
    stamps: Arc<dyn StampSource>,
    sink: Arc<dyn DiagnosticSink>,
    cached: Mutex<Option<CachedSettings>>,
}

impl ConfigResolver {
    pub fn new(
        project_root: impl Into<PathBuf>,
        settings_path: impl Into<PathBuf>,
        stamps: Arc<dyn StampSource>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            settings_path: settings_path.into(),
            stamps,
            sink,
            cached: Mutex::new(None),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Current configuration, re-read only when the settings file's stamp moved.
    pub fn resolve(&self) -> Result<Arc<ProjectI18nConfig>, I18nError> {
        let Some(stamp) = self.stamps.stamp(&self.settings_path) else {
            self.invalidate();
            let reason = format!(
                "cannot find inlang settings at {}",
                self.settings_path.display()
            );
            self.sink.warn(&reason);
            return Err(I18nError::NotConfigured { reason });
        };

        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = cached.as_ref()
            && entry.stamp == stamp
        {
            return Ok(Arc::clone(&entry.config));
        }

        let content = fs::read_to_string(&self.settings_path).map_err(|e| {
            let reason = format!(
                "cannot read inlang settings at {}: {}",
                self.settings_path.display(),
                e
            );
            self.sink.warn(&reason);
            I18nError::NotConfigured { reason }
        })?;

        match parse_settings(&content) {
            Ok(mut config) => {
                if !config.has_locale(&config.base_locale) {
                    self.sink.warn(&format!(
                        "base locale '{}' is not listed in locales {:?}; adding it",
                        config.base_locale, config.locales
                    ));
                    config.locales.insert(0, config.base_locale.clone());
                }
                let config = Arc::new(config);
                *cached = Some(CachedSettings {
                    stamp,
                    config: Arc::clone(&config),
                });
                Ok(config)
            }
            Err(err) => {
                *cached = None;
                self.sink.warn(&err.to_string());
                Err(err)
            }
        }
    }

    /// Absolute catalog path for `locale`: `{locale}` substituted into the
    /// path pattern, resolved against the project root.
    pub fn catalog_path(&self, config: &ProjectI18nConfig, locale: &str) -> PathBuf {
        let relative = config.catalog_path_pattern.replace("{locale}", locale);
        resolve_relative(&self.project_root, &relative)
    }

    /// Drop the cached configuration.
    pub fn invalidate(&self) {
        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
