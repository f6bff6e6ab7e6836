//! Wires the catalog cache, call-site index, resolver and extraction engine
//! for one project.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result, bail};

use crate::config::{Config, load_config};
use crate::core::{
    catalog_cache::CatalogCache,
    catalog_writer::{CatalogStore, FsCatalogStore},
    compile::ParaglideCompiler,
    extract::{ExtractionEngine, ExtractionResult, Translation, Translations},
    humanid::IdentifierGenerator,
    index::CallSiteIndex,
    render::render,
    resolve::ReferenceResolver,
    scan::{SourceScanner, SwcScanner},
    settings::ConfigResolver,
    stamp::{FsStamps, StampSource},
    workspace::{FsSources, SourceProvider},
};
use crate::diagnostics::DiagnosticSink;
use crate::utils::unquote;

/// A selection in a source file to turn into a message.
#[derive(Debug, Clone, Default)]
pub struct ExtractRequest {
    pub file: PathBuf,
    /// Byte range of the selection.
    pub start: usize,
    pub end: usize,
    /// Generated when `None`.
    pub key: Option<String>,
    /// Per-locale text. Locales left out get the selected text.
    pub texts: HashMap<String, String>,
    /// Per-locale plural (`other`) text; enables pluralization for that locale.
    pub plurals: HashMap<String, String>,
    /// Write the replacement back into the source file.
    pub apply: bool,
}

/// Result of extracting a selection from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExtraction {
    pub file: PathBuf,
    pub start: usize,
    pub end: usize,
    /// Text the selection held.
    pub original: String,
    pub result: ExtractionResult,
    pub applied: bool,
}

/// Every component of the subsystem for one project root.
pub struct ProjectContext {
    pub config: Config,
    pub root: PathBuf,
    pub sink: Arc<dyn DiagnosticSink>,
    pub settings: Arc<ConfigResolver>,
    pub catalogs: Arc<CatalogCache>,
    pub scanner: Arc<SwcScanner>,
    pub references: ReferenceResolver,
    pub extraction: ExtractionEngine,
    pub generator: IdentifierGenerator,
    pub compiler: Option<Arc<ParaglideCompiler>>,
}

impl ProjectContext {
    /// Find `.paraglotrc.json` from `start_dir` upwards and build the context.
    pub fn load(start_dir: &Path, sink: Arc<dyn DiagnosticSink>) -> Result<Self> {
        let start_dir = start_dir
            .canonicalize()
            .with_context(|| format!("Failed to open directory: {}", start_dir.display()))?;
        let loaded = load_config(&start_dir)?;
        if !loaded.from_file {
            sink.info(&format!(
                "no config file found, using defaults rooted at {}",
                loaded.root.display()
            ));
        }
        Ok(Self::new(loaded.root, loaded.config, sink))
    }

    pub fn new(root: PathBuf, config: Config, sink: Arc<dyn DiagnosticSink>) -> Self {
        let stamps: Arc<dyn StampSource> = Arc::new(FsStamps);
        let sources: Arc<dyn SourceProvider> =
            Arc::new(FsSources::new(&root, &config, Arc::clone(&sink)));
        let store: Arc<dyn CatalogStore> = Arc::new(FsCatalogStore);
        Self::with_parts(root, config, sink, stamps, sources, store)
    }

    /// Build with explicit stamp, source and catalog-store collaborators.
    pub fn with_parts(
        root: PathBuf,
        config: Config,
        sink: Arc<dyn DiagnosticSink>,
        stamps: Arc<dyn StampSource>,
        sources: Arc<dyn SourceProvider>,
        store: Arc<dyn CatalogStore>,
    ) -> Self {
        let settings = Arc::new(ConfigResolver::new(
            &root,
            config.settings_path(&root),
            Arc::clone(&stamps),
            Arc::clone(&sink),
        ));
        let catalogs = Arc::new(CatalogCache::new(
            Arc::clone(&settings),
            stamps,
            Arc::clone(&sink),
        ));
        let scanner = Arc::new(SwcScanner::new(&root, &config.aliases));
        let index = Arc::new(CallSiteIndex::new(
            Arc::clone(&scanner) as Arc<dyn SourceScanner>,
            Arc::clone(&catalogs),
            config.out_dir_path(&root),
            Arc::clone(&sink),
        ));
        let references = ReferenceResolver::new(
            Arc::clone(&catalogs),
            index,
            sources,
            Arc::clone(&sink),
        );

        let compiler = config.compile_after_extract.then(|| {
            Arc::new(ParaglideCompiler::new(
                config.compile_command.clone(),
                PathBuf::from(&config.inlang_project),
                PathBuf::from(&config.out_dir),
                root.clone(),
                Arc::clone(&sink),
            ))
        });
        let mut extraction = ExtractionEngine::new(
            Arc::clone(&catalogs),
            store,
            config.message_qualifier.clone(),
            Arc::clone(&sink),
        );
        if let Some(compiler) = &compiler {
            extraction = extraction.with_build_trigger(Arc::clone(compiler) as _);
        }

        Self {
            config,
            root,
            sink,
            settings,
            catalogs,
            scanner,
            references,
            extraction,
            generator: IdentifierGenerator::new(),
            compiler,
        }
    }

    /// Resolve a user-supplied path against the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Render `key` in `locale` (base locale when `None`).
    pub fn render_key(
        &self,
        key: &str,
        locale: Option<&str>,
        args: &HashMap<String, String>,
        count: Option<i64>,
    ) -> Result<String> {
        let config = self.settings.resolve()?;
        let locale = locale.unwrap_or(&config.base_locale);
        if !config.has_locale(locale) {
            bail!(
                "unknown locale '{}' (configured: {})",
                locale,
                config.locales.join(", ")
            );
        }
        let catalog = self.catalogs.load_with(&config, locale);
        let template = catalog
            .get(key)
            .with_context(|| format!("no message '{}' in locale '{}'", key, locale))?;
        Ok(render(template, args, count)?)
    }

    /// A fresh key not present in the base catalog.
    pub fn generate_key(&self) -> String {
        match self.catalogs.base() {
            Some(base) => self.generator.generate_unique(&base),
            None => self.generator.generate(),
        }
    }

    /// Extract the selected range of a source file into every locale catalog.
    pub fn extract_in_file(&self, request: &ExtractRequest) -> Result<FileExtraction> {
        let path = self.resolve_path(&request.file);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if request.start > request.end {
            bail!("selection start {} is after end {}", request.start, request.end);
        }
        let Some(original) = content.get(request.start..request.end) else {
            bail!(
                "selection {}..{} is outside {} or splits a character",
                request.start,
                request.end,
                path.display()
            );
        };
        let selected = unquote(original.trim());
        if selected.trim().is_empty() {
            bail!(
                "selection {}..{} of {} contains no text",
                request.start,
                request.end,
                path.display()
            );
        }

        let config = self.settings.resolve()?;
        let translations: Translations = config
            .locales
            .iter()
            .map(|locale| {
                let singular = request
                    .texts
                    .get(locale)
                    .cloned()
                    .unwrap_or_else(|| selected.to_string());
                let translation = match request.plurals.get(locale) {
                    Some(plural) => Translation::plural(singular, plural.clone()),
                    None => Translation::plain(singular),
                };
                (locale.clone(), translation)
            })
            .collect();

        let key = match &request.key {
            Some(key) => key.clone(),
            None => self.generate_key(),
        };
        let region = self.scanner.region_at(&path, &content, request.start);
        let result = self
            .extraction
            .extract(selected, &key, &translations, region)?;

        if request.apply {
            let mut updated = String::with_capacity(content.len() + result.replacement.len());
            updated.push_str(&content[..request.start]);
            updated.push_str(&result.replacement);
            updated.push_str(&content[request.end..]);
            fs::write(&path, &updated)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            self.references.notify_changed(&path, &updated);
        }

        Ok(FileExtraction {
            file: path,
            start: request.start,
            end: request.end,
            original: original.to_string(),
            result,
            applied: request.apply,
        })
    }
}
