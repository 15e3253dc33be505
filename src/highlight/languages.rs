use std::path::Path;

use tree_sitter::QueryError;
use tree_sitter_highlight::HighlightConfiguration;

pub struct LanguageEntry {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    /// Exact file names (no extension) that use this grammar.
    pub file_names: &'static [&'static str],
    config_fn: fn() -> Result<HighlightConfiguration, QueryError>,
}

impl LanguageEntry {
    pub fn config(&self, highlight_names: &[String]) -> Result<HighlightConfiguration, QueryError> {
        let mut config = (self.config_fn)()?;
        config.configure(highlight_names);
        Ok(config)
    }

    fn matches(&self, path: &Path) -> bool {
        let by_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext));
        let by_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.file_names.contains(&name));
        by_ext || by_name
    }
}

macro_rules! lang {
    ($name:expr, $exts:expr, $files:expr, $lang_fn:expr, $highlights:expr) => {
        LanguageEntry {
            name: $name,
            extensions: $exts,
            file_names: $files,
            config_fn: || HighlightConfiguration::new($lang_fn.into(), $name, $highlights, "", ""),
        }
    };
}

pub static LANGUAGES: &[LanguageEntry] = &[
    lang!(
        "rust",
        &["rs"],
        &[],
        tree_sitter_rust::LANGUAGE,
        tree_sitter_rust::HIGHLIGHTS_QUERY
    ),
    lang!(
        "javascript",
        &["js", "jsx", "mjs", "cjs"],
        &[],
        tree_sitter_javascript::LANGUAGE,
        tree_sitter_javascript::HIGHLIGHT_QUERY
    ),
    lang!(
        "typescript",
        &["ts", "tsx"],
        &[],
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
        tree_sitter_typescript::HIGHLIGHTS_QUERY
    ),
    lang!(
        "python",
        &["py", "pyi"],
        &[],
        tree_sitter_python::LANGUAGE,
        tree_sitter_python::HIGHLIGHTS_QUERY
    ),
    lang!(
        "json",
        &["json", "jsonc"],
        &[],
        tree_sitter_json::LANGUAGE,
        tree_sitter_json::HIGHLIGHTS_QUERY
    ),
    lang!(
        "toml",
        &["toml"],
        &["Cargo.lock"],
        tree_sitter_toml_ng::LANGUAGE,
        tree_sitter_toml_ng::HIGHLIGHTS_QUERY
    ),
    lang!(
        "css",
        &["css"],
        &[],
        tree_sitter_css::LANGUAGE,
        tree_sitter_css::HIGHLIGHTS_QUERY
    ),
    lang!(
        "html",
        &["html", "htm"],
        &[],
        tree_sitter_html::LANGUAGE,
        tree_sitter_html::HIGHLIGHTS_QUERY
    ),
    lang!(
        "go",
        &["go"],
        &[],
        tree_sitter_go::LANGUAGE,
        tree_sitter_go::HIGHLIGHTS_QUERY
    ),
    lang!(
        "ruby",
        &["rb", "rake", "gemspec"],
        &["Gemfile", "Rakefile"],
        tree_sitter_ruby::LANGUAGE,
        tree_sitter_ruby::HIGHLIGHTS_QUERY
    ),
    lang!(
        "bash",
        &["sh", "bash", "zsh"],
        &["Makefile", "makefile", "GNUmakefile", "Dockerfile"],
        tree_sitter_bash::LANGUAGE,
        tree_sitter_bash::HIGHLIGHT_QUERY
    ),
    lang!(
        "yaml",
        &["yml", "yaml"],
        &[],
        tree_sitter_yaml::LANGUAGE,
        tree_sitter_yaml::HIGHLIGHTS_QUERY
    ),
];

pub fn detect_language(path: &Path) -> Option<&'static LanguageEntry> {
    LANGUAGES.iter().find(|entry| entry.matches(path))
}
