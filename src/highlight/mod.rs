//! Highlighted code blocks: syntect output as an element tree, then the transformer passes.

pub mod hast;
pub mod highlighter;
pub mod meta;
pub mod transformers;

use crate::highlight::highlighter::highlight_to_tree;
use crate::highlight::transformers::{default_transformers, run_pre, run_preprocess, CodeMeta, CodeOptions, CodeTransformer};

pub struct CodeBlockRenderer {
    theme: String,
    dark_theme: Option<String>,
    transformers: Vec<Box<dyn CodeTransformer>>,
}

impl CodeBlockRenderer {
    pub fn new(theme: &str) -> Self {
        CodeBlockRenderer {
            theme: theme.to_string(),
            dark_theme: None,
            transformers: default_transformers(),
        }
    }

    pub fn with_transformers(theme: &str, transformers: Vec<Box<dyn CodeTransformer>>) -> Self {
        CodeBlockRenderer {
            theme: theme.to_string(),
            dark_theme: None,
            transformers,
        }
    }

    /// Adds a second theme, emitted as `--shiki-dark` custom properties.
    pub fn with_dark_theme(mut self, dark_theme: &str) -> Self {
        self.dark_theme = Some(dark_theme.to_string());
        self
    }

    pub fn render(&self, code: &str, lang: Option<&str>, raw_meta: Option<&str>) -> String {
        let mut options = CodeOptions {
            lang: lang.map(|l| l.to_string()),
            meta: CodeMeta {
                raw: raw_meta.filter(|m| !m.trim().is_empty()).map(|m| m.to_string()),
                values: Default::default(),
            },
        };
        run_preprocess(&self.transformers, &mut options);

        let mut tree = highlight_to_tree(code, options.lang.as_deref(), &self.theme, self.dark_theme.as_deref());
        run_pre(&self.transformers, &mut tree, &options);
        tree.to_html()
    }
}
