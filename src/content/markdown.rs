use std::io;
use std::io::ErrorKind;

use markdown::mdast::Node;
use markdown::{CompileOptions, Options, ParseOptions};

use crate::highlight::CodeBlockRenderer;

struct FencedCode {
    start: usize,
    end: usize,
    value: String,
    lang: Option<String>,
    meta: Option<String>,
}

/// Smallest nonce whose placeholders cannot appear in `md_text`.
fn placeholder_nonce(md_text: &str) -> usize {
    let mut nonce = 0;
    while md_text.contains(&format!("penned-code-{}-", nonce)) {
        nonce += 1;
    }
    nonce
}

fn placeholder(nonce: usize, idx: usize) -> String {
    format!("<!--penned-code-{}-{}-->", nonce, idx)
}

fn collect_fenced_code(node: &Node, source: &str, found: &mut Vec<FencedCode>) {
    if let Node::Code(code) = node {
        if let Some(ref position) = code.position {
            let (start, end) = (position.start.offset, position.end.offset);
            let fenced = source.get(start..end)
                .map(|s| s.starts_with("```") || s.starts_with("~~~"))
                .unwrap_or(false);
            if fenced {
                found.push(FencedCode {
                    start,
                    end,
                    value: code.value.clone(),
                    lang: code.lang.clone(),
                    meta: code.meta.clone(),
                });
            }
        }
        return;
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_fenced_code(child, source, found);
        }
    }
}

/// Markdown to HTML with highlighted fenced code blocks.
pub struct MarkdownRenderer {
    code: CodeBlockRenderer,
}

impl MarkdownRenderer {
    pub fn new(theme: &str) -> Self {
        MarkdownRenderer {
            code: CodeBlockRenderer::new(theme),
        }
    }

    pub fn with_themes(theme: &str, dark_theme: Option<&str>) -> Self {
        let code = CodeBlockRenderer::new(theme);
        MarkdownRenderer {
            code: match dark_theme {
                Some(dark) => code.with_dark_theme(dark),
                None => code,
            },
        }
    }

    pub fn render(&self, md_text: &str) -> io::Result<String> {
        let tree = markdown::to_mdast(md_text, &ParseOptions::gfm())
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.reason.as_str()))?;

        let mut blocks = vec![];
        collect_fenced_code(&tree, md_text, &mut blocks);

        // Swap every fenced block for a comment that survives rendering untouched
        let nonce = placeholder_nonce(md_text);
        let mut buf = md_text.to_string();
        for (idx, block) in blocks.iter().enumerate().rev() {
            buf.replace_range(block.start..block.end, &placeholder(nonce, idx));
        }

        let options = Options {
            parse: ParseOptions::gfm(),
            compile: CompileOptions {
                allow_dangerous_html: true,
                ..CompileOptions::gfm()
            },
        };
        let mut html = markdown::to_html_with_options(&buf, &options)
            .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.reason.as_str()))?;

        for (idx, block) in blocks.iter().enumerate() {
            let rendered = self.code.render(&block.value, block.lang.as_deref(), block.meta.as_deref());
            html = html.replacen(&placeholder(nonce, idx), &rendered, 1);
        }

        Ok(html)
    }
}
