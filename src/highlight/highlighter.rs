use lazy_static::lazy_static;
use spdlog::warn;
use syntect::highlighting::{Color, FontStyle, HighlightIterator, HighlightState, Highlighter, Style, Theme, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, ScopeStackOp, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::DEFAULT_THEME;
use crate::highlight::hast::{h, text, Element, Node};

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

fn theme(name: &str) -> Option<&'static Theme> {
    THEME_SET.themes.get(name).or_else(|| {
        warn!("Unknown highlight theme {}, using {}", name, DEFAULT_THEME);
        THEME_SET.themes.get(DEFAULT_THEME)
    })
}

fn dark_theme(name: &str) -> Option<&'static Theme> {
    let found = THEME_SET.themes.get(name);
    if found.is_none() {
        warn!("Unknown dark highlight theme {}, emitting the light theme only", name);
    }
    found
}

/// Highlighting state of one theme, fed with the scope ops of a shared parser.
struct ThemedLines {
    highlighter: Highlighter<'static>,
    state: HighlightState,
}

impl ThemedLines {
    fn new(theme: &'static Theme) -> Self {
        let highlighter = Highlighter::new(theme);
        let state = HighlightState::new(&highlighter, ScopeStack::new());
        ThemedLines { highlighter, state }
    }

    fn styles<'l>(&mut self, ops: &[(usize, ScopeStackOp)], line: &'l str) -> Vec<(Style, &'l str)> {
        HighlightIterator::new(&mut self.state, ops, line, &self.highlighter).collect()
    }
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn token_style(style: &Style, dark: Option<&Style>) -> String {
    let mut css = format!("color:{}", hex(style.foreground));
    if let Some(dark) = dark {
        css.push_str(&format!(";--shiki-dark:{}", hex(dark.foreground)));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        css.push_str(";font-weight:bold");
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        css.push_str(";font-style:italic");
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        css.push_str(";text-decoration:underline");
    }
    css
}

fn pre_style(light: Option<&Theme>, dark: Option<&Theme>) -> String {
    let mut decls: Vec<String> = vec![];
    let light = light.map(|t| &t.settings);
    let dark = dark.map(|t| &t.settings);

    if let Some(bg) = light.and_then(|s| s.background) {
        decls.push(format!("background-color:{}", hex(bg)));
    }
    if let Some(bg) = dark.and_then(|s| s.background) {
        decls.push(format!("--shiki-dark-bg:{}", hex(bg)));
    }
    if let Some(fg) = light.and_then(|s| s.foreground) {
        decls.push(format!("color:{}", hex(fg)));
    }
    if let Some(fg) = dark.and_then(|s| s.foreground) {
        decls.push(format!("--shiki-dark:{}", hex(fg)));
    }
    decls.join(";")
}

fn plain_line(line: &str) -> Element {
    h("span", &[("class", "line")], vec![text(line)])
}

/// Highlights `code` into `pre > code > span.line > span[style]`.
///
/// With a `dark_theme_name` every token also carries its dark color as a
/// `--shiki-dark` custom property. Unknown languages fall back to plain text.
/// Lines are separated by `\n` text nodes.
pub fn highlight_to_tree(code: &str, lang: Option<&str>, theme_name: &str, dark_theme_name: Option<&str>) -> Element {
    let syntax = lang
        .and_then(|l| SYNTAX_SET.find_syntax_by_token(l))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

    let light_theme = theme(theme_name);
    let dark_theme = dark_theme_name.and_then(dark_theme);

    let mut parser = light_theme.map(|_| ParseState::new(syntax));
    let mut light = light_theme.map(ThemedLines::new);
    let mut dark = dark_theme.map(ThemedLines::new);

    let mut lines: Vec<Node> = vec![];
    for (idx, line) in LinesWithEndings::from(code).enumerate() {
        if idx > 0 {
            lines.push(text("\n"));
        }
        let content = line.trim_end_matches(['\n', '\r']);

        let (Some(state), Some(themed)) = (parser.as_mut(), light.as_mut()) else {
            lines.push(plain_line(content).into());
            continue;
        };
        let ops = match state.parse_line(line, &SYNTAX_SET) {
            Ok(ops) => ops,
            Err(e) => {
                warn!("Highlighting failed, emitting plain text: {}", e);
                parser = None;
                lines.push(plain_line(content).into());
                continue;
            }
        };

        let light_styles = themed.styles(&ops, line);
        let dark_styles = dark.as_mut()
            .map(|d| d.styles(&ops, line))
            .filter(|styles| styles.len() == light_styles.len());

        let tokens: Vec<Node> = light_styles.iter()
            .enumerate()
            .map(|(i, (style, token))| (style, dark_styles.as_ref().map(|d| &d[i].0), token.trim_end_matches(['\n', '\r'])))
            .filter(|(_, _, token)| !token.is_empty())
            .map(|(style, dark, token)| h("span", &[("style", token_style(style, dark).as_str())], vec![text(token)]).into())
            .collect();
        lines.push(h("span", &[("class", "line")], tokens).into());
    }

    let code_el = h("code", &[], lines);

    let pre_style = pre_style(light_theme, dark_theme);
    let mut properties: Vec<(&str, &str)> = vec![("class", "shiki"), ("tabindex", "0")];
    if !pre_style.is_empty() {
        properties.push(("style", pre_style.as_str()));
    }
    if let Some(lang) = lang {
        properties.push(("data-language", lang));
    }
    h("pre", &properties, vec![code_el.into()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_shape() {
        let tree = highlight_to_tree("fn main() {}\nlet x = 1;\n", Some("rust"), DEFAULT_THEME, None);
        assert_eq!(tree.tag_name, "pre");
        assert!(tree.has_class("shiki"));
        assert_eq!(tree.property("data-language"), Some("rust"));

        let code = tree.first_element().unwrap();
        assert_eq!(code.tag_name, "code");
        let line_count = code.children.iter()
            .filter(|c| matches!(c, Node::Element(e) if e.has_class("line")))
            .count();
        assert_eq!(line_count, 2);
        assert_eq!(code.text_content(), "fn main() {}\nlet x = 1;");
    }

    #[test]
    fn test_tokens_are_styled() {
        let tree = highlight_to_tree("let x = 1;", Some("rust"), DEFAULT_THEME, None);
        let html = tree.to_html();
        assert!(html.contains("style=\"color:#"));
        assert!(html.starts_with("<pre class=\"shiki\""));
    }

    #[test]
    fn test_unknown_language_and_theme() {
        let tree = highlight_to_tree("<b>&</b>", Some("no-such-lang"), "no-such-theme", None);
        assert_eq!(tree.text_content(), "<b>&</b>");
        assert!(tree.to_html().contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    }

    #[test]
    fn test_no_language() {
        let tree = highlight_to_tree("plain", None, DEFAULT_THEME, None);
        assert!(tree.property("data-language").is_none());
        assert_eq!(tree.text_content(), "plain");
    }

    #[test]
    fn test_dark_theme_variables() {
        let html = highlight_to_tree("let x = 1;\nlet y = 2;", Some("rust"), DEFAULT_THEME, Some("base16-ocean.dark")).to_html();
        let token_count = html.matches("style=\"color:#").count();
        assert!(token_count > 0);
        assert!(html.matches(";--shiki-dark:#").count() >= token_count);
        assert!(html.contains("--shiki-dark-bg:#2b303b"));
    }

    #[test]
    fn test_unknown_dark_theme_is_ignored() {
        let html = highlight_to_tree("let x = 1;", Some("rust"), DEFAULT_THEME, Some("no-such-theme")).to_html();
        assert!(html.contains("style=\"color:#"));
        assert!(!html.contains("--shiki-dark"));
    }
}
