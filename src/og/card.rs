use ramhorns::Template;
use resvg::{tiny_skia, usvg};

use crate::og::font::OgFont;
use crate::og::{OgError, OG_HEIGHT, OG_WIDTH};

const TITLE_MAX_CHARS: usize = 26;
const TITLE_MAX_LINES: usize = 3;
const TITLE_FONT_SIZE: u32 = 64;
const LINE_HEIGHT: u32 = 80;
const PANEL_PADDING: u32 = 60;
const PANEL_WIDTH: u32 = 1000;

const CARD_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="{{width}}" height="{{height}}" viewBox="0 0 {{width}} {{height}}">
  <rect x="0" y="0" width="{{width}}" height="{{height}}" fill="#ffffff"/>
  <rect x="{{panel_x}}" y="{{panel_y}}" width="{{panel_width}}" height="{{panel_height}}" rx="28" ry="28" fill="#16181d"/>
  <g font-family="{{font_family}}" font-weight="600" fill="#f5f5f5" text-anchor="middle" font-size="{{font_size}}">
{{#title_lines}}    <text x="{{x}}" y="{{y}}" dominant-baseline="middle">{{text}}</text>
{{/title_lines}}  </g>
  <text x="{{wordmark_x}}" y="{{wordmark_y}}" font-family="{{font_family}}" font-weight="600" font-size="32" fill="#16181d" text-anchor="end">{{wordmark}}</text>
</svg>
"##;

#[derive(ramhorns::Content)]
struct TitleLine {
    x: u32,
    y: u32,
    text: String,
}

#[derive(ramhorns::Content)]
struct CardView<'a> {
    width: u32,
    height: u32,
    panel_x: u32,
    panel_y: u32,
    panel_width: u32,
    panel_height: u32,
    font_family: &'a str,
    font_size: u32,
    title_lines: Vec<TitleLine>,
    wordmark: &'a str,
    wordmark_x: u32,
    wordmark_y: u32,
}

/// Wraps the title into at most `max_lines`, marking a cut with an ellipsis.
pub fn wrap_title(title: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let wrapped = textwrap::wrap(title, max_chars);
    let truncated = wrapped.len() > max_lines;
    let mut lines: Vec<String> = wrapped.into_iter()
        .take(max_lines)
        .map(|s| s.to_string())
        .collect();
    if truncated {
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}

/// SVG of a title card: white canvas, dark panel with the centred title, wordmark bottom right.
pub fn card_svg(title: &str, wordmark: &str, font_family: &str) -> Result<String, OgError> {
    let template = Template::new(CARD_TEMPLATE)
        .map_err(|e| OgError::Template(e.to_string()))?;

    let lines = wrap_title(title, TITLE_MAX_CHARS, TITLE_MAX_LINES);
    let line_count = lines.len().max(1) as u32;
    let panel_height = line_count * LINE_HEIGHT + 2 * PANEL_PADDING;
    let panel_y = (OG_HEIGHT - panel_height) / 2;
    let panel_x = (OG_WIDTH - PANEL_WIDTH) / 2;

    let title_lines = lines.into_iter()
        .enumerate()
        .map(|(i, text)| TitleLine {
            x: OG_WIDTH / 2,
            y: panel_y + PANEL_PADDING + LINE_HEIGHT * i as u32 + LINE_HEIGHT / 2,
            text,
        })
        .collect();

    Ok(template.render(&CardView {
        width: OG_WIDTH,
        height: OG_HEIGHT,
        panel_x,
        panel_y,
        panel_width: PANEL_WIDTH,
        panel_height,
        font_family,
        font_size: TITLE_FONT_SIZE,
        title_lines,
        wordmark,
        wordmark_x: OG_WIDTH - 40,
        wordmark_y: OG_HEIGHT - 28,
    }))
}

/// Rasterizes an SVG of the card size to PNG bytes.
pub fn render_svg_to_png(svg: &str, font: &OgFont) -> Result<Vec<u8>, OgError> {
    let options = usvg::Options {
        fontdb: font.database.clone(),
        font_family: font.family.clone(),
        ..Default::default()
    };

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| OgError::Render(format!("Failed to parse SVG: {}", e)))?;

    let mut pixmap = tiny_skia::Pixmap::new(OG_WIDTH, OG_HEIGHT)
        .ok_or_else(|| OgError::Render("Failed to create pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| OgError::Render(format!("Failed to encode PNG: {}", e)))
}

pub fn render_card(title: &str, wordmark: &str, font: &OgFont) -> Result<Vec<u8>, OgError> {
    let svg = card_svg(title, wordmark, &font.family)?;
    render_svg_to_png(&svg, font)
}
