use std::fs;
use std::io;
use std::path::Path;

pub(crate) const CONFIG_SAMPLE: &str = r#"[site]
title = "My notes"
description = "Posts and notes"
base_url = "https://example.com"
# Text in the corner of the OG cards, defaults to the host of base_url
# wordmark = "example.com"

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
content_dir = "content"
template_dir = "res/template"
public_dir = "res/public"
output_dir = "dist"
font_path = "res/fonts/og.ttf"

[defaults]
page_size = 10

[highlight]
theme = "InspiredGitHub"
dark_theme = "base16-ocean.dark"

[server]
address = "0.0.0.0"
port = 8001

# [log]
# level = "Info"
# log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, CONFIG_SAMPLE)
}

#[cfg(test)]
mod tests {
    use penned::config::parse_config;

    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config = parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(config.defaults.page_size, 10);
        assert_eq!(config.site.wordmark(), "example.com");
        assert!(config.log.is_none());
    }
}
