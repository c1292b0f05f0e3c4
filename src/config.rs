use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Site {
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub wordmark: Option<String>,
}

impl Site {
    /// Text printed in the corner of the OG cards. Falls back to the host of `base_url`.
    pub fn wordmark(&self) -> String {
        if let Some(ref wordmark) = self.wordmark {
            return wordmark.clone();
        }
        let host = self.base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        host.trim_end_matches('/').to_string()
    }
}

#[derive(Deserialize, Clone)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub output_dir: PathBuf,
    pub font_path: PathBuf,
}

#[derive(Deserialize, Clone)]
pub struct Defaults {
    pub page_size: u32,
}

#[derive(Deserialize, Clone, Default)]
pub struct Highlight {
    pub theme: Option<String>,
    /// Applied through `prefers-color-scheme: dark`
    pub dark_theme: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    #[serde(default)]
    pub highlight: Highlight,
    pub server: Server,
    pub log: Option<Log>,
}

pub const DEFAULT_THEME: &str = "InspiredGitHub";

impl Config {
    pub fn highlight_theme(&self) -> &str {
        self.highlight.theme.as_deref().unwrap_or(DEFAULT_THEME)
    }

    pub fn highlight_dark_theme(&self) -> Option<&str> {
        self.highlight.dark_theme.as_deref()
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let relative = path.strip_prefix("${exe_dir}")
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    Ok(exe_dir.join(relative))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        template_dir: parse_path(cfg.paths.template_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
        output_dir: parse_path(cfg.paths.output_dir)?,
        font_path: parse_path(cfg.paths.font_path)?,
    };

    if cfg.defaults.page_size == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "defaults.page_size must be greater than 0"));
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
