use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::{debug, info, warn};
use walkdir::WalkDir;

use crate::content::CollectionKind;
use crate::website::Website;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Render an `og.png` next to every entry page
    pub og_images: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions { og_images: true }
    }
}

/// Files written by one build, relative to `output_dir`.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
}

struct OutputDir<'a> {
    root: &'a Path,
    report: BuildReport,
}

impl OutputDir<'_> {
    /// Writes `content` at the URL path `url_path` (leading `/` ignored).
    fn write(&mut self, url_path: &str, content: &[u8]) -> io::Result<()> {
        let rel = PathBuf::from(url_path.trim_start_matches('/'));
        let full_path = self.root.join(&rel);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        debug!("Wrote {}", full_path.display());
        self.report.written.push(rel);
        Ok(())
    }
}

fn clear_output_dir(output_dir: &Path) -> io::Result<()> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir)
}

fn copy_public_dir(public_dir: &Path, out: &mut OutputDir) -> io::Result<()> {
    if !public_dir.is_dir() {
        warn!("Public directory {} not found, nothing to copy", public_dir.display());
        return Ok(());
    }

    for entry in WalkDir::new(public_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| io::Error::new(ErrorKind::Other, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(public_dir)
            .map_err(|e| io::Error::new(ErrorKind::Other, e.to_string()))?;
        let url_path = format!("public/{}", rel.to_string_lossy().replace('\\', "/"));
        out.write(&url_path, &fs::read(entry.path())?)?;
    }
    Ok(())
}

/// Renders the whole site into `config.paths.output_dir`, replacing whatever was there.
///
/// Lists are written unpaginated, a static file cannot read `?page=N`.
pub fn build_site(website: &Website, options: BuildOptions) -> io::Result<BuildReport> {
    let paths = &website.config.paths;
    clear_output_dir(&paths.output_dir)?;
    let mut out = OutputDir {
        root: &paths.output_dir,
        report: BuildReport::default(),
    };

    for kind in CollectionKind::ALL {
        for route in website.routes(kind) {
            let rendered = website.render_route(&route)?;
            out.write(&format!("{}/index.html", route.post.permalink), rendered.as_bytes())?;

            if options.og_images {
                let png = website.render_og(kind, route.slug)
                    .map_err(|e| io::Error::new(ErrorKind::Other, format!("OG image for {}: {}", route.post.permalink, e)))?;
                out.write(&route.post.og_image_path(), &png)?;
            }
        }

        let list = website.render_full_list(kind);
        out.write(&format!("{}/index.html", kind.name()), list.as_bytes())?;
    }

    out.write("index.html", website.render_index().as_bytes())?;
    out.write("rss.xml", &website.render_feed()?)?;
    out.write("sitemap.xml", &website.render_sitemap()?)?;
    copy_public_dir(&paths.public_dir, &mut out)?;

    info!("Built {} files into {}", out.report.written.len(), paths.output_dir.display());
    Ok(out.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::collection::tests::{sample_site, write_file};
    use crate::og::font::tests::shipped_font_path;
    use crate::website::tests::sample_website_config;

    const NO_OG: BuildOptions = BuildOptions { og_images: false };

    #[test]
    fn test_build_writes_every_page() {
        let dir = sample_site();
        let config = sample_website_config(dir.path());
        write_file(&config.paths.public_dir, "style.css", "body {}");
        write_file(&config.paths.public_dir, "img/logo.svg", "<svg/>");
        let output_dir = config.paths.output_dir.clone();
        let website = Website::load(config).unwrap();

        let report = build_site(&website, NO_OG).unwrap();

        for rel in [
            "blog/2024/my-post/index.html",
            "blog/2023/older/index.html",
            "blog/2022/oldest/index.html",
            "notes/first/index.html",
            "notes/second/index.html",
            "blog/index.html",
            "notes/index.html",
            "index.html",
            "rss.xml",
            "sitemap.xml",
            "public/style.css",
            "public/img/logo.svg",
        ] {
            assert!(output_dir.join(rel).is_file(), "missing {}", rel);
        }
        assert_eq!(report.written.len(), 12);
        assert!(!output_dir.join("blog/2024/my-post/og.png").exists());

        let page = fs::read_to_string(output_dir.join("notes/second/index.html")).unwrap();
        assert!(page.contains(r#"<a class="prev" href="/notes/first">"#));
    }

    #[test]
    fn test_build_clears_stale_output() {
        let dir = sample_site();
        let config = sample_website_config(dir.path());
        write_file(&config.paths.output_dir, "stale/index.html", "old");
        let output_dir = config.paths.output_dir.clone();
        let website = Website::load(config).unwrap();

        build_site(&website, NO_OG).unwrap();
        assert!(!output_dir.join("stale").exists());
        assert!(output_dir.join("index.html").is_file());
    }

    #[test]
    fn test_build_is_repeatable() {
        let dir = sample_site();
        let config = sample_website_config(dir.path());
        let output_dir = config.paths.output_dir.clone();
        let website = Website::load(config).unwrap();

        build_site(&website, NO_OG).unwrap();
        let first = fs::read(output_dir.join("rss.xml")).unwrap();
        build_site(&website, NO_OG).unwrap();
        assert_eq!(fs::read(output_dir.join("rss.xml")).unwrap(), first);
    }

    #[test]
    fn test_build_with_og_images() {
        let dir = sample_site();
        let mut config = sample_website_config(dir.path());
        config.paths.font_path = shipped_font_path();
        let output_dir = config.paths.output_dir.clone();
        let website = Website::load(config).unwrap();

        let report = build_site(&website, BuildOptions::default()).unwrap();
        assert_eq!(report.written.len(), 10 + 5);
        let png = fs::read(output_dir.join("notes/first/og.png")).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_build_fails_without_font() {
        let dir = sample_site();
        let config = sample_website_config(dir.path());
        let website = Website::load(config).unwrap();
        let err = build_site(&website, BuildOptions::default()).err().unwrap();
        assert!(err.to_string().contains("/blog/2024/my-post"));
    }
}
