use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::{NaiveDateTime, Utc};
use clap::{Parser, ValueEnum};

use penned::text_utils::slugify;

#[derive(Parser, Debug)]
#[command(version, about = "Creates a new blog post or note", long_about = None)]
struct Args {
    #[arg(short, long)]
    title: String,

    #[arg(short, long, value_enum, default_value_t = EntryKind::Blog)]
    kind: EntryKind,

    /// Collections root, the entry is created under `<content-dir>/blog` or `<content-dir>/notes`
    #[arg(short, long, default_value = "content")]
    content_dir: PathBuf,

    /// Comma separated tags
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Print to stdout instead of writing the file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum EntryKind {
    Blog,
    Notes,
}

/// Location relative to the collection root. The prefix widths match what the
/// loader strips: `YYYY-MM-DD-` for blog posts, `YYYY-` for notes.
fn entry_path(kind: EntryKind, slug: &str, date: &NaiveDateTime) -> PathBuf {
    match kind {
        EntryKind::Blog => PathBuf::from("blog")
            .join(format!("{}-{}", date.format("%Y-%m-%d"), slug))
            .join("index.md"),
        EntryKind::Notes => PathBuf::from("notes")
            .join(format!("{}-{}.md", date.format("%Y"), slug)),
    }
}

fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_entry(kind: EntryKind, title: &str, date: &NaiveDateTime, tags: &[String]) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", yaml_quote(title));
    if kind == EntryKind::Blog {
        let _ = writeln!(&mut buf, "description: \"Replace with a short description\"");
    }
    let _ = writeln!(&mut buf, "date: {}", date.format("%Y-%m-%d %H:%M:%S"));
    if !tags.is_empty() {
        let _ = writeln!(&mut buf, "tags: [{}]", tags.join(", "));
    }
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

fn write_entry(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let slug = slugify(&args.title);
    if slug.is_empty() {
        bail!("Title {:?} does not produce a usable slug", args.title);
    }

    let now = Utc::now().naive_utc();
    let content = render_entry(args.kind, &args.title, &now, &args.tags);

    if args.dry_run {
        println!("{}", content);
        return Ok(());
    }

    let path = args.content_dir.join(entry_path(args.kind, &slug, &now));
    write_entry(&path, &content)?;
    println!("Created {}", path.display());
    Ok(())
}
