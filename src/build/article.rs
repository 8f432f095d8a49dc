//! Articles and the metadata rules that derive them from source files.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::front_matter::FrontMatter;
use crate::config::ArticleDefaults;
use crate::util::title_from_stem;

/// A markdown file found under the content root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArticleSource {
    /// Path relative to the content root (e.g. "tutorials/getting-started.md")
    pub relative_path: PathBuf,
    /// Full path used for reading
    pub path: PathBuf,
}

/// A fully built article, as handed to the article template.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub title: String,
    /// Rendered HTML body
    pub content: String,
    /// Rendered table of contents
    pub toc: String,
    pub date: String,
    pub author: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    /// Estimated minutes to read
    pub reading_time: u32,
    /// Source path relative to the content root
    pub file_path: String,
    /// Source modification time, `YYYY-MM-DD HH:MM:SS`
    pub last_modified: String,
    /// Output path relative to the output root
    pub url: String,
    /// Front matter keys without a dedicated field
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The subset of an article listed on the index page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSummary {
    pub title: String,
    pub url: String,
    pub date: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub reading_time: u32,
}

impl Article {
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            title: self.title.clone(),
            url: self.url.clone(),
            date: self.date.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            category: self.category.clone(),
            reading_time: self.reading_time,
        }
    }
}

/// Article metadata with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleMeta {
    pub title: String,
    pub date: String,
    pub author: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub reading_time: u32,
    pub file_path: String,
    pub last_modified: String,
    pub url: String,
}

impl ArticleMeta {
    /// Fill in metadata from front matter, falling back to the file and configured defaults.
    pub fn resolve(
        front_matter: &FrontMatter,
        relative_path: &Path,
        modified: SystemTime,
        body: &str,
        defaults: &ArticleDefaults,
        page_extension: &str,
    ) -> Self {
        let modified: DateTime<Local> = modified.into();

        let title = front_matter.title.clone().unwrap_or_else(|| {
            relative_path
                .file_stem()
                .map(|stem| title_from_stem(&stem.to_string_lossy()))
                .unwrap_or_else(|| "Untitled".to_string())
        });

        Self {
            title,
            date: front_matter
                .date
                .clone()
                .unwrap_or_else(|| modified.format("%Y-%m-%d").to_string()),
            author: front_matter
                .author
                .clone()
                .unwrap_or_else(|| defaults.author.clone()),
            description: front_matter.description.clone().unwrap_or_default(),
            tags: front_matter.tags.clone().unwrap_or_default(),
            category: front_matter
                .category
                .clone()
                .unwrap_or_else(|| defaults.category.clone()),
            reading_time: reading_time(body, defaults.words_per_minute),
            file_path: path_to_slash(relative_path),
            last_modified: modified.format("%Y-%m-%d %H:%M:%S").to_string(),
            url: path_to_slash(&output_relative_path(relative_path, page_extension)),
        }
    }
}

/// Estimate minutes to read `max(1, round(words / words_per_minute))`.
///
/// Words are whitespace-separated tokens of the raw markdown, code included.
/// Halves round to even, so 500 words at 200 wpm is 2 minutes.
pub fn reading_time(markdown: &str, words_per_minute: u32) -> u32 {
    let words = markdown.split_whitespace().count();
    let minutes = (words as f64 / f64::from(words_per_minute.max(1))).round_ties_even();
    (minutes as u32).max(1)
}

/// Mirror a source path into the output tree with the page extension.
/// "tutorials/intro.md" -> "tutorials/intro.html"
pub fn output_relative_path(relative_path: &Path, page_extension: &str) -> PathBuf {
    relative_path.with_extension(page_extension.trim_start_matches('.'))
}

/// Render a relative path with `/` separators regardless of platform.
fn path_to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn mtime() -> SystemTime {
        Local
            .with_ymd_and_hms(2024, 2, 29, 13, 45, 7)
            .single()
            .unwrap()
            .into()
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time("", 200), 1);
        assert_eq!(reading_time(&words(50), 200), 1);
        assert_eq!(reading_time(&words(450), 200), 2);
        assert_eq!(reading_time(&words(1000), 200), 5);
    }

    #[test]
    fn test_reading_time_rounds_half_to_even() {
        assert_eq!(reading_time(&words(300), 200), 2);
        assert_eq!(reading_time(&words(500), 200), 2);
        assert_eq!(reading_time(&words(700), 200), 4);
    }

    #[test]
    fn test_reading_time_counts_code_as_words() {
        let markdown = "Intro\n\n```\nlet a = 1;\n```\n";
        // Intro, ```, let, a, =, 1;, ```
        assert_eq!(markdown.split_whitespace().count(), 7);
        assert_eq!(reading_time(markdown, 7), 1);
        assert_eq!(reading_time(markdown, 2), 4);
    }

    #[test]
    fn test_output_relative_path() {
        assert_eq!(
            output_relative_path(Path::new("tutorials/uv/intro.md"), "html"),
            PathBuf::from("tutorials/uv/intro.html")
        );
        assert_eq!(
            output_relative_path(Path::new("notes.markdown"), ".htm"),
            PathBuf::from("notes.htm")
        );
    }

    #[test]
    fn test_defaults_apply_without_front_matter() {
        let meta = ArticleMeta::resolve(
            &FrontMatter::default(),
            Path::new("guides/getting-started.md"),
            mtime(),
            "one two three",
            &ArticleDefaults::default(),
            "html",
        );

        assert_eq!(meta.title, "Getting Started");
        assert_eq!(meta.date, "2024-02-29");
        assert_eq!(meta.last_modified, "2024-02-29 13:45:07");
        assert_eq!(meta.author, "Anonymous");
        assert_eq!(meta.category, "Tutorial");
        assert_eq!(meta.description, "");
        assert!(meta.tags.is_empty());
        assert_eq!(meta.reading_time, 1);
        assert_eq!(meta.file_path, "guides/getting-started.md");
        assert_eq!(meta.url, "guides/getting-started.html");
    }

    #[test]
    fn test_front_matter_overrides_defaults() {
        let front_matter = FrontMatter {
            title: Some("Custom".to_string()),
            date: Some("2023-12-31".to_string()),
            author: Some("Ada".to_string()),
            description: Some("About things".to_string()),
            tags: Some(vec!["a".to_string(), "b".to_string()]),
            category: Some("Notes".to_string()),
            ..FrontMatter::default()
        };
        let meta = ArticleMeta::resolve(
            &front_matter,
            Path::new("post.md"),
            mtime(),
            "",
            &ArticleDefaults::default(),
            "html",
        );

        assert_eq!(meta.title, "Custom");
        assert_eq!(meta.date, "2023-12-31");
        assert_eq!(meta.author, "Ada");
        assert_eq!(meta.description, "About things");
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(meta.category, "Notes");
        // The modification time is still reported.
        assert_eq!(meta.last_modified, "2024-02-29 13:45:07");
    }
}
