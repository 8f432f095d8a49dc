//! Article discovery under the content root.

use std::path::{Path, PathBuf};

use super::article::ArticleSource;

/// File extensions treated as articles (compared case-insensitively).
pub const ARTICLE_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("content path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("content path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Find every article under `content_dir`, sorted by relative path.
pub fn discover_articles(content_dir: &Path) -> Result<Vec<ArticleSource>, SourceError> {
    if !content_dir.exists() {
        return Err(SourceError::PathNotFound(content_dir.to_path_buf()));
    }
    if !content_dir.is_dir() {
        return Err(SourceError::NotADirectory(content_dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    walk_directory(content_dir, Path::new(""), &mut sources)?;
    sources.sort();
    Ok(sources)
}

/// Recursively walk a directory and collect markdown files.
fn walk_directory(
    dir: &Path,
    relative_path: &Path,
    sources: &mut Vec<ArticleSource>,
) -> Result<(), SourceError> {
    let entries = std::fs::read_dir(dir).map_err(|e| SourceError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| SourceError::ReadEntry {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        let file_name = entry.file_name();

        // Skip hidden files and directories
        if file_name.to_string_lossy().starts_with('.') {
            if path.is_dir() || is_article(&path) {
                log::debug!("skipping hidden {}", path.display());
            }
            continue;
        }

        let item_relative_path = relative_path.join(&file_name);

        if path.is_dir() {
            walk_directory(&path, &item_relative_path, sources)?;
        } else if path.is_file() && is_article(&path) {
            sources.push(ArticleSource {
                relative_path: item_relative_path,
                path,
            });
        }
    }

    Ok(())
}

/// Check whether a path has an article extension.
pub fn is_article(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            ARTICLE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
