//! Static asset copying.

use std::path::{Path, PathBuf};

/// Name of the static subtree inside the output directory.
pub const STATIC_OUTPUT_DIR: &str = "static";

/// Where the highlighting stylesheet lands, relative to the output root.
pub const HIGHLIGHT_CSS_PATH: &str = "static/css/highlight.css";

/// A stylesheet at this path under the static directory replaces the generated one.
const HIGHLIGHT_CSS_OVERRIDE: &str = "css/highlight.css";

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to prepare {path}: {source}")]
    Prepare {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Copy `static_dir` to `<output_dir>/static`, replacing any previous copy.
///
/// Returns the number of files copied, or `None` when there is no static directory.
pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<Option<usize>, AssetError> {
    if !static_dir.is_dir() {
        return Ok(None);
    }

    let target = output_dir.join(STATIC_OUTPUT_DIR);
    if target.exists() {
        std::fs::remove_dir_all(&target).map_err(|source| AssetError::Prepare {
            path: target.clone(),
            source,
        })?;
    }

    let copied = copy_dir(static_dir, &target)?;
    Ok(Some(copied))
}

fn copy_dir(from: &Path, to: &Path) -> Result<usize, AssetError> {
    let copy_err = |source| AssetError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(to).map_err(copy_err)?;

    let mut copied = 0;
    for entry in std::fs::read_dir(from).map_err(copy_err)? {
        let entry = entry.map_err(copy_err)?;
        let source_path = entry.path();
        let target_path = to.join(entry.file_name());

        if source_path.is_dir() {
            copied += copy_dir(&source_path, &target_path)?;
        } else {
            std::fs::copy(&source_path, &target_path).map_err(|source| AssetError::Copy {
                from: source_path.clone(),
                to: target_path.clone(),
                source,
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Write the highlighting stylesheet unless the static assets ship their own.
///
/// A stylesheet left over from an earlier build is overwritten, so a theme
/// change takes effect on the next build.
pub fn write_highlight_css(
    static_dir: &Path,
    output_dir: &Path,
    css: &str,
) -> Result<Option<PathBuf>, AssetError> {
    if static_dir.join(HIGHLIGHT_CSS_OVERRIDE).is_file() {
        return Ok(None);
    }

    let path = output_dir.join(HIGHLIGHT_CSS_PATH);
    let prepare_err = |source| AssetError::Prepare {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(prepare_err)?;
    }
    std::fs::write(&path, css).map_err(prepare_err)?;
    Ok(Some(path))
}
