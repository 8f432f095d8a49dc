//! Default templates written by `init` and `build --create-templates`.

use std::path::{Path, PathBuf};

use super::render::{ARTICLE_TEMPLATE, BASE_TEMPLATE, INDEX_TEMPLATE};

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    (BASE_TEMPLATE, include_str!("../../templates/base.html")),
    (INDEX_TEMPLATE, include_str!("../../templates/index.html")),
    (ARTICLE_TEMPLATE, include_str!("../../templates/article.html")),
];

/// Write the default templates into `template_dir`, creating it if needed.
///
/// Existing files are left alone unless `overwrite` is set. Returns the
/// paths that were written.
pub fn write_default_templates(
    template_dir: &Path,
    overwrite: bool,
) -> Result<Vec<PathBuf>, std::io::Error> {
    std::fs::create_dir_all(template_dir)?;

    let mut written = Vec::new();
    for (name, content) in DEFAULT_TEMPLATES {
        let path = template_dir.join(name);
        if path.exists() && !overwrite {
            log::info!("keeping existing template {}", path.display());
            continue;
        }
        std::fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}
