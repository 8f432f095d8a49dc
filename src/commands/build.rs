use crate::{
    BuildArgs,
    build::{Builder, write_default_templates},
    config::{BlogConfig, PathsConfig},
};

pub fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let mut config = BlogConfig::load_from_arg(args.config_file.as_deref())?;

    apply_path_overrides(&mut config.paths, args);

    if args.create_templates {
        let written = write_default_templates(&config.paths.templates, false)?;
        log::info!(
            "created {} default template(s) in {}",
            written.len(),
            config.paths.templates.display()
        );
    }

    if !config.paths.templates.is_dir() {
        anyhow::bail!(
            "template directory does not exist: {} (run with --create-templates or `mdblog init`)",
            config.paths.templates.display()
        );
    }

    let result = Builder::new(config).build()?;

    for failure in &result.failures {
        eprintln!(
            "Skipped {}: {}",
            failure.source.path.display(),
            failure.error
        );
    }
    if result.index.is_none() {
        log::warn!("no index page was written, see the errors above");
    }

    println!(
        "Built {} article(s) to {}{}",
        result.articles.len(),
        result.output_dir.display(),
        if result.failures.is_empty() {
            String::new()
        } else {
            format!(" ({} failed)", result.failures.len())
        }
    );

    Ok(())
}

/// Command line paths win over the config file and environment.
fn apply_path_overrides(paths: &mut PathsConfig, args: &BuildArgs) {
    if let Some(dir) = &args.content_dir {
        paths.content = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        paths.output = dir.clone();
    }
    if let Some(dir) = &args.template_dir {
        paths.templates = dir.clone();
    }
    if let Some(dir) = &args.static_dir {
        paths.static_dir = dir.clone();
    }
}
