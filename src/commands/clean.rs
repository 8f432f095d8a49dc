use crate::{CleanArgs, config::BlogConfig};

pub fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let config = BlogConfig::load_from_arg(args.config_file.as_deref())?;

    let site_path = args
        .output_dir
        .clone()
        .unwrap_or(config.paths.output);

    if !site_path.exists() {
        println!("Nothing to clean at {}", site_path.display());
        return Ok(());
    }

    if args.dry_run {
        println!("Would delete {}", site_path.display());
    } else {
        std::fs::remove_dir_all(&site_path)?;
        println!("Deleted {}", site_path.display());
    }

    Ok(())
}
