use crate::{
    InitArgs,
    build::write_default_templates,
    config::{BlogConfig, DEFAULT_CONFIG_FILE},
};

pub fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path)?;
        println!("Created directory {path}", path = path.display());
    }

    println!("Initializing blog in {}", path.display());

    let config = BlogConfig::default();

    let config_file = path.join(DEFAULT_CONFIG_FILE);
    if config_file.exists() && !args.force {
        println!("Keeping existing {}", config_file.display());
    } else {
        let config_text = serde_yaml::to_string(&config)?;
        std::fs::write(&config_file, config_text)?;
        println!("Created config file {}", config_file.display());
    }

    let written = write_default_templates(&path.join(&config.paths.templates), args.force)?;
    for template in &written {
        println!("Created template {}", template.display());
    }

    std::fs::create_dir_all(path.join(&config.paths.content))?;

    Ok(())
}
