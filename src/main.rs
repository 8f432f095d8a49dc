use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod build;
mod commands;
mod config;
mod util;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: BlogCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The directory to initialize the blog in
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Overwrite existing templates and config
    #[arg(short, long, default_value = "false")]
    force: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file (defaults to mdblog.yaml if present)
    #[arg(short, long = "config")]
    config_file: Option<PathBuf>,

    /// Directory containing the markdown articles
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Directory the site is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory containing base.html, index.html and article.html
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Directory of static assets copied to <output>/static
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Write the default templates before building (existing files are kept)
    #[arg(long, default_value = "false")]
    create_templates: bool,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file (defaults to mdblog.yaml if present)
    #[arg(short, long = "config")]
    config_file: Option<PathBuf>,

    /// Directory the site is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only print what would be deleted
    #[arg(short, long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum BlogCommand {
    /// Create default templates and config
    Init(InitArgs),

    /// Build the blog
    Build(BuildArgs),

    /// Delete the generated site
    Clean(CleanArgs),
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        BlogCommand::Init(args) => commands::init::run(&args)?,
        BlogCommand::Build(args) => commands::build::run(&args)?,
        BlogCommand::Clean(args) => commands::clean::run(&args)?,
    }

    Ok(())
}
