use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Device, DocumentStore, Editor, GeometryConfig};
use pagecraft_model::BODY_ID;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page store directory
    #[arg(short, long, default_value = "pages")]
    pub store_dir: String,

    /// Grid pitch for drag and resize
    #[arg(short, long, default_value = "1")]
    pub grid_pitch: f64,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagecraft project...".bright_blue().bold()
    );

    let config = Config {
        store_dir: args.store_dir.clone(),
        geometry: GeometryConfig {
            grid_pitch: args.grid_pitch,
            ..GeometryConfig::default()
        },
        device: Device::Desktop,
    };

    let store = config.store(cwd);
    if store.list()?.is_empty() {
        let mut editor = Editor::with_config("index", config.geometry);
        editor.drop_component(BODY_ID, "header")?;
        editor.drop_component(BODY_ID, "hero")?;
        editor.drop_component(BODY_ID, "footer")?;
        editor.save(&store)?;
        println!("  {} Created {}/index.json", "✓".green(), args.store_dir);
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft inspect index");
    println!("  2. Run: pagecraft add index text");
    println!("  3. Run: pagecraft render index --out index.html");

    Ok(())
}
