use super::open_page;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{palette as palette_entries, DocumentStore, Editor};
use pagecraft_model::{count_elements, outline, parse_document};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Page id (letters, digits, `-` and `_`)
    pub page: String,

    /// Overwrite an existing page
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Page id
    pub page: String,

    /// Print the stored JSON instead of the outline
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Page id, or path to a page JSON file
    pub target: String,
}

pub fn new_page(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.store(cwd);

    if store.list()?.contains(&args.page) && !args.force {
        return Err(anyhow!(
            "Page {} already exists. Use --force to overwrite",
            args.page
        ));
    }

    let mut editor = Editor::with_config(args.page.as_str(), config.geometry);
    editor.save(&store)?;

    println!("{} Created page {}", "✓".green(), args.page.bright_white());
    Ok(())
}

pub fn list(cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.store(cwd);
    let pages = store.list()?;

    if pages.is_empty() {
        println!("No pages in {}", config.get_store_dir(cwd).display());
        return Ok(());
    }

    for page in pages {
        match store.load(&page).map_err(anyhow::Error::from).and_then(|json| {
            parse_document(&json).map_err(anyhow::Error::from)
        }) {
            Ok(root) => println!(
                "  {} {} ({} elements)",
                "•".bright_blue(),
                page,
                count_elements(&root)
            ),
            Err(e) => println!("  {} {} ({})", "✗".red(), page, e),
        }
    }
    Ok(())
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (editor, _) = open_page(&config, cwd, &args.page)?;

    if args.json {
        println!("{}", editor.to_json(true)?);
        return Ok(());
    }

    let root = &editor.state().elements;
    println!(
        "{} {} ({} elements)",
        "📄".bright_blue(),
        args.page.bright_white().bold(),
        count_elements(root)
    );
    print!("{}", outline(root));
    Ok(())
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.target);
    let json = if args.target.ends_with(".json") && path.is_file() {
        std::fs::read_to_string(&path)?
    } else {
        let config = Config::load(cwd)?;
        config.store(cwd).load(&args.target)?
    };

    let root = parse_document(&json)?;
    println!(
        "{} {} is valid ({} elements)",
        "✓".green(),
        args.target,
        count_elements(&root)
    );
    Ok(())
}

pub fn palette() -> Result<()> {
    let mut group = None;
    for entry in palette_entries() {
        if group != Some(entry.group) {
            println!("{}", format!("{:?}", entry.group).bright_blue().bold());
            group = Some(entry.group);
        }
        println!("  {:<12} {}", entry.tag.as_str(), entry.label);
    }
    Ok(())
}
