mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, init, inspect, list, move_element, new_page, palette, remove, render, resize, style,
    text, validate, AddArgs, InitArgs, InspectArgs, MoveArgs, NewArgs, RemoveArgs, RenderArgs,
    ResizeArgs, StyleArgs, TextArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - Build pages from blocks
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// Create an empty page
    New(NewArgs),

    /// List stored pages
    List,

    /// Show the element tree of a page
    Inspect(InspectArgs),

    /// Check that a page document loads
    Validate(ValidateArgs),

    /// List the components that can be added
    Palette,

    /// Add a component to a container
    Add(AddArgs),

    /// Delete an element and its children
    Remove(RemoveArgs),

    /// Set or remove a style property
    Style(StyleArgs),

    /// Replace the text of a text or link element
    Text(TextArgs),

    /// Drag an element by an offset
    Move(MoveArgs),

    /// Drag a resize handle of an element
    Resize(ResizeArgs),

    /// Render a page to HTML
    Render(RenderArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::New(args) => new_page(args, &cwd),
                Command::List => list(&cwd),
                Command::Inspect(args) => inspect(args, &cwd),
                Command::Validate(args) => validate(args, &cwd),
                Command::Palette => palette(),
                Command::Add(args) => add(args, &cwd),
                Command::Remove(args) => remove(args, &cwd),
                Command::Style(args) => style(args, &cwd),
                Command::Text(args) => text(args, &cwd),
                Command::Move(args) => move_element(args, &cwd),
                Command::Resize(args) => resize(args, &cwd),
                Command::Render(args) => render(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
