use super::open_page;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Action, Device};
use pagecraft_renderer::{render_document, to_html, HtmlOptions};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page id
    pub page: String,

    /// Device width (desktop, tablet, mobile); defaults to the config
    #[arg(short, long)]
    pub device: Option<Device>,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Render the editing view with this element selected
    #[arg(long)]
    pub select: Option<String>,

    /// Emit a fragment instead of a full HTML document
    #[arg(long)]
    pub fragment: bool,

    /// Disable pretty printing
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (mut editor, _) = open_page(&config, cwd, &args.page)?;

    editor.dispatch(Action::SetDevice {
        device: args.device.unwrap_or(config.device),
    })?;
    match &args.select {
        Some(id) => {
            editor.select(Some(id.as_str()))?;
        }
        None => {
            editor.dispatch(Action::ToggleLiveMode)?;
        }
    }

    let options = HtmlOptions {
        pretty: !args.compact,
        document: !args.fragment,
        title: args.page.clone(),
        ..HtmlOptions::default()
    };
    let html = to_html(&render_document(editor.state()), options);

    match args.out {
        Some(out) => {
            let path = PathBuf::from(cwd).join(out);
            std::fs::write(&path, html)?;
            println!("{} Rendered {} → {}", "✓".green(), args.page, path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}
