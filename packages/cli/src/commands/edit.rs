use super::open_page;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Action, Editor, Gesture, Measured, ResizeHandle, StaticAssetPicker};
use pagecraft_model::{tree, BODY_ID};
use pagecraft_renderer::{InlineEdit, RenderContext};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Page id
    pub page: String,

    /// Palette tag (see `pagecraft palette`)
    pub component: String,

    /// Container to insert into
    #[arg(short, long, default_value = BODY_ID)]
    pub into: String,

    /// Image source for `image` components
    #[arg(long)]
    pub src: Option<String>,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Page id
    pub page: String,

    /// Element id
    pub element: String,
}

#[derive(Debug, Args)]
pub struct StyleArgs {
    /// Page id
    pub page: String,

    /// Element id
    pub element: String,

    /// Style property, camelCase (e.g. backgroundColor)
    pub property: String,

    /// New value; omit to remove the property
    pub value: Option<String>,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Page id
    pub page: String,

    /// Text or link element id
    pub element: String,

    /// New text
    pub text: String,
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Page id
    pub page: String,

    /// Element id
    pub element: String,

    #[arg(allow_hyphen_values = true)]
    pub dx: f64,

    #[arg(allow_hyphen_values = true)]
    pub dy: f64,
}

#[derive(Debug, Args)]
pub struct ResizeArgs {
    /// Page id
    pub page: String,

    /// Element id
    pub element: String,

    /// Handle to drag: n, s, e, w, ne, nw, se, sw
    pub handle: ResizeHandle,

    #[arg(allow_hyphen_values = true)]
    pub dx: f64,

    #[arg(allow_hyphen_values = true)]
    pub dy: f64,
}

pub fn add(args: AddArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (mut editor, store) = open_page(&config, cwd, &args.page)?;

    if let Some(src) = args.src {
        editor.set_asset_picker(Box::new(StaticAssetPicker(src)));
    }

    editor.drop_component(&args.into, &args.component)?;
    editor.save(&store)?;

    let added = editor
        .state()
        .find(&args.into)
        .and_then(|container| container.children())
        .and_then(|children| children.last())
        .map(|element| element.id.clone())
        .unwrap_or_default();

    println!(
        "{} Added {} #{} to {}",
        "✓".green(),
        args.component.bright_white(),
        added,
        args.into
    );
    Ok(())
}

pub fn remove(args: RemoveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (mut editor, store) = open_page(&config, cwd, &args.page)?;

    editor.dispatch(Action::DeleteElement {
        element_id: args.element.clone(),
    })?;
    editor.save(&store)?;

    println!("{} Removed #{}", "✓".green(), args.element);
    Ok(())
}

pub fn style(args: StyleArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (mut editor, store) = open_page(&config, cwd, &args.page)?;

    let mut element = tree::find(&editor.state().elements, &args.element)
        .map(|element| (**element).clone())
        .ok_or_else(|| anyhow!("Element not found: {}", args.element))?;

    match &args.value {
        Some(value) => {
            element.styles.insert(args.property.clone(), value.clone());
        }
        None => {
            element.styles.remove(&args.property);
        }
    }

    editor.dispatch(Action::UpdateElement {
        element: Arc::new(element),
    })?;
    editor.save(&store)?;

    match args.value {
        Some(value) => println!("{} #{} {}: {}", "✓".green(), args.element, args.property, value),
        None => println!("{} #{} removed {}", "✓".green(), args.element, args.property),
    }
    Ok(())
}

pub fn text(args: TextArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (mut editor, store) = open_page(&config, cwd, &args.page)?;
    editor.select(Some(args.element.as_str()))?;

    let element = editor
        .state()
        .find(&args.element)
        .cloned()
        .ok_or_else(|| anyhow!("Element not found: {}", args.element))?;
    let mut edit = InlineEdit::begin(&element, &RenderContext::from_state(editor.state()))
        .ok_or_else(|| anyhow!("Element {} has no editable text", args.element))?;
    edit.set_text(args.text);

    match edit.commit() {
        Some(action) => {
            editor.dispatch(action)?;
            editor.save(&store)?;
            println!("{} Updated text of #{}", "✓".green(), args.element);
        }
        None => println!("{} Text of #{} unchanged", "•".bright_blue(), args.element),
    }
    Ok(())
}

fn run_gesture(editor: &mut Editor, element: &str, gesture: Gesture, dx: f64, dy: f64) -> Result<()> {
    editor.select(Some(element))?;
    editor.begin_gesture(gesture, Measured::default())?;
    let moved = editor.move_gesture(dx, dy);
    editor.end_gesture()?;
    moved?;
    Ok(())
}

fn describe_geometry(editor: &Editor, element: &str) -> String {
    let Some(element) = editor.state().find(element) else {
        return String::new();
    };
    let geometry = element.geometry;
    let size = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_else(|| "auto".to_string());
    format!(
        "{} {} × {}",
        geometry.transform(),
        size(geometry.width),
        size(geometry.height)
    )
}

pub fn move_element(args: MoveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (mut editor, store) = open_page(&config, cwd, &args.page)?;

    run_gesture(&mut editor, &args.element, Gesture::Drag, args.dx, args.dy)?;
    editor.save(&store)?;

    println!(
        "{} Moved #{}: {}",
        "✓".green(),
        args.element,
        describe_geometry(&editor, &args.element)
    );
    Ok(())
}

pub fn resize(args: ResizeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (mut editor, store) = open_page(&config, cwd, &args.page)?;

    run_gesture(
        &mut editor,
        &args.element,
        Gesture::Resize(args.handle),
        args.dx,
        args.dy,
    )?;
    editor.save(&store)?;

    println!(
        "{} Resized #{}: {}",
        "✓".green(),
        args.element,
        describe_geometry(&editor, &args.element)
    );
    Ok(())
}
