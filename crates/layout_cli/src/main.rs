//! layout-cli - build a widget scene from JSON, lay it out, print geometry

mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use layout_engine::LayoutTree;
use scene::{report, SceneNode};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use widget_tree::Point;

#[derive(Parser, Debug)]
#[command(name = "layout-cli", version, about)]
struct Args {
    /// Path to the JSON scene description
    scene: PathBuf,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Move the root widget to X,Y after building the scene
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    move_root: Option<Point>,
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let text = std::fs::read_to_string(&args.scene)
        .with_context(|| format!("Failed to read scene {}", args.scene.display()))?;
    let root_node: SceneNode = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scene {}", args.scene.display()))?;

    let mut tree = LayoutTree::new();
    let root = root_node.build(&mut tree).context("Failed to build scene")?;
    tracing::info!(widgets = tree.tree().len(), "scene built");

    if let Some(pos) = args.move_root {
        tree.move_to(root, pos).context("Failed to move root widget")?;
    }

    let entries = report(&tree, root);
    let output = if args.pretty {
        serde_json::to_string_pretty(&entries)?
    } else {
        serde_json::to_string(&entries)?
    };
    println!("{output}");
    Ok(())
}
