//! JSON scene description and geometry report

use layout_engine::{BoxLayoutOptions, LayoutError, LayoutTree, Result};
use serde::{Deserialize, Serialize};
use widget_tree::{Widget, WidgetId, DEFAULT_WIDGET_SIZE};

/// Kind of node in a scene file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Widget,
    Box,
    /// The abstract layout base; naming it in a scene is an error
    Abstract,
}

/// One node of a scene, with its children
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Box layout options, only read for `box` nodes
    pub options: BoxLayoutOptions,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    fn widget(&self) -> Widget {
        let mut widget = Widget::with_size(
            self.width.unwrap_or(DEFAULT_WIDGET_SIZE.width),
            self.height.unwrap_or(DEFAULT_WIDGET_SIZE.height),
        )
        .at(self.x, self.y);
        widget.name = self.name.clone();
        widget
    }

    /// Build this node and its children into `tree`, returning the node's ID.
    /// Children are built fully before being attached to their parent. On
    /// error, nothing built by this call is left in the tree.
    pub fn build(&self, tree: &mut LayoutTree) -> Result<WidgetId> {
        let id = match self.kind {
            NodeKind::Widget => tree.add_widget(self.widget())?,
            NodeKind::Box => tree.add_box_layout(self.widget(), &self.options)?,
            NodeKind::Abstract => {
                return Err(LayoutError::AbstractInstantiation("abstract".to_string()));
            }
        };
        if let Err(err) = self.build_children(tree, id) {
            tree.remove_subtree(id)?;
            return Err(err);
        }
        Ok(id)
    }

    fn build_children(&self, tree: &mut LayoutTree, id: WidgetId) -> Result<()> {
        for child in &self.children {
            let child_id = child.build(tree)?;
            if let Err(err) = tree.add_child(id, child_id) {
                tree.remove_subtree(child_id)?;
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Geometry of one widget after layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetReport {
    pub id: WidgetId,
    pub name: Option<String>,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_passes: Option<u64>,
}

/// Depth-first, pre-order listing of the subtree rooted at `root`
pub fn report(tree: &LayoutTree, root: WidgetId) -> Vec<WidgetReport> {
    let mut entries = Vec::new();
    let mut stack = vec![(root, 0)];
    while let Some((id, depth)) = stack.pop() {
        let Some(widget) = tree.widget(id) else {
            continue;
        };
        let content = tree.content_size(id);
        entries.push(WidgetReport {
            id,
            name: widget.name.clone(),
            depth,
            x: widget.x(),
            y: widget.y(),
            width: widget.width(),
            height: widget.height(),
            content_width: content.map(|c| c.width),
            content_height: content.map(|c| c.height),
            layout_passes: tree.stats(id).map(|s| s.passes),
        });
        stack.extend(widget.children().iter().rev().map(|&child| (child, depth + 1)));
    }
    entries
}
