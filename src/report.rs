// src/report.rs
//! Text dumps of an element tree for debugging.

use serde::Serialize;
use slotframe_core::{ElementId, Rect};
use slotframe_layout::{Element, ElementKind, ElementTree};

/// Serializable snapshot of one element and everything below it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementReport {
    pub id: ElementId,
    pub name: String,
    pub kind: String,
    pub content: Rect,
    pub slot: Rect,
    pub depth: i32,
    pub visible: bool,
    pub content_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementReport>,
}

impl ElementReport {
    pub fn collect(tree: &ElementTree, id: ElementId) -> anyhow::Result<Self> {
        let element = tree.get(id)?;
        let children = tree
            .children(id)?
            .into_iter()
            .map(|child| Self::collect(tree, child))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self {
            id,
            name: element.name().to_string(),
            kind: kind_name(element),
            content: element.content(),
            slot: element.slot(),
            depth: element.depth(),
            visible: element.is_visible(),
            content_visible: element.is_content_visible(),
            resource: element.visual().map(|visual| visual.resource.clone()),
            children,
        })
    }
}

fn kind_name(element: &Element) -> String {
    match element.kind() {
        ElementKind::Leaf => "leaf".to_string(),
        ElementKind::Container(container) => container.arrangement().name().to_string(),
    }
}

fn rect_summary(rect: Rect) -> String {
    format!(
        "pos:({:.0},{:.0}) size:({:.0},{:.0})",
        rect.x(),
        rect.y(),
        rect.width(),
        rect.height()
    )
}

/// One line per element, drawn as an indented tree.
pub fn tree_output(tree: &ElementTree, root: ElementId) -> anyhow::Result<String> {
    let report = ElementReport::collect(tree, root)?;
    let mut output = String::new();
    write_tree(&mut output, &report, "", true, true);
    Ok(output)
}

fn write_tree(output: &mut String, report: &ElementReport, prefix: &str, is_last: bool, is_root: bool) {
    let branch = match (is_root, is_last) {
        (true, _) => "",
        (false, true) => "└── ",
        (false, false) => "├── ",
    };
    output.push_str(&format!(
        "{}{}{} \"{}\" {}",
        prefix,
        branch,
        report.kind,
        report.name,
        rect_summary(report.content)
    ));
    if !report.visible {
        output.push_str(" [hidden]");
    } else if !report.content_visible {
        output.push_str(" [content hidden]");
    }
    output.push('\n');

    let child_prefix = match (is_root, is_last) {
        (true, _) => String::new(),
        (false, true) => format!("{}    ", prefix),
        (false, false) => format!("{}│   ", prefix),
    };
    for (i, child) in report.children.iter().enumerate() {
        write_tree(output, child, &child_prefix, i + 1 == report.children.len(), false);
    }
}

/// Every element with its slot, content and presentation state.
pub fn detailed_output(tree: &ElementTree, root: ElementId) -> anyhow::Result<String> {
    let mut output = String::new();
    for id in tree.subtree(root)? {
        let element = tree.get(id)?;
        output.push_str(&format!("Element {} \"{}\" ({})\n", id, element.name(), kind_name(element)));
        output.push_str(&format!("  • slot:    {}\n", rect_summary(element.slot())));
        output.push_str(&format!("  • content: {}\n", rect_summary(element.content())));
        output.push_str(&format!(
            "  • alignment: {:?}/{:?} depth: {}\n",
            element.alignment_x(),
            element.alignment_y(),
            element.depth()
        ));
        if let (Some(parent), Some(index)) = (element.parent(), element.slot_index()) {
            output.push_str(&format!("  • parent: {} slot {}\n", parent, index));
        }
        if let Some(visual) = element.visual() {
            output.push_str(&format!(
                "  • visual: {} {:?}/{:?}\n",
                visual.resource,
                visual.mode_x(),
                visual.mode_y()
            ));
        }
        if let Some(container) = element.as_container() {
            output.push_str(&format!(
                "  • slots: {} used of {} elastic: {}\n",
                container.element_count(),
                container.size(),
                container.is_elastic()
            ));
        }
        let mut events: Vec<&str> = element.event_names().collect();
        if !events.is_empty() {
            events.sort_unstable();
            output.push_str(&format!("  • events: {}\n", events.join(", ")));
        }
    }
    Ok(output)
}

pub fn json_output(tree: &ElementTree, root: ElementId) -> anyhow::Result<String> {
    let report = ElementReport::collect(tree, root)?;
    Ok(serde_json::to_string_pretty(&report)?)
}
