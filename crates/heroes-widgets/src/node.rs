//! View tree produced by rendering.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthChar;

/// Visibility of a single node, independent of its ancestors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Takes no space and is never displayed.
    Gone,
}

/// One node of a rendered view subtree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewNode {
    id: Option<&'static str>,
    text: Option<String>,
    visibility: Visibility,
    children: Vec<ViewNode>,
}

impl ViewNode {
    /// A visible node with no id, text or children.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(id: &'static str) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children_from(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<&'static str> {
        self.id
    }

    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    #[must_use]
    pub fn children(&self) -> &[ViewNode] {
        &self.children
    }

    /// Root reference, displayed when this node is visible.
    #[must_use]
    pub fn as_root(&self) -> NodeRef<'_> {
        NodeRef::new(self, true)
    }

    /// Indented hierarchy dump, one node per line.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{:indent$}+-> ", "", indent = depth * 2);
        let _ = write!(out, "id={}", self.id.unwrap_or("-"));
        if let Some(text) = &self.text {
            let _ = write!(out, " text={text:?}");
        }
        if self.visibility == Visibility::Gone {
            out.push_str(" gone");
        }
        out.push('\n');
        for child in &self.children {
            child.dump_into(out, depth + 1);
        }
    }

    /// Displayed text of this subtree, joined by two spaces.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut parts = Vec::new();
        for node in std::iter::once(self.as_root()).chain(self.as_root().descendants()) {
            if node.is_displayed()
                && let Some(text) = node.node().text_content()
            {
                parts.push(text);
            }
        }
        parts.join("  ")
    }
}

/// A node paired with whether it is actually displayed, which depends on the
/// visibility of every ancestor.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a ViewNode,
    displayed: bool,
}

impl<'a> NodeRef<'a> {
    /// `parent_displayed` is false when any ancestor is hidden or off screen.
    #[must_use]
    pub fn new(node: &'a ViewNode, parent_displayed: bool) -> Self {
        Self {
            node,
            displayed: parent_displayed && node.is_visible(),
        }
    }

    #[must_use]
    pub fn node(&self) -> &'a ViewNode {
        self.node
    }

    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> {
        let displayed = self.displayed;
        self.node
            .children
            .iter()
            .map(move |child| NodeRef::new(child, displayed))
    }

    /// Every strict descendant in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef<'a>> = self.children().collect();
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let mut kids: Vec<_> = next.children().collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }
}

/// Clip `text` to at most `width` terminal columns.
#[must_use]
pub fn clip_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
