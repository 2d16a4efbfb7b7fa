//! Composable view matchers.

use std::fmt;

use heroes_widgets::NodeRef;

/// A predicate over a node in a rendered hierarchy.
pub trait Matcher: fmt::Debug {
    fn matches(&self, node: NodeRef<'_>) -> bool;

    /// Human-readable description used in failure messages.
    fn describe(&self) -> String;
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        (**self).matches(node)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Matches nodes with the given id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithId(pub &'static str);

impl Matcher for WithId {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        node.node().id() == Some(self.0)
    }

    fn describe(&self) -> String {
        format!("with id: {}", self.0)
    }
}

/// Matches nodes whose text equals the given string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithText(pub String);

impl Matcher for WithText {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        node.node().text_content() == Some(self.0.as_str())
    }

    fn describe(&self) -> String {
        format!("with text: {:?}", self.0)
    }
}

/// Matches nodes that are displayed, meaning the node and every ancestor are
/// visible and the node is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsDisplayed;

impl Matcher for IsDisplayed {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        node.is_displayed()
    }

    fn describe(&self) -> String {
        "is displayed on the screen".to_string()
    }
}

/// Matches nodes with at least one strict descendant matching the inner matcher.
#[derive(Debug, Clone)]
pub struct HasDescendant<M>(pub M);

impl<M: Matcher> Matcher for HasDescendant<M> {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        node.descendants().into_iter().any(|d| self.0.matches(d))
    }

    fn describe(&self) -> String {
        format!("has descendant: {}", self.0.describe())
    }
}

/// Inverts the inner matcher.
#[derive(Debug, Clone)]
pub struct Not<M>(pub M);

impl<M: Matcher> Matcher for Not<M> {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        !self.0.matches(node)
    }

    fn describe(&self) -> String {
        format!("not {}", self.0.describe())
    }
}

/// Matches when every inner matcher does. Empty means always.
#[derive(Debug, Default)]
pub struct AllOf(pub Vec<Box<dyn Matcher>>);

impl Matcher for AllOf {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        self.0.iter().all(|m| m.matches(node))
    }

    fn describe(&self) -> String {
        let parts: Vec<_> = self.0.iter().map(|m| format!("({})", m.describe())).collect();
        parts.join(" and ")
    }
}

#[must_use]
pub fn with_id(id: &'static str) -> WithId {
    WithId(id)
}

#[must_use]
pub fn with_text(text: impl Into<String>) -> WithText {
    WithText(text.into())
}

#[must_use]
pub fn is_displayed() -> IsDisplayed {
    IsDisplayed
}

#[must_use]
pub fn has_descendant<M: Matcher>(inner: M) -> HasDescendant<M> {
    HasDescendant(inner)
}

#[must_use]
pub fn not<M: Matcher>(inner: M) -> Not<M> {
    Not(inner)
}

#[must_use]
pub fn all_of(matchers: Vec<Box<dyn Matcher>>) -> AllOf {
    AllOf(matchers)
}
