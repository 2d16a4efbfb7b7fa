//! View assertions and the failure they raise.

use std::fmt;

use heroes_widgets::NodeRef;

use crate::matcher::Matcher;
use crate::resolver::{LookupFailure, RowView};

/// A check failed. Raised by per-item checks and view assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    message: String,
    cause: Option<LookupFailure>,
    hierarchy: Option<String>,
}

impl AssertionFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
            hierarchy: None,
        }
    }

    /// Attach the lookup failure that made the check impossible.
    #[must_use]
    pub fn with_cause(mut self, cause: LookupFailure) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Attach a dump of the hierarchy the check ran against.
    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: impl Into<String>) -> Self {
        self.hierarchy = Some(hierarchy.into());
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn cause(&self) -> Option<&LookupFailure> {
        self.cause.as_ref()
    }

    #[must_use]
    pub fn hierarchy(&self) -> Option<&str> {
        self.hierarchy.as_deref()
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " ({cause})")?;
        }
        if let Some(hierarchy) = &self.hierarchy {
            write!(f, "\nView hierarchy:\n{hierarchy}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AssertionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// A reusable check against a single node, or against its absence.
#[derive(Debug)]
pub enum ViewAssertion {
    /// The node exists and satisfies the matcher.
    Matches(Box<dyn Matcher>),
    /// No node was found.
    DoesNotExist,
}

/// Assert the node exists and satisfies `matcher`.
#[must_use]
pub fn matches(matcher: impl Matcher + 'static) -> ViewAssertion {
    ViewAssertion::Matches(Box::new(matcher))
}

/// Assert that the lookup found nothing.
#[must_use]
pub fn does_not_exist() -> ViewAssertion {
    ViewAssertion::DoesNotExist
}

impl ViewAssertion {
    /// Run against a looked-up node. `cause` is set when the lookup failed.
    pub fn check(
        &self,
        node: Option<NodeRef<'_>>,
        cause: Option<&LookupFailure>,
    ) -> Result<(), AssertionFailure> {
        match self {
            Self::Matches(matcher) => {
                if let Some(cause) = cause {
                    return Err(AssertionFailure::new(format!(
                        "no view to check against '{}'",
                        matcher.describe()
                    ))
                    .with_cause(cause.clone()));
                }
                let Some(node) = node else {
                    return Err(AssertionFailure::new(format!(
                        "no view supplied for '{}'",
                        matcher.describe()
                    )));
                };
                if matcher.matches(node) {
                    Ok(())
                } else {
                    Err(AssertionFailure::new(format!(
                        "'{}' doesn't match the selected view",
                        matcher.describe()
                    ))
                    .with_hierarchy(node.node().dump()))
                }
            }
            Self::DoesNotExist => match node {
                None => Ok(()),
                Some(node) => Err(AssertionFailure::new("view is present in the hierarchy")
                    .with_hierarchy(node.node().dump())),
            },
        }
    }

    /// Run against a resolved list row.
    pub fn check_row(
        &self,
        row: Option<&RowView>,
        cause: Option<&LookupFailure>,
    ) -> Result<(), AssertionFailure> {
        self.check(row.map(RowView::node_ref), cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{has_descendant, is_displayed, with_text};
    use heroes_widgets::ViewNode;
    use std::error::Error as _;

    fn row() -> RowView {
        RowView::new(0, ViewNode::with_id("row").child(ViewNode::new().text("Thor")), true)
    }

    #[test]
    fn matching_row_passes() {
        let row = row();
        matches(has_descendant(with_text("Thor")))
            .check_row(Some(&row), None)
            .unwrap();
    }

    #[test]
    fn mismatch_carries_hierarchy() {
        let row = row();
        let err = matches(has_descendant(with_text("Loki")))
            .check_row(Some(&row), None)
            .unwrap_err();
        assert!(err.message().contains("has descendant: with text: \"Loki\""));
        assert!(err.hierarchy().unwrap().contains("text=\"Thor\""));
        assert!(err.to_string().contains("View hierarchy:"));
    }

    #[test]
    fn lookup_failure_fails_matches_and_is_the_source() {
        let cause = LookupFailure::OutOfRange { index: 4, item_count: 4 };
        let err = matches(is_displayed()).check(None, Some(&cause)).unwrap_err();
        assert_eq!(err.cause(), Some(&cause));
        assert_eq!(err.source().unwrap().to_string(), cause.to_string());
    }

    #[test]
    fn does_not_exist_accepts_absence() {
        let cause = LookupFailure::NoMatchingView {
            matcher: "with text: \"x\"".into(),
        };
        does_not_exist().check(None, Some(&cause)).unwrap();
        let row = row();
        assert!(does_not_exist().check_row(Some(&row), None).is_err());
    }
}
