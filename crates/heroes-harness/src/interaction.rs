//! Item-to-row interactions and single-view interactions.

use std::fmt;

use heroes_widgets::{ListWidget, ViewNode};
use serde_json::json;

use crate::assertion::{AssertionFailure, ViewAssertion};
use crate::config::HarnessConfig;
use crate::logging::RunLog;
use crate::matcher::Matcher;
use crate::resolver::{LookupFailure, RowResolver, RowView};

// ============================================================================
// Per-item checks
// ============================================================================

/// A check run once per expected item against the row at the same index.
///
/// `row` is `None` exactly when `cause` is `Some`.
pub trait ItemViewAssertion<T: ?Sized> {
    fn check(
        &mut self,
        item: &T,
        row: Option<&RowView>,
        cause: Option<&LookupFailure>,
    ) -> Result<(), AssertionFailure>;
}

impl<T: ?Sized, F> ItemViewAssertion<T> for F
where
    F: FnMut(&T, Option<&RowView>, Option<&LookupFailure>) -> Result<(), AssertionFailure>,
{
    fn check(
        &mut self,
        item: &T,
        row: Option<&RowView>,
        cause: Option<&LookupFailure>,
    ) -> Result<(), AssertionFailure> {
        self(item, row, cause)
    }
}

/// Result of checking one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub index: usize,
    pub passed: bool,
    /// Set when the row could not be resolved, even if the check accepted that.
    pub lookup_failure: Option<LookupFailure>,
}

/// Per-row outcomes in sequence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    outcomes: Vec<RowOutcome>,
}

impl CheckReport {
    #[must_use]
    pub fn outcomes(&self) -> &[RowOutcome] {
        &self.outcomes
    }

    /// Number of times the check ran.
    #[must_use]
    pub fn checked(&self) -> usize {
        self.outcomes.len()
    }

    /// True when every recorded row passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Rows that passed even though they could not be resolved.
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.lookup_failure.is_some())
            .count()
    }
}

/// The check failed at `index`; later rows were not visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionError {
    pub index: usize,
    pub failure: AssertionFailure,
    /// Outcomes up to and including the failing row.
    pub report: CheckReport,
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} failed: {}", self.index, self.failure)
    }
}

impl std::error::Error for InteractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.failure)
    }
}

/// Entry point for list checks.
pub struct ListInteraction<'a, L: ?Sized> {
    list: &'a mut L,
    config: HarnessConfig,
}

impl<'a, L: ListWidget + ?Sized> ListInteraction<'a, L> {
    /// Start an interaction against `list`, configured from the
    /// `HEROES_*` environment variables.
    pub fn on_list(list: &'a mut L) -> Self {
        Self {
            list,
            config: HarnessConfig::from_env_or_default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind the expected items, in the order the list should render them.
    ///
    /// The length is not compared with the list here; a mismatch shows up as
    /// [`LookupFailure::OutOfRange`] on the first index past the end.
    pub fn with_items<T>(self, items: impl IntoIterator<Item = T>) -> ItemsInteraction<'a, L, T> {
        let items: Vec<T> = items.into_iter().collect();
        let mut log = RunLog::new("list_interaction", &self.config);
        log.record(
            "bind",
            json!({"item_count": items.len(), "list_items": self.list.item_count()}),
        );
        ItemsInteraction {
            list: self.list,
            items,
            resolver: RowResolver::from_config(&self.config),
            log,
        }
    }
}

/// Expected items bound to a list, ready to be checked.
pub struct ItemsInteraction<'a, L: ?Sized, T> {
    list: &'a mut L,
    items: Vec<T>,
    resolver: RowResolver,
    log: RunLog,
}

impl<L: ListWidget + ?Sized, T> ItemsInteraction<'_, L, T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn run_log(&self) -> &RunLog {
        &self.log
    }

    /// Run `assertion` for every item in order, stopping at the first failure.
    pub fn check<F>(&mut self, mut assertion: F) -> Result<CheckReport, InteractionError>
    where
        F: FnMut(&T, Option<&RowView>, Option<&LookupFailure>) -> Result<(), AssertionFailure>,
    {
        self.check_with(&mut assertion)
    }

    /// [`check`](Self::check) for any [`ItemViewAssertion`].
    pub fn check_with<A>(&mut self, assertion: &mut A) -> Result<CheckReport, InteractionError>
    where
        A: ItemViewAssertion<T> + ?Sized,
    {
        let _span = tracing::info_span!(
            "list_interaction.check",
            items = self.items.len(),
            list_items = self.list.item_count()
        )
        .entered();

        let mut outcomes = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            let (resolved, passes) = self.resolver.resolve_counted(&mut *self.list, index);
            let (row, cause) = match resolved {
                Ok(row) => (Some(row), None),
                Err(failure) => (None, Some(failure)),
            };
            self.log.record(
                "resolve",
                json!({
                    "index": index,
                    "found": row.is_some(),
                    "passes": passes,
                    "checksum": row.as_ref().map(RowView::checksum),
                    "cause": cause.as_ref().map(ToString::to_string),
                }),
            );

            let result = assertion.check(item, row.as_ref(), cause.as_ref());
            outcomes.push(RowOutcome {
                index,
                passed: result.is_ok(),
                lookup_failure: cause,
            });

            if let Err(failure) = result {
                tracing::debug!(message = "list_interaction.failed", index, error = %failure);
                self.log.record(
                    "assert",
                    json!({"index": index, "outcome": "fail", "message": failure.message()}),
                );
                self.log.record(
                    "complete",
                    json!({"outcome": "fail", "checked": outcomes.len(), "failed_index": index}),
                );
                return Err(InteractionError {
                    index,
                    failure,
                    report: CheckReport { outcomes },
                });
            }
            self.log
                .record("assert", json!({"index": index, "outcome": "pass"}));
        }

        self.log.record(
            "complete",
            json!({"outcome": "pass", "checked": outcomes.len()}),
        );
        Ok(CheckReport { outcomes })
    }
}

// ============================================================================
// Single-view checks
// ============================================================================

/// Failure of a single-view interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewInteractionError {
    /// More than one node matched the lookup matcher.
    Ambiguous { matcher: String, count: usize },
    Assertion(AssertionFailure),
}

impl fmt::Display for ViewInteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ambiguous { matcher, count } => {
                write!(f, "{count} views match '{matcher}'; expected exactly one")
            }
            Self::Assertion(failure) => write!(f, "{failure}"),
        }
    }
}

impl std::error::Error for ViewInteractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ambiguous { .. } => None,
            Self::Assertion(failure) => Some(failure),
        }
    }
}

impl From<AssertionFailure> for ViewInteractionError {
    fn from(failure: AssertionFailure) -> Self {
        Self::Assertion(failure)
    }
}

/// Locates a single node in a hierarchy by matcher.
#[derive(Debug)]
pub struct ViewInteraction<'a, M> {
    root: &'a ViewNode,
    matcher: M,
}

/// Start a single-view interaction over `root` and its descendants.
pub fn on_view<M: Matcher>(root: &ViewNode, matcher: M) -> ViewInteraction<'_, M> {
    ViewInteraction { root, matcher }
}

impl<M: Matcher> ViewInteraction<'_, M> {
    /// Find the single matching node and run `assertion` against it. When no
    /// node matches, the assertion receives [`LookupFailure::NoMatchingView`].
    pub fn check(&self, assertion: ViewAssertion) -> Result<(), ViewInteractionError> {
        let root = self.root.as_root();
        let found: Vec<_> = std::iter::once(root)
            .chain(root.descendants())
            .filter(|node| self.matcher.matches(*node))
            .collect();

        match found.as_slice() {
            [] => {
                let cause = LookupFailure::NoMatchingView {
                    matcher: self.matcher.describe(),
                };
                assertion
                    .check(None, Some(&cause))
                    .map_err(|failure| failure.with_hierarchy(self.root.dump()).into())
            }
            [node] => Ok(assertion.check(Some(*node), None)?),
            many => Err(ViewInteractionError::Ambiguous {
                matcher: self.matcher.describe(),
                count: many.len(),
            }),
        }
    }
}
