//! Row resolution for virtualized lists.
//!
//! A row is resolved in two phases:
//!
//! 1. [`RowResolver::force_visible`] asks the list to scroll the index on
//!    screen and runs layout passes until the list is idle. This is the only
//!    point where the caller waits.
//! 2. [`RowResolver::fetch`] reads the bound row and snapshots it.
//!
//! Neither phase raises on a missing row. Failures come back as
//! [`LookupFailure`] so the per-item check can decide what absence means.

use std::fmt;
use std::ops::Range;

use heroes_widgets::{ListWidget, NodeRef, ViewNode};

use crate::config::HarnessConfig;

/// Prefix for row checksums in logs.
const CHECKSUM_PREFIX: &str = "blake3:";

/// A row could not be resolved. Recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// The index is past the end of the adapter.
    OutOfRange { index: usize, item_count: usize },
    /// The list went idle but the row is not bound.
    NotMaterialized { index: usize, visible: Range<usize> },
    /// The list was still laying out after the pass budget ran out.
    LayoutTimedOut { index: usize, passes: usize },
    /// No node in a hierarchy matched the lookup matcher.
    NoMatchingView { matcher: String },
}

impl LookupFailure {
    /// Row index the failure refers to, when it refers to one.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::OutOfRange { index, .. }
            | Self::NotMaterialized { index, .. }
            | Self::LayoutTimedOut { index, .. } => Some(*index),
            Self::NoMatchingView { .. } => None,
        }
    }
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, item_count } => {
                write!(f, "row {index} is out of range (item count {item_count})")
            }
            Self::NotMaterialized { index, visible } => write!(
                f,
                "row {index} is not laid out (visible rows {}..{})",
                visible.start, visible.end
            ),
            Self::LayoutTimedOut { index, passes } => {
                write!(f, "row {index}: list still busy after {passes} layout passes")
            }
            Self::NoMatchingView { matcher } => {
                write!(f, "no views in hierarchy found matching: {matcher}")
            }
        }
    }
}

impl std::error::Error for LookupFailure {}

/// Outcome of the force-visible phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub index: usize,
    /// Layout passes run before the list went idle.
    pub passes: usize,
    pub visible: Range<usize>,
}

/// Read-only snapshot of a resolved row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    index: usize,
    node: ViewNode,
    displayed: bool,
    checksum: String,
}

impl RowView {
    #[must_use]
    pub fn new(index: usize, node: ViewNode, displayed: bool) -> Self {
        let checksum = row_checksum(&node, displayed);
        Self {
            index,
            node,
            displayed,
            checksum,
        }
    }

    /// Adapter position of this row.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn node(&self) -> &ViewNode {
        &self.node
    }

    /// True when the row is inside the visible range.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// Root reference for matchers.
    #[must_use]
    pub fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::new(&self.node, self.displayed)
    }

    /// Content checksum; equal rows give equal checksums.
    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.checksum
    }
}

fn row_checksum(node: &ViewNode, displayed: bool) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(node.dump().as_bytes());
    hasher.update(&[u8::from(displayed)]);
    format!("{CHECKSUM_PREFIX}{}", hasher.finalize().to_hex())
}

/// Resolves list rows by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowResolver {
    max_layout_passes: usize,
}

impl Default for RowResolver {
    fn default() -> Self {
        Self::from_config(&HarnessConfig::default())
    }
}

impl RowResolver {
    #[must_use]
    pub fn new(max_layout_passes: usize) -> Self {
        Self { max_layout_passes }
    }

    #[must_use]
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.max_layout_passes)
    }

    #[must_use]
    pub fn max_layout_passes(&self) -> usize {
        self.max_layout_passes
    }

    /// Bring `index` into the laid-out range and wait for the list to idle.
    pub fn force_visible<L>(&self, list: &mut L, index: usize) -> Result<SyncReport, LookupFailure>
    where
        L: ListWidget + ?Sized,
    {
        let item_count = list.item_count();
        if index >= item_count {
            return Err(LookupFailure::OutOfRange { index, item_count });
        }

        list.request_scroll_to(index);
        let mut passes = 0;
        while !list.is_idle() {
            if passes >= self.max_layout_passes {
                tracing::debug!(message = "row_resolver.timeout", index, passes);
                return Err(LookupFailure::LayoutTimedOut { index, passes });
            }
            list.layout_pass();
            passes += 1;
        }

        Ok(SyncReport {
            index,
            passes,
            visible: list.visible_range(),
        })
    }

    /// Snapshot the row at `index` without scrolling.
    pub fn fetch<L>(&self, list: &L, index: usize) -> Result<RowView, LookupFailure>
    where
        L: ListWidget + ?Sized,
    {
        let visible = list.visible_range();
        match list.row(index) {
            Some(node) => Ok(RowView::new(index, node.clone(), visible.contains(&index))),
            None => Err(LookupFailure::NotMaterialized { index, visible }),
        }
    }

    /// Force the row on screen, then fetch it.
    pub fn resolve<L>(&self, list: &mut L, index: usize) -> Result<RowView, LookupFailure>
    where
        L: ListWidget + ?Sized,
    {
        self.resolve_counted(list, index).0
    }

    /// [`resolve`](Self::resolve), also returning the layout passes spent
    /// waiting for the list, whether or not the row was found.
    pub fn resolve_counted<L>(
        &self,
        list: &mut L,
        index: usize,
    ) -> (Result<RowView, LookupFailure>, usize)
    where
        L: ListWidget + ?Sized,
    {
        let span = tracing::debug_span!(
            "row_resolver.resolve",
            index,
            passes = tracing::field::Empty,
            found = tracing::field::Empty
        );
        let _guard = span.enter();

        let (result, passes) = match self.force_visible(list, index) {
            Ok(report) => (self.fetch(list, index), report.passes),
            Err(failure) => {
                let passes = match &failure {
                    LookupFailure::LayoutTimedOut { passes, .. } => *passes,
                    _ => 0,
                };
                (Err(failure), passes)
            }
        };
        span.record("passes", passes);
        span.record("found", result.is_ok());
        (result, passes)
    }
}
