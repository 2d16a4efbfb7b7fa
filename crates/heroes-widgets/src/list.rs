#![forbid(unsafe_code)]

//! Virtualized list widget.
//!
//! Only rows inside `[offset - overscan, offset + viewport_rows + overscan)`
//! are bound. Scroll requests are not applied immediately: each
//! [`VirtualList::layout_pass`] moves the offset at most `scroll_step` rows
//! toward the requested target, so callers that need a row on screen must
//! keep running passes until the list reports idle.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::node::{ViewNode, Visibility, clip_to_width};

/// Supplies rows to a [`VirtualList`].
pub trait Adapter {
    /// Number of items the list can show.
    fn item_count(&self) -> usize;

    /// Build the row subtree for `position`. Only called with
    /// `position < item_count()`.
    fn bind_row(&self, position: usize) -> ViewNode;
}

/// The operations a scrollable, lazily materialized list exposes to tests.
pub trait ListWidget {
    /// Current adapter item count.
    fn item_count(&self) -> usize;

    /// Ask the list to bring `index` on screen. Takes effect over later
    /// layout passes.
    fn request_scroll_to(&mut self, index: usize);

    /// Run one layout pass. Returns true when the list is idle afterwards.
    fn layout_pass(&mut self) -> bool;

    /// True when no scroll or rebind is pending.
    fn is_idle(&self) -> bool;

    /// Adapter positions currently on screen.
    fn visible_range(&self) -> Range<usize>;

    /// The bound row at `index`, if it is materialized.
    fn row(&self, index: usize) -> Option<&ViewNode>;
}

/// Geometry and scrolling behavior for a [`VirtualList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    /// Rows that fit on screen at once.
    pub viewport_rows: usize,
    /// Extra rows bound above and below the viewport.
    pub overscan: usize,
    /// Maximum rows scrolled per layout pass. `0` jumps straight to the target.
    pub scroll_step: usize,
    /// Columns available when rendering rows as text.
    pub width: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            viewport_rows: 5,
            overscan: 1,
            scroll_step: 3,
            width: 40,
        }
    }
}

impl ListConfig {
    #[must_use]
    pub fn with_viewport_rows(mut self, rows: usize) -> Self {
        self.viewport_rows = rows;
        self
    }

    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    #[must_use]
    pub fn with_scroll_step(mut self, step: usize) -> Self {
        self.scroll_step = step;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Counters exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListStats {
    pub layout_passes: u64,
    pub rows_bound: u64,
    pub rows_recycled: u64,
}

/// A list that binds rows lazily around its scroll offset.
#[derive(Debug)]
pub struct VirtualList<A> {
    id: &'static str,
    adapter: A,
    config: ListConfig,
    visibility: Visibility,
    /// First visible adapter position.
    offset: usize,
    /// Offset the list is scrolling toward.
    target: Option<usize>,
    rows: BTreeMap<usize, ViewNode>,
    needs_layout: bool,
    data_changed: bool,
    stats: ListStats,
}

impl<A: Adapter> VirtualList<A> {
    #[must_use]
    pub fn new(id: &'static str, adapter: A, config: ListConfig) -> Self {
        Self {
            id,
            adapter,
            config,
            visibility: Visibility::Visible,
            offset: 0,
            target: None,
            rows: BTreeMap::new(),
            needs_layout: true,
            data_changed: true,
            stats: ListStats::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable adapter access. Every bound row is invalidated.
    pub fn adapter_mut(&mut self) -> &mut A {
        self.notify_data_set_changed();
        &mut self.adapter
    }

    /// Drop every bound row and rebind on the next layout pass.
    pub fn notify_data_set_changed(&mut self) {
        self.data_changed = true;
        self.needs_layout = true;
    }

    #[must_use]
    pub fn config(&self) -> ListConfig {
        self.config
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn stats(&self) -> ListStats {
        self.stats
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    /// Positions currently bound, including overscan.
    pub fn bound_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    fn max_offset(&self) -> usize {
        self.adapter
            .item_count()
            .saturating_sub(self.config.viewport_rows.max(1))
    }

    fn bound_window(&self) -> Range<usize> {
        let count = self.adapter.item_count();
        let start = self.offset.saturating_sub(self.config.overscan);
        let end = self
            .offset
            .saturating_add(self.config.viewport_rows)
            .saturating_add(self.config.overscan)
            .min(count);
        start.min(end)..end
    }

    /// Run layout passes until idle or `max_passes` is reached.
    /// Returns true when the list settled.
    pub fn settle(&mut self, max_passes: usize) -> bool {
        let mut passes = 0;
        while !self.is_idle() {
            if passes >= max_passes {
                return false;
            }
            self.layout_pass();
            passes += 1;
        }
        true
    }

    /// Node for the list and the rows on screen.
    #[must_use]
    pub fn to_node(&self) -> ViewNode {
        let visible = self.visible_range();
        ViewNode::with_id(self.id)
            .visibility(self.visibility)
            .children_from(
                self.rows
                    .range(visible)
                    .map(|(_, row)| row.clone()),
            )
    }

    /// On-screen rows as text, clipped to the configured width.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        if self.visibility == Visibility::Gone {
            return Vec::new();
        }
        self.rows
            .range(self.visible_range())
            .map(|(_, row)| clip_to_width(&row.display_text(), self.config.width))
            .collect()
    }
}

impl<A: Adapter> ListWidget for VirtualList<A> {
    fn item_count(&self) -> usize {
        self.adapter.item_count()
    }

    fn request_scroll_to(&mut self, index: usize) {
        let count = self.adapter.item_count();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        // Compare against the offset the list is already heading to.
        let base = self.target.unwrap_or(self.offset);
        let rows = self.config.viewport_rows.max(1);
        let wanted = if index < base {
            index
        } else if index >= base + rows {
            index + 1 - rows
        } else {
            base
        };
        if wanted != self.offset {
            self.target = Some(wanted.min(self.max_offset()));
            self.needs_layout = true;
        } else {
            self.target = None;
        }
        tracing::trace!(
            message = "list.scroll_request",
            list = self.id,
            index,
            offset = self.offset,
            scroll_target = ?self.target
        );
    }

    fn layout_pass(&mut self) -> bool {
        let span = tracing::debug_span!(
            "list.layout",
            list = self.id,
            total_items = self.adapter.item_count(),
            offset = tracing::field::Empty,
            bound_rows = tracing::field::Empty
        );
        let _guard = span.enter();
        self.stats.layout_passes += 1;

        if self.data_changed {
            self.stats.rows_recycled += self.rows.len() as u64;
            self.rows.clear();
            self.data_changed = false;
        }
        self.offset = self.offset.min(self.max_offset());

        if let Some(target) = self.target {
            let target = target.min(self.max_offset());
            let step = match self.config.scroll_step {
                0 => usize::MAX,
                step => step,
            };
            self.offset = if target > self.offset {
                self.offset.saturating_add(step).min(target)
            } else {
                self.offset.saturating_sub(step).max(target)
            };
            if self.offset == target {
                self.target = None;
            }
        }

        let window = self.bound_window();
        let before = self.rows.len();
        self.rows.retain(|position, _| window.contains(position));
        self.stats.rows_recycled += (before - self.rows.len()) as u64;
        for position in window {
            if !self.rows.contains_key(&position) {
                self.rows.insert(position, self.adapter.bind_row(position));
                self.stats.rows_bound += 1;
            }
        }

        self.needs_layout = self.target.is_some();
        span.record("offset", self.offset);
        span.record("bound_rows", self.rows.len());
        !self.needs_layout
    }

    fn is_idle(&self) -> bool {
        !self.needs_layout
    }

    fn visible_range(&self) -> Range<usize> {
        let count = self.adapter.item_count();
        let start = self.offset.min(count);
        start..self.offset.saturating_add(self.config.viewport_rows).min(count)
    }

    fn row(&self, index: usize) -> Option<&ViewNode> {
        self.rows.get(&index)
    }
}
