#![forbid(unsafe_code)]

//! List-assertion harness.
//!
//! Binds an ordered sequence of expected items to the rows of a
//! [`ListWidget`](heroes_widgets::ListWidget) and runs a per-item check
//! against each row, scrolling rows into view and waiting for layout first.
//!
//! ```ignore
//! ListInteraction::on_list(screen.list_mut())
//!     .with_items(heroes)
//!     .check(|hero, row, cause| {
//!         matches(has_descendant(with_text(hero.name()))).check_row(row, cause)
//!     })?;
//! ```
//!
//! # Failure model
//!
//! - [`LookupFailure`]: a row could not be resolved. Handed to the check,
//!   which decides whether absence is acceptable.
//! - [`AssertionFailure`]: raised by the check. The first one stops the run
//!   and comes back as an [`InteractionError`] carrying the row index.

pub mod assertion;
pub mod config;
pub mod interaction;
pub mod logging;
pub mod matcher;
pub mod resolver;

pub use assertion::{AssertionFailure, ViewAssertion, does_not_exist, matches};
pub use config::{ConfigError, HarnessConfig};
pub use interaction::{
    CheckReport, InteractionError, ItemViewAssertion, ItemsInteraction, ListInteraction,
    RowOutcome, ViewInteraction, ViewInteractionError, on_view,
};
pub use logging::{RunLog, init_test_logging};
pub use matcher::{
    AllOf, HasDescendant, IsDisplayed, Matcher, Not, WithId, WithText, all_of, has_descendant,
    is_displayed, not, with_id, with_text,
};
pub use resolver::{LookupFailure, RowResolver, RowView, SyncReport};
