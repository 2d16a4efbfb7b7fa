#![forbid(unsafe_code)]

//! Widgets for the superheroes screen.
//!
//! Rendering produces a tree of [`ViewNode`]s rather than terminal cells so
//! tests can query rows by id, text and visibility. The list is virtualized:
//! only the rows around the scroll offset are bound, and scroll requests are
//! settled over several layout passes.

pub mod adapter;
pub mod list;
pub mod node;
pub mod screen;

pub use adapter::{SuperHeroesAdapter, ids};
pub use list::{Adapter, ListConfig, ListStats, ListWidget, VirtualList};
pub use node::{NodeRef, ViewNode, Visibility, clip_to_width};
pub use screen::{MainScreen, SuperHeroesApp};
