#![forbid(unsafe_code)]

//! Core types for the superheroes list.
//!
//! # Key Components
//!
//! - [`SuperHero`] - The domain item rendered as one list row
//! - [`SuperHeroesRepository`] - Capability trait for fetching heroes
//! - [`SuperHeroesView`] - Capability trait implemented by the screen
//! - [`SuperHeroesPresenter`] - Chooses the empty or populated branch on lifecycle entry
//!
//! Test doubles ([`InMemoryRepository`], [`FailingRepository`],
//! [`RecordingView`]) are plain implementations of the same traits and are
//! injected by constructor.

pub mod hero;
pub mod presenter;
pub mod repository;
pub mod view;

pub use hero::{SuperHero, any_avenger, any_super_hero, avengers, super_heroes};
pub use presenter::{PresenterState, SuperHeroesPresenter};
pub use repository::{
    FailingRepository, InMemoryRepository, RepositoryError, SuperHeroesRepository,
};
pub use view::{RecordingView, SuperHeroesView, ViewCall};
