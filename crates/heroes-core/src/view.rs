//! View capability implemented by the screen under test.

use crate::hero::SuperHero;

/// The three UI side effects the presenter can request.
pub trait SuperHeroesView {
    /// Show the "no heroes" placeholder.
    fn show_empty_case(&mut self);
    /// Hide the "no heroes" placeholder.
    fn hide_empty_case(&mut self);
    /// Replace the rendered list with `heroes`, in order.
    fn show_super_heroes(&mut self, heroes: &[SuperHero]);
}

impl<V: SuperHeroesView + ?Sized> SuperHeroesView for &mut V {
    fn show_empty_case(&mut self) {
        (**self).show_empty_case();
    }

    fn hide_empty_case(&mut self) {
        (**self).hide_empty_case();
    }

    fn show_super_heroes(&mut self, heroes: &[SuperHero]) {
        (**self).show_super_heroes(heroes);
    }
}

/// A single call observed by [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    ShowEmptyCase,
    HideEmptyCase,
    ShowSuperHeroes(Vec<SuperHero>),
}

/// View double that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    calls: Vec<ViewCall>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    /// Number of calls matching `call`.
    #[must_use]
    pub fn count(&self, call: &ViewCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Number of `show_super_heroes` calls regardless of payload.
    #[must_use]
    pub fn show_super_heroes_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ViewCall::ShowSuperHeroes(_)))
            .count()
    }
}

impl SuperHeroesView for RecordingView {
    fn show_empty_case(&mut self) {
        self.calls.push(ViewCall::ShowEmptyCase);
    }

    fn hide_empty_case(&mut self) {
        self.calls.push(ViewCall::HideEmptyCase);
    }

    fn show_super_heroes(&mut self, heroes: &[SuperHero]) {
        self.calls.push(ViewCall::ShowSuperHeroes(heroes.to_vec()));
    }
}
