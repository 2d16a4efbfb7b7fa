//! Presenter for the superheroes screen.
//!
//! On every lifecycle entry the presenter moves through a tiny state machine:
//!
//! ```text
//! Loading ──get_all() == []──▶ Empty      (show_empty_case)
//!    │
//!    └────get_all() == n>0───▶ Populated  (hide_empty_case, show_super_heroes)
//! ```
//!
//! A failed query lands in `Empty` as well: the placeholder is shown and the
//! error is handed back to the caller.

use crate::repository::{RepositoryError, SuperHeroesRepository};
use crate::view::SuperHeroesView;

/// Where the presenter is within one lifecycle entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenterState {
    #[default]
    Loading,
    Empty,
    /// The list shows this many heroes.
    Populated(usize),
}

/// Mediates between a repository and a view.
#[derive(Debug)]
pub struct SuperHeroesPresenter<R> {
    repository: R,
    state: PresenterState,
}

impl<R: SuperHeroesRepository> SuperHeroesPresenter<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            state: PresenterState::Loading,
        }
    }

    /// Current state. `Loading` until the first lifecycle entry completes.
    #[must_use]
    pub fn state(&self) -> PresenterState {
        self.state
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Handle a lifecycle entry: query the repository and drive exactly one
    /// branch of the view contract.
    pub fn on_enter<V>(&mut self, view: &mut V) -> Result<PresenterState, RepositoryError>
    where
        V: SuperHeroesView + ?Sized,
    {
        let _span = tracing::debug_span!("presenter.on_enter").entered();
        self.state = PresenterState::Loading;

        let heroes = match self.repository.get_all() {
            Ok(heroes) => heroes,
            Err(err) => {
                tracing::warn!(message = "presenter.query_failed", error = %err);
                self.state = PresenterState::Empty;
                view.show_empty_case();
                return Err(err);
            }
        };

        self.state = if heroes.is_empty() {
            view.show_empty_case();
            PresenterState::Empty
        } else {
            view.hide_empty_case();
            view.show_super_heroes(&heroes);
            PresenterState::Populated(heroes.len())
        };
        tracing::debug!(
            message = "presenter.transition",
            state = ?self.state,
            hero_count = heroes.len()
        );
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::{SuperHero, any_super_hero, avengers, super_heroes};
    use crate::repository::{FailingRepository, InMemoryRepository};
    use crate::view::{RecordingView, ViewCall};
    use proptest::prelude::*;

    #[test]
    fn starts_loading() {
        let presenter = SuperHeroesPresenter::new(InMemoryRepository::empty());
        assert_eq!(presenter.state(), PresenterState::Loading);
    }

    #[test]
    fn empty_repository_shows_empty_case_only() {
        let mut presenter = SuperHeroesPresenter::new(InMemoryRepository::empty());
        let mut view = RecordingView::new();

        let state = presenter.on_enter(&mut view).unwrap();

        assert_eq!(state, PresenterState::Empty);
        assert_eq!(view.calls(), [ViewCall::ShowEmptyCase]);
        assert_eq!(view.show_super_heroes_count(), 0);
    }

    #[test]
    fn populated_repository_hides_empty_case_before_showing_heroes() {
        let heroes = vec![any_super_hero()];
        let mut presenter = SuperHeroesPresenter::new(InMemoryRepository::new(heroes.clone()));
        let mut view = RecordingView::new();

        let state = presenter.on_enter(&mut view).unwrap();

        assert_eq!(state, PresenterState::Populated(1));
        assert_eq!(
            view.calls(),
            [ViewCall::HideEmptyCase, ViewCall::ShowSuperHeroes(heroes)]
        );
    }

    #[test]
    fn failed_query_falls_back_to_empty_case() {
        let mut presenter = SuperHeroesPresenter::new(FailingRepository::unavailable("offline"));
        let mut view = RecordingView::new();

        let err = presenter.on_enter(&mut view).unwrap_err();

        assert!(matches!(err, RepositoryError::Unavailable { .. }));
        assert_eq!(presenter.state(), PresenterState::Empty);
        assert_eq!(view.calls(), [ViewCall::ShowEmptyCase]);
    }

    #[test]
    fn each_entry_runs_a_fresh_query() {
        let mut presenter = SuperHeroesPresenter::new(InMemoryRepository::new(avengers(2)));
        let mut view = RecordingView::new();

        presenter.on_enter(&mut view).unwrap();
        presenter.on_enter(&mut view).unwrap();

        assert_eq!(view.count(&ViewCall::HideEmptyCase), 2);
        assert_eq!(view.show_super_heroes_count(), 2);
    }

    proptest! {
        #[test]
        fn populated_branch_preserves_sequence(len in 0usize..40) {
            let heroes: Vec<SuperHero> = super_heroes(len);
            let mut presenter = SuperHeroesPresenter::new(InMemoryRepository::new(heroes.clone()));
            let mut view = RecordingView::new();

            let state = presenter.on_enter(&mut view).unwrap();

            if len == 0 {
                prop_assert_eq!(state, PresenterState::Empty);
                prop_assert_eq!(view.count(&ViewCall::ShowEmptyCase), 1);
                prop_assert_eq!(view.show_super_heroes_count(), 0);
            } else {
                prop_assert_eq!(state, PresenterState::Populated(len));
                prop_assert_eq!(
                    view.calls(),
                    &[ViewCall::HideEmptyCase, ViewCall::ShowSuperHeroes(heroes)][..]
                );
            }
        }
    }
}
