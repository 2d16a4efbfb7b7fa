//! Main superheroes screen and its explicit composition with a presenter.

use heroes_core::{
    PresenterState, RepositoryError, SuperHero, SuperHeroesPresenter, SuperHeroesRepository,
    SuperHeroesView,
};

use crate::adapter::{SuperHeroesAdapter, ids};
use crate::list::{ListConfig, VirtualList};
use crate::node::{ViewNode, Visibility, clip_to_width};

/// The screen that lists superheroes or shows a placeholder when there are none.
#[derive(Debug)]
pub struct MainScreen {
    empty_case: Visibility,
    list: VirtualList<SuperHeroesAdapter>,
}

impl MainScreen {
    /// Placeholder shown when the repository has no heroes.
    pub const EMPTY_CASE_TEXT: &'static str = "¯\\_(ツ)_/¯";

    #[must_use]
    pub fn new(config: ListConfig) -> Self {
        Self {
            empty_case: Visibility::Gone,
            list: VirtualList::new(ids::RECYCLER_VIEW, SuperHeroesAdapter::new(), config),
        }
    }

    #[must_use]
    pub fn is_empty_case_visible(&self) -> bool {
        self.empty_case == Visibility::Visible
    }

    #[must_use]
    pub fn list(&self) -> &VirtualList<SuperHeroesAdapter> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList<SuperHeroesAdapter> {
        &mut self.list
    }

    /// Root of the rendered hierarchy.
    #[must_use]
    pub fn root(&self) -> ViewNode {
        ViewNode::with_id("main_screen")
            .child(
                ViewNode::with_id(ids::EMPTY_CASE)
                    .text(Self::EMPTY_CASE_TEXT)
                    .visibility(self.empty_case),
            )
            .child(self.list.to_node())
    }

    /// Screen contents as text lines.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.is_empty_case_visible() {
            lines.push(clip_to_width(
                Self::EMPTY_CASE_TEXT,
                self.list.config().width,
            ));
        }
        lines.extend(self.list.render_lines());
        lines
    }
}

impl Default for MainScreen {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}

impl SuperHeroesView for MainScreen {
    fn show_empty_case(&mut self) {
        self.empty_case = Visibility::Visible;
        // Rows from an earlier entry must not outlive the branch switch.
        self.list.adapter_mut().set_all(&[]);
        self.list.set_visibility(Visibility::Gone);
    }

    fn hide_empty_case(&mut self) {
        self.empty_case = Visibility::Gone;
        self.list.set_visibility(Visibility::Visible);
    }

    fn show_super_heroes(&mut self, heroes: &[SuperHero]) {
        tracing::debug!(message = "screen.show_super_heroes", hero_count = heroes.len());
        self.list.adapter_mut().set_all(heroes);
        self.list.set_visibility(Visibility::Visible);
    }
}

/// A presenter and the screen it drives, wired by hand.
#[derive(Debug)]
pub struct SuperHeroesApp<R> {
    presenter: SuperHeroesPresenter<R>,
    screen: MainScreen,
}

impl<R: SuperHeroesRepository> SuperHeroesApp<R> {
    #[must_use]
    pub fn new(repository: R, config: ListConfig) -> Self {
        Self {
            presenter: SuperHeroesPresenter::new(repository),
            screen: MainScreen::new(config),
        }
    }

    /// Enter the screen: the presenter queries the repository and updates the
    /// view. The list lays itself out on later passes.
    pub fn start(&mut self) -> Result<PresenterState, RepositoryError> {
        self.presenter.on_enter(&mut self.screen)
    }

    #[must_use]
    pub fn presenter(&self) -> &SuperHeroesPresenter<R> {
        &self.presenter
    }

    #[must_use]
    pub fn screen(&self) -> &MainScreen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut MainScreen {
        &mut self.screen
    }
}
