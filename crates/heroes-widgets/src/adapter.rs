//! Row adapter for superheroes.

use heroes_core::SuperHero;

use crate::list::Adapter;
use crate::node::{ViewNode, Visibility};

/// Stable view ids used by the screen and by tests.
pub mod ids {
    pub const RECYCLER_VIEW: &str = "recycler_view";
    pub const EMPTY_CASE: &str = "tv_empty_case";
    pub const SUPER_HERO_ROW: &str = "super_hero_row";
    pub const SUPER_HERO_PHOTO: &str = "iv_super_hero_photo";
    pub const SUPER_HERO_NAME: &str = "tv_super_hero_name";
    pub const AVENGERS_BADGE: &str = "iv_avengers_badge";
}

/// Binds one [`SuperHero`] per row.
#[derive(Debug, Clone, Default)]
pub struct SuperHeroesAdapter {
    heroes: Vec<SuperHero>,
}

impl SuperHeroesAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the adapter contents.
    pub fn set_all(&mut self, heroes: &[SuperHero]) {
        self.heroes = heroes.to_vec();
    }

    #[must_use]
    pub fn heroes(&self) -> &[SuperHero] {
        &self.heroes
    }
}

impl Adapter for SuperHeroesAdapter {
    fn item_count(&self) -> usize {
        self.heroes.len()
    }

    fn bind_row(&self, position: usize) -> ViewNode {
        let hero = &self.heroes[position];
        let badge = if hero.is_avenger() {
            Visibility::Visible
        } else {
            Visibility::Gone
        };
        ViewNode::with_id(ids::SUPER_HERO_ROW)
            .child(ViewNode::with_id(ids::SUPER_HERO_PHOTO))
            .child(ViewNode::with_id(ids::SUPER_HERO_NAME).text(hero.name()))
            .child(
                ViewNode::with_id(ids::AVENGERS_BADGE)
                    .text("[A]")
                    .visibility(badge),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heroes_core::{any_avenger, any_super_hero};

    fn child<'a>(row: &'a ViewNode, id: &str) -> &'a ViewNode {
        row.children()
            .iter()
            .find(|c| c.id() == Some(id))
            .expect("child present")
    }

    #[test]
    fn row_shows_name() {
        let mut adapter = SuperHeroesAdapter::new();
        adapter.set_all(&[SuperHero::new("Iron Man", "url", true, "d")]);
        let row = adapter.bind_row(0);
        assert_eq!(row.id(), Some(ids::SUPER_HERO_ROW));
        assert_eq!(child(&row, ids::SUPER_HERO_NAME).text_content(), Some("Iron Man"));
    }

    #[test]
    fn badge_is_gone_for_non_avengers() {
        let mut adapter = SuperHeroesAdapter::new();
        adapter.set_all(&[any_super_hero(), any_avenger()]);
        assert!(!child(&adapter.bind_row(0), ids::AVENGERS_BADGE).is_visible());
        assert!(child(&adapter.bind_row(1), ids::AVENGERS_BADGE).is_visible());
    }

    #[test]
    fn set_all_replaces_contents() {
        let mut adapter = SuperHeroesAdapter::new();
        adapter.set_all(&[any_super_hero(), any_super_hero()]);
        adapter.set_all(&[any_avenger()]);
        assert_eq!(adapter.item_count(), 1);
        assert_eq!(adapter.heroes(), [any_avenger()]);
    }
}
