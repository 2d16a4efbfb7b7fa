#![forbid(unsafe_code)]

//! End-to-end checks of the superheroes screen through the list harness.
//!
//! Each test wires a canned repository into the app by hand, enters the
//! screen, and then inspects the rendered hierarchy:
//!
//! - Empty repository shows the placeholder
//! - Populated repository hides the placeholder and shows names
//! - Every row shows its hero's name, scrolling off-screen rows into view
//! - Avenger rows show the badge, other rows never do
//!
//! Run: `cargo test -p heroes-harness --test main_screen_e2e`

use heroes_core::{
    InMemoryRepository, PresenterState, SuperHero, any_super_hero, avengers, super_heroes,
};
use heroes_harness::{
    HarnessConfig, ListInteraction, LookupFailure, all_of, has_descendant, init_test_logging,
    is_displayed, matches, not, on_view, with_id, with_text,
};
use heroes_widgets::{ListConfig, ListWidget, MainScreen, SuperHeroesApp, ids};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn config() -> ListConfig {
    ListConfig::default()
        .with_viewport_rows(4)
        .with_overscan(1)
        .with_scroll_step(2)
}

fn start_app(heroes: Vec<SuperHero>) -> SuperHeroesApp<InMemoryRepository> {
    init_test_logging();
    let mut app = SuperHeroesApp::new(InMemoryRepository::new(heroes), config());
    app.start().expect("in-memory repository never fails");
    assert!(app.screen_mut().list_mut().settle(16), "initial layout settles");
    app
}

fn empty_case_text() -> &'static str {
    MainScreen::EMPTY_CASE_TEXT
}

fn shown_badge() -> impl heroes_harness::Matcher {
    all_of(vec![
        Box::new(with_id(ids::AVENGERS_BADGE)),
        Box::new(is_displayed()),
    ])
}

// ===========================================================================
// Empty case
// ===========================================================================

#[test]
fn shows_empty_case_if_there_are_no_super_heroes() {
    let app = start_app(Vec::new());

    assert_eq!(app.presenter().state(), PresenterState::Empty);
    let root = app.screen().root();
    on_view(&root, with_text(empty_case_text()))
        .check(matches(is_displayed()))
        .unwrap();
    on_view(&root, with_id(ids::RECYCLER_VIEW))
        .check(matches(not(is_displayed())))
        .unwrap();
    on_view(&root, with_id(ids::RECYCLER_VIEW))
        .check(matches(not(has_descendant(with_id(ids::SUPER_HERO_ROW)))))
        .unwrap();
}

#[test]
fn does_not_show_empty_case_if_there_are_super_heroes() {
    let app = start_app(vec![any_super_hero()]);

    let root = app.screen().root();
    on_view(&root, with_text(empty_case_text()))
        .check(matches(not(is_displayed())))
        .unwrap();
    on_view(&root, with_id(ids::RECYCLER_VIEW))
        .check(matches(is_displayed()))
        .unwrap();
}

// ===========================================================================
// Names
// ===========================================================================

#[test]
fn shows_name_if_there_are_super_heroes() {
    let hero = SuperHero::new("Scarlet Witch", "https://heroes.example/sw.jpg", true, "Wanda");
    let app = start_app(vec![hero.clone()]);

    // Exactly one node carries the name, otherwise on_view is ambiguous.
    let root = app.screen().root();
    on_view(&root, with_text(hero.name()))
        .check(matches(is_displayed()))
        .unwrap();
}

#[test]
fn shows_super_heroes_names_if_there_are_super_heroes() {
    let heroes = super_heroes(10);
    let mut app = start_app(heroes.clone());

    let report = ListInteraction::on_list(app.screen_mut().list_mut())
        .with_items(heroes)
        .check(|hero, row, cause| {
            matches(has_descendant(with_text(hero.name()))).check_row(row, cause)
        })
        .unwrap();

    assert_eq!(report.checked(), 10);
    assert_eq!(report.unresolved(), 0);
}

#[test]
fn rows_are_on_screen_when_checked() {
    let heroes = super_heroes(12);
    let mut app = start_app(heroes.clone());

    ListInteraction::on_list(app.screen_mut().list_mut())
        .with_items(heroes)
        .check(|hero, row, cause| {
            matches(all_of(vec![
                Box::new(is_displayed()),
                Box::new(has_descendant(all_of(vec![
                    Box::new(with_id(ids::SUPER_HERO_NAME)),
                    Box::new(with_text(hero.name())),
                    Box::new(is_displayed()),
                ]))),
            ]))
            .check_row(row, cause)
        })
        .unwrap();

    // The walk ends with the last page on screen.
    assert_eq!(app.screen().list().visible_range(), 8..12);
}

// ===========================================================================
// Avengers badge
// ===========================================================================

#[test]
fn shows_super_heroes_badge_if_there_are_super_heroes_from_avengers() {
    let heroes = avengers(10);
    let mut app = start_app(heroes.clone());

    ListInteraction::on_list(app.screen_mut().list_mut())
        .with_items(heroes)
        .check(|_, row, cause| matches(has_descendant(shown_badge())).check_row(row, cause))
        .unwrap();
}

#[test]
fn does_not_show_badge_for_super_heroes_outside_avengers() {
    let heroes = super_heroes(10);
    let mut app = start_app(heroes.clone());

    ListInteraction::on_list(app.screen_mut().list_mut())
        .with_items(heroes)
        .check(|hero, row, cause| {
            matches(has_descendant(with_text(hero.name()))).check_row(row, cause)?;
            matches(not(has_descendant(shown_badge()))).check_row(row, cause)
        })
        .unwrap();
}

#[test]
fn badge_follows_each_hero_in_a_mixed_list() {
    let mut heroes = super_heroes(3);
    heroes.extend(avengers(3));
    heroes.swap(1, 4);
    let mut app = start_app(heroes.clone());

    ListInteraction::on_list(app.screen_mut().list_mut())
        .with_items(heroes)
        .check(|hero, row, cause| {
            if hero.is_avenger() {
                matches(has_descendant(shown_badge())).check_row(row, cause)
            } else {
                matches(not(has_descendant(shown_badge()))).check_row(row, cause)
            }
        })
        .unwrap();
}

// ===========================================================================
// Failure reporting
// ===========================================================================

#[test]
fn longer_expected_sequence_fails_past_the_rendered_rows() {
    let heroes = super_heroes(2);
    let mut app = start_app(heroes[..1].to_vec());
    let mut checked = Vec::new();

    let err = ListInteraction::on_list(app.screen_mut().list_mut())
        .with_items(heroes)
        .check(|hero, row, cause| {
            checked.push(hero.name().to_string());
            matches(has_descendant(with_text(hero.name()))).check_row(row, cause)
        })
        .unwrap_err();

    assert_eq!(err.index, 1);
    assert!(err.report.outcomes()[0].passed);
    assert_eq!(checked, ["Hero 0", "Hero 1"]);
    assert_eq!(
        err.failure.cause(),
        Some(&LookupFailure::OutOfRange {
            index: 1,
            item_count: 1
        })
    );
}

#[test]
fn wrong_order_fails_at_first_mismatch_with_hierarchy() {
    let heroes = super_heroes(3);
    let mut app = start_app(heroes.clone());
    let reversed: Vec<_> = heroes.into_iter().rev().collect();

    let err = ListInteraction::on_list(app.screen_mut().list_mut())
        .with_items(reversed)
        .check(|hero, row, cause| {
            matches(has_descendant(with_text(hero.name()))).check_row(row, cause)
        })
        .unwrap_err();

    assert_eq!(err.index, 0);
    let hierarchy = err.failure.hierarchy().expect("mismatch includes hierarchy");
    assert!(hierarchy.contains("text=\"Hero 0\""));
}

#[test]
fn tight_layout_budget_surfaces_timeouts_to_the_check() {
    let heroes = super_heroes(40);
    let mut app = start_app(heroes.clone());

    let err = ListInteraction::on_list(app.screen_mut().list_mut())
        .with_config(HarnessConfig::default().with_max_layout_passes(0))
        .with_items(heroes)
        .check(|hero, row, cause| {
            matches(has_descendant(with_text(hero.name()))).check_row(row, cause)
        })
        .unwrap_err();

    // Rows 0..4 are on screen already; row 4 needs a scroll.
    assert_eq!(err.index, 4);
    assert_eq!(
        err.failure.cause(),
        Some(&LookupFailure::LayoutTimedOut { index: 4, passes: 0 })
    );
}
