//! Superhero domain item and fixture generators.

use serde::{Deserialize, Serialize};

/// A superhero record shown as a single list row.
///
/// Equality is structural; two heroes with the same fields are the same hero
/// as far as the list is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuperHero {
    name: String,
    photo_url: String,
    is_avenger: bool,
    description: String,
}

impl SuperHero {
    /// Create a new hero.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        photo_url: impl Into<String>,
        is_avenger: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            photo_url: photo_url.into(),
            is_avenger,
            description: description.into(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remote photo location.
    #[must_use]
    pub fn photo_url(&self) -> &str {
        &self.photo_url
    }

    /// Whether the hero belongs to the Avengers and gets the badge.
    #[must_use]
    pub fn is_avenger(&self) -> bool {
        self.is_avenger
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A placeholder hero outside the Avengers.
#[must_use]
pub fn any_super_hero() -> SuperHero {
    SuperHero::new("_", "_", false, "_")
}

/// A placeholder hero flagged as an Avenger.
#[must_use]
pub fn any_avenger() -> SuperHero {
    SuperHero::new("_", "_", true, "_")
}

/// `count` distinct non-Avenger heroes named `Hero 0`, `Hero 1`, ...
#[must_use]
pub fn super_heroes(count: usize) -> Vec<SuperHero> {
    (0..count)
        .map(|i| {
            SuperHero::new(
                format!("Hero {i}"),
                format!("https://heroes.example/{i}.jpg"),
                false,
                format!("Description of hero {i}"),
            )
        })
        .collect()
}

/// `count` distinct Avengers named `Avenger 0`, `Avenger 1`, ...
#[must_use]
pub fn avengers(count: usize) -> Vec<SuperHero> {
    (0..count)
        .map(|i| {
            SuperHero::new(
                format!("Avenger {i}"),
                format!("https://heroes.example/avenger-{i}.jpg"),
                true,
                format!("Description of avenger {i}"),
            )
        })
        .collect()
}
