//! Repository capability and in-process implementations.

use std::fmt;

use crate::hero::SuperHero;

/// Error returned when the repository cannot produce heroes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing source could not be reached.
    Unavailable { reason: String },
    /// Fixture data could not be decoded.
    Corrupt { reason: String },
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "repository unavailable: {reason}"),
            Self::Corrupt { reason } => write!(f, "repository data is corrupt: {reason}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Source of superheroes, queried synchronously.
pub trait SuperHeroesRepository {
    /// Every hero, in the order the list should render them.
    fn get_all(&self) -> Result<Vec<SuperHero>, RepositoryError>;
}

impl<R: SuperHeroesRepository + ?Sized> SuperHeroesRepository for &R {
    fn get_all(&self) -> Result<Vec<SuperHero>, RepositoryError> {
        (**self).get_all()
    }
}

impl<R: SuperHeroesRepository + ?Sized> SuperHeroesRepository for Box<R> {
    fn get_all(&self) -> Result<Vec<SuperHero>, RepositoryError> {
        (**self).get_all()
    }
}

/// Repository returning a canned list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryRepository {
    heroes: Vec<SuperHero>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(heroes: Vec<SuperHero>) -> Self {
        Self { heroes }
    }

    /// Repository with no heroes at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a JSON array of heroes.
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|err| RepositoryError::Corrupt {
                reason: err.to_string(),
            })
    }

    #[must_use]
    pub fn heroes(&self) -> &[SuperHero] {
        &self.heroes
    }
}

impl SuperHeroesRepository for InMemoryRepository {
    fn get_all(&self) -> Result<Vec<SuperHero>, RepositoryError> {
        Ok(self.heroes.clone())
    }
}

/// Repository whose every query fails with the configured error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailingRepository {
    error: RepositoryError,
}

impl FailingRepository {
    #[must_use]
    pub fn new(error: RepositoryError) -> Self {
        Self { error }
    }

    /// Fails with [`RepositoryError::Unavailable`].
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(RepositoryError::Unavailable {
            reason: reason.into(),
        })
    }
}

impl SuperHeroesRepository for FailingRepository {
    fn get_all(&self) -> Result<Vec<SuperHero>, RepositoryError> {
        Err(self.error.clone())
    }
}
