use crate::domain::repositories::{ActorRepository, MovieRepository};
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Referential integrity rules between actors, movies, and playlists.
///
/// Two asymmetric behaviors, both deliberate: a missing actor id rejects the
/// whole movie write with `InvalidReference`, while a missing movie id in a
/// playlist is silently dropped.
///
/// Cascade sequences here are load/edit/persist per movie with no locking;
/// two concurrent releases touching the same movie can lose an update. A
/// store with per-entity versioning at the repository seam would close that
/// race.
pub struct IntegrityChecker {
    actor_repo: Arc<dyn ActorRepository>,
    movie_repo: Arc<dyn MovieRepository>,
}

impl IntegrityChecker {
    pub fn new(actor_repo: Arc<dyn ActorRepository>, movie_repo: Arc<dyn MovieRepository>) -> Self {
        Self {
            actor_repo,
            movie_repo,
        }
    }

    /// Validate that every referenced actor exists right now. Any missing id
    /// fails the whole write; the caller must not have persisted anything yet.
    pub async fn check_actor_refs(&self, actor_ids: &[i32]) -> AppResult<()> {
        for &id in actor_ids {
            if self.actor_repo.get_by_id(id).await?.is_none() {
                error!("Referenced actor ID={} does not exist", id);
                return Err(AppError::InvalidReference(format!(
                    "Actor {} does not exist",
                    id
                )));
            }
        }
        Ok(())
    }

    /// Apply the deletion policy for one actor and detach it from movies if
    /// cascading is allowed.
    ///
    /// Returns the ids of movies that were edited and persisted (each exactly
    /// once, in store-iteration order); empty when the actor is unused. With
    /// cascading disabled, a used actor fails with `DeletionBlocked` and
    /// nothing is touched.
    pub async fn release_actor(&self, actor_id: i32, allow_cascade: bool) -> AppResult<Vec<i32>> {
        let movies = self.movie_repo.get_all().await?;
        let referencing: Vec<_> = movies
            .into_iter()
            .filter(|m| m.actor_ids.contains(&actor_id))
            .collect();

        if referencing.is_empty() {
            return Ok(Vec::new());
        }

        if !allow_cascade {
            warn!(
                "Actor ID={} is referenced by {} movie(s), deletion blocked by configuration",
                actor_id,
                referencing.len()
            );
            return Err(AppError::DeletionBlocked(format!(
                "Actor {} is referenced by movies and cascade delete is disabled",
                actor_id
            )));
        }

        info!(
            "Cascade delete: removing actor ID={} from {} movie(s)",
            actor_id,
            referencing.len()
        );

        let mut affected = Vec::with_capacity(referencing.len());
        for mut movie in referencing {
            movie.actor_ids.retain(|&id| id != actor_id);
            self.movie_repo.update(&movie).await?;
            info!("Actor ID={} removed from movie '{}'", actor_id, movie.title);
            affected.push(movie.id);
        }

        Ok(affected)
    }

    /// Bulk variant of [`release_actor`](Self::release_actor): the policy is
    /// evaluated once against "any movie references any actor". When
    /// cascading, every movie with a non-empty actor set is cleared and
    /// persisted once.
    pub async fn release_all_actors(&self, allow_cascade: bool) -> AppResult<Vec<i32>> {
        let movies = self.movie_repo.get_all().await?;
        let referencing: Vec<_> = movies
            .into_iter()
            .filter(|m| !m.actor_ids.is_empty())
            .collect();

        if referencing.is_empty() {
            return Ok(Vec::new());
        }

        if !allow_cascade {
            warn!("Bulk actor deletion blocked: movies with actor references exist");
            return Err(AppError::DeletionBlocked(
                "Movies with actor references exist and cascade delete is disabled".to_string(),
            ));
        }

        info!(
            "Cascade delete: clearing actor references from {} movie(s)",
            referencing.len()
        );

        let mut affected = Vec::with_capacity(referencing.len());
        for mut movie in referencing {
            movie.actor_ids.clear();
            self.movie_repo.update(&movie).await?;
            info!("Cleared all actors from movie '{}'", movie.title);
            affected.push(movie.id);
        }

        Ok(affected)
    }

    /// Keep only movie ids that currently resolve, preserving input order.
    /// Missing ids are dropped silently, not treated as an error.
    pub async fn filter_existing_movies(&self, movie_ids: &[i32]) -> AppResult<Vec<i32>> {
        let mut existing = Vec::with_capacity(movie_ids.len());
        for &id in movie_ids {
            if self.movie_repo.get_by_id(id).await?.is_some() {
                existing.push(id);
            } else {
                debug!("Dropping non-existent movie ID={} from playlist input", id);
            }
        }
        Ok(existing)
    }
}
