use crate::domain::entities::{Actor, ActorInput};
use crate::domain::repositories::ActorRepository;
use crate::services::integrity::IntegrityChecker;
use crate::shared::cache::{keys, ReadCache};
use crate::shared::config::CatalogConfig;
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ActorService {
    actor_repo: Arc<dyn ActorRepository>,
    integrity: Arc<IntegrityChecker>,
    cache: Arc<ReadCache>,
    config: CatalogConfig,
}

impl ActorService {
    pub fn new(
        actor_repo: Arc<dyn ActorRepository>,
        integrity: Arc<IntegrityChecker>,
        cache: Arc<ReadCache>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            actor_repo,
            integrity,
            cache,
            config,
        }
    }

    /// Create an actor. Fails with `LimitExceeded` when the store already
    /// holds `max_actors` actors.
    pub async fn create(&self, input: ActorInput) -> AppResult<Actor> {
        info!("Creating actor: {}", input.name);

        let current = self.actor_repo.get_all().await?;
        if current.len() >= self.config.max_actors {
            warn!(
                "Actor limit of {} reached, creation refused",
                self.config.max_actors
            );
            return Err(AppError::LimitExceeded(format!(
                "Actor limit of {} reached",
                self.config.max_actors
            )));
        }

        let actor = self
            .actor_repo
            .add(Actor {
                id: 0,
                name: input.name,
                gender: input.gender,
                country: input.country,
            })
            .await?;

        info!("Actor created successfully. ID={}", actor.id);

        self.cache.remove(keys::ACTORS_ALL);

        Ok(actor)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Actor>> {
        if let Some(cached) = self.cache.get::<Vec<Actor>>(keys::ACTORS_ALL) {
            return Ok(cached);
        }

        let actors = self.actor_repo.get_all().await?;
        self.cache.set(keys::ACTORS_ALL, &actors);

        Ok(actors)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Actor>> {
        let key = keys::actor(id);
        if let Some(cached) = self.cache.get::<Actor>(&key) {
            return Ok(Some(cached));
        }

        let Some(actor) = self.actor_repo.get_by_id(id).await? else {
            warn!("Actor ID={} not found", id);
            return Ok(None);
        };

        self.cache.set(&key, &actor);

        Ok(Some(actor))
    }

    /// Replace all mutable fields of an actor.
    pub async fn update(&self, id: i32, input: ActorInput) -> AppResult<Actor> {
        info!("Updating actor ID={}", id);

        let mut actor = self
            .actor_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Actor {} not found", id)))?;

        actor.name = input.name;
        actor.gender = input.gender;
        actor.country = input.country;

        self.actor_repo.update(&actor).await?;

        info!("Actor ID={} updated successfully", id);

        self.cache.remove(keys::ACTORS_ALL);
        self.cache.remove(&keys::actor(id));

        Ok(actor)
    }

    /// Delete one actor, applying the cascade policy. `Ok(false)` when the
    /// actor does not exist; `DeletionBlocked` when it is referenced by a
    /// movie and cascading is disabled.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        info!("Deleting actor ID={}", id);

        if self.actor_repo.get_by_id(id).await?.is_none() {
            warn!("Actor ID={} not found, nothing to delete", id);
            return Ok(false);
        }

        let affected_movies = self
            .integrity
            .release_actor(id, self.config.allow_cascade_delete)
            .await?;

        self.actor_repo.delete(id).await?;

        info!("Actor ID={} deleted successfully", id);

        self.cache.remove(keys::ACTORS_ALL);
        self.cache.remove(&keys::actor(id));
        if !affected_movies.is_empty() {
            self.cache.remove(keys::MOVIES_ALL);
            for movie_id in affected_movies {
                self.cache.remove(&keys::movie(movie_id));
            }
        }

        Ok(true)
    }

    /// Delete every actor. The cascade policy is evaluated once against
    /// "any movie has any actor reference".
    pub async fn delete_all(&self) -> AppResult<bool> {
        info!("Deleting all actors");

        let actors = self.actor_repo.get_all().await?;

        let affected_movies = self
            .integrity
            .release_all_actors(self.config.allow_cascade_delete)
            .await?;

        self.actor_repo.delete_all().await?;

        info!("All actors deleted successfully");

        self.cache.remove(keys::ACTORS_ALL);
        for actor in &actors {
            self.cache.remove(&keys::actor(actor.id));
        }
        if !affected_movies.is_empty() {
            self.cache.remove(keys::MOVIES_ALL);
            for movie_id in affected_movies {
                self.cache.remove(&keys::movie(movie_id));
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::{MemoryActorRepository, MemoryMovieRepository};

    fn service(max_actors: usize) -> ActorService {
        let actor_repo = Arc::new(MemoryActorRepository::new());
        let movie_repo = Arc::new(MemoryMovieRepository::new());
        let integrity = Arc::new(IntegrityChecker::new(actor_repo.clone(), movie_repo));
        ActorService::new(
            actor_repo,
            integrity,
            Arc::new(ReadCache::new()),
            CatalogConfig {
                allow_cascade_delete: false,
                max_actors,
            },
        )
    }

    fn input(name: &str) -> ActorInput {
        ActorInput {
            name: name.to_string(),
            gender: 1,
            country: "UA".to_string(),
        }
    }

    #[tokio::test]
    async fn create_refuses_once_limit_reached() {
        let service = service(2);

        service.create(input("Ada")).await.unwrap();
        service.create(input("Bea")).await.unwrap();
        let err = service.create(input("Cyd")).await.unwrap_err();

        assert!(matches!(err, AppError::LimitExceeded(_)));
        assert_eq!(service.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_of_missing_actor_is_not_found() {
        let service = service(10);

        let err = service.update(99, input("Ada")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_missing_actor_returns_false() {
        let service = service(10);

        assert!(!service.delete(99).await.unwrap());
    }
}
