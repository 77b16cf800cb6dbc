use crate::domain::entities::{Movie, MovieInput};
use crate::domain::repositories::MovieRepository;
use crate::services::integrity::IntegrityChecker;
use crate::shared::cache::{keys, ReadCache};
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use tracing::{info, warn};

pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
    integrity: Arc<IntegrityChecker>,
    cache: Arc<ReadCache>,
}

impl MovieService {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        integrity: Arc<IntegrityChecker>,
        cache: Arc<ReadCache>,
    ) -> Self {
        Self {
            movie_repo,
            integrity,
            cache,
        }
    }

    /// Create a movie. Every referenced actor must exist at write time, else
    /// the whole operation fails with `InvalidReference` and nothing is
    /// persisted. The rating aggregate starts at 0/0.
    pub async fn create(&self, input: MovieInput) -> AppResult<Movie> {
        info!("Creating movie: {}", input.title);

        self.integrity.check_actor_refs(&input.actor_ids).await?;

        let movie = self
            .movie_repo
            .add(Movie {
                id: 0,
                title: input.title,
                year: input.year,
                genre: input.genre,
                actor_ids: input.actor_ids,
                rating: 0.0,
                votes_count: 0,
            })
            .await?;

        info!("Movie created successfully. ID={}", movie.id);

        self.cache.remove(keys::MOVIES_ALL);

        Ok(movie)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Movie>> {
        if let Some(cached) = self.cache.get::<Vec<Movie>>(keys::MOVIES_ALL) {
            return Ok(cached);
        }

        let movies = self.movie_repo.get_all().await?;
        self.cache.set(keys::MOVIES_ALL, &movies);

        Ok(movies)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Movie>> {
        let key = keys::movie(id);
        if let Some(cached) = self.cache.get::<Movie>(&key) {
            return Ok(Some(cached));
        }

        let Some(movie) = self.movie_repo.get_by_id(id).await? else {
            warn!("Movie ID={} not found", id);
            return Ok(None);
        };

        self.cache.set(&key, &movie);

        Ok(Some(movie))
    }

    /// Replace all mutable fields of a movie. Actor references are
    /// re-validated; the derived rating/votes_count are left untouched.
    pub async fn update(&self, id: i32, input: MovieInput) -> AppResult<Movie> {
        info!("Updating movie ID={}", id);

        let mut movie = self
            .movie_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))?;

        self.integrity.check_actor_refs(&input.actor_ids).await?;

        movie.title = input.title;
        movie.year = input.year;
        movie.genre = input.genre;
        movie.actor_ids = input.actor_ids;

        self.movie_repo.update(&movie).await?;

        info!("Movie ID={} updated successfully", id);

        self.cache.remove(keys::MOVIES_ALL);
        self.cache.remove(&keys::movie(id));

        Ok(movie)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        info!("Deleting movie ID={}", id);

        if self.movie_repo.get_by_id(id).await?.is_none() {
            warn!("Movie ID={} not found, nothing to delete", id);
            return Ok(false);
        }

        self.movie_repo.delete(id).await?;

        info!("Movie ID={} deleted successfully", id);

        self.cache.remove(keys::MOVIES_ALL);
        self.cache.remove(&keys::movie(id));

        Ok(true)
    }

    pub async fn delete_all(&self) -> AppResult<bool> {
        info!("Deleting all movies");

        let movies = self.movie_repo.get_all().await?;

        self.movie_repo.delete_all().await?;

        self.cache.remove(keys::MOVIES_ALL);
        for movie in &movies {
            self.cache.remove(&keys::movie(movie.id));
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Actor;
    use crate::domain::repositories::ActorRepository;
    use crate::infrastructure::memory::{MemoryActorRepository, MemoryMovieRepository};

    async fn service_with_actor() -> (MovieService, Actor) {
        let actor_repo = Arc::new(MemoryActorRepository::new());
        let movie_repo = Arc::new(MemoryMovieRepository::new());
        let integrity = Arc::new(IntegrityChecker::new(actor_repo.clone(), movie_repo.clone()));
        let service = MovieService::new(movie_repo, integrity, Arc::new(ReadCache::new()));

        let actor = actor_repo
            .add(Actor {
                id: 0,
                name: "Ada".to_string(),
                gender: 0,
                country: "UA".to_string(),
            })
            .await
            .unwrap();

        (service, actor)
    }

    fn input(title: &str, actor_ids: Vec<i32>) -> MovieInput {
        MovieInput {
            title: title.to_string(),
            year: 2020,
            genre: "Drama".to_string(),
            actor_ids,
        }
    }

    #[tokio::test]
    async fn create_with_missing_actor_persists_nothing() {
        let (service, actor) = service_with_actor().await;

        let err = service
            .create(input("M", vec![actor.id, 99]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidReference(_)));
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_starts_with_zero_aggregate() {
        let (service, actor) = service_with_actor().await;

        let movie = service.create(input("M", vec![actor.id])).await.unwrap();

        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.votes_count, 0);
    }

    #[tokio::test]
    async fn update_revalidates_actor_refs() {
        let (service, actor) = service_with_actor().await;
        let movie = service.create(input("M", vec![actor.id])).await.unwrap();

        let err = service
            .update(movie.id, input("M", vec![99]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidReference(_)));

        let unchanged = service.get_by_id(movie.id).await.unwrap().unwrap();
        assert_eq!(unchanged.actor_ids, vec![actor.id]);
    }
}
