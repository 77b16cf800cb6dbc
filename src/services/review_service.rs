use crate::domain::entities::{Review, ReviewInput};
use crate::domain::repositories::{MovieRepository, ReviewRepository};
use crate::services::rating::RatingAggregator;
use crate::shared::cache::{keys, ReadCache};
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use tracing::{info, warn};

const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 10;

pub struct ReviewService {
    review_repo: Arc<dyn ReviewRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    aggregator: Arc<RatingAggregator>,
    cache: Arc<ReadCache>,
}

impl ReviewService {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        movie_repo: Arc<dyn MovieRepository>,
        aggregator: Arc<RatingAggregator>,
        cache: Arc<ReadCache>,
    ) -> Self {
        Self {
            review_repo,
            movie_repo,
            aggregator,
            cache,
        }
    }

    fn check_score(score: i32) -> AppResult<()> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(AppError::ValidationError(format!(
                "Score {} is outside [{}, {}]",
                score, MIN_SCORE, MAX_SCORE
            )));
        }
        Ok(())
    }

    /// Create a review. The target movie must exist, the score must be in
    /// [1, 10], and the user must not have reviewed this movie already. On
    /// success the movie's rating aggregate is recomputed before the movie's
    /// cache entries are invalidated.
    pub async fn create(&self, input: ReviewInput) -> AppResult<Review> {
        info!(
            "Creating review for movie ID={} by '{}'",
            input.movie_id, input.user_name
        );

        if self.movie_repo.get_by_id(input.movie_id).await?.is_none() {
            warn!("Movie ID={} not found, review refused", input.movie_id);
            return Err(AppError::NotFound(format!(
                "Movie {} not found",
                input.movie_id
            )));
        }

        Self::check_score(input.score)?;

        if self
            .review_repo
            .get_user_review(&input.user_name, input.movie_id)
            .await?
            .is_some()
        {
            warn!(
                "User '{}' already reviewed movie ID={}",
                input.user_name, input.movie_id
            );
            return Err(AppError::Conflict(format!(
                "User '{}' already reviewed movie {}",
                input.user_name, input.movie_id
            )));
        }

        let review = self
            .review_repo
            .add(Review {
                id: 0,
                movie_id: input.movie_id,
                user_name: input.user_name,
                score: input.score,
                text: input.text,
            })
            .await?;

        self.aggregator.recalculate(review.movie_id).await?;

        self.cache.remove(keys::MOVIES_ALL);
        self.cache.remove(&keys::movie(review.movie_id));

        Ok(review)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        self.review_repo.get_by_id(id).await
    }

    pub async fn get_by_movie(&self, movie_id: i32) -> AppResult<Vec<Review>> {
        self.review_repo.get_by_movie(movie_id).await
    }

    /// Update a review's score and text (the movie and author are identity,
    /// not mutable fields), then recompute the movie's aggregate.
    pub async fn update(&self, id: i32, input: ReviewInput) -> AppResult<Review> {
        info!("Updating review ID={}", id);

        let mut review = self
            .review_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))?;

        Self::check_score(input.score)?;

        review.score = input.score;
        review.text = input.text;

        self.review_repo.update(&review).await?;

        self.aggregator.recalculate(review.movie_id).await?;

        self.cache.remove(keys::MOVIES_ALL);
        self.cache.remove(&keys::movie(review.movie_id));

        Ok(review)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        info!("Deleting review ID={}", id);

        let Some(review) = self.review_repo.get_by_id(id).await? else {
            warn!("Review ID={} not found, nothing to delete", id);
            return Ok(false);
        };

        let movie_id = review.movie_id;

        self.review_repo.delete(id).await?;

        self.aggregator.recalculate(movie_id).await?;

        self.cache.remove(keys::MOVIES_ALL);
        self.cache.remove(&keys::movie(movie_id));

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Movie;
    use crate::infrastructure::memory::{MemoryMovieRepository, MemoryReviewRepository};

    async fn service_with_movie() -> (ReviewService, Movie) {
        let movie_repo = Arc::new(MemoryMovieRepository::new());
        let review_repo = Arc::new(MemoryReviewRepository::new());
        let aggregator = Arc::new(RatingAggregator::new(movie_repo.clone(), review_repo.clone()));
        let service = ReviewService::new(
            review_repo,
            movie_repo.clone(),
            aggregator,
            Arc::new(ReadCache::new()),
        );

        let movie = movie_repo
            .add(Movie {
                id: 0,
                title: "M".to_string(),
                year: 2020,
                genre: "Drama".to_string(),
                actor_ids: vec![],
                rating: 0.0,
                votes_count: 0,
            })
            .await
            .unwrap();

        (service, movie)
    }

    fn input(movie_id: i32, user: &str, score: i32) -> ReviewInput {
        ReviewInput {
            movie_id,
            user_name: user.to_string(),
            score,
            text: "fine".to_string(),
        }
    }

    #[tokio::test]
    async fn create_for_missing_movie_is_not_found() {
        let (service, _movie) = service_with_movie().await;

        let err = service.create(input(99, "u", 7)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_score() {
        let (service, movie) = service_with_movie().await;

        for score in [0, 11] {
            let err = service.create(input(movie.id, "u", score)).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }
    }

    #[tokio::test]
    async fn second_review_from_same_user_conflicts() {
        let (service, movie) = service_with_movie().await;

        service.create(input(movie.id, "u", 7)).await.unwrap();
        let err = service.create(input(movie.id, "u", 3)).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(service.get_by_movie(movie.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_review_is_not_found() {
        let (service, _movie) = service_with_movie().await;

        let err = service.update(99, input(1, "u", 5)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
