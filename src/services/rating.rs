use crate::domain::repositories::{MovieRepository, ReviewRepository};
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use tracing::debug;

/// Recomputes a movie's derived rating aggregate from its current reviews.
/// Always triggered by a review event, so a missing movie is a caller-side
/// programming error surfaced as `NotFound`.
pub struct RatingAggregator {
    movie_repo: Arc<dyn MovieRepository>,
    review_repo: Arc<dyn ReviewRepository>,
}

impl RatingAggregator {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        review_repo: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            movie_repo,
            review_repo,
        }
    }

    /// Set `votes_count` to the review count and `rating` to the arithmetic
    /// mean of the scores (0/0 when no reviews exist), then persist.
    pub async fn recalculate(&self, movie_id: i32) -> AppResult<()> {
        let mut movie = self
            .movie_repo
            .get_by_id(movie_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))?;

        let reviews = self.review_repo.get_by_movie(movie_id).await?;

        if reviews.is_empty() {
            movie.rating = 0.0;
            movie.votes_count = 0;
        } else {
            movie.votes_count = reviews.len() as i32;
            let total: i32 = reviews.iter().map(|r| r.score).sum();
            movie.rating = f64::from(total) / reviews.len() as f64;
        }

        debug!(
            "Recalculated rating for movie ID={}: {} over {} vote(s)",
            movie_id, movie.rating, movie.votes_count
        );

        self.movie_repo.update(&movie).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Movie, Review};
    use crate::domain::repositories::{MockMovieRepository, MockReviewRepository};

    fn movie(id: i32) -> Movie {
        Movie {
            id,
            title: "M".to_string(),
            year: 2020,
            genre: "Drama".to_string(),
            actor_ids: vec![],
            rating: 9.9,
            votes_count: 42,
        }
    }

    fn review(score: i32) -> Review {
        Review {
            id: 0,
            movie_id: 1,
            user_name: "u".to_string(),
            score,
            text: String::new(),
        }
    }

    #[tokio::test]
    async fn missing_movie_is_not_found() {
        let mut movies = MockMovieRepository::new();
        movies.expect_get_by_id().returning(|_| Ok(None));
        let reviews = MockReviewRepository::new();

        let aggregator = RatingAggregator::new(Arc::new(movies), Arc::new(reviews));

        let err = aggregator.recalculate(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn no_reviews_resets_aggregate_to_zero() {
        let mut movies = MockMovieRepository::new();
        movies.expect_get_by_id().returning(|id| Ok(Some(movie(id))));
        movies
            .expect_update()
            .withf(|m| m.rating == 0.0 && m.votes_count == 0)
            .times(1)
            .returning(|_| Ok(()));
        let mut reviews = MockReviewRepository::new();
        reviews.expect_get_by_movie().returning(|_| Ok(vec![]));

        let aggregator = RatingAggregator::new(Arc::new(movies), Arc::new(reviews));

        aggregator.recalculate(1).await.unwrap();
    }

    #[tokio::test]
    async fn mean_of_scores_is_persisted() {
        let mut movies = MockMovieRepository::new();
        movies.expect_get_by_id().returning(|id| Ok(Some(movie(id))));
        movies
            .expect_update()
            .withf(|m| m.rating == 5.0 && m.votes_count == 2)
            .times(1)
            .returning(|_| Ok(()));
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_get_by_movie()
            .returning(|_| Ok(vec![review(7), review(3)]));

        let aggregator = RatingAggregator::new(Arc::new(movies), Arc::new(reviews));

        aggregator.recalculate(1).await.unwrap();
    }
}
