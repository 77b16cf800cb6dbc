pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod shared;

use infrastructure::memory::{
    MemoryActorRepository, MemoryMovieRepository, MemoryPlaylistRepository,
    MemoryReviewRepository,
};
use services::{
    ActorService, IntegrityChecker, MovieService, PlaylistService, RatingAggregator,
    ReviewService,
};
use shared::{CatalogConfig, ReadCache};
use std::sync::Arc;

/// The wired catalog: the four entity services sharing one read cache, one
/// integrity checker, and one rating aggregator. Owns the lifecycles of the
/// cache and configuration instead of keeping them in ambient static state.
pub struct Catalog {
    pub actors: Arc<ActorService>,
    pub movies: Arc<MovieService>,
    pub reviews: Arc<ReviewService>,
    pub playlists: Arc<PlaylistService>,
    pub cache: Arc<ReadCache>,
}

impl Catalog {
    /// Wire the catalog over the in-memory Entity Store.
    pub fn in_memory(config: CatalogConfig) -> Self {
        let actor_repo = Arc::new(MemoryActorRepository::new());
        let movie_repo = Arc::new(MemoryMovieRepository::new());
        let review_repo = Arc::new(MemoryReviewRepository::new());
        let playlist_repo = Arc::new(MemoryPlaylistRepository::new());

        let cache = Arc::new(ReadCache::new());

        let integrity = Arc::new(IntegrityChecker::new(
            actor_repo.clone(),
            movie_repo.clone(),
        ));
        let aggregator = Arc::new(RatingAggregator::new(
            movie_repo.clone(),
            review_repo.clone(),
        ));

        let actors = Arc::new(ActorService::new(
            actor_repo,
            integrity.clone(),
            cache.clone(),
            config.clone(),
        ));
        let movies = Arc::new(MovieService::new(
            movie_repo.clone(),
            integrity.clone(),
            cache.clone(),
        ));
        let reviews = Arc::new(ReviewService::new(
            review_repo,
            movie_repo.clone(),
            aggregator,
            cache.clone(),
        ));
        let playlists = Arc::new(PlaylistService::new(
            playlist_repo,
            movie_repo,
            integrity,
        ));

        Self {
            actors,
            movies,
            reviews,
            playlists,
            cache,
        }
    }
}
