pub mod actor_service;
pub mod integrity;
pub mod movie_service;
pub mod playlist_service;
pub mod rating;
pub mod review_service;

pub use actor_service::ActorService;
pub use integrity::IntegrityChecker;
pub use movie_service::MovieService;
pub use playlist_service::PlaylistService;
pub use rating::RatingAggregator;
pub use review_service::ReviewService;
