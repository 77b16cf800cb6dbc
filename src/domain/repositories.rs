/// Entity Store contracts: pure per-entity CRUD, no validation and no
/// cascading. Referential integrity and derived aggregates are enforced a
/// layer up, in the services. Storage failures propagate unmodified.
use crate::domain::entities::{Actor, Movie, Playlist, Review};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActorRepository: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<Actor>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Actor>>;

    /// Persist a new actor; the store assigns the id.
    async fn add(&self, actor: Actor) -> AppResult<Actor>;

    /// Replace the stored actor with the same id.
    async fn update(&self, actor: &Actor) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<Movie>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Movie>>;

    /// Persist a new movie; the store assigns the id.
    async fn add(&self, movie: Movie) -> AppResult<Movie>;

    /// Replace the stored movie with the same id.
    async fn update(&self, movie: &Movie) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Review>>;

    /// All reviews for one movie.
    async fn get_by_movie(&self, movie_id: i32) -> AppResult<Vec<Review>>;

    /// The review a user left for a movie, if any.
    async fn get_user_review(&self, user_name: &str, movie_id: i32)
        -> AppResult<Option<Review>>;

    async fn add(&self, review: Review) -> AppResult<Review>;

    async fn update(&self, review: &Review) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Playlist>>;

    /// All playlists owned by one user.
    async fn get_by_user(&self, user_name: &str) -> AppResult<Vec<Playlist>>;

    async fn add(&self, playlist: Playlist) -> AppResult<Playlist>;

    async fn update(&self, playlist: &Playlist) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}
