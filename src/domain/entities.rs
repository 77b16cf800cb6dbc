use serde::{Deserialize, Serialize};

/// An actor. Movies reference actors by id; the reverse relationship is
/// derived by scanning movies, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    /// Binary gender code (0/1), validated by the transport layer.
    pub gender: u8,
    pub country: String,
}

/// A movie. `rating` and `votes_count` are derived from the movie's reviews
/// and are never set directly by movie-editing operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub genre: String,
    /// Referenced actor ids. Order is irrelevant; the model does not
    /// prevent duplicates (uniqueness is a caller concern).
    pub actor_ids: Vec<i32>,
    pub rating: f64,
    pub votes_count: i32,
}

/// A review of one movie by one user. At most one review per
/// (user_name, movie_id) pair, enforced at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i32,
    pub movie_id: i32,
    pub user_name: String,
    /// Integer score in [1, 10].
    pub score: i32,
    pub text: String,
}

/// A user's named list of movie ids. No two playlists of the same user
/// share a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i32,
    pub user_name: String,
    pub name: String,
    pub movie_ids: Vec<i32>,
}

// Input bundles. Create and update take the same full-replacement bundle;
// there are no partial-update semantics.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorInput {
    pub name: String,
    pub gender: u8,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub actor_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub movie_id: i32,
    pub user_name: String,
    pub score: i32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistInput {
    pub user_name: String,
    pub name: String,
    pub movie_ids: Vec<i32>,
}
