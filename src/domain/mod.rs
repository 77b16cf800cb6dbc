pub mod entities;
pub mod repositories;

pub use entities::{
    Actor, ActorInput, Movie, MovieInput, Playlist, PlaylistInput, Review, ReviewInput,
};
pub use repositories::{ActorRepository, MovieRepository, PlaylistRepository, ReviewRepository};
