pub mod memory;

pub use memory::{
    MemoryActorRepository, MemoryMovieRepository, MemoryPlaylistRepository,
    MemoryReviewRepository,
};
