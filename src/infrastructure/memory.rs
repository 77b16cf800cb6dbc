//! In-memory Entity Store. One `Table` per entity type; ids are assigned by
//! an atomic counter starting at 1. Listing queries return rows sorted by id
//! so store-iteration order (and anything layered on it, like cascade order)
//! is deterministic.

use crate::domain::entities::{Actor, Movie, Playlist, Review};
use crate::domain::repositories::{
    ActorRepository, MovieRepository, PlaylistRepository, ReviewRepository,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};

#[derive(Debug)]
struct Table<T> {
    rows: DashMap<i32, T>,
    next_id: AtomicI32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    fn assign_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn all(&self) -> Vec<T> {
        let mut rows: Vec<(i32, T)> = self
            .rows
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).map(|entry| entry.value().clone())
    }

    fn put(&self, id: i32, row: T) {
        self.rows.insert(id, row);
    }

    fn delete(&self, id: i32) {
        self.rows.remove(&id);
    }

    fn clear(&self) {
        self.rows.clear();
    }
}

#[derive(Debug)]
pub struct MemoryActorRepository {
    table: Table<Actor>,
}

impl MemoryActorRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

impl Default for MemoryActorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActorRepository for MemoryActorRepository {
    async fn get_all(&self) -> AppResult<Vec<Actor>> {
        Ok(self.table.all())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Actor>> {
        Ok(self.table.get(id))
    }

    async fn add(&self, mut actor: Actor) -> AppResult<Actor> {
        actor.id = self.table.assign_id();
        self.table.put(actor.id, actor.clone());
        Ok(actor)
    }

    async fn update(&self, actor: &Actor) -> AppResult<()> {
        self.table.put(actor.id, actor.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.table.delete(id);
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.table.clear();
        Ok(())
    }
}

#[derive(Debug)]
pub struct MemoryMovieRepository {
    table: Table<Movie>,
}

impl MemoryMovieRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

impl Default for MemoryMovieRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieRepository for MemoryMovieRepository {
    async fn get_all(&self) -> AppResult<Vec<Movie>> {
        Ok(self.table.all())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Movie>> {
        Ok(self.table.get(id))
    }

    async fn add(&self, mut movie: Movie) -> AppResult<Movie> {
        movie.id = self.table.assign_id();
        self.table.put(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update(&self, movie: &Movie) -> AppResult<()> {
        self.table.put(movie.id, movie.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.table.delete(id);
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.table.clear();
        Ok(())
    }
}

#[derive(Debug)]
pub struct MemoryReviewRepository {
    table: Table<Review>,
}

impl MemoryReviewRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

impl Default for MemoryReviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        Ok(self.table.get(id))
    }

    async fn get_by_movie(&self, movie_id: i32) -> AppResult<Vec<Review>> {
        Ok(self
            .table
            .all()
            .into_iter()
            .filter(|r| r.movie_id == movie_id)
            .collect())
    }

    async fn get_user_review(
        &self,
        user_name: &str,
        movie_id: i32,
    ) -> AppResult<Option<Review>> {
        Ok(self
            .table
            .all()
            .into_iter()
            .find(|r| r.movie_id == movie_id && r.user_name == user_name))
    }

    async fn add(&self, mut review: Review) -> AppResult<Review> {
        review.id = self.table.assign_id();
        self.table.put(review.id, review.clone());
        Ok(review)
    }

    async fn update(&self, review: &Review) -> AppResult<()> {
        self.table.put(review.id, review.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.table.delete(id);
        Ok(())
    }
}

#[derive(Debug)]
pub struct MemoryPlaylistRepository {
    table: Table<Playlist>,
}

impl MemoryPlaylistRepository {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

impl Default for MemoryPlaylistRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaylistRepository for MemoryPlaylistRepository {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Playlist>> {
        Ok(self.table.get(id))
    }

    async fn get_by_user(&self, user_name: &str) -> AppResult<Vec<Playlist>> {
        Ok(self
            .table
            .all()
            .into_iter()
            .filter(|p| p.user_name == user_name)
            .collect())
    }

    async fn add(&self, mut playlist: Playlist) -> AppResult<Playlist> {
        playlist.id = self.table.assign_id();
        self.table.put(playlist.id, playlist.clone());
        Ok(playlist)
    }

    async fn update(&self, playlist: &Playlist) -> AppResult<()> {
        self.table.put(playlist.id, playlist.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.table.delete(id);
        Ok(())
    }
}
