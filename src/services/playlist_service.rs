use crate::domain::entities::{Playlist, PlaylistInput};
use crate::domain::repositories::{MovieRepository, PlaylistRepository};
use crate::services::integrity::IntegrityChecker;
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Playlist facade. Playlists are not part of the cached read projections,
/// so these operations perform no cache invalidation.
pub struct PlaylistService {
    playlist_repo: Arc<dyn PlaylistRepository>,
    movie_repo: Arc<dyn MovieRepository>,
    integrity: Arc<IntegrityChecker>,
}

impl PlaylistService {
    pub fn new(
        playlist_repo: Arc<dyn PlaylistRepository>,
        movie_repo: Arc<dyn MovieRepository>,
        integrity: Arc<IntegrityChecker>,
    ) -> Self {
        Self {
            playlist_repo,
            movie_repo,
            integrity,
        }
    }

    /// Create a playlist. A playlist with the same (user, name) pair is an
    /// explicit `Conflict`; movie ids that do not resolve are dropped
    /// silently.
    pub async fn create(&self, input: PlaylistInput) -> AppResult<Playlist> {
        info!(
            "Creating playlist '{}' for user '{}'",
            input.name, input.user_name
        );

        let existing = self.playlist_repo.get_by_user(&input.user_name).await?;
        if existing.iter().any(|p| p.name == input.name) {
            warn!(
                "Playlist '{}' already exists for user '{}'",
                input.name, input.user_name
            );
            return Err(AppError::Conflict(format!(
                "Playlist '{}' already exists for user '{}'",
                input.name, input.user_name
            )));
        }

        let movie_ids = self.integrity.filter_existing_movies(&input.movie_ids).await?;

        let playlist = self
            .playlist_repo
            .add(Playlist {
                id: 0,
                user_name: input.user_name,
                name: input.name,
                movie_ids,
            })
            .await?;

        info!("Playlist created successfully. ID={}", playlist.id);

        Ok(playlist)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Playlist>> {
        self.playlist_repo.get_by_id(id).await
    }

    pub async fn get_by_user(&self, user_name: &str) -> AppResult<Vec<Playlist>> {
        self.playlist_repo.get_by_user(user_name).await
    }

    /// Replace owner, name, and movie set; the movie ids are re-filtered
    /// against the store with the same silent-drop rule as create.
    pub async fn update(&self, id: i32, input: PlaylistInput) -> AppResult<Playlist> {
        info!("Updating playlist ID={}", id);

        let mut playlist = self
            .playlist_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Playlist {} not found", id)))?;

        playlist.user_name = input.user_name;
        playlist.name = input.name;
        playlist.movie_ids = self.integrity.filter_existing_movies(&input.movie_ids).await?;

        self.playlist_repo.update(&playlist).await?;

        Ok(playlist)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        info!("Deleting playlist ID={}", id);

        if self.playlist_repo.get_by_id(id).await?.is_none() {
            warn!("Playlist ID={} not found, nothing to delete", id);
            return Ok(false);
        }

        self.playlist_repo.delete(id).await?;

        Ok(true)
    }

    /// Add one movie to a playlist. Declines with `Ok(false)` and no store
    /// write when the playlist or movie is absent or the id is already
    /// present.
    pub async fn add_movie(&self, playlist_id: i32, movie_id: i32) -> AppResult<bool> {
        let Some(mut playlist) = self.playlist_repo.get_by_id(playlist_id).await? else {
            return Ok(false);
        };

        if self.movie_repo.get_by_id(movie_id).await?.is_none() {
            return Ok(false);
        }

        if playlist.movie_ids.contains(&movie_id) {
            return Ok(false);
        }

        playlist.movie_ids.push(movie_id);
        self.playlist_repo.update(&playlist).await?;

        Ok(true)
    }

    /// Remove one movie from a playlist. Declines with `Ok(false)` and no
    /// store write when the playlist is absent or the id is not present.
    pub async fn remove_movie(&self, playlist_id: i32, movie_id: i32) -> AppResult<bool> {
        let Some(mut playlist) = self.playlist_repo.get_by_id(playlist_id).await? else {
            return Ok(false);
        };

        if !playlist.movie_ids.contains(&movie_id) {
            return Ok(false);
        }

        playlist.movie_ids.retain(|&id| id != movie_id);
        self.playlist_repo.update(&playlist).await?;

        Ok(true)
    }
}
