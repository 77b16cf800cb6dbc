use kinoteka::domain::entities::{ActorInput, MovieInput, ReviewInput};
use kinoteka::shared::errors::{AppError, AppResult};
use kinoteka::shared::{utils::init_logger, CatalogConfig};
use kinoteka::Catalog;
use tracing::info;

/// Smoke entry point: wires the catalog over the in-memory store and walks
/// one create/review cycle so the consistency engine can be watched in the
/// logs. Real deployments put a transport layer in front of the services.
#[tokio::main]
async fn main() -> AppResult<()> {
    init_logger();

    let config = CatalogConfig::from_env();
    info!(
        "Starting catalog (cascade delete: {}, actor limit: {})",
        config.allow_cascade_delete, config.max_actors
    );

    let catalog = Catalog::in_memory(config);

    let actor = catalog
        .actors
        .create(ActorInput {
            name: "Olha Kobylianska".to_string(),
            gender: 0,
            country: "Ukraine".to_string(),
        })
        .await?;

    let movie = catalog
        .movies
        .create(MovieInput {
            title: "Earth".to_string(),
            year: 1930,
            genre: "Drama".to_string(),
            actor_ids: vec![actor.id],
        })
        .await?;

    for (user, score) in [("critic", 9), ("viewer", 7)] {
        catalog
            .reviews
            .create(ReviewInput {
                movie_id: movie.id,
                user_name: user.to_string(),
                score,
                text: String::new(),
            })
            .await?;
    }

    let rated = catalog
        .movies
        .get_by_id(movie.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie.id)))?;
    info!(
        "'{}' now rated {} over {} vote(s)",
        rated.title, rated.rating, rated.votes_count
    );

    Ok(())
}
