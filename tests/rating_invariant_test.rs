/// Rating aggregate tests: after every review create/update/delete the
/// movie's votes_count equals the review count and rating equals the mean
/// of the current scores.
use kinoteka::domain::entities::{ActorInput, MovieInput, ReviewInput};
use kinoteka::shared::CatalogConfig;
use kinoteka::Catalog;

fn catalog() -> Catalog {
    Catalog::in_memory(CatalogConfig::default())
}

fn review(movie_id: i32, user: &str, score: i32) -> ReviewInput {
    ReviewInput {
        movie_id,
        user_name: user.to_string(),
        score,
        text: "".to_string(),
    }
}

async fn seed_movie(catalog: &Catalog) -> i32 {
    let actor = catalog
        .actors
        .create(ActorInput {
            name: "Ada".to_string(),
            gender: 0,
            country: "UA".to_string(),
        })
        .await
        .unwrap();

    catalog
        .movies
        .create(MovieInput {
            title: "M".to_string(),
            year: 2021,
            genre: "Drama".to_string(),
            actor_ids: vec![actor.id],
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn review_lifecycle_keeps_aggregate_in_sync() {
    let catalog = catalog();
    let movie_id = seed_movie(&catalog).await;

    let r1 = catalog.reviews.create(review(movie_id, "u", 7)).await.unwrap();
    let movie = catalog.movies.get_by_id(movie_id).await.unwrap().unwrap();
    assert_eq!(movie.rating, 7.0);
    assert_eq!(movie.votes_count, 1);

    catalog.reviews.create(review(movie_id, "v", 3)).await.unwrap();
    let movie = catalog.movies.get_by_id(movie_id).await.unwrap().unwrap();
    assert_eq!(movie.rating, 5.0);
    assert_eq!(movie.votes_count, 2);

    assert!(catalog.reviews.delete(r1.id).await.unwrap());
    let movie = catalog.movies.get_by_id(movie_id).await.unwrap().unwrap();
    assert_eq!(movie.rating, 3.0);
    assert_eq!(movie.votes_count, 1);
}

#[tokio::test]
async fn deleting_last_review_resets_aggregate() {
    let catalog = catalog();
    let movie_id = seed_movie(&catalog).await;

    let r = catalog.reviews.create(review(movie_id, "u", 9)).await.unwrap();
    assert!(catalog.reviews.delete(r.id).await.unwrap());

    let movie = catalog.movies.get_by_id(movie_id).await.unwrap().unwrap();
    assert_eq!(movie.rating, 0.0);
    assert_eq!(movie.votes_count, 0);
}

#[tokio::test]
async fn score_update_moves_the_mean() {
    let catalog = catalog();
    let movie_id = seed_movie(&catalog).await;

    let r = catalog.reviews.create(review(movie_id, "u", 2)).await.unwrap();
    catalog.reviews.create(review(movie_id, "v", 4)).await.unwrap();

    catalog
        .reviews
        .update(r.id, review(movie_id, "u", 10))
        .await
        .unwrap();

    let movie = catalog.movies.get_by_id(movie_id).await.unwrap().unwrap();
    assert_eq!(movie.rating, 7.0);
    assert_eq!(movie.votes_count, 2);
}

#[tokio::test]
async fn rejected_duplicate_review_leaves_aggregate_at_first_value() {
    let catalog = catalog();
    let movie_id = seed_movie(&catalog).await;

    catalog.reviews.create(review(movie_id, "u", 7)).await.unwrap();
    assert!(catalog.reviews.create(review(movie_id, "u", 1)).await.is_err());

    let movie = catalog.movies.get_by_id(movie_id).await.unwrap().unwrap();
    assert_eq!(movie.rating, 7.0);
    assert_eq!(movie.votes_count, 1);
}
