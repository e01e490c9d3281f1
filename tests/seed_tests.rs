//! Tests for the starter data written into an empty database.

use fanhub::config::{Config, SecurityConfig, SeedConfig};
use fanhub::db::Store;
use fanhub::entities::users::UserRole;
use fanhub::models::{CharacterFilter, EpisodeFilter, QuoteFilter, SeasonFilter};

fn temp_db_url() -> String {
    let db_path =
        std::env::temp_dir().join(format!("fanhub-seed-test-{}.db", uuid::Uuid::new_v4()));
    format!("sqlite:{}", db_path.display())
}

fn fast_security() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
        ..SecurityConfig::default()
    }
}

fn seed_with_password() -> SeedConfig {
    SeedConfig {
        admin_password: "admin123".to_string(),
        ..SeedConfig::default()
    }
}

async fn seeded_store() -> Store {
    let store = Store::new(&temp_db_url()).await.expect("Failed to open store");
    store
        .seed_if_empty(&seed_with_password(), &fast_security())
        .await
        .expect("Seeding failed");
    store
}

#[tokio::test]
async fn test_seed_inserts_catalogue_once() {
    let store = Store::new(&temp_db_url()).await.unwrap();

    let first = store
        .seed_if_empty(&seed_with_password(), &fast_security())
        .await
        .unwrap();
    assert_eq!(first.shows, 1);
    assert_eq!(first.seasons, 5);
    assert_eq!(first.episodes, 3);
    assert_eq!(first.characters, 6);
    assert_eq!(first.quotes, 4);
    assert_eq!(first.users, 1);
    assert_eq!(first.generated_admin_password, None);

    let second = store
        .seed_if_empty(&seed_with_password(), &fast_security())
        .await
        .unwrap();
    assert!(second.is_empty());

    assert_eq!(store.count_shows().await.unwrap(), 1);
    assert_eq!(
        store.list_characters(&CharacterFilter::default()).await.unwrap().len(),
        6
    );
}

#[tokio::test]
async fn test_seed_keeps_exactly_one_duplicate_character() {
    let store = seeded_store().await;

    let characters = store
        .list_characters(&CharacterFilter::default())
        .await
        .unwrap();

    let mut names: Vec<&str> = characters.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    let duplicates: Vec<&str> = names
        .windows(2)
        .filter(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
        .collect();
    assert_eq!(duplicates, ["Jesse Pinkman"]);

    let jesse_ids: Vec<i32> = characters
        .iter()
        .filter(|c| c.name == "Jesse Pinkman")
        .map(|c| c.id)
        .collect();
    assert_eq!(jesse_ids.len(), 2);

    let quotes = store.list_quotes(&QuoteFilter::default()).await.unwrap();
    let on_duplicate: Vec<_> = quotes
        .iter()
        .filter(|q| q.character_id == jesse_ids[1])
        .collect();
    assert_eq!(on_duplicate.len(), 1);
    assert_eq!(on_duplicate[0].quote_text, "Yeah, Mr. White! Yeah, science!");
}

#[tokio::test]
async fn test_seed_catalogue_shape() {
    let store = seeded_store().await;

    let shows = store.list_shows().await.unwrap();
    assert_eq!(shows[0].title, "Breaking Bad");
    assert_eq!(shows[0].network, "AMC");
    assert_eq!(shows[0].end_year, Some(2013));

    let seasons = store.list_seasons(&SeasonFilter::default()).await.unwrap();
    let counts: Vec<i32> = seasons.iter().map(|s| s.episode_count).collect();
    assert_eq!(counts, [7, 13, 13, 13, 16]);

    let episodes = store.list_episodes(&EpisodeFilter::default()).await.unwrap();
    let runtimes: Vec<i32> = episodes.iter().map(|e| e.runtime_minutes).collect();
    assert_eq!(runtimes, [58, 48, 48]);
    assert!(episodes.iter().all(|e| e.season_id == seasons[0].id));
    assert_eq!(
        episodes[2].air_date.map(|d| d.to_string()).as_deref(),
        Some("2008-02-10")
    );

    let quotes = store.list_quotes(&QuoteFilter::default()).await.unwrap();
    assert!(quotes.iter().all(|q| q.likes == 0));
}

#[tokio::test]
async fn test_seed_admin_account() {
    let store = seeded_store().await;

    let admin = store
        .get_user_model_by_email("admin@fanhub.test")
        .await
        .unwrap()
        .expect("admin should exist");
    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(admin.username, "admin");
    assert!(admin.password_hash.starts_with("$argon2id$"));
    assert_eq!(admin.api_key.len(), 64);

    let verified = store
        .verify_user_password("admin@fanhub.test", "admin123")
        .await
        .unwrap();
    assert!(verified.is_some());

    let rejected = store
        .verify_user_password("admin@fanhub.test", "admin124")
        .await
        .unwrap();
    assert!(rejected.is_none());
}

#[tokio::test]
async fn test_seed_generates_admin_password_when_unset() {
    let store = Store::new(&temp_db_url()).await.unwrap();

    let report = store
        .seed_if_empty(&SeedConfig::default(), &fast_security())
        .await
        .unwrap();
    let password = report
        .generated_admin_password
        .expect("a password should be generated");
    assert_eq!(password.len(), 20);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

    let verified = store
        .verify_user_password("admin@fanhub.test", &password)
        .await
        .unwrap();
    assert!(verified.is_some());

    // Nothing is regenerated once the admin exists.
    let again = store
        .seed_if_empty(&SeedConfig::default(), &fast_security())
        .await
        .unwrap();
    assert_eq!(again.generated_admin_password, None);
}

#[tokio::test]
async fn test_seed_disabled_leaves_database_empty() {
    let mut config = Config::default();
    config.general.database_path = temp_db_url();
    config.seed.enabled = false;

    let state = fanhub::state::SharedState::new(config).await.unwrap();

    assert_eq!(state.store.count_shows().await.unwrap(), 0);
    assert!(!state.store.email_taken("admin@fanhub.test").await.unwrap());
}
