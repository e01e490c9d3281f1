//! Fixed starter data, written once into an empty database.
//!
//! The character list intentionally contains "Jesse Pinkman" twice and the
//! last quote points at the second row. Consumers and tests rely on that
//! duplicate being present exactly once.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde::Serialize;
use tracing::{info, warn};

use super::Store;
use super::repositories::user::{generate_api_key, hash_password_blocking};
use crate::config::{SecurityConfig, SeedConfig};
use crate::entities::{characters, episodes, quotes, seasons, shows, users};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub shows: usize,
    pub seasons: usize,
    pub episodes: usize,
    pub characters: usize,
    pub quotes: usize,
    pub users: usize,
    /// Set when `seed.admin_password` was empty and one was generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_admin_password: Option<String>,
}

impl SeedReport {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shows == 0
            && self.seasons == 0
            && self.episodes == 0
            && self.characters == 0
            && self.quotes == 0
            && self.users == 0
    }
}

struct CharacterSeed {
    name: &'static str,
    actor_name: &'static str,
    bio: &'static str,
    is_main_character: bool,
    status: &'static str,
}

const SEASON_EPISODE_COUNTS: [i32; 5] = [7, 13, 13, 13, 16];

const CHARACTERS: [CharacterSeed; 6] = [
    CharacterSeed {
        name: "Walter White",
        actor_name: "Bryan Cranston",
        bio: "A mild-mannered high school chemistry teacher who transforms into a ruthless methamphetamine manufacturer known as \"Heisenberg\".",
        is_main_character: true,
        status: "deceased",
    },
    CharacterSeed {
        name: "Jesse Pinkman",
        actor_name: "Aaron Paul",
        bio: "Walt's former student and business partner. A small-time methamphetamine manufacturer and dealer.",
        is_main_character: true,
        status: "alive",
    },
    CharacterSeed {
        name: "Skyler White",
        actor_name: "Anna Gunn",
        bio: "Walter's wife, a bookkeeper who becomes increasingly suspicious of Walt's activities.",
        is_main_character: true,
        status: "alive",
    },
    CharacterSeed {
        name: "Hank Schrader",
        actor_name: "Dean Norris",
        bio: "Walter's brother-in-law, a DEA agent pursuing the elusive drug lord Heisenberg.",
        is_main_character: true,
        status: "deceased",
    },
    // Known duplicate, kept on purpose.
    CharacterSeed {
        name: "Jesse Pinkman",
        actor_name: "Aaron Paul",
        bio: "Walt's former student and partner in the methamphetamine business.",
        is_main_character: true,
        status: "alive",
    },
    CharacterSeed {
        name: "Saul Goodman",
        actor_name: "Bob Odenkirk",
        bio: "A criminal lawyer who becomes Walt and Jesse's legal counsel and adviser.",
        is_main_character: false,
        status: "alive",
    },
];

impl Store {
    /// Seeds the catalogue if no show exists yet, and the admin account if no
    /// user has the configured admin email. Safe to call on every start.
    pub async fn seed_if_empty(
        &self,
        seed: &SeedConfig,
        security: &SecurityConfig,
    ) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        if self.count_shows().await? == 0 {
            self.seed_catalogue(&mut report)
                .await
                .context("Failed to seed catalogue")?;
        }

        if !self.email_taken(&seed.admin_email).await? {
            report.generated_admin_password = self
                .seed_admin(seed, security)
                .await
                .context("Failed to seed admin user")?;
            report.users = 1;

            if let Some(password) = &report.generated_admin_password {
                warn!(
                    "Generated password for admin {}: {password} (set seed.admin_password to choose one)",
                    seed.admin_email
                );
            }
        }

        if report.is_empty() {
            info!("Database already seeded, nothing to do");
        } else {
            info!(
                shows = report.shows,
                seasons = report.seasons,
                episodes = report.episodes,
                characters = report.characters,
                quotes = report.quotes,
                users = report.users,
                "Seed data inserted"
            );
        }

        Ok(report)
    }

    #[allow(clippy::too_many_lines)]
    async fn seed_catalogue(&self, report: &mut SeedReport) -> Result<()> {
        let txn = self.conn.begin().await?;

        let show = shows::ActiveModel {
            title: Set("Breaking Bad".to_string()),
            description: Set("A chemistry teacher diagnosed with inoperable lung cancer turns to manufacturing and selling methamphetamine with a former student to secure his family's future.".to_string()),
            genre: Set("Crime Drama".to_string()),
            start_year: Set(2008),
            end_year: Set(Some(2013)),
            network: Set("AMC".to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        report.shows = 1;

        let mut season_ids = Vec::with_capacity(SEASON_EPISODE_COUNTS.len());
        for (number, episode_count) in (1..).zip(SEASON_EPISODE_COUNTS) {
            let season = seasons::ActiveModel {
                show_id: Set(show.id),
                season_number: Set(number),
                title: Set(format!("Season {number}")),
                episode_count: Set(episode_count),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            season_ids.push(season.id);
        }
        report.seasons = season_ids.len();

        let episode_rows = [
            (
                1,
                "Pilot",
                "Walter White, a chemistry teacher, is diagnosed with inoperable lung cancer and turns to a life of crime.",
                58,
                NaiveDate::from_ymd_opt(2008, 1, 20),
            ),
            (
                2,
                "Cat's in the Bag...",
                "Walt and Jesse attempt to tie up loose ends. The desperate situation gets more complicated with the flip of a coin.",
                48,
                NaiveDate::from_ymd_opt(2008, 1, 27),
            ),
            (
                3,
                "And the Bag's in the River",
                "Walt and Jesse clean up after the bathtub incident before Walt decides what to do with their prisoner.",
                48,
                NaiveDate::from_ymd_opt(2008, 2, 10),
            ),
        ];

        let mut episode_ids = Vec::with_capacity(episode_rows.len());
        for (number, title, description, runtime, air_date) in episode_rows {
            let episode = episodes::ActiveModel {
                show_id: Set(show.id),
                season_id: Set(season_ids[0]),
                episode_number: Set(number),
                title: Set(title.to_string()),
                description: Set(description.to_string()),
                runtime_minutes: Set(runtime),
                air_date: Set(air_date),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            episode_ids.push(episode.id);
        }
        report.episodes = episode_ids.len();

        let mut character_ids = Vec::with_capacity(CHARACTERS.len());
        for seed in &CHARACTERS {
            let character = characters::ActiveModel {
                show_id: Set(show.id),
                name: Set(seed.name.to_string()),
                actor_name: Set(seed.actor_name.to_string()),
                bio: Set(seed.bio.to_string()),
                is_main_character: Set(seed.is_main_character),
                status: Set(seed.status.to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            character_ids.push(character.id);
        }
        report.characters = character_ids.len();

        // (character index, episode index, text, famous)
        let quote_rows = [
            (0, 0, "I am not in danger, Skyler. I am the danger!", true),
            (1, 0, "Yeah, science!", true),
            (0, 2, "Say my name.", true),
            // References the duplicate Jesse.
            (4, 1, "Yeah, Mr. White! Yeah, science!", false),
        ];

        for (character, episode, text, famous) in quote_rows {
            quotes::ActiveModel {
                show_id: Set(show.id),
                character_id: Set(character_ids[character]),
                episode_id: Set(episode_ids[episode]),
                quote_text: Set(text.to_string()),
                is_famous: Set(famous),
                likes: Set(0),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            report.quotes += 1;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Returns the password when it had to be generated.
    async fn seed_admin(
        &self,
        seed: &SeedConfig,
        security: &SecurityConfig,
    ) -> Result<Option<String>> {
        let generated = seed
            .admin_password
            .is_empty()
            .then(generate_admin_password);
        let password = generated.as_deref().unwrap_or(&seed.admin_password);

        let password_hash = hash_password_blocking(password, security).await?;

        users::ActiveModel {
            email: Set(seed.admin_email.trim().to_lowercase()),
            password_hash: Set(password_hash),
            username: Set(seed.admin_username.clone()),
            display_name: Set("Admin User".to_string()),
            role: Set(users::UserRole::Admin),
            api_key: Set(generate_api_key()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!("Seeded admin user: {}", seed.admin_username);
        Ok(generated)
    }
}

fn generate_admin_password() -> String {
    use rand::{Rng, distr::Alphanumeric};

    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .collect()
}
