//! QA tests for the full encounter flow.
//!
//! These tests drive the generator, session, and grid together against a
//! scripted catalog. No network access is required.

use chrono::{TimeZone, Utc};
use dex_core::testing::{profile_json, species_json, MockCatalog};
use dex_core::{
    CacheKind, DexConfig, DexEvent, DexSession, EncounterGenerator, ObjectCache,
};
use std::sync::Arc;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    config: DexConfig,
    cache: Arc<ObjectCache>,
    catalog: Arc<MockCatalog>,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = DexConfig::new().with_cache_root(dir.path()).with_max_id(493);
        let cache = Arc::new(ObjectCache::new(&config.cache_root));
        let catalog = Arc::new(MockCatalog::new());
        Self {
            _dir: dir,
            config,
            cache,
            catalog,
        }
    }

    fn generator(&self) -> EncounterGenerator<MockCatalog> {
        EncounterGenerator::new(self.catalog.clone(), self.cache.clone(), &self.config)
    }

    async fn session(&self) -> DexSession {
        DexSession::open(self.config.clone(), self.cache.clone())
            .await
            .expect("Failed to open session")
    }
}

// =============================================================================
// Scenario: ordinary encounter
// =============================================================================

#[tokio::test]
async fn ordinary_encounter_reaches_ledger_and_grid() {
    let fx = Fixture::new();
    fx.catalog
        .insert(25, "pikachu", &["electric"], "It stores electricity.");

    let record = fx.generator().resolve(25, false).await.unwrap();
    assert_eq!(record.id, 25);
    assert_eq!(record.name, "Pikachu");
    assert_eq!(record.types, vec!["Electric"]);
    assert_eq!(record.flavor, "It stores electricity.");
    assert!(!record.shiny);
    assert!(record.sprite.is_some());

    let mut session = fx.session().await;
    session.apply(record, Utc::now()).await;

    assert_eq!(session.ledger().names, vec!["Pikachu"]);
    assert!(session.ledger().ids.contains(&25));
    assert!(session.grid().slot(25).unwrap().revealed);
    assert!(session.shiny_history().is_empty());
}

// =============================================================================
// Scenario: shiny encounter
// =============================================================================

#[tokio::test]
async fn shiny_encounter_reaches_history_and_slot_timestamps() {
    let fx = Fixture::new();
    fx.catalog
        .insert(6, "charizard", &["fire", "flying"], "It breathes fire.");

    let record = fx.generator().resolve(6, true).await.unwrap();
    assert!(record.shiny);
    assert_eq!(record.type_line(), "Fire/Flying");

    let now = Utc.with_ymd_and_hms(2024, 1, 1, 14, 15, 0).unwrap();
    let mut session = fx.session().await;
    let events = session.apply(record, now).await;

    let history = session.shiny_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].dex, "#006");
    assert_eq!(history[0].name, "Charizard");
    assert_eq!(history[0].time, "02:15 PM");
    assert_eq!(history[0].date, "01/01/2024");

    assert_eq!(
        session.grid().slot(6).unwrap().shiny_times,
        vec!["02:15 PM – 01/01/2024"]
    );

    assert!(events
        .iter()
        .any(|e| matches!(e, DexEvent::ShinyRecorded(_))));
}

// =============================================================================
// Cache behavior
// =============================================================================

#[tokio::test]
async fn second_resolution_fetches_nothing() {
    let fx = Fixture::new();
    fx.catalog.insert(1, "bulbasaur", &["grass", "poison"], "A seed.");

    fx.generator().resolve(1, false).await.unwrap();
    assert_eq!(fx.catalog.profile_fetches(), 1);
    assert_eq!(fx.catalog.species_fetches(), 1);
    assert_eq!(fx.catalog.sprite_fetches(), 1);

    fx.generator().resolve(1, false).await.unwrap();
    assert_eq!(fx.catalog.profile_fetches(), 1);
    assert_eq!(fx.catalog.species_fetches(), 1);
    assert_eq!(fx.catalog.sprite_fetches(), 1);
}

#[tokio::test]
async fn shiny_and_normal_sprites_cache_independently() {
    let fx = Fixture::new();
    fx.catalog.insert(1, "bulbasaur", &["grass"], "A seed.");

    fx.generator().resolve(1, false).await.unwrap();
    fx.generator().resolve(1, true).await.unwrap();

    assert_eq!(fx.catalog.sprite_fetches(), 2);
    assert!(fx.cache.cached_path(1, CacheKind::SpriteNormal).is_some());
    assert!(fx.cache.cached_path(1, CacheKind::SpriteShiny).is_some());
}

// =============================================================================
// Failure behavior
// =============================================================================

#[tokio::test]
async fn unscripted_id_aborts_generation_without_side_effects() {
    let fx = Fixture::new();
    fx.cache.ensure_dir().await.unwrap();

    let result = fx.generator().resolve(42, false).await;
    assert!(result.is_err());

    assert!(fx.cache.cached_path(42, CacheKind::Profile).is_none());
    assert!(fx.cache.cached_path(42, CacheKind::Species).is_none());
}

#[tokio::test]
async fn failed_generation_leaves_persisted_state_untouched() {
    let fx = Fixture::new();
    let session = fx.session().await;

    let result = fx.generator().resolve(42, false).await;
    assert!(result.is_err());

    assert_eq!(session.ledger().names.len(), 0);
    assert!(session.shiny_history().is_empty());
}

// =============================================================================
// Flavor and sprite edge cases
// =============================================================================

#[tokio::test]
async fn missing_language_falls_back_to_placeholder() {
    let fx = Fixture::new();
    fx.catalog.insert_profile(7, profile_json(7, "squirtle", &["water"], true));
    fx.catalog
        .insert_species(7, species_json(&[("Eine Schildkröte.", "de")]));
    fx.catalog
        .insert_sprite(&dex_core::testing::normal_sprite_url(7), vec![0u8; 4]);

    let record = fx.generator().resolve(7, false).await.unwrap();
    assert_eq!(record.flavor, "(No flavor text found)");
}

#[tokio::test]
async fn flavor_whitespace_is_normalized() {
    let fx = Fixture::new();
    fx.catalog.insert_profile(7, profile_json(7, "squirtle", &["water"], true));
    fx.catalog.insert_species(
        7,
        species_json(&[("When it retracts its long\nneck\u{000c}it shoots water.", "en")]),
    );
    fx.catalog
        .insert_sprite(&dex_core::testing::normal_sprite_url(7), vec![0u8; 4]);

    let record = fx.generator().resolve(7, false).await.unwrap();
    assert_eq!(record.flavor, "When it retracts its long neck it shoots water.");
}

#[tokio::test]
async fn absent_sprite_reference_yields_none_without_failing() {
    let fx = Fixture::new();
    fx.catalog
        .insert_profile(100, profile_json(100, "voltorb", &["electric"], false));
    fx.catalog.insert_species(100, species_json(&[("A ball.", "en")]));

    let record = fx.generator().resolve(100, false).await.unwrap();
    assert_eq!(record.sprite, None);
    assert_eq!(fx.catalog.sprite_fetches(), 0);
}

// =============================================================================
// Random draw bounds
// =============================================================================

#[tokio::test]
async fn generate_draws_within_the_configured_range() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = DexConfig::new()
        .with_cache_root(dir.path())
        .with_max_id(1)
        .with_shiny_rate(1.0 / 8192.0);
    let cache = Arc::new(ObjectCache::new(&config.cache_root));
    let catalog = Arc::new(MockCatalog::new());
    catalog.insert(1, "bulbasaur", &["grass"], "A seed.");

    let generator = EncounterGenerator::new(catalog, cache, &config);
    for _ in 0..5 {
        let record = generator.generate().await.unwrap();
        assert_eq!(record.id, 1);
    }
}

// =============================================================================
// Projection rebuild
// =============================================================================

#[tokio::test]
async fn reopened_sessions_rebuild_identical_grids()  {
    let fx = Fixture::new();
    fx.catalog.insert(25, "pikachu", &["electric"], "Zap.");
    fx.catalog.insert(6, "charizard", &["fire", "flying"], "Burn.");

    {
        let mut session = fx.session().await;
        let pikachu = fx.generator().resolve(25, false).await.unwrap();
        session.apply(pikachu, Utc::now()).await;
        let charizard = fx.generator().resolve(6, true).await.unwrap();
        session.apply(charizard, Utc::now()).await;
    }

    let first = fx.session().await;
    let second = fx.session().await;
    assert_eq!(first.grid(), second.grid());
    assert_eq!(first.grid().revealed_count(), 2);

    // The rebuilt grid points at the cached normal sprite.
    let slot = first.grid().slot(25).unwrap();
    assert_eq!(
        slot.sprite,
        fx.cache.cached_path(25, CacheKind::SpriteNormal)
    );
}
