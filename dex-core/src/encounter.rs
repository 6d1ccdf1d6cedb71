//! Encounter generation.
//!
//! One call to [`EncounterGenerator::generate`] produces one complete
//! [`EncounterRecord`]: a uniform identifier draw, an independent shiny coin
//! flip, and display fields resolved through the object cache. Any fetch or
//! parse failure aborts the whole attempt; no partial record is emitted.

use crate::cache::{CacheError, CacheKind, ObjectCache};
use crate::catalog::Catalog;
use crate::config::DexConfig;
use pokeapi::{Pokemon, Species};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Placeholder used when a species has no flavor text in the configured
/// language.
pub const NO_FLAVOR_TEXT: &str = "(No flavor text found)";

/// Errors from encounter generation.
#[derive(Debug, Error)]
pub enum EncounterError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] pokeapi::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// One generated encounter. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRecord {
    /// Creature identifier.
    pub id: u32,
    /// Capitalized display name.
    pub name: String,
    /// Capitalized type names, in slot order.
    pub types: Vec<String>,
    /// Normalized flavor text in the configured language.
    pub flavor: String,
    /// Cached sprite for the rolled variant, when the catalog has one.
    pub sprite: Option<PathBuf>,
    /// Whether this encounter rolled shiny.
    pub shiny: bool,
}

impl EncounterRecord {
    /// Dex number label, e.g. `#006`.
    pub fn dex_label(&self) -> String {
        dex_label(self.id)
    }

    /// Types joined for display, e.g. `Grass/Poison`.
    pub fn type_line(&self) -> String {
        self.types.join("/")
    }
}

/// Format an identifier as a dex number label.
pub fn dex_label(id: u32) -> String {
    format!("#{id:03}")
}

/// Produces random encounters resolved through the object cache.
pub struct EncounterGenerator<C> {
    catalog: Arc<C>,
    cache: Arc<ObjectCache>,
    max_id: u32,
    shiny_rate: f64,
    language: String,
}

impl<C: Catalog> EncounterGenerator<C> {
    /// Create a generator from the widget configuration.
    pub fn new(catalog: Arc<C>, cache: Arc<ObjectCache>, config: &DexConfig) -> Self {
        Self {
            catalog,
            cache,
            max_id: config.max_id,
            shiny_rate: config.shiny_rate,
            language: config.language.clone(),
        }
    }

    /// Generate one random encounter.
    ///
    /// The identifier is drawn uniformly from `1..=max_id` and the shiny
    /// flag is an independent Bernoulli trial; no state is carried between
    /// calls.
    pub async fn generate(&self) -> Result<EncounterRecord, EncounterError> {
        let (id, shiny) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(1..=self.max_id),
                rng.gen_bool(self.shiny_rate),
            )
        };
        self.resolve(id, shiny).await
    }

    /// Resolve display fields for a specific draw.
    pub async fn resolve(&self, id: u32, shiny: bool) -> Result<EncounterRecord, EncounterError> {
        let profile_raw = self
            .cache
            .get_or_fetch(id, CacheKind::Profile, || self.catalog.profile(id))
            .await?;
        let profile = Pokemon::from_json(&String::from_utf8_lossy(&profile_raw))?;

        let species_raw = self
            .cache
            .get_or_fetch(id, CacheKind::Species, || self.catalog.species(id))
            .await?;
        let species = Species::from_json(&String::from_utf8_lossy(&species_raw))?;

        let name = capitalize(&profile.name);

        let mut slots = profile.types.clone();
        slots.sort_by_key(|t| t.slot);
        let types: Vec<String> = slots.iter().map(|t| capitalize(&t.kind.name)).collect();

        let flavor = pick_flavor(&species, &self.language);

        let sprite = match profile.sprite_url(shiny) {
            Some(url) => {
                let kind = CacheKind::sprite(shiny);
                self.cache
                    .get_or_fetch(id, kind, || self.catalog.sprite(url))
                    .await?;
                Some(self.cache.entry_path(id, kind))
            }
            None => None,
        };

        debug!(id, shiny, name = %name, "resolved encounter");

        Ok(EncounterRecord {
            id,
            name,
            types,
            flavor,
            sprite,
            shiny,
        })
    }
}

/// Pick one flavor text uniformly among the entries in `language`, falling
/// back to the placeholder when none exist.
fn pick_flavor(species: &Species, language: &str) -> String {
    let entries = species.flavor_texts(language);
    if entries.is_empty() {
        return NO_FLAVOR_TEXT.to_string();
    }
    let pick = rand::thread_rng().gen_range(0..entries.len());
    normalize_flavor(entries[pick])
}

/// Collapse internal newlines and form feeds to spaces and trim the ends.
pub fn normalize_flavor(raw: &str) -> String {
    raw.replace(['\n', '\u{000c}'], " ").trim().to_string()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
