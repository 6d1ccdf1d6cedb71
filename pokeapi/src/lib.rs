//! Minimal PokeAPI REST client.
//!
//! This crate provides a focused client for the two PokeAPI resources the
//! Pokédex widget consumes (`pokemon` and `pokemon-species`), plus raw sprite
//! downloads. Endpoint methods return the response body verbatim so callers
//! can cache it byte-for-byte; typed views are available through the payload
//! structs in this module.

use serde::Deserialize;
use thiserror::Error;

const API_BASE: &str = "https://pokeapi.co/api/v2";

/// Errors that can occur when talking to PokeAPI.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// PokeAPI client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base: String,
}

impl Client {
    /// Create a new client against the public PokeAPI endpoint.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base: API_BASE.to_string(),
        }
    }

    /// Override the API base URL (used by tests against a local server).
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Fetch the `pokemon/{id}` document as raw JSON text.
    pub async fn pokemon(&self, id: u32) -> Result<String, Error> {
        self.get_text(format!("{}/pokemon/{id}", self.base)).await
    }

    /// Fetch the `pokemon-species/{id}` document as raw JSON text.
    pub async fn species(&self, id: u32) -> Result<String, Error> {
        self.get_text(format!("{}/pokemon-species/{id}", self.base))
            .await
    }

    /// Download a sprite image.
    pub async fn sprite(&self, url: &str) -> Result<Vec<u8>, Error> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn get_text(&self, url: String) -> Result<String, Error> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, message });
        }

        response.text().await.map_err(|e| Error::Network(e.to_string()))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// A named resource reference, the `{ "name": ... }` object PokeAPI nests
/// everywhere.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

/// One slot in a Pokémon's type list.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// Front sprite references for a Pokémon. Either variant may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

/// The subset of the `pokemon/{id}` document the widget consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl Pokemon {
    /// Parse a raw `pokemon/{id}` body.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))
    }

    /// The sprite reference for the requested variant, if the API has one.
    pub fn sprite_url(&self, shiny: bool) -> Option<&str> {
        if shiny {
            self.sprites.front_shiny.as_deref()
        } else {
            self.sprites.front_default.as_deref()
        }
    }
}

/// One flavor text entry with its language tag.
#[derive(Debug, Clone, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
}

/// The subset of the `pokemon-species/{id}` document the widget consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Species {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
}

impl Species {
    /// Parse a raw `pokemon-species/{id}` body.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))
    }

    /// All flavor texts tagged with the given language code, in order.
    pub fn flavor_texts(&self, language: &str) -> Vec<&str> {
        self.flavor_text_entries
            .iter()
            .filter(|e| e.language.name == language)
            .map(|e| e.flavor_text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POKEMON_JSON: &str = r#"{
        "name": "pikachu",
        "types": [
            {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
        ],
        "sprites": {
            "front_default": "https://example.test/25.png",
            "front_shiny": "https://example.test/shiny/25.png",
            "back_default": null
        },
        "weight": 60
    }"#;

    const SPECIES_JSON: &str = r#"{
        "flavor_text_entries": [
            {"flavor_text": "Il aime les baies.", "language": {"name": "fr"}},
            {"flavor_text": "It loves\nberries.", "language": {"name": "en"}},
            {"flavor_text": "It stores electricity.", "language": {"name": "en"}}
        ]
    }"#;

    #[test]
    fn parses_pokemon_subset() {
        let pokemon = Pokemon::from_json(POKEMON_JSON).unwrap();
        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(pokemon.types.len(), 1);
        assert_eq!(pokemon.types[0].slot, 1);
        assert_eq!(pokemon.types[0].kind.name, "electric");
    }

    #[test]
    fn sprite_url_selects_variant() {
        let pokemon = Pokemon::from_json(POKEMON_JSON).unwrap();
        assert_eq!(pokemon.sprite_url(false), Some("https://example.test/25.png"));
        assert_eq!(
            pokemon.sprite_url(true),
            Some("https://example.test/shiny/25.png")
        );
    }

    #[test]
    fn missing_sprites_default_to_none() {
        let pokemon = Pokemon::from_json(r#"{"name": "missingno"}"#).unwrap();
        assert_eq!(pokemon.sprite_url(false), None);
        assert_eq!(pokemon.sprite_url(true), None);
        assert!(pokemon.types.is_empty());
    }

    #[test]
    fn flavor_texts_filter_by_language() {
        let species = Species::from_json(SPECIES_JSON).unwrap();
        let english = species.flavor_texts("en");
        assert_eq!(english.len(), 2);
        assert_eq!(english[0], "It loves\nberries.");

        assert_eq!(species.flavor_texts("fr").len(), 1);
        assert!(species.flavor_texts("de").is_empty());
    }

    #[test]
    fn parse_failure_is_reported() {
        let err = Pokemon::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn client_base_override() {
        let client = Client::new().with_base("http://localhost:9000");
        assert_eq!(client.base, "http://localhost:9000");
    }
}
