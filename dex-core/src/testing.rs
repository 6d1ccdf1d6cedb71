//! Testing utilities.
//!
//! `MockCatalog` is a scripted stand-in for the remote catalog: tests
//! register per-identifier documents and sprite bytes up front, then assert
//! on how often each endpoint was actually hit. Unscripted identifiers
//! behave like a missing remote resource.

use crate::catalog::Catalog;
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A scripted catalog that never touches the network.
#[derive(Default)]
pub struct MockCatalog {
    profiles: Mutex<HashMap<u32, String>>,
    species: Mutex<HashMap<u32, String>>,
    sprites: Mutex<HashMap<String, Vec<u8>>>,
    profile_fetches: AtomicUsize,
    species_fetches: AtomicUsize,
    sprite_fetches: AtomicUsize,
}

impl MockCatalog {
    /// Create an empty scripted catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a creature with standard sprite references and one English
    /// flavor text.
    pub fn insert(&self, id: u32, name: &str, types: &[&str], flavor: &str) {
        self.insert_profile(id, profile_json(id, name, types, true));
        self.insert_species(id, species_json(&[(flavor, "en")]));
        self.insert_sprite(&normal_sprite_url(id), vec![0u8; 4]);
        self.insert_sprite(&shiny_sprite_url(id), vec![1u8; 4]);
    }

    /// Script a raw `pokemon/{id}` document.
    pub fn insert_profile(&self, id: u32, body: String) {
        self.profiles.lock().unwrap().insert(id, body);
    }

    /// Script a raw `pokemon-species/{id}` document.
    pub fn insert_species(&self, id: u32, body: String) {
        self.species.lock().unwrap().insert(id, body);
    }

    /// Script sprite bytes for a sprite reference.
    pub fn insert_sprite(&self, url: &str, bytes: Vec<u8>) {
        self.sprites.lock().unwrap().insert(url.to_string(), bytes);
    }

    /// How many profile fetches reached the catalog.
    pub fn profile_fetches(&self) -> usize {
        self.profile_fetches.load(Ordering::SeqCst)
    }

    /// How many species fetches reached the catalog.
    pub fn species_fetches(&self) -> usize {
        self.species_fetches.load(Ordering::SeqCst)
    }

    /// How many sprite fetches reached the catalog.
    pub fn sprite_fetches(&self) -> usize {
        self.sprite_fetches.load(Ordering::SeqCst)
    }

    fn missing(what: &str) -> pokeapi::Error {
        pokeapi::Error::Api {
            status: 404,
            message: format!("{what} not scripted"),
        }
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn profile(&self, id: u32) -> Result<Vec<u8>, pokeapi::Error> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        self.profiles
            .lock()
            .unwrap()
            .get(&id)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| Self::missing("profile"))
    }

    async fn species(&self, id: u32) -> Result<Vec<u8>, pokeapi::Error> {
        self.species_fetches.fetch_add(1, Ordering::SeqCst);
        self.species
            .lock()
            .unwrap()
            .get(&id)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| Self::missing("species"))
    }

    async fn sprite(&self, url: &str) -> Result<Vec<u8>, pokeapi::Error> {
        self.sprite_fetches.fetch_add(1, Ordering::SeqCst);
        self.sprites
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Self::missing("sprite"))
    }
}

/// Build a `pokemon/{id}` document for tests.
pub fn profile_json(id: u32, name: &str, types: &[&str], with_sprites: bool) -> String {
    let type_objs: Vec<_> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t}}))
        .collect();
    let sprites = if with_sprites {
        json!({
            "front_default": normal_sprite_url(id),
            "front_shiny": shiny_sprite_url(id),
        })
    } else {
        json!({"front_default": null, "front_shiny": null})
    };
    json!({"name": name, "types": type_objs, "sprites": sprites}).to_string()
}

/// Build a `pokemon-species/{id}` document from `(text, language)` pairs.
pub fn species_json(entries: &[(&str, &str)]) -> String {
    let list: Vec<_> = entries
        .iter()
        .map(|(text, lang)| json!({"flavor_text": text, "language": {"name": lang}}))
        .collect();
    json!({ "flavor_text_entries": list }).to_string()
}

/// The scripted normal sprite reference for `id`.
pub fn normal_sprite_url(id: u32) -> String {
    format!("https://sprites.test/{id}.png")
}

/// The scripted shiny sprite reference for `id`.
pub fn shiny_sprite_url(id: u32) -> String {
    format!("https://sprites.test/shiny/{id}.png")
}
