//! The remote catalog seam.

use async_trait::async_trait;

/// The remote catalog encounters are resolved against.
///
/// [`pokeapi::Client`] is the production implementation; tests substitute
/// the scripted catalog from [`crate::testing`]. Methods return raw bodies
/// so the cache can persist them verbatim.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Raw `pokemon/{id}` JSON body.
    async fn profile(&self, id: u32) -> Result<Vec<u8>, pokeapi::Error>;

    /// Raw `pokemon-species/{id}` JSON body.
    async fn species(&self, id: u32) -> Result<Vec<u8>, pokeapi::Error>;

    /// Sprite bytes for a sprite reference.
    async fn sprite(&self, url: &str) -> Result<Vec<u8>, pokeapi::Error>;
}

#[async_trait]
impl Catalog for pokeapi::Client {
    async fn profile(&self, id: u32) -> Result<Vec<u8>, pokeapi::Error> {
        self.pokemon(id).await.map(String::into_bytes)
    }

    async fn species(&self, id: u32) -> Result<Vec<u8>, pokeapi::Error> {
        pokeapi::Client::species(self, id).await.map(String::into_bytes)
    }

    async fn sprite(&self, url: &str) -> Result<Vec<u8>, pokeapi::Error> {
        pokeapi::Client::sprite(self, url).await
    }
}
