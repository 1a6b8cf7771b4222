// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! TextureManager is the name-keyed texture cache.
//! A path is decoded and uploaded at most once for the lifetime of the
//! manager; later lookups hand out the same `Rc`.
//!
//! Single threaded only: entries are `Rc`, so the manager is not `Send`.

use crate::render::{gl::GlApi, texture::Texture};
use log::{debug, warn};
use std::collections::HashMap;
use std::rc::Rc;

pub struct TextureManager<G: GlApi> {
    pub textures: HashMap<String, Rc<Texture<G>>>,
}

impl<G: GlApi> Default for TextureManager<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GlApi> TextureManager<G> {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    pub fn get_texture_from_name(&self, name: &str) -> Option<Rc<Texture<G>>> {
        self.textures.get(name).cloned()
    }

    /// Registers `texture` under `name` and returns the cached instance.
    /// If the name is taken the existing entry wins and `texture` is dropped
    /// (which releases its handle).
    pub fn add_texture(&mut self, texture: Texture<G>, name: &str) -> Rc<Texture<G>> {
        match self.textures.get(name) {
            Some(existing) => {
                warn!("texture {} already cached, keeping the first one", name);
                existing.clone()
            }
            None => {
                let texture = Rc::new(texture);
                self.textures.insert(name.to_string(), texture.clone());
                debug!("texture cached:{} ({} total)", name, self.textures.len());
                texture
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Forgets `name`. The texture is released once the last `Rc` goes away.
    pub fn remove(&mut self, name: &str) -> Option<Rc<Texture<G>>> {
        self.textures.remove(name)
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
