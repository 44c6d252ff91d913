//! ResourceArc Wrappers
//!
//! Persistent entity tables shared between reads.

use crate::sax::EntityMap;
use rustler::ResourceArc;
use std::sync::Mutex;

/// Entity table that outlives a single NIF call
pub struct EntityTableResource {
    pub entities: Mutex<EntityMap>,
}

impl EntityTableResource {
    pub fn new() -> Self {
        EntityTableResource {
            entities: Mutex::new(EntityMap::new()),
        }
    }

    /// Run `f` with the table locked.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if the table mutex is poisoned.
    pub fn with_table<F, R>(&self, f: F) -> Result<R, &'static str>
    where
        F: FnOnce(&mut EntityMap) -> R,
    {
        let mut guard = self.entities.lock().map_err(|_| "mutex_poisoned")?;
        Ok(f(&mut guard))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for EntityTableResource {}

impl Default for EntityTableResource {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for the ResourceArc
pub type EntityTableRef = ResourceArc<EntityTableResource>;
