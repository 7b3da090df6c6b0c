use async_trait::async_trait;
use indexmap::IndexMap;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::entity::new_id;
use crate::{Entity, EntityStore, Filter, StoreError};

/// Process-local store, emptied on restart
#[derive(Debug)]
pub struct MemoryStore<E> {
    entities: RwLock<IndexMap<String, E>>,
}

impl<E> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(IndexMap::new()),
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn get(&self, id: &str) -> Result<Option<E>, StoreError> {
        Ok(self.entities.read().await.get(id).cloned())
    }

    async fn create(&self, mut entity: E) -> Result<E, StoreError> {
        entity.assign(new_id(), Timestamp::now());

        self.entities
            .write()
            .await
            .insert(entity.id().to_owned(), entity.clone());

        Ok(entity)
    }

    async fn search(&self, filter: Filter<'_, E>) -> Result<Vec<E>, StoreError> {
        Ok(self
            .entities
            .read()
            .await
            .values()
            .filter(|entity| filter(*entity))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, mut entity: E) -> Result<Option<E>, StoreError> {
        let mut entities = self.entities.write().await;

        let Some(slot) = entities.get_mut(id) else {
            return Ok(None);
        };

        entity.carry_over(slot, Timestamp::now());
        slot.clone_from(&entity);

        Ok(Some(entity))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.entities.write().await.shift_remove(id).is_some())
    }
}
