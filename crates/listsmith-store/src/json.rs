use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::Mutex;

use crate::entity::new_id;
use crate::{Entity, EntityStore, Filter, StoreError};

/// One pretty-printed JSON array file per collection
///
/// Every operation reads the whole file; writes go to a sibling temp
/// file that is then renamed over the original. A per-store mutex
/// serializes read-modify-write cycles within the process.
#[derive(Debug)]
pub struct JsonFileStore<E> {
    path: PathBuf,
    lock: Mutex<()>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> JsonFileStore<E> {
    /// Open `<data_dir>/<collection>.json`, creating it as `[]` if missing
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(data_dir).await.map_err(io_error::<E>)?;

        let path = data_dir.join(format!("{}.json", E::COLLECTION));

        match tokio::fs::metadata(&path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tokio::fs::write(&path, "[]").await.map_err(io_error::<E>)?;
            }
            Err(e) => return Err(io_error::<E>(e)),
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
            _entity: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<E>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error::<E>(e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            collection: E::COLLECTION,
            source,
        })
    }

    async fn write(&self, entities: &[E]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(entities).map_err(|source| StoreError::Corrupt {
            collection: E::COLLECTION,
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, data).await.map_err(io_error::<E>)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_error::<E>)?;

        Ok(())
    }
}

fn io_error<E: Entity>(source: std::io::Error) -> StoreError {
    StoreError::Io {
        collection: E::COLLECTION,
        source,
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for JsonFileStore<E> {
    async fn get(&self, id: &str) -> Result<Option<E>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.into_iter().find(|entity| entity.id() == id))
    }

    async fn create(&self, mut entity: E) -> Result<E, StoreError> {
        let _guard = self.lock.lock().await;
        let mut entities = self.read().await?;

        entity.assign(new_id(), Timestamp::now());
        entities.push(entity.clone());
        self.write(&entities).await?;

        tracing::debug!(collection = E::COLLECTION, id = entity.id(), "created entity");
        Ok(entity)
    }

    async fn search(&self, filter: Filter<'_, E>) -> Result<Vec<E>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.into_iter().filter(|entity| filter(entity)).collect())
    }

    async fn update(&self, id: &str, mut entity: E) -> Result<Option<E>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut entities = self.read().await?;

        let Some(slot) = entities.iter_mut().find(|existing| existing.id() == id) else {
            return Ok(None);
        };

        entity.carry_over(slot, Timestamp::now());
        slot.clone_from(&entity);
        self.write(&entities).await?;

        Ok(Some(entity))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut entities = self.read().await?;
        let before = entities.len();

        entities.retain(|entity| entity.id() != id);

        if entities.len() == before {
            return Ok(false);
        }

        self.write(&entities).await?;
        Ok(true)
    }
}
