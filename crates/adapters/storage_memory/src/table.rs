//! Generic keyed container shared by the device and location repositories.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use inventory_app::ports::{Clock, IdGenerator};
use inventory_domain::device::Device;
use inventory_domain::error::{ConflictError, InternalError, InventoryError, NotFoundError};
use inventory_domain::id::{DeviceId, LocationId};
use inventory_domain::location::Location;
use inventory_domain::time::Timestamp;

/// What the table needs to know about a stored row.
pub(crate) trait Record: Clone {
    type Id: Clone + Eq + Hash + Display + From<String>;

    /// Entity name used in error messages and logs.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
    fn has_id(&self) -> bool;
    fn set_id(&mut self, id: Self::Id);
    fn name(&self) -> &str;
    fn created_at(&self) -> Timestamp;

    /// Apply server-owned timestamps. `deleted_at` is never client-settable.
    fn stamp(&mut self, created_at: Timestamp, updated_at: Option<Timestamp>);
}

impl Record for Device {
    type Id = DeviceId;
    const KIND: &'static str = "Device";

    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn has_id(&self) -> bool {
        !self.id.is_unassigned()
    }

    fn set_id(&mut self, id: DeviceId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn stamp(&mut self, created_at: Timestamp, updated_at: Option<Timestamp>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self.deleted_at = None;
    }
}

impl Record for Location {
    type Id = LocationId;
    const KIND: &'static str = "Location";

    fn id(&self) -> &LocationId {
        &self.id
    }

    fn has_id(&self) -> bool {
        !self.id.is_unassigned()
    }

    fn set_id(&mut self, id: LocationId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn stamp(&mut self, created_at: Timestamp, updated_at: Option<Timestamp>) {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self.deleted_at = None;
    }
}

/// A map of rows behind a single reader/writer lock.
///
/// Mutations take the write lock; lookups and scans take the read lock.
/// Rows are cloned on the way in and out, so callers never alias stored state.
pub(crate) struct Table<R: Record> {
    rows: RwLock<HashMap<R::Id, R>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl<R: Record> Table<R> {
    pub(crate) fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            clock,
            ids,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<R::Id, R>>, InventoryError> {
        self.rows
            .read()
            .map_err(|_| InternalError::LockPoisoned(R::KIND).into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<R::Id, R>>, InventoryError> {
        self.rows
            .write()
            .map_err(|_| InternalError::LockPoisoned(R::KIND).into())
    }

    fn not_found(id: &R::Id) -> InventoryError {
        NotFoundError::Id {
            entity: R::KIND,
            id: id.to_string(),
        }
        .into()
    }

    pub(crate) fn insert(&self, mut row: R) -> Result<R, InventoryError> {
        if !row.has_id() {
            row.set_id(R::Id::from(self.ids.generate()));
        }
        let mut rows = self.write()?;
        match rows.entry(row.id().clone()) {
            Entry::Occupied(entry) => Err(ConflictError::DuplicateId {
                entity: R::KIND,
                id: entry.key().to_string(),
            }
            .into()),
            Entry::Vacant(slot) => {
                row.stamp(self.clock.now(), None);
                slot.insert(row.clone());
                tracing::debug!(kind = R::KIND, id = %row.id(), "row inserted");
                Ok(row)
            }
        }
    }

    pub(crate) fn get(&self, id: &R::Id) -> Result<Option<R>, InventoryError> {
        Ok(self.read()?.get(id).cloned())
    }

    pub(crate) fn find_by_name(&self, name: &str) -> Result<Option<R>, InventoryError> {
        let rows = self.read()?;
        Ok(rows.values().find(|row| row.name() == name).cloned())
    }

    pub(crate) fn all(&self) -> Result<Vec<R>, InventoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    pub(crate) fn replace(&self, id: &R::Id, mut row: R) -> Result<R, InventoryError> {
        let mut rows = self.write()?;
        let existing = rows.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        row.set_id(id.clone());
        row.stamp(existing.created_at(), Some(self.clock.now()));
        existing.clone_from(&row);
        tracing::debug!(kind = R::KIND, %id, "row updated");
        Ok(row)
    }

    pub(crate) fn remove(&self, id: &R::Id) -> Result<(), InventoryError> {
        let mut rows = self.write()?;
        rows.remove(id).ok_or_else(|| Self::not_found(id))?;
        tracing::debug!(kind = R::KIND, %id, "row deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FrozenClock, SequentialIds};

    fn table() -> Table<Device> {
        Table::new(
            Arc::new(FrozenClock::at_epoch_plus(1_000)),
            Arc::new(SequentialIds::default()),
        )
    }

    fn device(name: &str) -> Device {
        Device::builder().name(name).build().unwrap()
    }

    #[test]
    fn should_assign_generated_id_when_missing() {
        let table = table();
        let row = table.insert(device("Node A")).unwrap();
        assert_eq!(row.id.as_str(), "id-1");
        assert_eq!(row.created_at.timestamp(), 1_000);
        assert!(row.updated_at.is_none());
    }

    #[test]
    fn should_reject_existing_id_on_insert() {
        let table = table();
        let mut row = device("Node A");
        row.id = DeviceId::new("fixed");
        table.insert(row.clone()).unwrap();

        let result = table.insert(row);
        assert!(matches!(
            result,
            Err(InventoryError::Conflict(ConflictError::DuplicateId { .. }))
        ));
        assert_eq!(table.all().unwrap().len(), 1);
    }

    #[test]
    fn should_never_accept_client_deleted_at() {
        let table = table();
        let mut row = device("Node A");
        row.deleted_at = Some(chrono::Utc::now());
        let stored = table.insert(row).unwrap();
        assert!(stored.deleted_at.is_none());
    }

    #[test]
    fn should_not_alias_returned_rows() {
        let table = table();
        let stored = table.insert(device("Node A")).unwrap();

        let mut copy = table.get(&stored.id).unwrap().unwrap();
        copy.name = "mutated".into();

        assert_eq!(table.get(&stored.id).unwrap().unwrap().name, "Node A");
    }

    #[test]
    fn should_return_not_found_when_replacing_or_removing_missing_row() {
        let table = table();
        let ghost = DeviceId::new("ghost");
        assert!(matches!(
            table.replace(&ghost, device("x")),
            Err(InventoryError::NotFound(_))
        ));
        assert!(matches!(
            table.remove(&ghost),
            Err(InventoryError::NotFound(_))
        ));
    }
}
