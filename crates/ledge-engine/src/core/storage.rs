//! Sparse per-kind component storage.
//!
//! One `ComponentStorage<T>` holds every `T` in the scene, indexed by the
//! owning entity's index. Holes are `None`. Hundreds of entities per level
//! keep a flat vector cheaper than any hashing scheme.

use crate::api::types::Entity;

pub struct ComponentStorage<T> {
    data: Vec<Option<T>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn ensure_capacity(&mut self, index: usize) {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
    }

    /// Attach a component, replacing any previous one of the same kind.
    pub fn insert(&mut self, entity: Entity, component: T) {
        let idx = entity.index() as usize;
        self.ensure_capacity(idx);
        self.data[idx] = Some(component);
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.data
            .get_mut(entity.index() as usize)
            .and_then(|slot| slot.take())
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.data
            .get(entity.index() as usize)
            .and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.data
            .get_mut(entity.index() as usize)
            .and_then(|slot| slot.as_mut())
    }

    /// Drop whatever lives in the slot. Called on despawn.
    pub fn clear_slot(&mut self, index: u32) {
        if let Some(slot) = self.data.get_mut(index as usize) {
            *slot = None;
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_previous_value() {
        let mut storage = ComponentStorage::new();
        let e = Entity::new(2, 0);
        storage.insert(e, 1);
        storage.insert(e, 7);
        assert_eq!(storage.get(e), Some(&7));
    }

    #[test]
    fn sparse_slots_stay_empty() {
        let mut storage = ComponentStorage::new();
        storage.insert(Entity::new(40, 0), "far");
        assert_eq!(storage.get(Entity::new(10, 0)), None);
        assert_eq!(storage.get(Entity::new(40, 0)), Some(&"far"));
    }

    #[test]
    fn remove_and_clear_slot() {
        let mut storage = ComponentStorage::new();
        let a = Entity::new(0, 0);
        let b = Entity::new(1, 0);
        storage.insert(a, 'a');
        storage.insert(b, 'b');
        assert_eq!(storage.remove(a), Some('a'));
        storage.clear_slot(1);
        storage.clear_slot(99);
        assert_eq!(storage.get(b), None);
        assert_eq!(storage.remove(Entity::new(5, 0)), None);
    }
}
