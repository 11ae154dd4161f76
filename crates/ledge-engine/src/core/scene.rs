//! Entity store.
//!
//! Entities are generational handles; their data lives in one sparse
//! `ComponentStorage` per component kind. Storages are public fields so a
//! system can borrow two kinds mutably at once. Generic access goes through
//! the `Component` trait: `scene.get::<WorldPosition>(e)`.
//!
//! Queries visit entities in ascending index order, which keeps every
//! system pass deterministic.

use crate::api::types::Entity;
use crate::components::*;
use crate::core::storage::ComponentStorage;

/// Hands out entity handles and reuses freed slots with a bumped generation.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_indices: Vec<u32>,
    alive_count: usize,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Entity {
        self.alive_count += 1;
        if let Some(index) = self.free_indices.pop() {
            self.alive[index as usize] = true;
            Entity::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            Entity::new(index, 0)
        }
    }

    /// Returns false if the handle was already dead.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let idx = entity.index() as usize;
        self.alive[idx] = false;
        self.generations[idx] += 1;
        self.free_indices.push(entity.index());
        self.alive_count -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index() as usize;
        idx < self.generations.len()
            && self.alive[idx]
            && self.generations[idx] == entity.generation()
    }

    /// Live handles in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(idx, _)| Entity::new(idx as u32, self.generations[idx]))
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Forget every slot. The next allocation starts again at index 0,
    /// generation 0.
    pub fn reset(&mut self) {
        self.generations.clear();
        self.alive.clear();
        self.free_indices.clear();
        self.alive_count = 0;
    }
}

/// A component kind the scene knows how to store.
pub trait Component: Sized + 'static {
    fn storage(scene: &Scene) -> &ComponentStorage<Self>;
    fn storage_mut(scene: &mut Scene) -> &mut ComponentStorage<Self>;
}

macro_rules! scene_storages {
    ($($field:ident: $ty:ty),* $(,)?) => {
        /// All entities of a running level and their components.
        #[derive(Default)]
        pub struct Scene {
            allocator: EntityAllocator,
            $(pub $field: ComponentStorage<$ty>,)*
        }

        impl Scene {
            fn clear_slots(&mut self, index: u32) {
                $(self.$field.clear_slot(index);)*
            }

            fn clear_storages(&mut self) {
                $(self.$field.clear();)*
            }
        }

        $(
            impl Component for $ty {
                fn storage(scene: &Scene) -> &ComponentStorage<Self> {
                    &scene.$field
                }

                fn storage_mut(scene: &mut Scene) -> &mut ComponentStorage<Self> {
                    &mut scene.$field
                }
            }
        )*
    };
}

scene_storages! {
    positions: WorldPosition,
    bounding_boxes: BoundingBox,
    physicals: Physical,
    players: PlayerControlled,
    player_damaging: PlayerDamaging,
    solid_bodies: SolidBody,
    geometry_links: MapGeometryLink,
    elevators: Elevator,
    triggers: Trigger,
    security_cameras: SecurityCamera,
    damage_inflicting: DamageInflicting,
    shootables: Shootable,
    projectiles: Projectile,
    collectables: Collectable,
    sprites: Sprite,
    animations: Animated,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity with no components.
    pub fn spawn(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Start building a new entity.
    pub fn build(&mut self) -> EntityBuilder<'_> {
        let entity = self.spawn();
        EntityBuilder {
            scene: self,
            entity,
        }
    }

    /// Destroy an entity and all its components. Dead handles are ignored.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.free(entity) {
            return false;
        }
        self.clear_slots(entity.index());
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Attach a component. Panics on a dead handle.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) {
        assert!(
            self.is_alive(entity),
            "insert on dead entity {entity:?}"
        );
        T::storage_mut(self).insert(entity, component);
    }

    /// Detach a component, returning it.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.is_alive(entity) {
            return None;
        }
        T::storage_mut(self).remove(entity)
    }

    /// Component of a live entity, if attached.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        T::storage(self).get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        T::storage_mut(self).get_mut(entity)
    }

    /// Component an entity is required to carry. Panics if it is missing.
    pub fn component<T: Component>(&self, entity: Entity) -> &T {
        match self.get::<T>(entity) {
            Some(component) => component,
            None => panic!(
                "{entity:?} has no {}",
                std::any::type_name::<T>()
            ),
        }
    }

    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        match self.get_mut::<T>(entity) {
            Some(component) => component,
            None => panic!(
                "{entity:?} has no {}",
                std::any::type_name::<T>()
            ),
        }
    }

    /// World-space bounding box of an entity with a position and a box.
    pub fn world_box(&self, entity: Entity) -> Option<WorldBox> {
        let pos = self.get::<WorldPosition>(entity)?;
        let bbox = self.get::<BoundingBox>(entity)?;
        Some(bbox.to_world(pos))
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Live entities, ascending by index.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.allocator.iter()
    }

    /// Live entities carrying a `T`.
    pub fn query1<T: Component>(&self) -> Vec<Entity> {
        self.entities().filter(|e| self.has::<T>(*e)).collect()
    }

    /// Live entities carrying both an `A` and a `B`.
    pub fn query<A: Component, B: Component>(&self) -> Vec<Entity> {
        self.entities()
            .filter(|e| self.has::<A>(*e) && self.has::<B>(*e))
            .collect()
    }

    pub fn query3<A: Component, B: Component, C: Component>(&self) -> Vec<Entity> {
        self.entities()
            .filter(|e| self.has::<A>(*e) && self.has::<B>(*e) && self.has::<C>(*e))
            .collect()
    }

    /// Visit every live entity carrying both an `A` and a `B`.
    pub fn each<A: Component, B: Component>(&self, mut f: impl FnMut(Entity, &A, &B)) {
        let a = A::storage(self);
        let b = B::storage(self);
        for entity in self.allocator.iter() {
            if let (Some(ca), Some(cb)) = (a.get(entity), b.get(entity)) {
                f(entity, ca, cb);
            }
        }
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.allocator.alive_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destroy every entity and reset handle allocation, so rebuilding the
    /// same content yields the same handles.
    pub fn reset(&mut self) {
        self.clear_storages();
        self.allocator.reset();
    }
}

/// Adds components to a freshly spawned entity.
pub struct EntityBuilder<'a> {
    scene: &'a mut Scene,
    entity: Entity,
}

impl EntityBuilder<'_> {
    pub fn with<T: Component>(self, component: T) -> Self {
        self.scene.insert(self.entity, component);
        self
    }

    pub fn id(&self) -> Entity {
        self.entity
    }
}
