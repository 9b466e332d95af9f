//! Hash-bucketed identity index for kernel entity handles.
//!
//! Geometry kernels hand out fresh handle objects each time an entity is
//! reached (through the model, through a face's wire, through a shell...),
//! so neither pointer identity nor `PartialEq` on the handle is a usable
//! notion of "same face". The kernel instead supplies a hash code and an
//! exact-identity predicate. The index buckets handles by hash and scans the
//! bucket with the predicate:
//!
//! - handles of one logical entity collapse to one id;
//! - different entities whose hashes collide keep distinct ids.
//!
//! The index only grows. Ids are dense and assigned in discovery order.

use hashbrown::HashMap;
use std::marker::PhantomData;

use crate::mesh_error::MeshStitchError;
use crate::topology::entity::EntityKey;

/// Maps kernel entity handles `E` to dense typed ids `I`.
#[derive(Clone, Debug)]
pub struct EntityIndex<E, I> {
    buckets: HashMap<u64, Vec<u32>>,
    entities: Vec<E>,
    _id: PhantomData<I>,
}

impl<E, I> Default for EntityIndex<E, I> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            entities: Vec::new(),
            _id: PhantomData,
        }
    }
}

impl<E: Clone, I: EntityKey> EntityIndex<E, I> {
    /// Empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `entity`, assigning a new one if no entity in the
    /// `hash` bucket satisfies `same`.
    ///
    /// The first handle seen for an entity becomes its representative.
    pub fn identify<F>(&mut self, entity: &E, hash: u64, same: F) -> Result<I, MeshStitchError>
    where
        F: Fn(&E, &E) -> bool,
    {
        if let Some(id) = self.lookup(entity, hash, &same) {
            return Ok(id);
        }
        let raw = u32::try_from(self.entities.len())
            .map_err(|_| MeshStitchError::IndexOverflow(self.entities.len()))?;
        self.entities.push(entity.clone());
        self.buckets.entry(hash).or_default().push(raw);
        Ok(I::from_index(raw))
    }

    /// Returns the id of `entity` if it has been identified before.
    pub fn get<F>(&self, entity: &E, hash: u64, same: F) -> Option<I>
    where
        F: Fn(&E, &E) -> bool,
    {
        self.lookup(entity, hash, &same)
    }

    fn lookup<F>(&self, entity: &E, hash: u64, same: &F) -> Option<I>
    where
        F: Fn(&E, &E) -> bool,
    {
        self.buckets.get(&hash).and_then(|bucket| {
            bucket
                .iter()
                .copied()
                .find(|&raw| same(&self.entities[raw as usize], entity))
                .map(I::from_index)
        })
    }

    /// Representative handle for `id`.
    pub fn entity(&self, id: I) -> Option<&E> {
        self.entities.get(id.index())
    }

    /// Number of distinct entities identified so far.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates `(id, representative)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &E)> + '_ {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (I::from_index(i as u32), e))
    }
}
