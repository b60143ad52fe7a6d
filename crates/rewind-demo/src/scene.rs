#![forbid(unsafe_code)]

//! In-memory scene the demo commands edit.
//!
//! A [`Scene`] has a prefab library (names that can be instantiated) and a
//! set of placed instances. Commands hold a [`SharedScene`] handle so that
//! they can reach the scene again when undone or redone.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, Mul};
use std::sync::{Arc, Mutex, MutexGuard};

/// Handle shared between the session and the commands it records.
pub type SharedScene = Arc<Mutex<Scene>>;

/// Lock a shared scene, recovering the data from a poisoned lock.
pub fn lock(scene: &SharedScene) -> MutexGuard<'_, Scene> {
    scene.lock().unwrap_or_else(|e| e.into_inner())
}

/// Errors from scene edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("'{0}' is not a prefab")]
    UnknownPrefab(String),
    #[error("no object with id {0}")]
    UnknownObject(ObjectId),
}

// ============================================================================
// Vec3
// ============================================================================

/// Position in scene space (y is up).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector pointing backwards, `(0, 0, -1)`.
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotate around the up axis by `degrees` (left-handed, clockwise seen
    /// from above).
    #[must_use]
    pub fn rotate_y(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: self.z * cos - self.x * sin,
        }
    }

    #[must_use]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self + other * -1.0).length()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ============================================================================
// Objects
// ============================================================================

/// Identifier of a placed instance. Never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed copy of a prefab.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub id: ObjectId,
    pub name: String,
    pub position: Vec3,
}

/// Prefab library plus placed instances.
#[derive(Debug, Default)]
pub struct Scene {
    prefabs: BTreeSet<String>,
    objects: BTreeMap<ObjectId, Instance>,
    next_id: u64,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in a [`SharedScene`] handle.
    #[must_use]
    pub fn shared(self) -> SharedScene {
        Arc::new(Mutex::new(self))
    }

    /// Add `name` to the prefab library. Returns false if already present.
    pub fn add_prefab(&mut self, name: impl Into<String>) -> bool {
        self.prefabs.insert(name.into())
    }

    /// Remove `name` from the prefab library. Placed instances stay.
    pub fn remove_prefab(&mut self, name: &str) -> bool {
        self.prefabs.remove(name)
    }

    #[must_use]
    pub fn is_prefab(&self, name: &str) -> bool {
        self.prefabs.contains(name)
    }

    pub fn prefabs(&self) -> impl Iterator<Item = &str> + '_ {
        self.prefabs.iter().map(String::as_str)
    }

    /// Place a copy of `prefab` at `position`.
    pub fn instantiate(&mut self, prefab: &str, position: Vec3) -> Result<ObjectId, SceneError> {
        if !self.is_prefab(prefab) {
            return Err(SceneError::UnknownPrefab(prefab.to_string()));
        }
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            Instance {
                id,
                name: prefab.to_string(),
                position,
            },
        );
        Ok(id)
    }

    /// Remove a placed instance, returning it.
    pub fn destroy(&mut self, id: ObjectId) -> Result<Instance, SceneError> {
        self.objects.remove(&id).ok_or(SceneError::UnknownObject(id))
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Instance> {
        self.objects.get(&id)
    }

    /// Number of placed instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Placed instances in creation order.
    pub fn instances(&self) -> impl Iterator<Item = &Instance> + '_ {
        self.objects.values()
    }
}
