#![forbid(unsafe_code)]

//! Radial Spread: place copies of a prefab evenly on a circle.
//!
//! ```text
//!             i = 2
//!               o
//!       i = 3 o   o i = 1        copies = 4 (seen from above)
//!               o                first copy sits "behind" the center
//!             i = 0
//! ```

use rewind_core::{Command, CommandError, CommandResult, Outcome};

use crate::scene::{ObjectId, SharedScene, Vec3, lock};

pub const MISSING_PREFAB_MESSAGE: &str = "Need an object to copy";
pub const NON_POSITIVE_COPIES_MESSAGE: &str = "Num of copies can't be equal/less than 0";
pub const NEGATIVE_DISTANCE_MESSAGE: &str = "Radial distance can't be less than 0";
pub const PREFAB_GONE_MESSAGE: &str = "Original Prefab is missing!";

/// Places `copies` instances of `prefab` around `center`.
#[derive(Debug)]
pub struct RadialSpread {
    scene: SharedScene,
    pub prefab: Option<String>,
    pub copies: i32,
    pub radial_distance: f32,
    pub center: Vec3,
    /// Instances placed by the last apply, removed again on revert.
    placed: Vec<ObjectId>,
}

impl RadialSpread {
    #[must_use]
    pub fn new(scene: SharedScene) -> Self {
        Self {
            scene,
            prefab: None,
            copies: 0,
            radial_distance: 0.0,
            center: Vec3::ZERO,
            placed: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_prefab(mut self, prefab: impl Into<String>) -> Self {
        self.prefab = Some(prefab.into());
        self
    }

    #[must_use]
    pub fn with_copies(mut self, copies: i32) -> Self {
        self.copies = copies;
        self
    }

    #[must_use]
    pub fn with_radial_distance(mut self, radial_distance: f32) -> Self {
        self.radial_distance = radial_distance;
        self
    }

    #[must_use]
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Instances currently placed by this command.
    #[must_use]
    pub fn placed(&self) -> &[ObjectId] {
        &self.placed
    }

    /// Target positions, one per copy.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        let Ok(copies) = usize::try_from(self.copies) else {
            return Vec::new();
        };
        let interval = 360.0 / copies as f32;
        (0..copies)
            .map(|i| self.center + Vec3::BACK.rotate_y(i as f32 * interval) * self.radial_distance)
            .collect()
    }
}

impl Command for RadialSpread {
    fn apply(&mut self) -> CommandResult {
        let prefab = self
            .prefab
            .as_deref()
            .ok_or_else(|| CommandError::InvalidState(MISSING_PREFAB_MESSAGE.into()))?;
        let positions = self.positions();

        let mut scene = lock(&self.scene);
        let mut placed = Vec::with_capacity(positions.len());
        for position in positions {
            match scene.instantiate(prefab, position) {
                Ok(id) => placed.push(id),
                Err(err) => {
                    for id in placed {
                        let _ = scene.destroy(id);
                    }
                    return Err(CommandError::TargetNotFound(err.to_string()));
                }
            }
        }
        tracing::debug!(
            target: "rewind.demo",
            prefab,
            copies = placed.len(),
            "radial spread placed"
        );
        self.placed = placed;
        Ok(())
    }

    fn revert(&mut self) -> CommandResult {
        let mut scene = lock(&self.scene);
        let mut missing = 0usize;
        for id in self.placed.drain(..) {
            if scene.destroy(id).is_err() {
                missing += 1;
            }
        }
        if missing > 0 {
            tracing::warn!(target: "rewind.demo", missing, "radial spread objects already gone");
        }
        Ok(())
    }

    fn validate_before_apply(&self, outcome: &mut Outcome) -> CommandResult {
        if self.prefab.is_none() {
            outcome.fail(MISSING_PREFAB_MESSAGE);
        } else if self.copies <= 0 {
            outcome.fail(NON_POSITIVE_COPIES_MESSAGE);
        } else if self.radial_distance < 0.0 {
            outcome.fail(NEGATIVE_DISTANCE_MESSAGE);
        }
        Ok(())
    }

    fn validate_before_redo(&self, outcome: &mut Outcome) -> CommandResult {
        let still_prefab = self
            .prefab
            .as_deref()
            .is_some_and(|name| lock(&self.scene).is_prefab(name));
        if !still_prefab {
            outcome.fail(PREFAB_GONE_MESSAGE);
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "Radial Spread".to_string()
    }
}
