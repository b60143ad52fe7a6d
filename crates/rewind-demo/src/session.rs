#![forbid(unsafe_code)]

//! Editor session: the collaborator that owns a recorder.
//!
//! An [`EditorSession`] plays the part of an editor window. It owns the
//! scene, the history, the play-mode switch, the Radial Spread form, and the
//! command registry, and exposes one method per button.

use rewind_core::{
    CommandRegistry, EditContext, EditSwitch, HistoryStatus, Outcome, Recorder, RecorderConfig,
};

use crate::actions::{FailRedoAction, FailUndoAction, LogAction};
use crate::error::Result;
use crate::radial_spread::RadialSpread;
use crate::scene::{Scene, SharedScene, Vec3, lock};

/// History capacity of a session unless configured otherwise.
pub const DEFAULT_SESSION_CAPACITY: usize = 5;

pub const RADIAL_SPREAD_ID: &str = "radial-spread";
pub const LOG_ACTION_ID: &str = "log-action";
pub const FAIL_UNDO_ID: &str = "fail-undo";
pub const FAIL_REDO_ID: &str = "fail-redo";

/// Inputs of the Radial Spread form.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadForm {
    pub copies: i32,
    pub radial_distance: f32,
    pub center: Vec3,
    prefab: Option<String>,
}

impl Default for SpreadForm {
    fn default() -> Self {
        Self {
            copies: 8,
            radial_distance: 5.0,
            center: Vec3::ZERO,
            prefab: None,
        }
    }
}

impl SpreadForm {
    /// Pick the object to copy. Anything not in the prefab library clears
    /// the field instead.
    pub fn set_prefab(&mut self, scene: &Scene, name: &str) -> bool {
        if scene.is_prefab(name) {
            self.prefab = Some(name.to_string());
            true
        } else {
            self.prefab = None;
            false
        }
    }

    #[must_use]
    pub fn prefab(&self) -> Option<&str> {
        self.prefab.as_deref()
    }

    /// Copy the form values onto a fresh command.
    #[must_use]
    pub fn build(&self, scene: SharedScene) -> RadialSpread {
        let mut cmd = RadialSpread::new(scene)
            .with_copies(self.copies)
            .with_radial_distance(self.radial_distance)
            .with_center(self.center);
        cmd.prefab.clone_from(&self.prefab);
        cmd
    }
}

/// Registry with every command the session knows.
fn default_registry(scene: &SharedScene) -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    let spread_scene = SharedScene::clone(scene);
    registry.register(RADIAL_SPREAD_ID, move || {
        Box::new(SpreadForm::default().build(SharedScene::clone(&spread_scene)))
    })?;
    registry.register(LOG_ACTION_ID, || Box::new(LogAction::new()))?;
    registry.register(FAIL_UNDO_ID, || Box::new(FailUndoAction))?;
    registry.register(FAIL_REDO_ID, || Box::new(FailRedoAction))?;
    Ok(registry)
}

/// One editor window's worth of state.
#[derive(Debug)]
pub struct EditorSession {
    recorder: Recorder,
    scene: SharedScene,
    editable: EditSwitch,
    form: SpreadForm,
    registry: CommandRegistry,
}

impl EditorSession {
    /// Session with the default capacity.
    pub fn new(scene: SharedScene) -> Result<Self> {
        Self::with_config(scene, RecorderConfig::new(DEFAULT_SESSION_CAPACITY))
    }

    pub fn with_config(scene: SharedScene, config: RecorderConfig) -> Result<Self> {
        let editable = EditSwitch::new(true);
        let recorder = Recorder::new(config, editable.clone())?;
        let registry = default_registry(&scene)?;
        Ok(Self {
            recorder,
            scene,
            editable,
            form: SpreadForm::default(),
            registry,
        })
    }

    // ========================================================================
    // Buttons
    // ========================================================================

    /// Perform a Radial Spread with the current form values.
    pub fn spread(&mut self) -> &Outcome {
        let cmd = self.form.build(SharedScene::clone(&self.scene));
        self.recorder.perform(cmd)
    }

    /// Create the command registered under `id` and perform it.
    pub fn perform(&mut self, id: &str) -> Result<&Outcome> {
        let cmd = self.registry.create(id)?;
        Ok(self.recorder.perform_boxed(cmd))
    }

    pub fn undo(&mut self) -> &Outcome {
        self.recorder.undo()
    }

    pub fn redo(&mut self) -> &Outcome {
        self.recorder.redo()
    }

    /// Leave edit mode; every history operation is refused until
    /// [`exit_play_mode`](Self::exit_play_mode).
    pub fn enter_play_mode(&mut self) {
        tracing::info!(target: "rewind.demo", "entering play mode");
        self.editable.set_editable(false);
    }

    pub fn exit_play_mode(&mut self) {
        tracing::info!(target: "rewind.demo", "back in edit mode");
        self.editable.set_editable(true);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn status(&self) -> HistoryStatus {
        self.recorder.status()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.editable.is_editable()
    }

    #[must_use]
    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    #[must_use]
    pub fn scene(&self) -> &SharedScene {
        &self.scene
    }

    /// Number of objects currently placed in the scene.
    #[must_use]
    pub fn object_count(&self) -> usize {
        lock(&self.scene).len()
    }

    #[must_use]
    pub fn form(&self) -> &SpreadForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SpreadForm {
        &mut self.form
    }

    /// Select the form's prefab, checked against this session's scene.
    pub fn select_prefab(&mut self, name: &str) -> bool {
        let scene = lock(&self.scene);
        self.form.set_prefab(&scene, name)
    }

    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}
