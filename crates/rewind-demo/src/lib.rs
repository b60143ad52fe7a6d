#![forbid(unsafe_code)]

//! Editor-style collaborator for `rewind-core`.
//!
//! A small scene with a prefab library, a Radial Spread command that places
//! copies of a prefab on a circle, a few toy commands, and an
//! [`EditorSession`] that wires them to a [`Recorder`](rewind_core::Recorder)
//! the way an editor window would.

pub mod actions;
pub mod cli;
pub mod error;
pub mod radial_spread;
pub mod scene;
pub mod session;

pub use actions::{FailRedoAction, FailUndoAction, LogAction};
pub use cli::{Cli, Step, run, run_from_env};
pub use error::{DemoError, Result};
pub use radial_spread::RadialSpread;
pub use scene::{Instance, ObjectId, Scene, SceneError, SharedScene, Vec3};
pub use session::{EditorSession, SpreadForm};
