use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rewind_core::{HistoryStatus, RecorderConfig};
use serde::Serialize;

use crate::error::{DemoError, Result};
use crate::scene::Scene;
use crate::session::{
    DEFAULT_SESSION_CAPACITY, EditorSession, FAIL_REDO_ID, FAIL_UNDO_ID, LOG_ACTION_ID,
};

/// Prefabs available in the demo scene.
pub const DEMO_PREFABS: [&str; 3] = ["Cube", "Sphere", "Tree"];

#[derive(Debug, Parser)]
#[command(
    name = "rewind-demo",
    about = "Scripted editor session driving the rewind undo/redo history",
    version
)]
pub struct Cli {
    /// Steps to run in order. Runs a built-in script when omitted.
    #[arg(value_enum)]
    pub steps: Vec<Step>,

    /// TOML file with recorder settings (e.g. `capacity = 5`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// History capacity; overrides the config file.
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Object the Radial Spread copies; must be one of the demo prefabs.
    #[arg(long, default_value = "Cube")]
    pub prefab: String,

    #[arg(long, allow_negative_numbers = true)]
    pub copies: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    pub distance: Option<f32>,

    /// Print one JSON object per step instead of a status line.
    #[arg(long)]
    pub json: bool,

    /// Stop with a non-zero exit code at the first failed step.
    #[arg(long)]
    pub strict: bool,
}

/// A button press in the scripted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Spread,
    Log,
    FailUndo,
    FailRedo,
    Undo,
    Redo,
    /// Enter play mode.
    Play,
    /// Return to edit mode.
    Edit,
}

impl Step {
    /// Script used when no steps are given.
    pub const DEFAULT_SCRIPT: [Self; 11] = [
        Self::Spread,
        Self::Spread,
        Self::Undo,
        Self::Redo,
        Self::Log,
        Self::FailUndo,
        Self::Undo,
        Self::Play,
        Self::Undo,
        Self::Edit,
        Self::Redo,
    ];

    /// Whether the step goes through the history (and so has an outcome).
    #[must_use]
    pub const fn touches_history(self) -> bool {
        !matches!(self, Self::Play | Self::Edit)
    }
}

#[derive(Debug, Serialize)]
struct StepReport<'a> {
    index: usize,
    step: Step,
    objects: usize,
    status: &'a HistoryStatus,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

/// Run the session described by `cli`, writing one report per step.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(&cli)?;
    let mut scene = Scene::new();
    for prefab in DEMO_PREFABS {
        scene.add_prefab(prefab);
    }
    let mut session = EditorSession::with_config(scene.shared(), config)?;

    if !session.select_prefab(&cli.prefab) {
        tracing::warn!(target: "rewind.demo", prefab = %cli.prefab, "not a prefab, field cleared");
    }
    if let Some(copies) = cli.copies {
        session.form_mut().copies = copies;
    }
    if let Some(distance) = cli.distance {
        session.form_mut().radial_distance = distance;
    }

    let steps = if cli.steps.is_empty() {
        Step::DEFAULT_SCRIPT.to_vec()
    } else {
        cli.steps.clone()
    };

    for (i, step) in steps.into_iter().enumerate() {
        let index = i + 1;
        run_step(&mut session, step)?;
        let status = session.status();

        if cli.json {
            let report = StepReport {
                index,
                step,
                objects: session.object_count(),
                status: &status,
            };
            writeln!(out, "{}", serde_json::to_string(&report)?).map_err(io_error)?;
        } else {
            let label = step.to_possible_value().map(|v| v.get_name().to_string());
            writeln!(
                out,
                "{index:>2}. {:<10} objects={:<3} {status}",
                label.unwrap_or_default(),
                session.object_count()
            )
            .map_err(io_error)?;
        }

        if cli.strict && step.touches_history() && session.recorder().outcome().is_failed() {
            return Err(DemoError::exit(
                3,
                format!("step {index} failed: {}", session.recorder().outcome()),
            ));
        }
    }
    Ok(())
}

fn run_step(session: &mut EditorSession, step: Step) -> Result<()> {
    match step {
        Step::Spread => {
            session.spread();
        }
        Step::Log => {
            session.perform(LOG_ACTION_ID)?;
        }
        Step::FailUndo => {
            session.perform(FAIL_UNDO_ID)?;
        }
        Step::FailRedo => {
            session.perform(FAIL_REDO_ID)?;
        }
        Step::Undo => {
            session.undo();
        }
        Step::Redo => {
            session.redo();
        }
        Step::Play => session.enter_play_mode(),
        Step::Edit => session.exit_play_mode(),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<RecorderConfig> {
    let mut config = match &cli.config {
        Some(path) => RecorderConfig::from_toml_file(path)?,
        None => RecorderConfig::new(DEFAULT_SESSION_CAPACITY),
    };
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(DemoError::invalid(errors.join("; ")));
    }
    Ok(config)
}

fn io_error(err: std::io::Error) -> DemoError {
    DemoError::exit(1, format!("failed to write report: {err}"))
}
