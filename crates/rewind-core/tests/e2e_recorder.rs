#![forbid(unsafe_code)]

//! End-to-end scenarios for the history engine.
//!
//! Each test drives a [`Recorder`] the way an editor would: perform a few
//! commands against shared state, step back and forth, and check both the
//! state and the histories after every step.

use std::sync::{Arc, Mutex};

use rewind_core::{
    Command, CommandRegistry, CommandResult, DropOutStack, EditSwitch, HistoryError, Outcome,
    Recorder, RecorderConfig, Verdict, NOT_EDITABLE_MESSAGE, PERFORM_FAILED_MESSAGE,
    REDO_EMPTY_MESSAGE, UNDO_EMPTY_MESSAGE,
};

type Canvas = Arc<Mutex<Vec<String>>>;

/// Paints a labelled stroke on a shared canvas.
struct Stroke {
    canvas: Canvas,
    label: String,
}

impl Stroke {
    fn new(canvas: &Canvas, label: &str) -> Self {
        Self {
            canvas: Arc::clone(canvas),
            label: label.to_string(),
        }
    }
}

impl Command for Stroke {
    fn apply(&mut self) -> CommandResult {
        self.canvas.lock().unwrap().push(self.label.clone());
        Ok(())
    }

    fn revert(&mut self) -> CommandResult {
        self.canvas.lock().unwrap().retain(|l| l != &self.label);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Stroke {}", self.label)
    }
}

/// A command whose apply validation always refuses.
struct Refused;

impl Command for Refused {
    fn apply(&mut self) -> CommandResult {
        panic!("a refused command must never run");
    }

    fn revert(&mut self) -> CommandResult {
        panic!("a refused command must never run");
    }

    fn validate_before_apply(&self, outcome: &mut Outcome) -> CommandResult {
        outcome.verdict = Verdict::Failed;
        Ok(())
    }
}

fn canvas() -> Canvas {
    Arc::new(Mutex::new(Vec::new()))
}

fn snapshot(canvas: &Canvas) -> Vec<String> {
    canvas.lock().unwrap().clone()
}

#[test]
fn e2e_capacity_five_walkthrough() {
    let canvas = canvas();
    let mut recorder = Recorder::with_capacity(5).unwrap();

    for label in ["a", "b", "c"] {
        assert!(recorder.perform(Stroke::new(&canvas, label)).is_success());
    }
    assert_eq!(recorder.undo_count(), 3);
    assert_eq!(recorder.redo_count(), 0);

    recorder.undo();
    recorder.undo();
    assert_eq!(recorder.undo_count(), 1);
    assert_eq!(recorder.redo_count(), 2);
    assert_eq!(snapshot(&canvas), vec!["a"]);
    assert_eq!(recorder.next_redo_description(), "Stroke b");

    recorder.redo();
    assert_eq!(recorder.undo_count(), 2);
    assert_eq!(recorder.redo_count(), 1);
    assert_eq!(snapshot(&canvas), vec!["a", "b"]);
    assert_eq!(recorder.next_undo_description(), "Stroke b");
    assert_eq!(recorder.next_redo_description(), "Stroke c");
}

#[test]
fn e2e_round_trip_restores_state_and_counts() {
    let canvas = canvas();
    let mut recorder = Recorder::with_capacity(5).unwrap();
    recorder.perform(Stroke::new(&canvas, "base"));
    recorder.perform(Stroke::new(&canvas, "top"));

    let after_perform = snapshot(&canvas);
    let counts = (recorder.undo_count(), recorder.redo_count());

    assert!(recorder.undo().is_success());
    assert!(recorder.redo().is_success());

    assert_eq!(snapshot(&canvas), after_perform);
    assert_eq!((recorder.undo_count(), recorder.redo_count()), counts);
}

#[test]
fn e2e_repeated_empty_undo_is_stable() {
    let mut recorder = Recorder::with_capacity(5).unwrap();
    for _ in 0..10 {
        let outcome = recorder.undo().clone();
        assert_eq!(outcome.verdict, Verdict::Failed);
        assert_eq!(outcome.message, UNDO_EMPTY_MESSAGE);
        assert_eq!(recorder.undo_count(), 0);
        assert_eq!(recorder.redo_count(), 0);
    }
    assert_eq!(recorder.redo().message, REDO_EMPTY_MESSAGE);
}

#[test]
fn e2e_refused_command_leaves_history_empty() {
    let mut recorder = Recorder::with_capacity(5).unwrap();
    let outcome = recorder.perform(Refused).clone();

    assert_eq!(outcome.verdict, Verdict::Failed);
    assert_eq!(outcome.message, PERFORM_FAILED_MESSAGE);
    assert_eq!(recorder.undo_count(), 0);
    assert_eq!(recorder.next_undo_description(), UNDO_EMPTY_MESSAGE);
}

#[test]
fn e2e_new_branch_discards_redo() {
    let canvas = canvas();
    let mut recorder = Recorder::with_capacity(5).unwrap();
    recorder.perform(Stroke::new(&canvas, "a"));
    recorder.perform(Stroke::new(&canvas, "b"));
    recorder.undo();
    assert_eq!(recorder.redo_count(), 1);

    recorder.perform(Stroke::new(&canvas, "c"));
    assert_eq!(recorder.redo_count(), 0);
    assert_eq!(recorder.undo_descriptions(5), vec!["Stroke c", "Stroke a"]);
    assert_eq!(snapshot(&canvas), vec!["a", "c"]);
}

#[test]
fn e2e_capacity_one_buffer() {
    let mut stack = DropOutStack::new(1).unwrap();
    stack.push("A");
    stack.push("B");

    assert_eq!(stack.peek(), Some(&"B"));
    assert_eq!(stack.count(), 1);
    assert_eq!(stack.get(0), Ok(&"B"));
    assert_eq!(
        stack.get(1),
        Err(HistoryError::OutOfRange { index: 1, count: 1 })
    );
}

#[test]
fn e2e_overflow_forgets_oldest_commands() {
    let canvas = canvas();
    let mut recorder = Recorder::with_capacity(3).unwrap();
    for label in ["1", "2", "3", "4", "5"] {
        recorder.perform(Stroke::new(&canvas, label));
    }
    assert_eq!(recorder.undo_count(), 3);

    while recorder.undo().is_success() {}
    assert_eq!(snapshot(&canvas), vec!["1", "2"]);
    assert_eq!(recorder.redo_count(), 3);
    assert_eq!(recorder.outcome().message, UNDO_EMPTY_MESSAGE);
}

#[test]
fn e2e_play_mode_blocks_everything() {
    let canvas = canvas();
    let switch = EditSwitch::new(true);
    let mut recorder = Recorder::new(RecorderConfig::new(5), switch.clone()).unwrap();
    recorder.perform(Stroke::new(&canvas, "a"));
    recorder.undo();

    switch.set_editable(false);
    assert_eq!(recorder.redo().message, NOT_EDITABLE_MESSAGE);
    assert_eq!(
        recorder.perform(Stroke::new(&canvas, "b")).message,
        NOT_EDITABLE_MESSAGE
    );
    assert!(snapshot(&canvas).is_empty());
    assert_eq!(recorder.redo_count(), 1);

    switch.set_editable(true);
    assert!(recorder.redo().is_success());
    assert_eq!(snapshot(&canvas), vec!["a"]);
}

#[test]
fn e2e_registry_feeds_recorder() {
    let canvas = canvas();
    let mut registry = CommandRegistry::new();
    let shared = Arc::clone(&canvas);
    registry
        .register("stroke", move || Box::new(Stroke::new(&shared, "registered")))
        .unwrap();

    let mut recorder = Recorder::with_capacity(5).unwrap();
    let command = registry.create("stroke").unwrap();
    assert!(recorder.perform_boxed(command).is_success());
    assert_eq!(recorder.next_undo_description(), "Stroke registered");
    assert_eq!(snapshot(&canvas), vec!["registered"]);
}

#[test]
fn e2e_status_tracks_last_outcome() {
    let canvas = canvas();
    let mut recorder = Recorder::with_capacity(5).unwrap();
    recorder.perform(Stroke::new(&canvas, "a"));
    assert_eq!(recorder.status().message, None);

    recorder.perform(Refused);
    let status = recorder.status();
    assert_eq!(status.undo_count, 1);
    assert_eq!(status.message.as_deref(), Some(PERFORM_FAILED_MESSAGE));
    assert_eq!(
        status.to_string(),
        "Undo 1 [Stroke a] | Redo 0 [RedoStack is empty!] | failed: Couldn't perform Action!"
    );
}
