#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rewind_core::{Command, CommandError, CommandResult, Outcome, Recorder};

/// Command whose hooks and effects fail according to fuzzer-chosen flags.
#[derive(Debug, Clone, Copy, Arbitrary)]
struct Flaky {
    veto_apply: bool,
    veto_undo: bool,
    veto_redo: bool,
    broken_hook: bool,
    fail_apply: bool,
    fail_revert: bool,
    fail_reapply: bool,
}

fn result(fail: bool) -> CommandResult {
    if fail {
        Err(CommandError::Other("fuzz".into()))
    } else {
        Ok(())
    }
}

impl Command for Flaky {
    fn apply(&mut self) -> CommandResult {
        result(self.fail_apply)
    }

    fn revert(&mut self) -> CommandResult {
        result(self.fail_revert)
    }

    fn reapply(&mut self) -> CommandResult {
        result(self.fail_reapply)
    }

    fn validate_before_apply(&self, outcome: &mut Outcome) -> CommandResult {
        if self.veto_apply {
            outcome.fail("veto");
        }
        result(self.broken_hook)
    }

    fn validate_before_undo(&self, outcome: &mut Outcome) -> CommandResult {
        if self.veto_undo {
            outcome.fail("veto");
        }
        Ok(())
    }

    fn validate_before_redo(&self, outcome: &mut Outcome) -> CommandResult {
        if self.veto_redo {
            outcome.fail("veto");
        }
        Ok(())
    }
}

#[derive(Debug, Arbitrary)]
enum Op {
    Perform(Flaky),
    Undo,
    Redo,
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let capacity = usize::from(input.capacity % 16).max(1);
    let Ok(mut recorder) = Recorder::with_capacity(capacity) else {
        return;
    };

    for op in input.ops {
        let before = (recorder.undo_count(), recorder.redo_count());
        let failed = match op {
            Op::Perform(cmd) => recorder.perform(cmd).is_failed(),
            Op::Undo => recorder.undo().is_failed(),
            Op::Redo => recorder.redo().is_failed(),
            Op::Clear => {
                recorder.clear();
                false
            }
        };

        if failed {
            assert_eq!((recorder.undo_count(), recorder.redo_count()), before);
            assert!(!recorder.outcome().message.is_empty(), "failure without message");
        }
        assert!(recorder.undo_count() <= capacity);
        assert!(recorder.redo_count() <= capacity);
        assert!(recorder.undo_count() + recorder.redo_count() <= capacity * 2);
    }
});
