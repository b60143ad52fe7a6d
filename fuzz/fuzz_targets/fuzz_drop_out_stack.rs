#![no_main]

use std::collections::VecDeque;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rewind_core::{DropOutStack, HistoryError};

#[derive(Debug, Arbitrary)]
enum Op {
    Push(u16),
    Pop,
    Peek,
    Get(u8),
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let capacity = usize::from(input.capacity % 32);
    let mut stack = match DropOutStack::new(capacity) {
        Ok(stack) => stack,
        Err(err) => {
            assert_eq!(capacity, 0);
            assert_eq!(err, HistoryError::ZeroCapacity);
            return;
        }
    };
    // Front is most recent.
    let mut model: VecDeque<u16> = VecDeque::new();

    for op in input.ops {
        match op {
            Op::Push(v) => {
                stack.push(v);
                model.push_front(v);
                model.truncate(capacity);
            }
            Op::Pop => assert_eq!(stack.pop(), model.pop_front()),
            Op::Peek => assert_eq!(stack.peek(), model.front()),
            Op::Get(i) => {
                let index = usize::from(i);
                match model.get(index) {
                    Some(v) => assert_eq!(stack.get(index), Ok(v)),
                    None => assert!(stack.get(index).is_err()),
                }
            }
            Op::Clear => {
                stack.clear();
                model.clear();
            }
        }

        // Post-conditions that must always hold:
        assert!(stack.count() <= stack.capacity(), "count exceeds capacity");
        assert_eq!(stack.count(), model.len(), "count diverged from model");
    }
});
