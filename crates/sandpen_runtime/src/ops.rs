//! Deno ops bridging the isolate back to the host

use deno_core::OpState;
use deno_core::op2;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Messages posted by the isolate, in posting order
#[derive(Debug, Clone, Default)]
pub struct Outbox(Rc<RefCell<Vec<Value>>>);

impl Outbox {
    pub fn push(&self, message: Value) {
        self.0.borrow_mut().push(message);
    }

    pub fn take(&self) -> Vec<Value> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `parent.postMessage` inside the isolate
#[op2]
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn op_bridge_post(state: &mut OpState, #[serde] message: serde_json::Value) {
    state.borrow::<Outbox>().push(message);
}
