use std::cell::RefCell;
use std::rc::Rc;

use ruler_ui::ScaleEngine;

/// Collects every value an engine reports.
#[derive(Clone, Debug, Default)]
pub struct RecordingListener {
    values: Rc<RefCell<Vec<i32>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a listener on `engine` that records into this recorder,
    /// replacing any listener already set.
    pub fn attach(&self, engine: &mut ScaleEngine) {
        let values = Rc::clone(&self.values);
        engine.set_value_change_listener(move |value| values.borrow_mut().push(value));
    }

    pub fn values(&self) -> Vec<i32> {
        self.values.borrow().clone()
    }

    pub fn last(&self) -> Option<i32> {
        self.values.borrow().last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}
