use crate::{
    ast::{Variable, VariableId},
    value::Value,
};
use std::collections::HashMap;

///
/// Bindings
///
/// Values of query variables bound before the filter is compiled
/// (for example by `LET`). The filtered variable is never bound here.
///

#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: HashMap<VariableId, Value>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, variable: &Variable, value: impl Into<Value>) {
        self.values.insert(variable.id, value.into());
    }

    #[must_use]
    pub fn with(mut self, variable: &Variable, value: impl Into<Value>) -> Self {
        self.bind(variable, value);
        self
    }

    #[must_use]
    pub fn get(&self, id: VariableId) -> Option<&Value> {
        self.values.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
