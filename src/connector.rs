//! Connector/block-graph composition model (spec §4.6, §9 Design Notes).
//!
//! No module in the example corpus offers a direct analogue — the teacher's
//! `MoistAir` methods mutate a single struct in place and have no notion of wiring
//! blocks together. This is built from the spec's description directly: a
//! single-valued, pull-based connector, a `Processable` capability every block
//! implements instead of an abstract base class (spec §9: "Inheritance → variants"),
//! and a small graph that resolves run order topologically and rejects cycles at
//! connection time with a DFS over the partially-built dependency graph.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::PsychroError;
use crate::flows::FlowOfHumidAir;
use crate::processes::{ProcessMode, ProcessResult, ProcessType};

/// A block's published output: single-valued, read by whichever input connectors
/// subscribe to it (spec §4.6: "provides `getValue()`, `setValue(v)`").
#[derive(Debug, Default)]
pub struct OutputConnector<T> {
    value: RefCell<Option<T>>,
}

impl<T: Clone> OutputConnector<T> {
    pub fn new() -> Rc<Self> {
        Rc::new(OutputConnector {
            value: RefCell::new(None),
        })
    }

    pub fn set_value(&self, value: T) {
        *self.value.borrow_mut() = Some(value);
    }

    pub fn get_value(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    /// Clears the held value (spec §4.6: `resetProcess` "returns to `Ready` with
    /// outlet cleared").
    pub fn clear(&self) {
        *self.value.borrow_mut() = None;
    }
}

/// A block's input: binds to an upstream [`OutputConnector`] and refreshes its own
/// held value by reading the source at `run` time (spec §4.6: pull-based, no push
/// propagation).
#[derive(Debug, Default)]
pub struct InputConnector<T> {
    value: RefCell<Option<T>>,
    source: RefCell<Option<Rc<OutputConnector<T>>>>,
}

impl<T: Clone> InputConnector<T> {
    pub fn new() -> Self {
        InputConnector {
            value: RefCell::new(None),
            source: RefCell::new(None),
        }
    }

    /// `connectAndConsumeDataFrom` (spec §4.6): bind this input's value to the source's
    /// current value, and remember the source so later `refresh` calls stay in sync.
    pub fn connect_and_consume_data_from(&self, source: Rc<OutputConnector<T>>) {
        *self.value.borrow_mut() = source.get_value();
        *self.source.borrow_mut() = Some(source);
    }

    /// Re-reads the bound source, if any. A block's `run` calls this before computing.
    pub fn refresh(&self) {
        if let Some(source) = self.source.borrow().as_ref() {
            *self.value.borrow_mut() = source.get_value();
        }
    }

    pub fn set_value(&self, value: T) {
        *self.value.borrow_mut() = Some(value);
    }

    pub fn get_value(&self) -> Option<T> {
        self.value.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.source.borrow().is_some()
    }
}

/// Lifecycle state a block moves through across its connector/run history (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Uninitialized,
    Ready,
    LastRunValid,
}

/// Capability every process block implements instead of inheriting from a shared
/// abstract base (spec §9 Design Notes: "Inheritance → variants").
pub trait Processable {
    fn input_connector(&self) -> &InputConnector<FlowOfHumidAir>;
    fn output_connector(&self) -> &Rc<OutputConnector<FlowOfHumidAir>>;
    fn process_type(&self) -> ProcessType;
    fn process_mode(&self) -> ProcessMode;
    fn state(&self) -> BlockState;

    /// Pull-refresh the input from its bound source, then recompute and publish the
    /// new output value.
    fn run(&mut self) -> Result<ProcessResult, PsychroError>;

    fn connect_air_flow_data_source(&self, source: Rc<OutputConnector<FlowOfHumidAir>>) {
        self.input_connector().connect_and_consume_data_from(source);
    }

    /// Returns to `Ready` with the outlet connector cleared (spec §4.6 state machine).
    fn reset_process(&mut self);
}

/// Resolves run order across a set of wired blocks and rejects cycles at connection
/// time (spec §4.6, §9: "Reject cycles at connection time with a DFS on the
/// partially-built graph").
pub struct BlockGraph {
    blocks: Vec<Box<dyn Processable>>,
    depends_on: Vec<Vec<usize>>,
}

impl BlockGraph {
    pub fn new() -> Self {
        BlockGraph {
            blocks: Vec::new(),
            depends_on: Vec::new(),
        }
    }

    pub fn add_block(&mut self, block: Box<dyn Processable>) -> usize {
        self.blocks.push(block);
        self.depends_on.push(Vec::new());
        self.blocks.len() - 1
    }

    pub fn block(&self, index: usize) -> &dyn Processable {
        self.blocks[index].as_ref()
    }

    /// Wires `upstream`'s output into `downstream`'s input. Rejects the connection if
    /// `upstream` already (transitively) depends on `downstream` — that would close a
    /// cycle in the pull graph.
    pub fn connect(&mut self, downstream: usize, upstream: usize) -> Result<(), PsychroError> {
        if downstream == upstream || self.depends_transitively(upstream, downstream) {
            return Err(PsychroError::IncompatibleState(format!(
                "connecting block {downstream} to block {upstream} would create a cycle"
            )));
        }
        let source = Rc::clone(self.blocks[upstream].output_connector());
        self.blocks[downstream].connect_air_flow_data_source(source);
        self.depends_on[downstream].push(upstream);
        Ok(())
    }

    fn depends_transitively(&self, from: usize, target: usize) -> bool {
        let mut stack = vec![from];
        let mut visited = vec![false; self.blocks.len()];
        while let Some(node) = stack.pop() {
            if node == target {
                return true;
            }
            if visited[node] {
                continue;
            }
            visited[node] = true;
            stack.extend(self.depends_on[node].iter().copied());
        }
        false
    }

    /// Runs every block once, in topological order (Kahn's algorithm over the
    /// dependency edges recorded by [`Self::connect`]).
    pub fn run_all(&mut self) -> Result<Vec<ProcessResult>, PsychroError> {
        let order = self.topological_order()?;
        let mut results = Vec::with_capacity(order.len());
        for index in order {
            results.push(self.blocks[index].run()?);
        }
        Ok(results)
    }

    fn topological_order(&self) -> Result<Vec<usize>, PsychroError> {
        let n = self.blocks.len();
        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for downstream in 0..n {
            for &upstream in &self.depends_on[downstream] {
                dependents[upstream].push(downstream);
                in_degree[downstream] += 1;
            }
        }
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &dependent in &dependents[node] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }
        if order.len() != n {
            return Err(PsychroError::IncompatibleState(
                "block graph contains a cycle".to_string(),
            ));
        }
        Ok(order)
    }
}

impl Default for BlockGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_connector_round_trips_a_value() {
        let output: Rc<OutputConnector<i32>> = OutputConnector::new();
        output.set_value(42);
        assert_eq!(output.get_value(), Some(42));
    }

    #[test]
    fn output_connector_clear_drops_the_held_value() {
        let output: Rc<OutputConnector<i32>> = OutputConnector::new();
        output.set_value(42);
        output.clear();
        assert_eq!(output.get_value(), None);
    }

    #[test]
    fn input_connector_pulls_from_source_on_refresh() {
        let output: Rc<OutputConnector<i32>> = OutputConnector::new();
        let input: InputConnector<i32> = InputConnector::new();
        input.connect_and_consume_data_from(Rc::clone(&output));
        assert_eq!(input.get_value(), None);
        output.set_value(7);
        assert_eq!(input.get_value(), None, "refresh has not been called yet");
        input.refresh();
        assert_eq!(input.get_value(), Some(7));
    }
}
