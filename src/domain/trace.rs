//! Step traces: the replay log produced by traversals and searches.
//!
//! A trace is built append-only during one synchronous computation and handed
//! over complete. Consumers replay it strictly in emission order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened to a node at a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Node reached, not yet emitted
    Visit,
    /// Node value emitted to the output sequence
    Process,
    /// Walk unwinds past the node
    Backtrack,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Visit => write!(f, "visit"),
            Action::Process => write!(f, "process"),
            Action::Backtrack => write!(f, "backtrack"),
        }
    }
}

/// One recorded event, carrying the root-to-node path at emission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub node: i64,
    pub path: Vec<i64>,
    pub action: Action,
}

/// Output of a traversal: emitted values plus the trace that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalResult {
    pub values: Vec<i64>,
    pub steps: Vec<Step>,
}

/// Output of a search. `path` is empty unless `found`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub found: bool,
    pub path: Vec<i64>,
    pub steps: Vec<Step>,
}

impl SearchResult {
    /// Number of nodes entered during the search.
    pub fn visited_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.action == Action::Visit)
            .count()
    }
}

/// Walk state shared by the recursive trace producers.
///
/// Holds the current root-to-node path so each step gets a snapshot of it.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    path: Vec<i64>,
    values: Vec<i64>,
    steps: Vec<Step>,
}

impl Recorder {
    pub(crate) fn enter(&mut self, value: i64) {
        self.path.push(value);
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    /// Record `action` on the node at the top of the current path.
    pub(crate) fn step(&mut self, action: Action) {
        if let Some(&node) = self.path.last() {
            self.steps.push(Step {
                node,
                path: self.path.clone(),
                action,
            });
        }
    }

    /// Emit the current node's value and record a `Process` step.
    pub(crate) fn process(&mut self) {
        if let Some(&node) = self.path.last() {
            self.values.push(node);
        }
        self.step(Action::Process);
    }

    /// Record a step for a node with an explicit path (queue-driven walks).
    pub(crate) fn step_at(&mut self, path: &[i64], action: Action) {
        if let Some(&node) = path.last() {
            self.steps.push(Step {
                node,
                path: path.to_vec(),
                action,
            });
        }
    }

    pub(crate) fn process_at(&mut self, path: &[i64]) {
        if let Some(&node) = path.last() {
            self.values.push(node);
        }
        self.step_at(path, Action::Process);
    }

    pub(crate) fn current_path(&self) -> &[i64] {
        &self.path
    }

    pub(crate) fn into_traversal(self) -> TraversalResult {
        TraversalResult {
            values: self.values,
            steps: self.steps,
        }
    }

    pub(crate) fn into_search(self, found: Option<Vec<i64>>) -> SearchResult {
        SearchResult {
            found: found.is_some(),
            path: found.unwrap_or_default(),
            steps: self.steps,
        }
    }
}

/// A single replay tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Zero-based position in the trace
    pub index: usize,
    pub total: usize,
    pub step: &'a Step,
    /// Every node marked so far, including this step's node
    pub visited: BTreeSet<i64>,
}

impl Frame<'_> {
    /// The node to highlight for this tick.
    pub fn highlighted(&self) -> i64 {
        self.step.node
    }
}

/// Pull-based cursor over a finished trace, one step per tick.
///
/// Stopping ends iteration; the trace itself is never touched.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    steps: &'a [Step],
    cursor: usize,
    visited: BTreeSet<i64>,
}

impl<'a> Replay<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        Self {
            steps,
            cursor: 0,
            visited: BTreeSet::new(),
        }
    }

    pub fn stop(&mut self) {
        self.cursor = self.steps.len();
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len().saturating_sub(self.cursor)
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.steps.get(self.cursor)?;
        if matches!(step.action, Action::Visit | Action::Process) {
            self.visited.insert(step.node);
        }
        let frame = Frame {
            index: self.cursor,
            total: self.steps.len(),
            step,
            visited: self.visited.clone(),
        };
        self.cursor += 1;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(node: i64, action: Action) -> Step {
        Step {
            node,
            path: vec![node],
            action,
        }
    }

    #[test]
    fn test_replay_accumulates_visited_nodes() {
        let steps = vec![
            step(5, Action::Visit),
            step(3, Action::Visit),
            step(3, Action::Backtrack),
            step(8, Action::Process),
        ];
        let frames: Vec<_> = Replay::new(&steps).collect();

        assert_eq!(frames.len(), 4);
        assert_eq!(frames[1].visited, BTreeSet::from([3, 5]));
        assert_eq!(frames[2].highlighted(), 3);
        assert_eq!(frames[3].visited, BTreeSet::from([3, 5, 8]));
        assert_eq!(frames[3].index, 3);
        assert_eq!(frames[3].total, 4);
    }

    #[test]
    fn test_replay_stop_ends_iteration_without_touching_trace() {
        let steps = vec![step(1, Action::Visit), step(2, Action::Visit)];
        let mut replay = Replay::new(&steps);

        assert!(replay.next().is_some());
        replay.stop();
        assert!(replay.is_finished());
        assert_eq!(replay.remaining(), 0);
        assert!(replay.next().is_none());
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_action_serializes_lowercase() {
        let json = serde_json::to_string(&step(4, Action::Backtrack)).unwrap();
        assert_eq!(json, r#"{"node":4,"path":[4],"action":"backtrack"}"#);
    }
}
