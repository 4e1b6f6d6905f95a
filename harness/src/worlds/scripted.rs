//! `ScriptedWorld`: an oracle over a hand-built state graph.
//!
//! States are named; edges are labelled with a [`Direction`]. Flags mark
//! states solved or deadlocked, and several states may share one identity
//! key so the solver sees them as the same configuration. Every clone of a
//! world writes into one shared [`OracleLog`], so a test can inspect what
//! the solver asked the oracle to do.
//!
//! Used by the lock tests to pin down exploration order, duplicate pruning
//! and the oracle call protocol independently of the board rules.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use pushbox_kernel::carrier::direction::Direction;
use pushbox_search::contract::SearchConfiguration;

/// Failure building or driving a scripted world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedError {
    /// `apply_move_chain` asked for an edge the graph does not have.
    NoTransition {
        state: String,
        dir: Direction,
        index: usize,
    },
    /// Two edges leave `state` with the same label.
    DuplicateEdge { state: String, dir: Direction },
}

impl std::fmt::Display for ScriptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTransition { state, dir, index } => {
                write!(f, "no {dir} edge from state {state:?} (move {index})")
            }
            Self::DuplicateEdge { state, dir } => {
                write!(f, "state {state:?} has two {dir} edges")
            }
        }
    }
}

impl std::error::Error for ScriptedError {}

/// One `possible_moves` call: which state, reached by which chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    pub state: String,
    pub trail: Vec<Direction>,
}

/// Everything the solver asked of the oracle, across all clones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OracleLog {
    pub enumerations: Vec<Enumeration>,
    /// Solved, deadlock or move queries made while derived maps were stale.
    pub protocol_violations: u64,
}

impl OracleLog {
    /// How many times `state` had its moves enumerated.
    #[must_use]
    pub fn enumerations_of(&self, state: &str) -> usize {
        self.enumerations.iter().filter(|e| e.state == state).count()
    }
}

#[derive(Debug)]
struct ScriptedState {
    name: String,
    key: String,
    solved: bool,
    deadlocked: bool,
    edges: Vec<(Direction, usize)>,
}

/// Builder for a [`ScriptedWorld`]. States are created on first mention.
#[derive(Debug)]
pub struct ScriptedWorldBuilder {
    states: Vec<ScriptedState>,
    by_name: BTreeMap<String, usize>,
    duplicate: Option<ScriptedError>,
}

impl ScriptedWorldBuilder {
    /// Start a graph whose start configuration is `start`.
    #[must_use]
    pub fn new(start: &str) -> Self {
        let mut builder = Self {
            states: Vec::new(),
            by_name: BTreeMap::new(),
            duplicate: None,
        };
        builder.intern(start);
        builder
    }

    /// Add an edge `from --dir--> to`. Edge order is enumeration order.
    #[must_use]
    pub fn edge(mut self, from: &str, dir: Direction, to: &str) -> Self {
        let from_ix = self.intern(from);
        let to_ix = self.intern(to);
        let state = &mut self.states[from_ix];
        if state.edges.iter().any(|(d, _)| *d == dir) {
            self.duplicate.get_or_insert(ScriptedError::DuplicateEdge {
                state: from.to_string(),
                dir,
            });
        } else {
            state.edges.push((dir, to_ix));
        }
        self
    }

    #[must_use]
    pub fn solved(mut self, name: &str) -> Self {
        let ix = self.intern(name);
        self.states[ix].solved = true;
        self
    }

    #[must_use]
    pub fn deadlocked(mut self, name: &str) -> Self {
        let ix = self.intern(name);
        self.states[ix].deadlocked = true;
        self
    }

    /// Give `name` the identity key `key`; states sharing a key are one
    /// configuration as far as the solver is concerned.
    #[must_use]
    pub fn share_key(mut self, name: &str, key: &str) -> Self {
        let ix = self.intern(name);
        self.states[ix].key = key.to_string();
        self
    }

    /// # Errors
    ///
    /// Returns [`ScriptedError::DuplicateEdge`] if two edges from one state
    /// carry the same label.
    pub fn build(self) -> Result<ScriptedWorld, ScriptedError> {
        if let Some(e) = self.duplicate {
            return Err(e);
        }
        Ok(ScriptedWorld {
            states: Rc::new(self.states),
            current: 0,
            trail: Vec::new(),
            maps_fresh: false,
            log: Rc::new(RefCell::new(OracleLog::default())),
        })
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(&ix) = self.by_name.get(name) {
            return ix;
        }
        let ix = self.states.len();
        self.states.push(ScriptedState {
            name: name.to_string(),
            key: name.to_string(),
            solved: false,
            deadlocked: false,
            edges: Vec::new(),
        });
        self.by_name.insert(name.to_string(), ix);
        ix
    }
}

/// A position in a scripted state graph.
#[derive(Debug, Clone)]
pub struct ScriptedWorld {
    states: Rc<Vec<ScriptedState>>,
    current: usize,
    trail: Vec<Direction>,
    maps_fresh: bool,
    log: Rc<RefCell<OracleLog>>,
}

impl ScriptedWorld {
    /// Name of the current state.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.states[self.current].name
    }

    /// Snapshot of the shared oracle log.
    #[must_use]
    pub fn log(&self) -> OracleLog {
        self.log.borrow().clone()
    }

    fn check_protocol(&self) {
        if !self.maps_fresh {
            self.log.borrow_mut().protocol_violations += 1;
        }
    }
}

impl SearchConfiguration for ScriptedWorld {
    type Move = Direction;
    type Error = ScriptedError;

    fn apply_move_chain(&mut self, chain: &[Direction]) -> Result<(), ScriptedError> {
        for (index, &dir) in chain.iter().enumerate() {
            let state = &self.states[self.current];
            let next = state
                .edges
                .iter()
                .find(|(d, _)| *d == dir)
                .map(|&(_, to)| to)
                .ok_or_else(|| ScriptedError::NoTransition {
                    state: state.name.clone(),
                    dir,
                    index,
                })?;
            self.current = next;
            self.trail.push(dir);
        }
        self.maps_fresh = false;
        Ok(())
    }

    fn recompute_derived_maps(&mut self) {
        self.maps_fresh = true;
    }

    fn is_solved(&self) -> bool {
        self.check_protocol();
        self.states[self.current].solved
    }

    fn is_deadlocked(&self) -> bool {
        self.check_protocol();
        self.states[self.current].deadlocked
    }

    fn possible_moves(&self) -> Vec<Direction> {
        self.check_protocol();
        let state = &self.states[self.current];
        self.log.borrow_mut().enumerations.push(Enumeration {
            state: state.name.clone(),
            trail: self.trail.clone(),
        });
        state.edges.iter().map(|&(d, _)| d).collect()
    }

    fn identity_bytes(&self) -> Vec<u8> {
        self.states[self.current].key.as_bytes().to_vec()
    }
}
