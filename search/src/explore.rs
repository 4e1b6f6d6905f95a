//! Depth-bounded recursive explorer: one iteration of the deepening loop.
//!
//! An [`Explorer`] owns a fresh [`MoveTree`] and [`SeenTable`] for exactly
//! one depth bound. [`Explorer::explore`] walks the tree depth first and
//! returns an [`ExploreOutcome`]. `Found` and `Halted` are non-resumable:
//! every frame that receives one returns it immediately, skipping its own
//! remaining children and its exhaustion check.
//!
//! # Per-node rules (in order)
//!
//! 1. Finished already → re-visitation defect: logged, counted, no-op.
//! 2. Deeper than the bound → finished (deferred to a deeper iteration).
//! 3. First visit → derive the configuration from the start plus the move
//!    chain, then: solved → `Found`; deadlocked → finished; state already
//!    claimed this iteration → finished; otherwise claim it and enumerate
//!    children.
//! 4. Recurse into each child; drop finished children from the child list.
//! 5. No children left → finished.
//!
//! A duplicate is pruned whenever its key is claimed, whether or not the
//! representative is still live. The later arrival never takes over the
//! representative's subtree, even when it sits shallower.

use crate::contract::SearchConfiguration;
use crate::node::{MoveTree, NodeId};
use crate::report::{IterationStatsV1, TerminationReasonV1};
use crate::seen::{SeenLookup, SeenTable};
use crate::state_key::StateKey;

/// Result of exploring one subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreOutcome<M> {
    /// Keep going; check the node's `finished` flag for what happened.
    Continue,
    /// A solved configuration was reached by this move chain.
    Found(Vec<M>),
    /// The run must stop without a solution.
    Halted(TerminationReasonV1),
}

/// Shared visit budget, carried across iterations by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitBudget {
    limit: Option<u64>,
    used: u64,
}

impl VisitBudget {
    #[must_use]
    pub fn new(limit: Option<u64>) -> Self {
        Self { limit, used: 0 }
    }

    #[must_use]
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Charge one visit. `Err(limit)` once the budget is spent.
    fn charge(&mut self) -> Result<(), u64> {
        match self.limit {
            Some(limit) if self.used >= limit => Err(limit),
            _ => {
                self.used += 1;
                Ok(())
            }
        }
    }
}

/// What the first visit of a node decided.
enum Visit<M> {
    /// Children enumerated; recurse into them.
    Expanded,
    /// Node finished without children.
    Pruned,
    /// Stop the whole search.
    Stop(ExploreOutcome<M>),
}

/// One iteration's search state: tree, duplicate table, counters.
pub struct Explorer<'a, C: SearchConfiguration> {
    start: &'a C,
    bound: u32,
    tree: MoveTree<C::Move>,
    seen: SeenTable,
    stats: IterationStatsV1,
    budget: &'a mut VisitBudget,
}

impl<'a, C: SearchConfiguration> Explorer<'a, C> {
    /// Fresh tree (unvisited root) and empty duplicate table for `bound`.
    pub fn new(start: &'a C, bound: u32, budget: &'a mut VisitBudget) -> Self {
        Self {
            start,
            bound,
            tree: MoveTree::new(),
            seen: SeenTable::new(),
            stats: IterationStatsV1::default(),
            budget,
        }
    }

    /// Explore the whole tree from the root.
    pub fn run(&mut self) -> ExploreOutcome<C::Move> {
        let root = self.tree.root();
        self.explore(root)
    }

    #[must_use]
    pub fn tree(&self) -> &MoveTree<C::Move> {
        &self.tree
    }

    /// Counters so far, with the table and arena gauges filled in.
    #[must_use]
    pub fn stats(&self) -> IterationStatsV1 {
        IterationStatsV1 {
            nodes_created: self.tree.allocated(),
            seen_states: self.seen.len() as u64,
            tree_high_water: self.tree.high_water() as u64,
            ..self.stats
        }
    }

    /// Explore the subtree under `id`.
    pub fn explore(&mut self, id: NodeId) -> ExploreOutcome<C::Move> {
        let Some(node) = self.tree.get(id) else {
            tracing::warn!(?id, "explore called on a released node");
            self.stats.revisit_defects += 1;
            return ExploreOutcome::Continue;
        };

        if node.is_finished() {
            tracing::warn!(
                depth = node.depth(),
                bound = self.bound,
                "re-visited finished node; this should not happen"
            );
            self.stats.revisit_defects += 1;
            return ExploreOutcome::Continue;
        }

        if node.depth() > self.bound {
            self.tree.mark_finished(id);
            self.stats.depth_cutoffs += 1;
            return ExploreOutcome::Continue;
        }

        if !node.is_visited() {
            match self.visit(id) {
                Visit::Expanded => {}
                Visit::Pruned => return ExploreOutcome::Continue,
                Visit::Stop(outcome) => return outcome,
            }
        }

        let children = self.tree.children(id);
        let mut retained = Vec::with_capacity(children.len());
        for child in children {
            match self.explore(child) {
                ExploreOutcome::Continue => {}
                stop => return stop,
            }
            if self.tree.is_finished(child) {
                self.tree.release(child);
            } else {
                retained.push(child);
            }
        }

        let exhausted = retained.is_empty();
        self.tree.set_children(id, retained);
        if exhausted {
            self.tree.mark_finished(id);
            self.stats.exhausted += 1;
        }
        ExploreOutcome::Continue
    }

    fn visit(&mut self, id: NodeId) -> Visit<C::Move> {
        self.tree.mark_visited(id);
        if let Err(limit) = self.budget.charge() {
            return Visit::Stop(ExploreOutcome::Halted(
                TerminationReasonV1::VisitBudgetExceeded { limit },
            ));
        }
        self.stats.nodes_visited += 1;

        let Some(chain) = self.tree.move_chain(id) else {
            return Visit::Pruned;
        };
        #[allow(clippy::cast_possible_truncation)]
        let depth = chain.len() as u32;

        let mut config = self.start.clone();
        if let Err(e) = config.apply_move_chain(&chain) {
            let detail = e.to_string();
            tracing::warn!(depth, %detail, "oracle rejected a move chain built by the tree");
            return Visit::Stop(ExploreOutcome::Halted(
                TerminationReasonV1::OracleContractViolation { depth, detail },
            ));
        }
        config.recompute_derived_maps();

        if config.is_solved() {
            return Visit::Stop(ExploreOutcome::Found(chain));
        }

        if config.is_deadlocked() {
            self.tree.mark_finished(id);
            self.stats.deadlocks_pruned += 1;
            return Visit::Pruned;
        }

        let key = StateKey::of(&config);
        match self.seen.lookup(&key, &self.tree) {
            SeenLookup::Absent => {
                self.seen.record(key, id);
                for mv in config.possible_moves() {
                    self.tree.add_child(id, mv);
                }
                Visit::Expanded
            }
            claimed => {
                if claimed == SeenLookup::Released {
                    self.stats.duplicates_of_released += 1;
                }
                self.tree.mark_finished(id);
                self.stats.duplicates_pruned += 1;
                Visit::Pruned
            }
        }
    }
}
