//! Search configuration contract trait.

/// The oracle a puzzle configuration provides to the solver.
///
/// The solver never interprets moves or positions itself. It clones the
/// start configuration, replays a move chain, and asks these questions.
///
/// # Contract
///
/// - `clone()` must produce an independent copy; the solver mutates clones
///   and never the start configuration.
/// - `recompute_derived_maps` must be called before `is_solved`,
///   `is_deadlocked` and `possible_moves` are meaningful. The solver always
///   calls it right after replaying a chain.
/// - `possible_moves` must be deterministic: same configuration → same moves
///   in the same order. Every returned move must be accepted by
///   `apply_move_chain` when appended to the chain that produced `self`.
/// - `identity_bytes` must be equal for configurations the puzzle considers
///   equivalent, and must not depend on how the configuration was reached.
pub trait SearchConfiguration: Clone {
    /// The atomic action. Rendered with `Display` in reports.
    type Move: Clone + PartialEq + std::fmt::Debug + std::fmt::Display;
    /// Failure to replay a chain. Never expected for chains the solver builds.
    type Error: std::fmt::Display;

    /// Mutate `self` by applying `chain` in order.
    ///
    /// # Errors
    ///
    /// Returns the oracle's error when a move is illegal. The solver treats
    /// this as a contract violation and halts.
    fn apply_move_chain(&mut self, chain: &[Self::Move]) -> Result<(), Self::Error>;

    /// Refresh whatever derived state the checks below depend on.
    fn recompute_derived_maps(&mut self);

    /// The goal test.
    fn is_solved(&self) -> bool;

    /// Whether this configuration can provably never reach a solved one.
    fn is_deadlocked(&self) -> bool;

    /// Legal next moves. Empty means the node has no children.
    fn possible_moves(&self) -> Vec<Self::Move>;

    /// Canonical identity bytes, the input to [`crate::state_key::StateKey`].
    fn identity_bytes(&self) -> Vec<u8>;
}
