use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Picks uniformly among a fixed set of action codes.
///
/// Seeded, so a rollout against a deterministic engine can be replayed.
pub struct RandomAgent {
    actions: Vec<i32>,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(actions: Vec<i32>, seed: u64) -> Self {
        Self {
            actions,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next action code, `None` if the agent has no actions
    pub fn act(&mut self) -> Option<i32> {
        self.actions.choose(&mut self.rng).copied()
    }
}
