// rust/engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod greedy;
mod random;

/**
 * Curated policy public API.
 *
 * Internal implementation modules remain private; only stable policy entrypoints are re-exported.
 */
pub use base::Policy;
pub use greedy::{GREEDY_PREFERENCE, GreedyManhattanPolicy};
pub use random::RandomPolicy;

/// The closed set of policies the simulator compares.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PolicyKind {
    Random,
    Greedy,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 2] = [PolicyKind::Random, PolicyKind::Greedy];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "random" | "rand" => Some(Self::Random),
            "greedy" | "greedy_manhattan" | "manhattan" => Some(Self::Greedy),
            _ => None,
        }
    }

    /// Short name used in report file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Greedy => "greedy",
        }
    }

    pub fn default_seed(self) -> u64 {
        match self {
            Self::Random => RandomPolicy::DEFAULT_SEED,
            Self::Greedy => GreedyManhattanPolicy::DEFAULT_SEED,
        }
    }

    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            Self::Random => Box::new(RandomPolicy::new(seed)),
            Self::Greedy => Box::new(GreedyManhattanPolicy::new(seed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(PolicyKind::parse("random"), Some(PolicyKind::Random));
        assert_eq!(PolicyKind::parse(" Greedy "), Some(PolicyKind::Greedy));
        assert_eq!(PolicyKind::parse("manhattan"), Some(PolicyKind::Greedy));
        assert_eq!(PolicyKind::parse("beam"), None);
    }

    #[test]
    fn names_roundtrip_through_parse() {
        for k in PolicyKind::ALL {
            assert_eq!(PolicyKind::parse(k.name()), Some(k));
        }
    }
}
