use std::fmt;

use gearhead_game::{Event, GameSession, Part, Vehicle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Serialize, Serializer};

/// Decision returned by a [`PlayerPolicy`]
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub event_index: usize,
    pub rationale: Option<String>,
}

impl PolicyDecision {
    #[must_use]
    pub fn new(event_index: usize, rationale: Option<String>) -> Self {
        Self {
            event_index,
            rationale,
        }
    }
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Select which event on the board to enter.
    fn pick_event(&mut self, session: &GameSession) -> PolicyDecision;

    /// Select an inventory part to install next, or `None` to stop.
    fn pick_install(&mut self, session: &GameSession) -> Option<usize>;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameplayStrategy {
    Cautious,
    Aggressive,
    Balanced,
    Random,
}

impl GameplayStrategy {
    pub const ALL: [Self; 4] = [
        Self::Cautious,
        Self::Aggressive,
        Self::Balanced,
        Self::Random,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GameplayStrategy::Cautious => "Cautious",
            GameplayStrategy::Aggressive => "Aggressive",
            GameplayStrategy::Balanced => "Balanced",
            GameplayStrategy::Random => "Random",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            GameplayStrategy::Cautious => {
                "Enters the event with the best odds; installs parts that add performance without costing durability"
            }
            GameplayStrategy::Aggressive => {
                "Always enters the hardest event; installs every part it wins"
            }
            GameplayStrategy::Balanced => {
                "Weighs odds against difficulty and remaining durability; installs net-positive parts"
            }
            GameplayStrategy::Random => "Picks events and installs uniformly at random",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy> {
        match self {
            GameplayStrategy::Cautious => Box::new(CautiousPolicy),
            GameplayStrategy::Aggressive => Box::new(AggressivePolicy),
            GameplayStrategy::Balanced => Box::new(BalancedPolicy),
            GameplayStrategy::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl Serialize for GameplayStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct CautiousPolicy;
struct AggressivePolicy;
struct BalancedPolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerPolicy for CautiousPolicy {
    fn name(&self) -> &'static str {
        "Cautious"
    }

    fn pick_event(&mut self, session: &GameSession) -> PolicyDecision {
        let vehicle = session.vehicle();
        let (idx, chance) = session
            .events()
            .iter()
            .enumerate()
            .map(|(idx, event)| (idx, event.projected_success_chance(vehicle)))
            .fold((0, f64::NEG_INFINITY), |best, candidate| {
                if candidate.1 > best.1 { candidate } else { best }
            });
        PolicyDecision::new(idx, Some(format!("chance {chance:.2}")))
    }

    fn pick_install(&mut self, session: &GameSession) -> Option<usize> {
        session.inventory().iter().position(|part| {
            let stats = part.stats();
            stats.durability >= 0 && stats.performance() > 0
        })
    }
}

impl PlayerPolicy for AggressivePolicy {
    fn name(&self) -> &'static str {
        "Aggressive"
    }

    fn pick_event(&mut self, session: &GameSession) -> PolicyDecision {
        let (idx, difficulty) = session
            .events()
            .iter()
            .enumerate()
            .map(|(idx, event)| (idx, event.difficulty()))
            .max_by_key(|(idx, difficulty)| (*difficulty, std::cmp::Reverse(*idx)))
            .unwrap_or((0, 0));
        PolicyDecision::new(idx, Some(format!("difficulty {difficulty}")))
    }

    fn pick_install(&mut self, session: &GameSession) -> Option<usize> {
        (!session.inventory().is_empty()).then_some(0)
    }
}

impl PlayerPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn pick_event(&mut self, session: &GameSession) -> PolicyDecision {
        let vehicle = session.vehicle();
        let (idx, score) = session
            .events()
            .iter()
            .enumerate()
            .map(|(idx, event)| (idx, balanced_score(event, vehicle)))
            .fold((0, f64::NEG_INFINITY), |best, candidate| {
                if candidate.1 > best.1 { candidate } else { best }
            });
        PolicyDecision::new(idx, Some(format!("score {score:.2}")))
    }

    fn pick_install(&mut self, session: &GameSession) -> Option<usize> {
        session.inventory().iter().position(net_positive)
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn pick_event(&mut self, session: &GameSession) -> PolicyDecision {
        let count = session.events().len().max(1);
        let idx = self.rng.gen_range(0..count);
        PolicyDecision::new(idx, None)
    }

    fn pick_install(&mut self, session: &GameSession) -> Option<usize> {
        let count = session.inventory().len();
        if count == 0 || !self.rng.gen_bool(0.5) {
            return None;
        }
        Some(self.rng.gen_range(0..count))
    }
}

/// Expected reward weight minus expected damage relative to what is left.
fn balanced_score(event: &Event, vehicle: &Vehicle) -> f64 {
    let chance = event.projected_success_chance(vehicle);
    let difficulty = f64::from(event.difficulty());
    let expected_damage = 20.0 * difficulty;
    let durability = f64::from(vehicle.durability().max(1));
    let mut score = chance * difficulty - (1.0 - chance) * expected_damage / durability;
    if expected_damage >= durability {
        score -= difficulty;
    }
    score
}

fn net_positive(part: &Part) -> bool {
    part.stats().total() > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearhead_game::GameConfig;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default(), 1337).unwrap()
    }

    #[test]
    fn aggressive_targets_hardest_event() {
        let session = session();
        let mut policy = GameplayStrategy::Aggressive.create_policy(1);
        let decision = policy.pick_event(&session);
        assert_eq!(session.events()[decision.event_index].difficulty(), 4);
    }

    #[test]
    fn cautious_prefers_best_odds() {
        let session = session();
        let mut policy = GameplayStrategy::Cautious.create_policy(1);
        let decision = policy.pick_event(&session);
        let chosen =
            session.events()[decision.event_index].projected_success_chance(session.vehicle());
        for event in session.events() {
            assert!(chosen >= event.projected_success_chance(session.vehicle()));
        }
    }

    #[test]
    fn empty_inventory_means_no_installs() {
        let session = session();
        for strategy in GameplayStrategy::ALL {
            let mut policy = strategy.create_policy(9);
            assert_eq!(policy.pick_install(&session), None, "{strategy}");
        }
    }

    #[test]
    fn random_policy_is_seeded() {
        let session = session();
        let picks = |seed| {
            let mut policy = GameplayStrategy::Random.create_policy(seed);
            (0..16)
                .map(|_| policy.pick_event(&session).event_index)
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(5), picks(5));
        assert!(picks(5).iter().all(|idx| *idx < session.events().len()));
    }

    #[test]
    fn labels_are_stable() {
        let labels: Vec<String> = GameplayStrategy::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["Cautious", "Aggressive", "Balanced", "Random"]);
    }
}
