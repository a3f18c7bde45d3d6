use gearhead_game::{
    Event, EventModifier, GameConfig, ModifierCatalog, Part, PartGenerator, Rarity, ScriptedDice,
    StatKind, Stats, Vehicle, reward_weights, roll_reward_rarity, success_chance,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeSet;

const SAMPLE_SIZE: usize = 3000;
const REWARD_SAMPLE_SIZE: usize = 20_000;
const TOLERANCE: f64 = 0.015;

fn clear_skies() -> ModifierCatalog {
    ModifierCatalog::single(EventModifier::new("Clear Skies").with_boost(10)).unwrap()
}

fn reward_rarity(part: &Part) -> Rarity {
    let key = part.name().split_whitespace().next().unwrap_or_default();
    key.parse().unwrap()
}

#[test]
fn install_and_uninstall_are_exact_inverses() {
    let generator = PartGenerator::default();
    let mut rng = SmallRng::seed_from_u64(0xCA7);
    let mut vehicle = Vehicle::new();
    vehicle.take_damage(17);

    for _ in 0..50 {
        let part = generator.generate_random(&mut rng).unwrap();
        let before = vehicle.clone();
        vehicle.install(part.clone()).unwrap();
        for kind in StatKind::ALL {
            assert_eq!(
                vehicle.stats().get(kind),
                before.stats().get(kind) + part.stats().get(kind)
            );
        }
        let last = vehicle.parts().len() - 1;
        assert_eq!(vehicle.uninstall(last).unwrap(), part);
        assert_eq!(vehicle, before);
        vehicle.install(part).unwrap();
    }
    assert_eq!(vehicle.parts().len(), 50);
    assert_eq!(
        vehicle.derived_stats().map(|s| s.speed),
        Some(50 + vehicle.parts().iter().map(|p| p.stats().speed).sum::<i32>())
    );
}

#[test]
fn generated_stats_respect_rarity_bounds() {
    let generator = PartGenerator::default();
    let mut rng = SmallRng::seed_from_u64(99);
    for part in generator.generate_batch(SAMPLE_SIZE, &mut rng).unwrap() {
        let rarity = reward_rarity(&part);
        let tier = generator.rarities().tier(rarity).unwrap();
        for kind in StatKind::ALL {
            assert!(tier.contains(part.stats().get(kind)), "{part}");
        }
    }
}

#[test]
fn low_difficulty_rewards_never_reach_epic() {
    let generator = PartGenerator::default();
    let catalog = clear_skies();
    let mut rng = SmallRng::seed_from_u64(2);
    for d in [1, 2] {
        for _ in 0..SAMPLE_SIZE {
            let event = Event::new("Drag Race", d, &catalog, &generator, &mut rng).unwrap();
            let rarity = reward_rarity(event.reward());
            assert!(
                matches!(rarity, Rarity::Common | Rarity::Rare),
                "difficulty {d} produced {rarity}"
            );
        }
    }
}

#[test]
fn difficulty_six_reaches_every_rarity() {
    let generator = PartGenerator::default();
    let catalog = clear_skies();
    let mut rng = SmallRng::seed_from_u64(6);
    let seen: BTreeSet<Rarity> = (0..SAMPLE_SIZE)
        .map(|_| {
            let event = Event::new("Grand Prix", 6, &catalog, &generator, &mut rng).unwrap();
            reward_rarity(event.reward())
        })
        .collect();
    assert_eq!(seen.into_iter().collect::<Vec<_>>(), Rarity::ALL.to_vec());
}

#[test]
fn reward_distribution_matches_difficulty_weights() {
    let mut rng = SmallRng::seed_from_u64(77);
    let mut counts = [0_u32; 4];
    for _ in 0..REWARD_SAMPLE_SIZE {
        let rarity = roll_reward_rarity(6, &mut rng);
        let slot = Rarity::ALL.iter().position(|r| *r == rarity).unwrap();
        counts[slot] += 1;
    }

    let weights = reward_weights(6);
    let total_weight: u32 = weights.iter().map(|(_, w)| *w).sum();
    assert_eq!(total_weight, 19);
    let total = f64::from(u32::try_from(REWARD_SAMPLE_SIZE).expect("sample size fits"));
    for (rarity, weight) in &weights {
        let slot = Rarity::ALL.iter().position(|r| r == rarity).unwrap();
        let observed = f64::from(counts[slot]) / total;
        let expected = f64::from(*weight) / f64::from(total_weight);
        assert!(
            (observed - expected).abs() <= TOLERANCE,
            "{rarity} drifted: observed {observed:.4}, expected {expected:.4}"
        );
    }
}

#[test]
fn low_difficulty_distribution_excludes_high_tiers() {
    let mut rng = SmallRng::seed_from_u64(78);
    let mut common = 0_u32;
    for _ in 0..REWARD_SAMPLE_SIZE {
        match roll_reward_rarity(2, &mut rng) {
            Rarity::Common => common += 1,
            Rarity::Rare => {}
            other => panic!("difficulty 2 produced {other}"),
        }
    }
    let total = f64::from(u32::try_from(REWARD_SAMPLE_SIZE).expect("sample size fits"));
    let observed = f64::from(common) / total;
    assert!((observed - 0.6).abs() <= TOLERANCE, "common share {observed:.4}");
}

#[test]
fn success_chance_clamps_at_both_ends() {
    let strong = Stats::new(400, 300, 300, 100, 50);
    assert!((success_chance(&strong, 1) - 1.0).abs() < f64::EPSILON);

    let weak = Stats::new(1, 0, 0, 100, 50);
    assert!((success_chance(&weak, 100) - 0.1).abs() < f64::EPSILON);
}

#[test]
fn losses_deal_damage_within_difficulty_bounds() {
    let generator = PartGenerator::default();
    let catalog = clear_skies();
    let mut rng = SmallRng::seed_from_u64(31);
    for d in [2_u32, 4, 7] {
        let event = Event::new("Gauntlet", d, &catalog, &generator, &mut rng).unwrap();
        let low = 10 * i32::try_from(d).unwrap();
        let high = 30 * i32::try_from(d).unwrap();
        for _ in 0..200 {
            let mut vehicle = Vehicle::new();
            let report = event.compete(&mut vehicle, &mut rng);
            let damage = report.damage();
            if report.succeeded() {
                assert_eq!(damage, 0);
            } else {
                assert!((low..=high).contains(&damage), "d={d} damage={damage}");
                assert_eq!(vehicle.durability(), 100 - damage);
            }
        }
    }
}

#[test]
fn three_heavy_losses_destroy_the_car_on_the_third() {
    let event = Event::new(
        "Endurance Race",
        4,
        &clear_skies(),
        &PartGenerator::default(),
        &mut ScriptedDice::new(),
    )
    .unwrap();
    let mut vehicle = Vehicle::new();
    let mut dice = ScriptedDice::new()
        .with_units([0.99, 0.99, 0.99])
        .with_ints([40, 40, 40]);

    // 40 is the smallest possible loss at difficulty 4
    let expected = [(60, false), (20, false), (-20, true)];
    for (durability, destroyed) in expected {
        let report = event.compete(&mut vehicle, &mut dice);
        assert!(!report.succeeded());
        assert_eq!(vehicle.durability(), durability);
        assert_eq!(vehicle.is_destroyed(), destroyed);
    }
}

#[test]
fn destruction_triggers_at_exactly_zero() {
    let event = Event::new(
        "Endurance Race",
        4,
        &clear_skies(),
        &PartGenerator::default(),
        &mut ScriptedDice::new(),
    )
    .unwrap();
    let mut vehicle = Vehicle::new();
    let mut dice = ScriptedDice::new()
        .with_units([0.99, 0.99])
        .with_ints([50, 50]);
    event.compete(&mut vehicle, &mut dice);
    assert!(!vehicle.is_destroyed());
    event.compete(&mut vehicle, &mut dice);
    assert_eq!(vehicle.durability(), 0);
    assert!(vehicle.is_destroyed());
}

#[test]
fn save_round_trip_keeps_stats_but_not_part_deltas() {
    let mut vehicle = Vehicle::new();
    vehicle
        .install(Part::new("Turbocharger", Stats::new(20, 0, 0, 0, 0), None))
        .unwrap();
    let exported = vehicle.export_state();
    let json = serde_json::to_string(&exported).unwrap();

    let mut restored = Vehicle::new();
    restored.import_state(&serde_json::from_str(&json).unwrap());

    assert_eq!(restored.speed(), exported.stats.speed);
    assert_eq!(restored.speed(), 70);
    assert_eq!(restored.parts().len(), 1);
    assert_eq!(restored.parts()[0].stats(), Stats::ZERO);
    assert_ne!(restored.derived_stats(), vehicle.derived_stats());
}

#[test]
fn default_config_tables_validate() {
    assert!(GameConfig::default().validate().is_ok());
}
