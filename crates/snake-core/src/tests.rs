//! Unit tests for snake-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn next_is_strictly_greater() {
        assert!(AgentId(3).next() > AgentId(3));
        assert_eq!(AgentId(3).next(), AgentId(4));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geom {
    use crate::{Direction, Position};

    #[test]
    fn wrap_folds_negative_and_overflowing_coordinates() {
        assert_eq!(Position::new(-1, 0).wrap(20, 10), Position::new(19, 0));
        assert_eq!(Position::new(20, 10).wrap(20, 10), Position::new(0, 0));
        assert_eq!(Position::new(-41, 23).wrap(20, 10), Position::new(19, 3));
    }

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::CARDINALS {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
        assert_eq!(Direction::Stay.opposite(), Direction::Stay);
    }

    #[test]
    fn four_right_turns_return_home() {
        for d in Direction::CARDINALS {
            assert_eq!(d.turn_right().turn_right().turn_right().turn_right(), d);
            assert_eq!(d.turn_right().turn_left(), d);
        }
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
    }

    #[test]
    fn offset_then_opposite_is_identity() {
        let p = Position::new(5, 5);
        for d in Direction::CARDINALS {
            assert_eq!(p.offset(d).offset(d.opposite()), p);
        }
        assert_eq!(p.offset(Direction::Stay), p);
    }

    #[test]
    fn reverses_only_flags_the_opposite_heading() {
        assert!(Direction::Left.reverses(Direction::Right));
        assert!(!Direction::Up.reverses(Direction::Right));
        assert!(!Direction::Stay.reverses(Direction::Stay));
    }

    #[test]
    fn torus_distance_takes_the_short_way_round() {
        let a = Position::new(0, 0);
        assert_eq!(a.torus_distance(Position::new(19, 0), 20, 20), 1);
        assert_eq!(a.torus_distance(Position::new(10, 10), 20, 20), 20);
        assert_eq!(a.torus_distance(Position::new(3, 18), 20, 20), 5);
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{Pacing, Tick};

    #[test]
    fn since_saturates() {
        assert_eq!(Tick(10).since(Tick(4)), 6);
        assert_eq!(Tick(4).since(Tick(10)), 0);
    }

    #[test]
    fn pacing_scales_backlog() {
        let p = Pacing::new(10);
        assert_eq!(p.delay(Tick(5), Tick(5)), None);
        assert_eq!(p.delay(Tick(5), Tick(8)), Some(Duration::from_millis(30)));
    }
}

#[cfg(test)]
mod config {
    use crate::{GameConfig, SpawnerConfig, Consumable};

    #[test]
    fn default_is_valid() {
        let c = GameConfig::default();
        c.validate().unwrap();
        assert_eq!(c.cell_count(), 2_400);
        assert_eq!(c.spawners.len(), 3);
    }

    #[test]
    fn rejects_empty_board() {
        let c = GameConfig { width: 0, ..GameConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_oversized_spawner() {
        let c = GameConfig {
            width: 3,
            height: 3,
            spawners: vec![SpawnerConfig { kind: Consumable::Food, width: 4, height: 1 }],
            ..GameConfig::default()
        };
        assert!(c.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        for _ in 0..32 {
            assert_eq!(a.gen_range(0..1_000u32), b.gen_range(0..1_000u32));
        }
    }

    #[test]
    fn children_diverge_by_offset() {
        let mut root_a = SimRng::new(1);
        let mut root_b = SimRng::new(1);
        let mut c1 = root_a.child(1);
        let mut c2 = root_b.child(2);
        let s1: Vec<u64> = (0..8).map(|_| c1.gen_range(0..u64::MAX)).collect();
        let s2: Vec<u64> = (0..8).map(|_| c2.gen_range(0..u64::MAX)).collect();
        assert_ne!(s1, s2);
    }
}
