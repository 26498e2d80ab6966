//! Property tests for the reorder engine.
//!
//! 1. The placement stays a bijection over `0..len` after every call
//! 2. The set of placed items never changes
//! 3. Move / end calls with no active drag leave the placement untouched
//! 4. After a drop the engine is idle and the dragged item sits at the
//!    reported slot
//! 5. A second identical move never emits more render requests

use proptest::prelude::*;
use springboard::{BoardConfig, EnginePhase, Point, RenderRequest, ReorderEngine};

#[derive(Debug, Clone)]
enum Op {
    Begin(usize),
    Move(f32, f32),
    End(f32, f32),
    Cancel,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..18).prop_map(Op::Begin),
        (-20.0f32..420.0, -20.0f32..820.0).prop_map(|(x, y)| Op::Move(x, y)),
        (-20.0f32..420.0, -20.0f32..820.0).prop_map(|(x, y)| Op::End(x, y)),
        Just(Op::Cancel),
    ]
}

type Engine = ReorderEngine<u32, Vec<RenderRequest<u32>>>;

fn board(grid: usize, tray: usize, count: u32) -> Engine {
    let config = BoardConfig {
        grid_region_size: grid,
        tray_size: tray,
        ..BoardConfig::default()
    };
    let mut engine = ReorderEngine::new(&config, Vec::new());
    engine.set_container_size(400.0, 800.0);
    for id in 0..count {
        engine.place_item(id, id as usize).expect("place");
    }
    engine
}

fn sorted(items: &[u32]) -> Vec<u32> {
    let mut items = items.to_vec();
    items.sort_unstable();
    items
}

fn apply(engine: &mut Engine, op: &Op) {
    match op {
        Op::Begin(slot) => {
            engine.begin_drag(*slot);
        }
        Op::Move(x, y) => {
            engine.update_drag(Point::new(*x, *y));
        }
        Op::End(x, y) => {
            let dragged = engine.dragged_item();
            let dropped = engine.end_drag(Point::new(*x, *y));
            if let (Some(item), Some(slot)) = (dragged, dropped) {
                assert_eq!(engine.item_at(slot), Some(item));
            }
            assert_eq!(engine.phase(), EnginePhase::Idle);
        }
        Op::Cancel => {
            engine.cancel_drag();
        }
    }
}

proptest! {
    #[test]
    fn placement_stays_bijective(ops in prop::collection::vec(op_strategy(), 1..120)) {
        let mut engine = board(10, 4, 14);
        let expected: Vec<u32> = (0..14).collect();
        for op in &ops {
            apply(&mut engine, op);
            prop_assert!(engine.placement().is_bijective());
            prop_assert_eq!(engine.item_count(), 14);
            prop_assert_eq!(sorted(engine.items()), expected.clone());
        }
    }

    #[test]
    fn single_region_board_stays_bijective(ops in prop::collection::vec(op_strategy(), 1..120)) {
        let mut engine = board(12, 0, 9);
        let expected: Vec<u32> = (0..9).collect();
        for op in &ops {
            apply(&mut engine, op);
            prop_assert!(engine.placement().is_bijective());
            prop_assert_eq!(sorted(engine.items()), expected.clone());
        }
    }

    #[test]
    fn idle_moves_and_drops_change_nothing(x in -20.0f32..420.0, y in -20.0f32..820.0) {
        let mut engine = board(10, 4, 14);
        let before = engine.items().to_vec();
        prop_assert!(!engine.update_drag(Point::new(x, y)));
        prop_assert_eq!(engine.end_drag(Point::new(x, y)), None);
        prop_assert_eq!(engine.items(), before.as_slice());
        prop_assert!(engine.sink().is_empty());
    }

    #[test]
    fn repeated_move_is_idempotent(
        start in 0usize..14,
        x in 0.0f32..400.0,
        y in 0.0f32..800.0,
    ) {
        let mut engine = board(10, 4, 14);
        prop_assert!(engine.begin_drag(start));
        engine.update_drag(Point::new(x, y));
        let items = engine.items().to_vec();
        let requests = engine.sink().len();
        prop_assert!(!engine.update_drag(Point::new(x, y)));
        prop_assert_eq!(engine.items(), items.as_slice());
        prop_assert_eq!(engine.sink().len(), requests);
    }
}
