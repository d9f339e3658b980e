//! End-to-end scenarios: auto-deploy, swarming off the edge, and capture.

use project_knight::board::{Board, TileTemplates};
use project_knight::core::{BoardConfig, GameEvent, GameState, MotionConfig, PieceId, PlayerConfig, PlayerId};
use project_knight::grid::GridAddress;
use project_knight::players::{Direction, SwarmPolicy, TurnPhase, TurnPolicy};

const DT: f32 = 0.02;
const MAX_TICKS: usize = 5000;

fn built_state(rows: i32, cols: i32, seed: u64) -> GameState {
    let mut state = GameState::new(Board::new(&BoardConfig::new(rows, cols)), MotionConfig::default(), seed);
    state
        .build_board(&mut TileTemplates::new().with_template("Grass"))
        .unwrap();
    state
}

fn settle(state: &mut GameState) {
    assert!(
        state.run_until_settled(DT, MAX_TICKS).unwrap().is_some(),
        "pieces still moving after {MAX_TICKS} ticks"
    );
}

fn deploy(state: &mut GameState, player: PlayerId, address: GridAddress) -> PieceId {
    let piece = state.move_to_play(player, address, None).unwrap().unwrap();
    settle(state);
    piece
}

/// Auto-deploy fills five distinct tiles, then signals ready.
#[test]
fn test_auto_deploy_whole_board() {
    let mut state = built_state(5, 5, 42);
    let player = state
        .add_player(
            &PlayerConfig::new("Knights")
                .with_starting_pieces(5)
                .with_deploy_area(GridAddress::new(0, 0), GridAddress::new(4, 4)),
        )
        .unwrap();

    state.begin_auto_deploy(player).unwrap();
    assert_eq!(state.player(player).unwrap().phase(), TurnPhase::SettingUp);

    let mut events = Vec::new();
    for _ in 0..MAX_TICKS {
        state.tick(DT).unwrap();
        events.extend(state.drain_events());
        if state.player(player).unwrap().is_ready() {
            break;
        }
    }

    let knights = state.player(player).unwrap();
    assert!(knights.is_ready());
    assert!(knights.pool().is_empty());
    assert_eq!(knights.in_play().len(), 5);

    let mut tiles: Vec<GridAddress> = knights
        .in_play()
        .iter()
        .map(|&piece| state.piece(piece).unwrap().occupied_tile().unwrap())
        .collect();
    tiles.sort();
    tiles.dedup();
    assert_eq!(tiles.len(), 5);
    for address in &tiles {
        assert!(state.board().is_valid_address(*address));
        assert_eq!(state.board().tile(*address).unwrap().occupiers().len(), 1);
    }

    let deployed = events
        .iter()
        .position(|e| *e == GameEvent::AllPiecesDeployed { player, deployed: 5 })
        .expect("AllPiecesDeployed");
    let ready = events
        .iter()
        .position(|e| *e == GameEvent::ReadyToPlay { player })
        .expect("ReadyToPlay");
    assert!(deployed < ready);
}

/// A swarm piece whose destination is off the board goes back to the pool.
#[test]
fn test_swarm_off_edge_returns_to_pool() {
    let mut state = built_state(5, 5, 7);
    let player = state
        .add_player(
            &PlayerConfig::new("Zombies")
                .with_starting_pieces(1)
                .with_deploy_area(GridAddress::new(4, 0), GridAddress::new(4, 4)),
        )
        .unwrap();
    let piece = deploy(&mut state, player, GridAddress::new(2, 2));
    state.drain_events();

    let mut policy = SwarmPolicy::new(Direction::Up, 3, 0);
    state.start_turn(player).unwrap();
    policy.take_turn(&mut state, player).unwrap();

    let zombies = state.player(player).unwrap();
    assert_eq!(zombies.phase(), TurnPhase::Movement);
    assert!(!zombies.is_in_play(piece));
    assert!(!state.board().tile(GridAddress::new(2, 2)).unwrap().is_occupied());
    settle(&mut state);

    let zombies = state.player(player).unwrap();
    assert!(zombies.is_in_pool(piece));
    assert!(zombies.in_play().is_empty());
    assert_eq!(state.piece(piece).unwrap().occupied_tile(), None);
    assert!(state.board().tiles().all(|tile| !tile.is_occupied()));
    assert!(state
        .events()
        .contains(&GameEvent::LastPieceRemovedFromPlay { player }));
}

/// A swarm piece one row short of the edge still moves normally.
#[test]
fn test_swarm_marches_within_board() {
    let mut state = built_state(5, 5, 7);
    let player = state
        .add_player(
            &PlayerConfig::new("Zombies")
                .with_starting_pieces(1)
                .with_deploy_area(GridAddress::new(0, 0), GridAddress::new(4, 4)),
        )
        .unwrap();
    let piece = deploy(&mut state, player, GridAddress::new(2, 2));

    let mut policy = SwarmPolicy::new(Direction::Up, 2, 0);
    state.start_turn(player).unwrap();
    policy.take_turn(&mut state, player).unwrap();
    settle(&mut state);

    assert_eq!(state.piece(piece).unwrap().occupied_tile(), Some(GridAddress::new(4, 2)));
    assert_eq!(state.player(player).unwrap().in_play(), &[piece]);
}

/// Landing on an opponent sends the opponent home and leaves the mover alone
/// on the tile.
#[test]
fn test_capture_leaves_single_occupier() {
    let mut state = built_state(5, 5, 3);
    let whole = |name: &str| {
        PlayerConfig::new(name)
            .with_starting_pieces(1)
            .with_deploy_area(GridAddress::new(0, 0), GridAddress::new(4, 4))
    };
    let defender = state.add_player(&whole("Knights")).unwrap();
    let attacker = state.add_player(&whole("Zombies")).unwrap();
    let target = GridAddress::new(3, 1);

    let victim = deploy(&mut state, defender, target);
    let mover = deploy(&mut state, attacker, GridAddress::new(0, 4));
    state.drain_events();

    state.move_in_play(attacker, mover, target).unwrap();
    settle(&mut state);

    let tile = state.board().tile(target).unwrap();
    assert_eq!(tile.occupiers(), &[mover]);

    let knights = state.player(defender).unwrap();
    assert!(knights.is_in_pool(victim));
    assert!(!knights.is_in_play(victim));
    assert_eq!(state.piece(victim).unwrap().owner(), defender);
    assert_eq!(state.piece(victim).unwrap().position(), knights.pool_position());

    let events = state.drain_events();
    assert!(events.contains(&GameEvent::PieceCaptured {
        piece: victim,
        owner: defender,
        by: attacker,
    }));
    assert!(events.contains(&GameEvent::MoveComplete {
        piece: mover,
        player: attacker,
    }));
}
