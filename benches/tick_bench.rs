use criterion::{black_box, criterion_group, criterion_main, Criterion};

use project_knight::board::{Board, TileTemplates};
use project_knight::core::{BoardConfig, GameState, MotionConfig, PlayerConfig};
use project_knight::games::zombies::ZombieGameBuilder;
use project_knight::grid::GridAddress;

const DT: f32 = 0.02;

fn bench_build_board(c: &mut Criterion) {
    c.bench_function("build_board_32x32", |b| {
        b.iter(|| {
            let mut board = Board::new(&BoardConfig::new(32, 32));
            let mut factory = TileTemplates::new().with_template("Grass");
            board.build(&mut factory).unwrap();
            black_box(board.tile_count())
        })
    });
}

fn bench_settle_deployment(c: &mut Criterion) {
    c.bench_function("deploy_and_settle_16", |b| {
        b.iter(|| {
            let mut state = GameState::new(Board::new(&BoardConfig::new(8, 8)), MotionConfig::default(), 1);
            state
                .build_board(&mut TileTemplates::new().with_template("Grass"))
                .unwrap();
            let player = state
                .add_player(
                    &PlayerConfig::new("A")
                        .with_starting_pieces(16)
                        .with_deploy_area(GridAddress::new(0, 0), GridAddress::new(7, 7)),
                )
                .unwrap();
            for i in 0..16 {
                state
                    .move_to_play(player, GridAddress::new(i / 8, i % 8), None)
                    .unwrap();
            }
            black_box(state.run_until_settled(DT, 5000).unwrap())
        })
    });
}

fn bench_zombie_turns(c: &mut Criterion) {
    c.bench_function("zombies_1000_ticks", |b| {
        b.iter(|| {
            let mut session = ZombieGameBuilder::new().build_session(7).unwrap();
            session.start().unwrap();
            for _ in 0..1000 {
                black_box(session.tick(DT).unwrap());
            }
            black_box(session.ticks())
        })
    });
}

criterion_group!(benches, bench_build_board, bench_settle_deployment, bench_zombie_turns);
criterion_main!(benches);
