//! Benchmark for alpha-beta search
//!
//! Measures Othello opening searches with the heuristic evaluator at several
//! depths, and a full Tic-Tac-Toe solve for comparison with plain minimax.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tabletop_ai::search::TerminalUtility;
use tabletop_ai::{alpha_beta, minimax, OthelloHeuristic, OthelloRules, RulesEngine, Side, TicTacToeRules};

fn bench_othello_opening(c: &mut Criterion) {
    let mut group = c.benchmark_group("othello_alpha_beta");
    let rules = OthelloRules::square(6).unwrap();
    let start = rules.initial_position();

    for depth in [2_u32, 4, 6] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| alpha_beta(&rules, black_box(&start), Side::Home, Some(depth), &OthelloHeuristic));
        });
    }
    group.finish();
}

fn bench_tictactoe_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_solve");
    let rules = TicTacToeRules::new();
    let start = rules.initial_position();

    group.bench_function("minimax", |b| {
        b.iter(|| minimax(&rules, black_box(&start), Side::Home, &TerminalUtility));
    });
    group.bench_function("alpha_beta", |b| {
        b.iter(|| alpha_beta(&rules, black_box(&start), Side::Home, None, &TerminalUtility));
    });
    group.finish();
}

criterion_group!(benches, bench_othello_opening, bench_tictactoe_solve);
criterion_main!(benches);
