use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_crossword::adapter::parse_response;
use tui_crossword::core::{number_cells, Placement, Puzzle, SessionState};
use tui_crossword::types::{CellKey, CrosswordAction, Direction};

/// 15x15 lattice: a word on every even row and every even column.
fn lattice() -> Puzzle {
    let size = 15;
    let letters: Vec<char> = "CROSSWORDPUZZLE".chars().collect();
    let letter = |r: usize, c: usize| letters[(r + c) % letters.len()];

    let grid: Vec<Vec<Option<char>>> = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| (r % 2 == 0 || c % 2 == 0).then(|| letter(r, c)))
                .collect()
        })
        .collect();

    let mut placements = Vec::new();
    for i in (0..size).step_by(2) {
        let across: String = (0..size).map(|c| letter(i, c)).collect();
        placements.push(Placement::new(i, 0, Direction::Across, across, "row"));
        let down: String = (0..size).map(|r| letter(r, i)).collect();
        placements.push(Placement::new(0, i, Direction::Down, down, "column"));
    }
    Puzzle::new(grid, placements).unwrap()
}

fn bench_letter_entry(c: &mut Criterion) {
    let puzzle = Arc::new(lattice());
    c.bench_function("enter_letter_with_completion", |b| {
        b.iter(|| {
            let mut s = SessionState::new(Arc::clone(&puzzle), 1);
            s.apply_action(CrosswordAction::ClickCell { row: 0, col: 0 });
            for ch in "CROSSWORD".chars() {
                s.apply_action(black_box(CrosswordAction::EnterLetter(ch)));
            }
            s.score()
        })
    });
}

fn bench_reveal_all(c: &mut Criterion) {
    let puzzle = Arc::new(lattice());
    c.bench_function("reveal_all", |b| {
        b.iter(|| {
            let mut s = SessionState::new(Arc::clone(&puzzle), 1);
            s.reveal_all();
            s.finished()
        })
    });
}

fn bench_numbering(c: &mut Criterion) {
    let puzzle = lattice();
    c.bench_function("number_cells", |b| {
        b.iter(|| number_cells(black_box(puzzle.placements())))
    });
}

fn bench_words_at(c: &mut Criterion) {
    let puzzle = lattice();
    c.bench_function("words_at_intersection", |b| {
        b.iter(|| puzzle.words_at(black_box(CellKey::new(4, 4))).len())
    });
}

fn bench_parse_response(c: &mut Criterion) {
    let body = r#"{"size":3,"grid":[["C","A","T"],["","","A"],["","","N"]],"placements":[{"row":0,"col":0,"dir":"across","length":3,"word":"CAT","clue":"feline"},{"row":0,"col":2,"dir":"down","length":3,"word":"TAN","clue":"color"}]}"#;
    c.bench_function("parse_response", |b| {
        b.iter(|| parse_response(black_box(body)).is_ok())
    });
}

criterion_group!(
    benches,
    bench_letter_entry,
    bench_reveal_all,
    bench_numbering,
    bench_words_at,
    bench_parse_response
);
criterion_main!(benches);
