use criterion::{black_box, criterion_group, criterion_main, Criterion};

use heroquiz_core::board::{Board, NoopObserver};
use heroquiz_core::model::{ChoiceQuestion, GameContent, GameSpec, QuizSet};
use heroquiz_core::sanitize::escape_html;
use heroquiz_core::Theme;

fn choice_quiz(questions: usize, options: usize) -> QuizSet {
    let questions = (0..questions)
        .map(|i| {
            ChoiceQuestion::new(
                format!("Question {i} <with> \"markup\" & friends?"),
                (0..options).map(|o| format!("Option {o}")),
                i % options,
            )
        })
        .collect();
    QuizSet {
        id: "bench".into(),
        title: "Bench".into(),
        description: String::new(),
        theme: None,
        games: vec![GameSpec {
            container: "mc".into(),
            title: Some("Pick one".into()),
            finish_button: true,
            unused_fields: Vec::new(),
            content: GameContent::MultipleChoice { questions },
        }],
    }
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_html");

    let plain = "Insulin lowers blood sugar after a meal.".repeat(10);
    let hostile = "<script>alert('x')</script> & \"quotes\"".repeat(10);

    group.bench_function("plain", |b| b.iter(|| escape_html(black_box(&plain))));
    group.bench_function("hostile", |b| b.iter(|| escape_html(black_box(&hostile))));

    group.finish();
}

fn bench_mount(c: &mut Criterion) {
    let mut group = c.benchmark_group("mount");

    for (questions, options) in [(5, 3), (50, 4), (200, 4)] {
        let quiz = choice_quiz(questions, options);
        group.bench_function(format!("multiple_choice {questions}x{options}"), |b| {
            b.iter(|| Board::for_quiz(black_box(&quiz), Theme::hero(), &NoopObserver))
        });
        let board = Board::for_quiz(&quiz, Theme::hero(), &NoopObserver);
        group.bench_function(format!("serialize {questions}x{options}"), |b| {
            b.iter(|| board.to_html())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_escape, bench_mount);
criterion_main!(benches);
