use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kentei_core::model::{AnswerSheet, Category, Choice, ExamPaper, Options, Question};
use kentei_core::score::grade;

fn make_paper(n: u32) -> ExamPaper {
    let questions = (0..n)
        .map(|id| Question {
            id,
            category: match id {
                0..=49 => Category::Knowledge,
                50..=74 => Category::Disaster,
                75..=89 => Category::Life,
                _ => Category::Culture,
            },
            text: format!("question {id}"),
            options: Options {
                a: "first".into(),
                b: "second".into(),
                c: "third".into(),
                d: "fourth".into(),
            },
            answer: Choice::A,
            explanation: None,
            theme: None,
            grade: None,
            note: None,
        })
        .collect();
    ExamPaper { questions }
}

fn make_sheet(paper: &ExamPaper, answered: usize) -> AnswerSheet {
    let mut sheet = AnswerSheet::new();
    for question in paper.questions.iter().take(answered) {
        sheet.record(question.id, Choice::A);
    }
    sheet
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");
    let paper = make_paper(100);

    group.bench_function("full_sheet", |b| {
        let sheet = make_sheet(&paper, 100);
        b.iter(|| grade(black_box(&paper), black_box(&sheet)))
    });

    group.bench_function("half_sheet", |b| {
        let sheet = make_sheet(&paper, 50);
        b.iter(|| grade(black_box(&paper), black_box(&sheet)))
    });

    group.bench_function("empty_sheet", |b| {
        let sheet = AnswerSheet::new();
        b.iter(|| grade(black_box(&paper), black_box(&sheet)))
    });

    group.finish();
}

criterion_group!(benches, bench_grade);
criterion_main!(benches);
