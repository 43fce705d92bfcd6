use criterion::{Criterion, criterion_group, criterion_main};
use multiedit_engine::{Converter, MathMarkup, MathWrapping};

fn generate_math_html(paragraphs: usize) -> String {
    let base = "<p>Inline $a^2 + b^2$ with an escaped \\$5 price and $c$.</p>\n<p>$$\n\\sum_i x_i\n$$</p>\n";
    base.repeat(paragraphs)
}

fn bench_math_wrapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("delimiters");
    group.sample_size(10);

    let wrapping = MathWrapping::new(&MathMarkup::default()).unwrap();
    let html = generate_math_html(100);
    group.bench_function("math_wrapping", |b| {
        b.iter(|| std::hint::black_box(wrapping.apply(std::hint::black_box(&html))));
    });

    let converter = Converter::standard().unwrap();
    let markdown = "Some $x$ text with **bold** and $$y$$.\n\n".repeat(100);
    group.bench_function("markdown_to_html", |b| {
        b.iter(|| std::hint::black_box(converter.markdown_to_html(std::hint::black_box(&markdown))));
    });

    group.finish();
}

criterion_group!(benches, bench_math_wrapping);
criterion_main!(benches);
