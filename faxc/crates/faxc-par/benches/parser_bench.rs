//! Parser benchmarks: measures how `faxc-par` scales across the shapes of
//! program SPEC_FULL.md's unbound tree actually carries (declarations,
//! control flow, match, structure/enumeration literals).
//! Run with: `cargo bench --package faxc-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use faxc_par::ast::Program;
use faxc_util::diagnostic::Handler;

fn parse_source(source: &str) -> Program {
    let mut handler = Handler::new();
    faxc_par::parse(source, &mut handler)
}

fn bench_parser_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_simple");

    let source = "let x: i32 = 42;";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("let_statement", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

fn bench_parser_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_functions");

    let source = r#"
        fn main() {
            let x: i32 = 42;
            let y: i32 = x + 1;
            return y;
        }

        fn fib(n: i32): i32 {
            if n <= 1 {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("functions", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_structs(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_structs");

    let source = r#"
        struct Point {
            x: i32,
            y: i32,
        }

        struct Rectangle {
            origin: Point,
            width: i32,
            height: i32,
        }

        fn make_point(x: i32, y: i32): Point {
            return Point { x, y };
        }

        fn area(r: Rectangle): i32 {
            return r.width * r.height;
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("structs", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

fn bench_parser_enums(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_enums");

    let source = r#"
        enum Color {
            Red,
            Green,
            Blue,
            Custom(i32),
        }

        enum Shape {
            Circle(f64),
            Square(f64),
            Point,
        }

        fn describe(c: Color): string {
            match c {
                Color.Red => "red",
                Color.Green => "green",
                Color.Blue => "blue",
                _ => "custom",
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("enums", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
        fn process(n: i32): i32 {
            if n < 0 {
                return -1;
            } else if n == 0 {
                return 0;
            } else {
                match n {
                    1 => return 1,
                    2 => return 2,
                    _ => {
                        let mut sum: i32 = 0;
                        let mut i: i32 = 0;
                        while i < n {
                            sum = sum + i;
                            i = i + 1;
                        }
                        return sum;
                    }
                }
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("control_flow", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

fn bench_parser_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_complex");

    let source = r#"
        struct Point {
            x: i32,
            y: i32,
        }

        struct Rectangle {
            origin: Point,
            width: i32,
            height: i32,
        }

        enum Shape {
            Circle,
            Square,
            Rectangle,
        }

        fn make_point(x: i32, y: i32): Point {
            return Point { x, y };
        }

        fn perimeter(r: Rectangle): i32 {
            return 2 * (r.width + r.height);
        }

        fn describe_shape(s: Shape): string {
            match s {
                Shape.Circle => "circle",
                Shape.Square => "square",
                Shape.Rectangle => "rectangle",
            }
        }

        fn main() {
            let origin: Point = make_point(0, 0);
            let sizes: [i32; 3] = [1, 2, 3];
            for size in sizes {
                let r: Rectangle = Rectangle { origin, size, size };
                puts perimeter(r) as string;
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("complex_source", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_simple,
    bench_parser_functions,
    bench_parser_structs,
    bench_parser_enums,
    bench_parser_control_flow,
    bench_parser_complex
);
criterion_main!(benches);
