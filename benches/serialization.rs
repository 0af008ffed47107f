use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tycon::{from_str, group, list, Config, Node};

fn sample_source(entries: u32) -> String {
    let mut source = String::from("# generated benchmark input\n");
    for i in 0..entries {
        source.push_str(&format!(
            "service_{i} = {{\n\thost = \"host-{i}.internal\"\n\tport = {}\n\tweight = {}.5\n\tactive = {}\n\tmirrors = [ \"eu\" \"us\" \"ap\" ]\n}}\n",
            8000 + i,
            i,
            i % 2 == 0,
        ));
    }
    source
}

fn sample_config(entries: u32) -> Config {
    let mut config = Config::new();
    for i in 0..entries {
        config
            .insert(Node::named(
                format!("service_{i}"),
                group! {
                    host = format!("host-{i}.internal"),
                    port = 8000 + i as i32,
                    weight = f64::from(i) + 0.5,
                    active = i % 2 == 0,
                    mirrors = list!["eu", "us", "ap"],
                },
            ))
            .unwrap();
    }
    config
}

fn benchmark_parse_flat(c: &mut Criterion) {
    let source = "host = \"localhost\"\nport = 8080\nratio = 0.75\nactive = true\n";

    c.bench_function("parse_flat_scalars", |b| {
        b.iter(|| from_str(black_box(source)))
    });
}

fn benchmark_parse_sized(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 50, 100, 500].iter() {
        let source = sample_source(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| from_str(black_box(source)))
        });
    }
    group.finish();
}

fn benchmark_emit_sized(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    for size in [10, 50, 100, 500].iter() {
        let config = sample_config(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, config| {
            b.iter(|| black_box(config).emit())
        });
    }
    group.finish();
}

fn benchmark_parse_comment_heavy(c: &mut Criterion) {
    let mut source = String::new();
    for i in 0..100 {
        source.push_str(&format!(
            "# entry {i}\n// generated\n/* block\ncomment */\nitem_{i} = {i}\n"
        ));
    }

    c.bench_function("parse_comment_heavy", |b| {
        b.iter(|| from_str(black_box(&source)))
    });
}

fn benchmark_lookup(c: &mut Criterion) {
    let config = sample_config(100);

    c.bench_function("lookup_deep_path", |b| {
        b.iter(|| black_box(&config).lookup("service_50/mirrors/2"))
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let source = sample_source(50);

    c.bench_function("roundtrip_50_groups", |b| {
        b.iter(|| {
            let config = from_str(black_box(&source)).unwrap();
            black_box(config.emit())
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_flat,
    benchmark_parse_sized,
    benchmark_emit_sized,
    benchmark_parse_comment_heavy,
    benchmark_lookup,
    benchmark_roundtrip
);
criterion_main!(benches);
