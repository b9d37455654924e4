use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::Value;

use jsonpush::sink::NullSink;
use jsonpush::JsonParser;

fn make_large(json: &str) -> String {
    let mut large = String::from("{");
    for i in 0..10000 {
        if large.len() > 1 {
            large.push(',');
        }
        large.push_str(&format!(r#""{}":"#, i));
        large.push_str(json);
    }
    large.push('}');
    large
}

fn jsonpush_parse(json_bytes: &[u8]) {
    let mut parser = JsonParser::new(NullSink);
    parser.feed(json_bytes).unwrap();
    parser.finish().unwrap();
    assert!(parser.is_done());
}

fn serde_parse(json_bytes: &[u8]) {
    let value: Value = serde_json::from_slice(json_bytes).unwrap();
    assert!(value.is_object());
}

fn criterion_benchmark(c: &mut Criterion) {
    let large = make_large(
        r#"{"first_name": "Elvis", "last_name": "Presley", "albums": 147, "rating": 9.5}"#,
    );

    c.bench_function("jsonpush", |b| b.iter(|| jsonpush_parse(large.as_bytes())));
    c.bench_function("serde_json", |b| b.iter(|| serde_parse(large.as_bytes())));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
