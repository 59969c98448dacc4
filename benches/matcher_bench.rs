// benches/matcher_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rphoneclassifier::{
    CallingCodeInfo, ClassifierType, DigitSequence, Metadata, RangeClassifier, RangeMap, RangeSet,
    RawClassifier, VersionInfo,
    tools::{self, MetadataConfig},
};

use phonenumber as rlp;

fn ranges(s: &str) -> RangeSet {
    RangeSet::parse(s).unwrap()
}

fn seq(s: &str) -> DigitSequence {
    DigitSequence::parse(s).unwrap()
}

/// A cut down UK numbering plan, enough to exercise deep matchers.
fn uk_classifier() -> RawClassifier {
    let fixed_line = ranges("1[1-9]xxxxxxxx, 2[03489]xxxxxxxx");
    let mobile = ranges("7[1-57-9]xxxxxxxx");
    let toll_free = ranges("80[08]xxxxxxx");
    let all = fixed_line.union(&mobile).union(&toll_free);

    let types = RangeClassifier::builder()
        .single_valued(true)
        .put("FIXED_LINE", fixed_line)
        .unwrap()
        .put("MOBILE", mobile)
        .unwrap()
        .put("TOLL_FREE", toll_free)
        .unwrap()
        .build();
    let regions = RangeClassifier::builder().put("GB", all.clone()).unwrap().build();
    let range_map = RangeMap::builder()
        .put(ClassifierType::Type, types)
        .unwrap()
        .put(ClassifierType::Region, regions)
        .unwrap()
        .build(all);

    let metadata = Metadata::builder()
        .put(seq("44"), CallingCodeInfo::new("GB"), range_map)
        .build()
        .unwrap();
    let config = MetadataConfig::new(VersionInfo::new("rphoneclassifier/bench", 1, 0, 0))
        .with_types(vec![ClassifierType::Type, ClassifierType::Region]);
    let proto = tools::generate_metadata(&metadata, &config).unwrap();
    RawClassifier::from_proto(&proto).unwrap()
}

fn setup_numbers() -> Vec<&'static str> {
    vec![
        "+442087654321",
        "+447400123456",
        "+448001234567",
        "+4420876543",
        "+4469123456",
        "+4420876543210",
    ]
}

fn matching_benchmark(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let classifier = uk_classifier();
    let numbers = setup_numbers();
    let parsed: Vec<(DigitSequence, DigitSequence)> = numbers
        .iter()
        .map(|n| {
            let number = classifier.parse_e164(n).unwrap();
            (number.calling_code, number.national_number)
        })
        .collect();

    let mut group = c.benchmark_group("Validation Comparison");

    group.bench_function("rphoneclassifier: match_number()", |b| {
        b.iter(|| {
            for (calling_code, national_number) in &parsed {
                let _ = classifier.match_number(black_box(calling_code), black_box(national_number));
            }
        })
    });

    group.bench_function("rphoneclassifier: parse_e164() + classify()", |b| {
        b.iter(|| {
            for number in &numbers {
                if let Ok(number) = classifier.parse_e164(black_box(number)) {
                    let _ = classifier.classify(&number.calling_code, &number.national_number, "TYPE");
                }
            }
        })
    });

    group.bench_function("rust-phonenumber: parse() + is_valid()", |b| {
        b.iter(|| {
            for number in &numbers {
                if let Ok(number) = rlp::parse(None, black_box(number)) {
                    let _ = rlp::is_valid(&number);
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, matching_benchmark);
criterion_main!(benches);
