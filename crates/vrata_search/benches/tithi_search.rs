use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};

use vrata_astro::{CalcFlags, Ephemeris, LocationRegistry, Tithi};
use vrata_search::{find_next_vrata, find_tithi_start};
use vrata_time::JulDaysUt;

fn bench_tithi_search(c: &mut Criterion) {
    let eph = Ephemeris::new(
        LocationRegistry::find("Udupi").expect("registry location"),
        CalcFlags::default(),
    );
    let start = JulDaysUt::from_date(NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"));

    c.bench_function("find_tithi_start ekadashi", |b| {
        b.iter(|| find_tithi_start(&eph, start, Tithi::new(Tithi::EKADASHI)))
    });

    c.bench_function("find_next_vrata udupi", |b| {
        b.iter(|| find_next_vrata(NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"), &eph))
    });
}

criterion_group!(benches, bench_tithi_search);
criterion_main!(benches);
