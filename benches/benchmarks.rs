criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_roll_catalog,
        scoring_six_dice,
        scoring_random_roll,
        enumerating_small_game,
        sorting_small_game,
        evaluating_opening_state,
}

fn building_roll_catalog(c: &mut criterion::Criterion) {
    c.bench_function("build the Roll Catalog", |b| b.iter(|| Catalog::new()));
}

fn scoring_six_dice(c: &mut criterion::Criterion) {
    let rolls = Roll::all(MAX_DICE);
    c.bench_function("score every 6-dice Roll", |b| {
        b.iter(|| rolls.iter().map(score::best).map(u32::from).sum::<u32>())
    });
}

fn scoring_random_roll(c: &mut criterion::Criterion) {
    c.bench_function("score a random 6-dice Roll", |b| {
        b.iter(|| score::best(&Roll::random()))
    });
}

fn enumerating_small_game(c: &mut criterion::Criterion) {
    let rules = Rules::new(2, 8, 7, 10).unwrap();
    c.bench_function("enumerate a small 2-player game", |b| {
        b.iter(|| Enumerator::new(rules).count())
    });
}

fn sorting_small_game(c: &mut criterion::Criterion) {
    let rules = Rules::new(2, 8, 7, 10).unwrap();
    let records = Enumerator::new(rules).map(Record::from).collect::<Vec<_>>();
    let workdir = tempfile::tempdir().unwrap();
    c.bench_function("external sort of a small 2-player game", |b| {
        b.iter(|| {
            Sorter::sort(workdir.path(), 2, 1 << 10, records.iter().copied())
                .unwrap()
                .count()
        })
    });
}

fn evaluating_opening_state(c: &mut criterion::Criterion) {
    let rules = Rules::new(2, 8, 7, 10).unwrap();
    let table = Table::new(rules);
    c.bench_function("evaluate the opening State over 462 Rolls", |b| {
        b.iter(|| Selector::new(&rules, &table).evaluate(&rules.initial()))
    });
}

use robofarkle::Arbitrary;
use robofarkle::MAX_DICE;
use robofarkle::database::Table;
use robofarkle::dice::Catalog;
use robofarkle::dice::Roll;
use robofarkle::dice::score;
use robofarkle::disk::Record;
use robofarkle::disk::Sorter;
use robofarkle::enumerate::Enumerator;
use robofarkle::game::Rules;
use robofarkle::solver::Selector;
