use bio::alignment::pairwise::Aligner;
use rand::prelude::*;

use striped_aligner::scalar;
use striped_aligner::simulate::SequenceSimulator;
use striped_aligner::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A database that mostly contains a mutated copy of the query, so scores are
/// well above zero, or plain noise.
fn rand_pair(sim: &mut SequenceSimulator<StdRng>) -> (Vec<u8>, Vec<u8>) {
    let len = sim.rng().gen_range(1..150);
    let query = sim.random(len);
    let db = if sim.rng().gen_bool(0.7) {
        let (left, right) = (sim.rng().gen_range(0..40), sim.rng().gen_range(0..40));
        let mutated = sim.mutate(&query, query.len() / 8);
        sim.embed(&mutated, left, right)
    } else {
        let len = sim.rng().gen_range(0..200);
        sim.random(len)
    };
    (query, db)
}

fn scoring() -> Vec<(SubstitutionMatrix, GapPenalties)> {
    vec![
        (SubstitutionMatrix::dna(2, -1), GapPenalties::new(3, 1).unwrap()),
        (SubstitutionMatrix::dna(1, -3), GapPenalties::new(5, 2).unwrap()),
        (SubstitutionMatrix::blosum62(), GapPenalties::new(10, 1).unwrap()),
        (SubstitutionMatrix::blosum62(), GapPenalties::new(0, 4).unwrap()),
    ]
}

#[test]
fn test_matches_scalar_reference() {
    init();
    for (matrix, gaps) in scoring() {
        let mut sim = SequenceSimulator::seeded(matrix.alphabet_size(), None, 1234);
        for engine in Engine::available() {
            let config = AlignerConfig { gaps, engine: Some(engine), ..Default::default() };
            for _ in 0..30 {
                let (query, db) = rand_pair(&mut sim);
                let mut aligner = LocalAligner::with_query(&matrix, config, &query).unwrap();
                let res = aligner.align(&db, Strand::Forward).unwrap();
                let expected = scalar::local_alignment(&db, &query, &matrix, &gaps);

                assert_eq!(res.score, expected.score, "engine {:?}\nq: {:?}\nr: {:?}", engine, query, db);
                if expected.score > 0 {
                    assert_eq!((res.db_end, res.query_end), (expected.db_end, expected.query_end));
                }
            }
        }
    }
}

#[test]
fn test_matches_rust_bio() {
    init();
    for (matrix, gaps) in scoring() {
        let mut sim = SequenceSimulator::seeded(matrix.alphabet_size(), None, 5678);
        let config = AlignerConfig { gaps, ..Default::default() };
        for _ in 0..30 {
            let (query, db) = rand_pair(&mut sim);
            if db.is_empty() {
                continue;
            }

            let mut bio_aligner = Aligner::with_capacity(
                query.len(),
                db.len(),
                -(gaps.open as i32),
                -(gaps.extend as i32),
                |a: u8, b: u8| matrix.score(b, a) as i32,
            );
            let bio_score = bio_aligner.local(&query, &db).score;

            let mut aligner = LocalAligner::with_query(&matrix, config, &query).unwrap();
            let ours = aligner.align(&db, Strand::Forward).unwrap().score;
            assert_eq!(ours as i32, bio_score, "q: {:?}\nr: {:?}", query, db);
        }
    }
}

#[test]
fn test_coordinates_rescore() {
    init();
    for (matrix, gaps) in scoring() {
        let mut sim = SequenceSimulator::seeded(matrix.alphabet_size(), None, 42);
        let config = AlignerConfig { gaps, ..Default::default() };
        for _ in 0..40 {
            let (query, db) = rand_pair(&mut sim);
            let mut aligner = LocalAligner::with_query(&matrix, config, &query).unwrap();
            let res = aligner.align(&db, Strand::Forward).unwrap();
            if !res.is_aligned() {
                continue;
            }

            assert!(res.db_start <= res.db_end && res.query_start <= res.query_end);
            let sub_db = &db[res.db_start..=res.db_end];
            let sub_query = &query[res.query_start..=res.query_end];
            assert_eq!(scalar::local_score(sub_db, sub_query, &matrix, &gaps), res.score);
        }
    }
}

#[test]
fn test_width_transparency() {
    init();
    let mut sim = SequenceSimulator::seeded(4, None, 7);
    let matrix = SubstitutionMatrix::dna(2, -1);
    let base = AlignerConfig::default();

    for _ in 0..30 {
        // short enough that 8 bits never overflow
        let len = sim.rng().gen_range(1..60);
        let query = sim.random(len);
        let db = sim.mutate(&query, 6);

        let mut results = Vec::new();
        for width in [Width::W8, Width::W16, Width::W32] {
            let mut counters = SweepCounters::default();
            let mut aligner = LocalAligner::with_query(&matrix, base.with_width(width), &query).unwrap();
            results.push(aligner.align_with_observer(&db, Strand::Forward, &mut counters).unwrap());
            assert_eq!(counters.escalations, 0);
        }
        assert_eq!(results[0], results[1]);
        assert_eq!(results[1], results[2]);
    }
}

#[test]
fn test_engines_agree() {
    init();
    let matrix = SubstitutionMatrix::blosum62();
    let mut sim = SequenceSimulator::seeded(matrix.alphabet_size(), None, 99);

    for _ in 0..30 {
        let (query, db) = rand_pair(&mut sim);
        let results: Vec<AlignmentResult> = Engine::available()
            .into_iter()
            .map(|engine| {
                let config = AlignerConfig::default().with_gaps(11, 1).with_engine(engine);
                LocalAligner::with_query(&matrix, config, &query).unwrap().align(&db, Strand::Forward).unwrap()
            })
            .collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]), "{:?}", results);
    }
}

#[test]
fn test_escalation_is_transparent() {
    init();
    let mut sim = SequenceSimulator::seeded(4, None, 3);
    let matrix = SubstitutionMatrix::dna(2, -1);
    let query = sim.random(400);
    let mutated = sim.mutate(&query, 10);
    let db = sim.embed(&mutated, 50, 0);

    let mut counters = SweepCounters::default();
    let mut aligner = LocalAligner::with_query(&matrix, AlignerConfig::default(), &query).unwrap();
    let escalated = aligner.align_with_observer(&db, Strand::Forward, &mut counters).unwrap();
    assert!(counters.escalations >= 1);

    let mut wide = LocalAligner::with_query(&matrix, AlignerConfig::default().with_width(Width::W32), &query).unwrap();
    assert_eq!(wide.align(&db, Strand::Forward).unwrap(), escalated);
    assert_eq!(escalated.score, scalar::local_score(&db, &query, &matrix, &GapPenalties::default()));
}

#[test]
fn test_reverse_strand_matches_reverse_complement() {
    init();
    let mut sim = SequenceSimulator::seeded(5, None, 11);
    let dna = Alphabet::dna();
    let matrix = SubstitutionMatrix::dna(2, -1);

    for _ in 0..20 {
        let (query, db) = rand_pair(&mut sim);
        let rc = dna.reverse_complement(&db).unwrap();

        let mut aligner = LocalAligner::with_query(&matrix, AlignerConfig::default(), &query).unwrap();
        let on_reverse = aligner.align(&db, Strand::Reverse).unwrap();
        let on_copy = aligner.align(&rc, Strand::Forward).unwrap();

        assert_eq!(on_reverse.score, on_copy.score);
        assert_eq!(
            (on_reverse.db_start, on_reverse.db_end, on_reverse.query_start, on_reverse.query_end),
            (on_copy.db_start, on_copy.db_end, on_copy.query_start, on_copy.query_end)
        );
        if let Some((start, end)) = on_reverse.db_range_on_forward_strand(db.len()) {
            let forward_rc = dna.reverse_complement(&db[start..=end]).unwrap();
            let sub_query = &query[on_reverse.query_start..=on_reverse.query_end];
            assert_eq!(scalar::local_score(&forward_rc, sub_query, &matrix, &GapPenalties::default()), on_reverse.score);
        }
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    init();
    let matrix = SubstitutionMatrix::dna(2, -1);
    // many equally good query ends
    let query = vec![0u8; 70];
    let db = vec![0u8; 3];

    let mut aligner = LocalAligner::with_query(&matrix, AlignerConfig::default(), &query).unwrap();
    let first = aligner.align(&db, Strand::Forward).unwrap();
    assert_eq!((first.score, first.query_end, first.db_end), (6, 2, 2));
    for _ in 0..5 {
        assert_eq!(aligner.align(&db, Strand::Forward).unwrap(), first);
    }
}
