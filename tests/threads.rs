use rand::prelude::*;

use striped_aligner::scalar;
use striped_aligner::simulate::SequenceSimulator;
use striped_aligner::*;

#[test]
fn test_one_aligner_per_thread() {
    let matrix = SubstitutionMatrix::blosum62();
    let gaps = GapPenalties::new(10, 1).unwrap();
    let mut sim = SequenceSimulator::seeded(20, None, 2024);

    let queries: Vec<Vec<u8>> = (0..4)
        .map(|_| {
            let len = sim.rng().gen_range(20..90);
            sim.random(len)
        })
        .collect();
    let dbs: Vec<Vec<u8>> = (0..12)
        .map(|i| {
            let q = &queries[i % queries.len()];
            sim.embed(&q[q.len() / 4..], 30, 0)
        })
        .collect();

    let results: Vec<Vec<u32>> = std::thread::scope(|s| {
        let handles: Vec<_> = queries
            .iter()
            .map(|query| {
                let matrix = &matrix;
                let dbs = &dbs;
                s.spawn(move || {
                    let config = AlignerConfig::default().with_gaps(gaps.open, gaps.extend);
                    let mut aligner = LocalAligner::with_query(matrix, config, query).unwrap();
                    dbs.iter().map(|db| aligner.align(db, Strand::Forward).unwrap().score).collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (query, scores) in queries.iter().zip(results.iter()) {
        for (db, &score) in dbs.iter().zip(scores.iter()) {
            assert_eq!(score, scalar::local_score(db, query, &matrix, &gaps));
        }
    }
}
