//! Compares local alignment scores against rust-bio on random mutated pairs.
//!
//! cargo run --release --example accuracy --features simulate

use bio::alignment::pairwise::*;

use striped_aligner::simulate::*;
use striped_aligner::*;

fn test(matrix: &SubstitutionMatrix, iter: usize, len: usize, k: usize) -> usize {
    let mut wrong = 0usize;
    let alphabet = matrix.alphabet();
    let wildcard = Some(alphabet.wildcard());
    let mut sim = SequenceSimulator::seeded(alphabet.size(), wildcard, 1234);
    let config = AlignerConfig::default().with_gaps(10, 1);

    for _i in 0..iter {
        let r = sim.random(len);
        let q = sim.mutate_with_insert(&r, k, len / 10);

        // rust-bio
        let mut bio_aligner = Aligner::with_capacity(q.len(), r.len(), -10, -1, |a: u8, b: u8| matrix.score(b, a) as i32);
        let bio_score = bio_aligner.local(&q, &r).score;

        // ours
        let res = LocalAligner::with_query(matrix, config, &q).and_then(|mut a| a.align(&r, Strand::Forward));
        let scan_score = match res {
            Ok(res) => res.score as i32,
            Err(e) => {
                println!("error: {}", e);
                wrong += 1;
                continue;
            }
        };

        if bio_score != scan_score {
            wrong += 1;
            println!(
                "bio: {}, ours: {}\nq: {}\nr: {}\nk: {}",
                bio_score,
                scan_score,
                String::from_utf8_lossy(&alphabet.decode(&q)),
                String::from_utf8_lossy(&alphabet.decode(&r)),
                k
            );
        }
    }

    wrong
}

fn main() {
    env_logger::init();

    let iter = 100;
    let lens = [10, 20, 50, 100, 500];
    let rcp_ks = [10, 5, 2];

    for (name, matrix) in [("blosum62", SubstitutionMatrix::blosum62()), ("dna", SubstitutionMatrix::dna(2, -3))] {
        let mut total_wrong = 0usize;
        let mut total = 0usize;

        for &len in &lens {
            for &rcp_k in &rcp_ks {
                let wrong = test(&matrix, iter, len, len / rcp_k);
                println!("\n{} len: {}, k: {}, iter: {}, wrong: {}\n", name, len, len / rcp_k, iter, wrong);
                total_wrong += wrong;
                total += iter;
            }
        }

        println!("\n{} total: {}, wrong: {}", name, total, total_wrong);
    }
}
