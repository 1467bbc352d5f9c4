//! Aligns two sequences given on the command line and prints the result.
//!
//! cargo run --example align_pair -- [--protein] DATABASE QUERY

use std::env;
use std::process;
use std::str;

use striped_aligner::*;

fn main() {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let protein = match args.iter().position(|a| a == "--protein") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };
    if args.len() != 2 {
        eprintln!("usage: align_pair [--protein] DATABASE QUERY");
        process::exit(2);
    }

    let (matrix, config) = if protein {
        (SubstitutionMatrix::blosum62(), AlignerConfig::default().with_gaps(10, 1))
    } else {
        (SubstitutionMatrix::dna(2, -1), AlignerConfig::default())
    };

    if let Err(e) = run(&matrix, config, args[0].as_bytes(), args[1].as_bytes()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(matrix: &SubstitutionMatrix, config: AlignerConfig, db_text: &[u8], query_text: &[u8]) -> Result<(), AlignError> {
    let alphabet = matrix.alphabet();
    let db = alphabet.encode(db_text)?;
    let query = alphabet.encode(query_text)?;

    let mut aligner = LocalAligner::with_query(matrix, config, &query)?;
    let mut counters = SweepCounters::default();
    let res = aligner.align_with_observer(&db, Strand::Forward, &mut counters)?;
    let best = aligner.align_best_strand(&db)?;

    println!("engine:   {}", aligner.engine().description());
    println!("score:    {}", res.score);
    if res.is_aligned() {
        println!(
            "database: {}..={} {}",
            res.db_start,
            res.db_end,
            str::from_utf8(&db_text[res.db_start..=res.db_end]).unwrap_or("?")
        );
        println!(
            "query:    {}..={} {}",
            res.query_start,
            res.query_end,
            str::from_utf8(&query_text[res.query_start..=res.query_end]).unwrap_or("?")
        );
    }
    println!(
        "columns:  {}, lazy F passes: {}, width escalations: {}",
        counters.columns, counters.lazy_f_passes, counters.escalations
    );
    if best.strand == Strand::Reverse {
        if let Some((start, end)) = best.db_range_on_forward_strand(db.len()) {
            println!("reverse strand scores higher: {} at database {}..={}", best.score, start, end);
        }
    }
    Ok(())
}
