//! Plain O(n * m) Gotoh local alignment, one cell at a time.
//!
//! Much slower than the striped sweep but simple enough to trust; used to
//! check the vectorized results.

use std::cmp;

use crate::scores::{GapPenalties, SubstitutionMatrix};

/// Score, and where the first best cell was found (column-major order).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScalarHit {
    pub score: u32,
    pub db_end: usize,
    pub query_end: usize,
}

pub fn local_alignment(db: &[u8], query: &[u8], matrix: &SubstitutionMatrix, gaps: &GapPenalties) -> ScalarHit {
    let gap_o = gaps.first() as i64;
    let gap_e = gaps.extension() as i64;
    let neg_inf = i64::MIN / 4;

    let m = query.len();
    // column j - 1, indexed by query position + 1
    let mut h = vec![0i64; m + 1];
    let mut e = vec![neg_inf; m + 1];
    let mut res = ScalarHit { score: 0, db_end: 0, query_end: 0 };

    for (j, &d) in db.iter().enumerate() {
        let mut diag = 0i64;
        let mut up = 0i64;
        let mut f = neg_inf;

        for i in 0..m {
            let left = h[i + 1];
            e[i + 1] = cmp::max(e[i + 1] - gap_e, left - gap_o);
            f = cmp::max(f - gap_e, up - gap_o);

            let cell = cmp::max(cmp::max(0, diag + matrix.score(d, query[i]) as i64), cmp::max(e[i + 1], f));
            diag = left;
            h[i + 1] = cell;
            up = cell;

            if cell > res.score as i64 {
                res = ScalarHit { score: cell as u32, db_end: j, query_end: i };
            }
        }
    }

    res
}

pub fn local_score(db: &[u8], query: &[u8], matrix: &SubstitutionMatrix, gaps: &GapPenalties) -> u32 {
    local_alignment(db, query, matrix, gaps).score
}
