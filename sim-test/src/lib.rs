//! Shared test support: random pairs, reference implementations, and harnesses
//! that check a distance or score function against them.
use itertools::Itertools;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sim_types::*;

pub const DNA: &[u8] = b"ACGT";
pub const PRINTABLE: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,;:!?-_{}";

/// Codepoints of 1 to 4 bytes, including combining marks.
const UNICODE: &[char] = &[
    'a', 'b', 'c', 'e', 'o', ' ', 'é', 'ü', 'ß', 'α', 'β', 'γ', 'δ', 'ж', '\u{301}', '\u{308}',
    'こ', 'ん', 'に', 'ち', 'は', '世', '界', '€', '𠜎', '𠜱', '𠝹', '𠱓', '💖', '💗',
];

/// Pairs with a known distance.
pub fn test_sequences() -> Vec<(Seq<'static>, Seq<'static>, Cost)> {
    vec![
        (b"", b"", 0),
        (b"", b"abc", 3),
        (b"kitten", b"sitting", 3),
        (b"abc", b"abc", 0),
        (b"abc", b"ac", 1),
        (b"abc", b"a_bc", 1),
        (b"hello", b"hallo", 1),
        (b"ggbuzgjux{}l", b"gbuzgjux{}l", 1),
        (b"abcdefgABCDEFG", b"ABCDEFGabcdefg", 14),
        (b"ACTGACCAGT", b"CCGACAGGA", 5),
        (b"AGTTTTAT", b"ACCGATTTTTA", 5),
        (b"TTGGGTCAATCAGCCAGTTTTTA", b"TTTGAGTGGGTCATCACCGATTTTAT", 10),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorModel {
    /// Substitutions, insertions and deletions with equal probability.
    Uniform,
    /// Only insertions into `b`.
    NoisyInsert,
    /// Only deletions from `b`.
    NoisyDelete,
    /// `b` is a rotation of `a` with uniform noise on top.
    Rotate,
}

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn random_seq(rng: &mut impl Rng, n: usize, alphabet: &[u8]) -> Sequence {
    (0..n)
        .map(|_| *alphabet.choose(rng).unwrap_or(&b'A'))
        .collect()
}

/// Apply `edits` random edits of the given model to `seq`.
pub fn mutate(
    rng: &mut impl Rng,
    seq: Seq,
    edits: usize,
    model: ErrorModel,
    alphabet: &[u8],
) -> Sequence {
    let mut b = seq.to_vec();
    if model == ErrorModel::Rotate && !b.is_empty() {
        let k = rng.gen_range(0..b.len());
        b.rotate_left(k);
    }
    for _ in 0..edits {
        let op = match model {
            ErrorModel::Uniform | ErrorModel::Rotate => rng.gen_range(0..3),
            ErrorModel::NoisyInsert => 1,
            ErrorModel::NoisyDelete => 2,
        };
        let c = *alphabet.choose(rng).unwrap_or(&b'A');
        match op {
            0 if !b.is_empty() => {
                let i = rng.gen_range(0..b.len());
                b[i] = c;
            }
            2 if !b.is_empty() => {
                let i = rng.gen_range(0..b.len());
                b.remove(i);
            }
            _ => {
                let i = rng.gen_range(0..=b.len());
                b.insert(i, c);
            }
        }
    }
    b
}

/// A random sequence of length `n` and a copy with `e*n` edits.
pub fn generate_pair(
    n: usize,
    e: f32,
    model: ErrorModel,
    alphabet: &[u8],
    seed: u64,
) -> (Sequence, Sequence) {
    let rng = &mut rng(seed);
    let a = random_seq(rng, n, alphabet);
    let b = mutate(rng, &a, (n as f32 * e).ceil() as usize, model, alphabet);
    (a, b)
}

/// Lengths around every lane capacity.
pub const LENGTHS: &[usize] = &[
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 16, 17, 20, 31, 32, 33, 40, 50, 60, 62, 63, 64, 65, 100,
    126, 127, 128, 129, 200, 254, 255, 256, 257, 300, 511, 512, 513,
];

const ERROR_RATES: &[f32] = &[0.0, 0.02, 0.1, 0.3, 1.0];

const MODELS: [ErrorModel; 4] = [
    ErrorModel::Uniform,
    ErrorModel::NoisyInsert,
    ErrorModel::NoisyDelete,
    ErrorModel::Rotate,
];

/// Deterministic random pairs of at most `max_n` bytes each, with a description
/// for failure messages.
pub fn gen_seqs(max_n: usize) -> impl Iterator<Item = ((Sequence, Sequence), String)> {
    LENGTHS
        .iter()
        .copied()
        .filter(move |&n| n <= max_n)
        .cartesian_product(ERROR_RATES.iter().copied())
        .cartesian_product(MODELS)
        .enumerate()
        .map(|(i, ((n, e), model))| {
            let seed = 31415 + i as u64;
            let alphabet = if i % 2 == 0 { DNA } else { PRINTABLE };
            let pair = generate_pair(n, e, model, alphabet, seed);
            let params = format!(
                "seed {seed:>6} n {n:>4} e {e:>.2} model {model:?} alphabet {}",
                alphabet.len()
            );
            (pair, params)
        })
        .filter(move |((a, b), _)| a.len().max(b.len()) <= max_n)
}

/// Full-matrix Levenshtein distance.
pub fn naive_levenshtein<C: Eq>(a: &[C], b: &[C]) -> Cost {
    let mut m = vec![vec![0; b.len() + 1]; a.len() + 1];
    for i in 0..=a.len() {
        m[i][0] = i;
    }
    for j in 0..=b.len() {
        m[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            m[i][j] = (m[i - 1][j - 1] + (a[i - 1] != b[j - 1]) as Cost)
                .min(m[i - 1][j] + 1)
                .min(m[i][j - 1] + 1);
        }
    }
    m[a.len()][b.len()]
}

/// Full-matrix Needleman-Wunsch score with a linear gap cost.
pub fn naive_needleman_wunsch(a: Seq, b: Seq, table: &SubstitutionTable, gap: Score) -> Score {
    let mut m = vec![vec![0; b.len() + 1]; a.len() + 1];
    for i in 0..=a.len() {
        m[i][0] = i as Score * gap;
    }
    for j in 0..=b.len() {
        m[0][j] = j as Score * gap;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            m[i][j] = (m[i - 1][j - 1] + table.cost(a[i - 1], b[j - 1]) as Score)
                .max(m[i - 1][j] + gap)
                .max(m[i][j - 1] + gap);
        }
    }
    m[a.len()][b.len()]
}

/// Bounds worth testing for a pair at distance `d`.
fn interesting_bounds(d: Cost) -> impl Iterator<Item = Cost> {
    [0, 1, d / 2, d.saturating_sub(1), d, d + 1, 2 * d + 3, UNBOUNDED]
        .into_iter()
        .unique()
}

fn test_distance_on_input(
    a: Seq,
    b: Seq,
    expected: Cost,
    f: &mut impl FnMut(Seq, Seq, Cost) -> Cost,
    params: &str,
) {
    for bound in interesting_bounds(expected) {
        let want = clamp_to_bound(expected, bound);
        let got = f(a, b, bound);
        assert_eq!(
            want,
            got,
            "\n{params} bound {bound}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();",
            seq_to_string(a),
            seq_to_string(b),
        );
    }
    assert_eq!(
        expected,
        f(b, a, UNBOUNDED),
        "\n{params} swapped\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();",
        seq_to_string(a),
        seq_to_string(b),
    );
}

/// Test a bounded edit distance function on all hardcoded and random pairs.
///
/// - The unbounded result must match `triple_accel::levenshtein_exp`.
/// - Bounded results must equal the distance when it is within the bound, and
///   `bound + 1` otherwise.
/// - The result must not depend on the order of the operands.
pub fn test_distance(f: impl FnMut(Seq, Seq, Cost) -> Cost) {
    test_distance_up_to(f, usize::MAX);
}

/// As `test_distance`, but only on pairs with `n <= max_n`.
pub fn test_distance_up_to(mut f: impl FnMut(Seq, Seq, Cost) -> Cost, max_n: usize) {
    for (a, b, d) in test_sequences() {
        if a.len().max(b.len()) <= max_n {
            test_distance_on_input(a, b, d, &mut f, "hardcoded");
        }
    }
    for ((a, b), params) in gen_seqs(max_n) {
        let d = triple_accel::levenshtein_exp(&a, &b) as Cost;
        test_distance_on_input(&a, &b, d, &mut f, &params);
    }
}

/// A random string of `n` codepoints drawn from a mix of 1 to 4 byte characters,
/// and a copy with `e*n` codepoint edits.
pub fn generate_utf8_pair(n: usize, e: f32, seed: u64) -> (String, String) {
    let rng = &mut rng(seed);
    let a: Vec<char> = (0..n).map(|_| *UNICODE.choose(rng).unwrap_or(&'a')).collect();
    let mut b = a.clone();
    for _ in 0..(n as f32 * e).ceil() as usize {
        let c = *UNICODE.choose(rng).unwrap_or(&'a');
        match rng.gen_range(0..3) {
            0 if !b.is_empty() => {
                let i = rng.gen_range(0..b.len());
                b[i] = c;
            }
            1 if !b.is_empty() => {
                let i = rng.gen_range(0..b.len());
                b.remove(i);
            }
            _ => {
                let i = rng.gen_range(0..=b.len());
                b.insert(i, c);
            }
        }
    }
    (a.into_iter().collect(), b.into_iter().collect())
}

/// Test a codepoint-granularity edit distance against the naive reference
/// over `char`s.
pub fn test_utf8_distance_up_to(mut f: impl FnMut(Seq, Seq, Cost) -> Cost, max_n: usize) {
    for (i, (n, e)) in LENGTHS
        .iter()
        .copied()
        .filter(|&n| n <= max_n)
        .cartesian_product(ERROR_RATES.iter().copied())
        .enumerate()
    {
        let seed = 2718 + i as u64;
        let (a, b) = generate_utf8_pair(n, e, seed);
        let ac: Vec<char> = a.chars().collect();
        let bc: Vec<char> = b.chars().collect();
        let d = naive_levenshtein(&ac, &bc);
        test_distance_on_input(
            a.as_bytes(),
            b.as_bytes(),
            d,
            &mut f,
            &format!("utf8 seed {seed} n {n} e {e:.2}"),
        );
    }
}

/// Tables to test the scorer with: unary, symmetric with a match bonus, and a
/// random asymmetric one.
pub fn test_tables() -> Vec<(SubstitutionTable, Score)> {
    let rng = &mut rng(1618);
    vec![
        (SubstitutionTable::unary(), -1),
        (SubstitutionTable::from_costs(1, -1), -1),
        (SubstitutionTable::from_costs(2, -3), -2),
        (SubstitutionTable::from_fn(|_, _| rng.gen_range(-10..=5)), -4),
    ]
}

/// Test an alignment scorer against the full-matrix reference.
pub fn test_score_up_to(
    mut f: impl FnMut(Seq, Seq, &SubstitutionTable, Score) -> Score,
    max_n: usize,
) {
    let tables = test_tables();
    for ((a, b), params) in gen_seqs(max_n).step_by(3) {
        for (table, gap) in &tables {
            let want = naive_needleman_wunsch(&a, &b, table, *gap);
            let got = f(&a, &b, table, *gap);
            assert_eq!(
                want,
                got,
                "\n{params} gap {gap} table {table:?}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();",
                seq_to_string(&a),
                seq_to_string(&b),
            );
        }
    }
}
