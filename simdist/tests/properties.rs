use sim_test::*;
use simdist::*;

#[test]
fn identity() {
    for ((a, _), params) in gen_seqs(600) {
        assert_eq!(edit_distance(&a, &a, UNBOUNDED), 0, "{params}");
        assert_eq!(edit_distance(&a, &a, 0), 0, "{params}");
        assert_eq!(hamming_distance(&a, &a, 0), 0, "{params}");
    }
}

#[test]
fn symmetry() {
    for ((a, b), params) in gen_seqs(600) {
        assert_eq!(
            edit_distance(&a, &b, UNBOUNDED),
            edit_distance(&b, &a, UNBOUNDED),
            "{params}"
        );
    }
}

#[test]
fn triangle_inequality() {
    let rng = &mut rng(12);
    for n in [0, 5, 30, 63, 64, 200, 300] {
        for model in [ErrorModel::Uniform, ErrorModel::NoisyInsert, ErrorModel::Rotate] {
            let a = random_seq(rng, n, DNA);
            let b = mutate(rng, &a, n / 4 + 1, model, DNA);
            let c = mutate(rng, &b, n / 4 + 1, model, DNA);
            let ab = edit_distance(&a, &b, UNBOUNDED);
            let bc = edit_distance(&b, &c, UNBOUNDED);
            let ac = edit_distance(&a, &c, UNBOUNDED);
            assert!(ac <= ab + bc, "n {n} {model:?}: {ac} > {ab} + {bc}");
        }
    }
}

#[test]
fn bound_equivalence() {
    for ((a, b), params) in gen_seqs(300) {
        let d = edit_distance(&a, &b, UNBOUNDED);
        for bound in [d, d + 1, d + 10, 2 * d] {
            assert_eq!(edit_distance(&a, &b, bound), d, "{params} bound {bound}");
        }
        for bound in 0..d.min(20) {
            assert_eq!(edit_distance(&a, &b, bound), bound + 1, "{params} bound {bound}");
        }
    }
}

#[test]
fn alignment_is_negated_edit_distance() {
    let table = SubstitutionTable::unary();
    for ((a, b), params) in gen_seqs(300) {
        assert_eq!(
            alignment_score(&a, &b, &table, -1),
            -(edit_distance(&a, &b, UNBOUNDED) as Score),
            "{params}"
        );
    }
}

#[test]
fn hamming_zero_bound_is_equality() {
    for ((a, b), params) in gen_seqs(100) {
        assert_eq!(hamming_distance(&a, &b, 0) == 0, a == b, "{params}");
        assert_eq!(hamming_distance_utf8(&a, &b, 0) == 0, a == b, "{params}");
    }
}

#[test]
fn hamming_bounds_edit_distance() {
    for ((a, b), params) in gen_seqs(300) {
        assert!(edit_distance(&a, &b, UNBOUNDED) <= hamming_distance(&a, &b, 0), "{params}");
    }
}
