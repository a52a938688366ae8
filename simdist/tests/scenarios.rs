use simdist::*;

#[test]
fn edit_distance_scenarios() {
    assert_eq!(edit_distance(b"kitten", b"sitting", UNBOUNDED), 3);
    assert_eq!(edit_distance(b"abc", b"abc", UNBOUNDED), 0);
    assert_eq!(edit_distance(b"", b"hello", UNBOUNDED), 5);
    // Distance 1 exceeds bound 0.
    assert_eq!(edit_distance(b"hello", b"hallo", 0), 1);
    assert_eq!(edit_distance(b"", b"abc", UNBOUNDED), 3);
    assert_eq!(edit_distance(b"abc", b"ac", UNBOUNDED), 1);
    assert_eq!(edit_distance(b"abc", b"a_bc", UNBOUNDED), 1);
    assert_eq!(edit_distance(b"ggbuzgjux{}l", b"gbuzgjux{}l", UNBOUNDED), 1);
    assert_eq!(edit_distance(b"abcdefgABCDEFG", b"ABCDEFGabcdefg", UNBOUNDED), 14);
}

#[test]
fn bounded_sentinels() {
    assert_eq!(edit_distance(b"kitten", b"sitting", 2), 3);
    assert_eq!(edit_distance(b"kitten", b"sitting", 3), 3);
    assert_eq!(edit_distance(b"", b"hello", 2), 3);
    assert_eq!(edit_distance(b"ab", b"abcdefgh", 3), 4);
    assert_eq!(edit_distance(b"abc", b"abc", 0), 0);
    assert_eq!(edit_distance(b"abcdefgABCDEFG", b"ABCDEFGabcdefg", 5), 6);
}

#[test]
fn hamming_scenarios() {
    assert_eq!(hamming_distance(b"karolin", b"kathrin", UNBOUNDED), 3);
    assert_eq!(hamming_distance(b"hello", b"hell", UNBOUNDED), 1);
    assert_eq!(hamming_distance(b"abc", b"adc", UNBOUNDED), 1);
    assert_eq!(hamming_distance("αβγδ".as_bytes(), "αxxγδ".as_bytes(), UNBOUNDED), 2);
    assert_eq!(hamming_distance_utf8(b"abcdefgh", b"_bcdefg_", UNBOUNDED), 2);
    assert_eq!(hamming_distance_utf8("αβγδ".as_bytes(), "αγγδ".as_bytes(), UNBOUNDED), 1);
    assert_eq!(hamming_distance(b"abc", b"abc", 0), 0);
    assert_ne!(hamming_distance(b"abc", b"abcd", 0), 0);
}

#[test]
fn utf8_scenarios() {
    let d = |a: &str, b: &str| edit_distance_utf8(a.as_bytes(), b.as_bytes(), UNBOUNDED);
    assert_eq!(d("𠜎 𠜱 𠝹 𠱓", "𠜎𠜱𠝹𠱓"), 3);
    assert_eq!(d("💖", "💗"), 1);
    assert_eq!(d("αβγδ", "αγδ"), 1);
    assert_eq!(d("école", "e\u{301}cole"), 2);
    assert_eq!(d("façade", "facade"), 1);
    assert_eq!(d("Schön", "Scho\u{308}n"), 2);
    assert_eq!(d("München", "Muenchen"), 2);
    assert_eq!(d("こんにちは世界", "こんばんは世界"), 2);
    // Byte distances differ.
    assert_eq!(edit_distance("💖".as_bytes(), "💗".as_bytes(), UNBOUNDED), 1);
    assert_eq!(edit_distance("αβγδ".as_bytes(), "αγδ".as_bytes(), UNBOUNDED), 2);
    assert_eq!(edit_distance_utf8("こんにちは世界".as_bytes(), "こんばんは世界".as_bytes(), 1), 2);
}

#[test]
fn gattaca() {
    let table = SubstitutionTable::from_costs(1, -1);
    assert_eq!(alignment_score(b"GATTACA", b"GCATGCU", &table, -1), 0);
}

#[test]
fn alignment_of_empty_operands() {
    let table = SubstitutionTable::from_costs(1, -1);
    assert_eq!(alignment_score(b"", b"", &table, -2), 0);
    assert_eq!(alignment_score(b"ACGT", b"", &table, -2), -8);
    assert_eq!(alignment_score(b"", b"ACG", &table, -2), -6);
}

#[test]
fn growing_insertions() {
    let base = b"the quick brown fox!";
    let mut b = base.to_vec();
    for i in 0..150 {
        b.insert((i * 7) % (b.len() + 1), b'#');
        assert_eq!(edit_distance(base, &b, 200), i + 1);
    }
}
