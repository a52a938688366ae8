use simdist::*;

const BROKEN: &[u8] = &[b'a', 0xCE, b'b'];

#[test]
fn trusted_input_is_not_checked() {
    let engine = Engine::new(Params::default());
    // The malformed byte decodes to a replacement character.
    assert_eq!(engine.edit_distance_utf8(BROKEN, b"axb", UNBOUNDED), 1);
    assert_eq!(engine.hamming_distance_utf8(BROKEN, b"axb", 0), 1);
    assert_eq!(edit_distance_utf8(BROKEN, BROKEN, UNBOUNDED), 0);
}

#[test]
fn validated_input() {
    let engine = Engine::new(Params::default().validate_utf8());
    assert_eq!(engine.edit_distance_utf8(BROKEN, b"axb", UNBOUNDED), INVALID_UTF8);
    assert_eq!(engine.edit_distance_utf8(b"axb", BROKEN, 1), INVALID_UTF8);
    assert_eq!(engine.hamming_distance_utf8(BROKEN, b"axb", 0), INVALID_UTF8);
    assert_eq!(
        engine.try_edit_distance_utf8(b"ok", BROKEN, UNBOUNDED),
        Err(Error::Utf8(Utf8Error { offset: 1 }))
    );
    // Byte entry points never validate.
    assert_eq!(engine.edit_distance(BROKEN, b"axb", UNBOUNDED), 1);
    // Well-formed input is unaffected.
    assert_eq!(
        engine.edit_distance_utf8("München".as_bytes(), "Muenchen".as_bytes(), UNBOUNDED),
        2
    );
    assert_eq!(
        engine.try_hamming_distance_utf8("αβ".as_bytes(), "αγ".as_bytes(), 0),
        Ok(1)
    );
}

#[test]
fn validation_precedes_trivial_cases() {
    let engine = Engine::new(Params::default().validate_utf8());
    assert_eq!(engine.edit_distance_utf8(BROKEN, BROKEN, UNBOUNDED), INVALID_UTF8);
}

#[test]
fn sentinels_are_distinct() {
    assert_ne!(INVALID_UTF8, ALLOC_FAILURE);
    assert!(INVALID_UTF8 > usize::MAX / 2);
}
