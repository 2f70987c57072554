use super::*;

#[test]
fn test_empty_name_is_zero() {
    assert_eq!(PolynomialHasher.hash(""), 0);
}

#[test]
fn test_polynomial_values() {
    assert_eq!(PolynomialHasher.hash("a"), 97);
    assert_eq!(PolynomialHasher.hash("ab"), 97 * 113 + 98);
    assert_eq!(PolynomialHasher.hash("abc"), (97 * 113 + 98) * 113 + 99);
}

#[test]
fn test_order_sensitive() {
    assert_ne!(PolynomialHasher.hash("ab"), PolynomialHasher.hash("ba"));
}

#[test]
fn test_deterministic() {
    let name = "player_velocity";
    assert_eq!(PolynomialHasher.hash(name), PolynomialHasher.hash(name));
}

#[test]
fn test_wraps_instead_of_overflowing() {
    // Long enough that 113^n exceeds u64 many times over.
    let long = "z".repeat(200);
    let expected = long
        .bytes()
        .fold(0u64, |k, b| k.wrapping_mul(113).wrapping_add(u64::from(b)));
    assert_eq!(PolynomialHasher.hash(&long), expected);
}

#[test]
fn test_bytes_are_unsigned() {
    // 'é' is 0xC3 0xA9 in UTF-8; both bytes count as values above 127.
    assert_eq!(PolynomialHasher.hash("é"), 0xC3 * 113 + 0xA9);
}

#[test]
fn test_closure_hasher() {
    let constant = |_: &str| -> Key { 7 };
    assert_eq!(constant.hash("anything"), 7);
    assert_eq!(constant.hash("else"), 7);
}
