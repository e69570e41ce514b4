use std::cmp::Ordering;

use super::{BitValueError, BitVector, Radix, Signum};
use crate::bit::Bit;

#[test]
fn test_small_signed_values() {
    let five = BitVector::new(5, 4, true).unwrap();
    assert_eq!(five.bin(), "0b0101");
    let minus_one = BitVector::new(-1, 4, true).unwrap();
    assert_eq!(minus_one.bin(), "0b1111");
    assert_eq!(minus_one.dec(), "-1");
}

#[test]
fn test_wraparound() {
    let ff = BitVector::new("0xFF", 8, false).unwrap();
    assert_eq!((&ff + 1).bin(), "0b00000000");
    let fifteen = BitVector::new("0b1111", 4, true).unwrap();
    assert_eq!((fifteen + 1).bin(), "0b0000");
}

#[test]
fn test_low_nibble_slice() {
    let v = BitVector::new("0x9B5F", 16, true).unwrap();
    assert_eq!(v.slice(0..4).unwrap().to_string(), "1111");
}

#[test]
fn test_zero_width_is_rejected() {
    assert_eq!(BitVector::new(1, 0, true), Err(BitValueError::Width(0)));
    assert_eq!(BitVector::zero(0, false), Err(BitValueError::Width(0)));
    assert_eq!(
        BitValueError::Width(0).to_string(),
        "number of bits for a value must be positive (got 0)"
    );
}

#[test]
fn test_failed_set_leaves_value_alone() {
    let mut v = BitVector::new(42, 8, true).unwrap();
    assert!(v.set("0x4G").is_err());
    assert!(v.set(false).is_err());
    assert_eq!(v.dec(), "42");
    v.set("0o17").unwrap();
    assert_eq!(v.dec(), "15");
    v.set(-300).unwrap();
    assert_eq!(v.width(), 8);
    assert_eq!(v.dec(), "-44");
}

#[test]
fn test_fitted() {
    for (value, width, dec) in [
        ("0", 2, "0"),
        ("1", 2, "1"),
        ("-1", 2, "-1"),
        ("255", 9, "255"),
        ("-256", 10, "-256"),
        ("0b0011", 3, "3"),
        ("0o777", 10, "511"),
    ] {
        let v = BitVector::fitted(value).unwrap();
        assert_eq!(v.width(), width, "width of {value}");
        assert_eq!(v.dec(), dec, "value of {value}");
        assert!(v.is_signed());
    }
    assert_eq!(BitVector::fitted(-5_i8).unwrap().bin(), "0b1011");
    assert!(BitVector::fitted(true).is_err());
}

#[test]
fn test_sign_queries() {
    let v = |n: i32, signed: bool| BitVector::new(n, 6, signed).unwrap();
    assert_eq!(v(-3, true).signum(), Signum::Negative);
    assert_eq!(v(-3, false).signum(), Signum::Positive);
    assert_eq!(v(0, true).signum(), Signum::Zero);
    assert_eq!(v(-3, true).sign_bit(), Bit::One);
    assert!(!v(-3, false).is_negative());
    assert!(bool::from(&v(8, true)));
    assert!(!v(0, true).to_bool());
    assert_eq!(v(9, true).plus(), v(9, true));
}

#[test]
fn test_native_conversions() {
    let v = BitVector::new(-100, 12, true).unwrap();
    assert_eq!(i32::try_from(&v), Ok(-100));
    assert_eq!(i8::try_from(&v), Ok(-100));
    assert_eq!(u16::try_from(&v), Err(super::ConversionFailed::TooSmall));
    let big = BitVector::new(300, 12, false).unwrap();
    assert_eq!(u8::try_from(big.clone()), Err(super::ConversionFailed::TooLarge));
    assert_eq!(u16::try_from(big), Ok(300));
    let wide = BitVector::new(-1, 200, true).unwrap();
    assert_eq!(i128::try_from(&wide), Ok(-1));
    let huge = BitVector::new(u128::MAX, 200, true).unwrap();
    assert_eq!(i128::try_from(&huge), Err(super::ConversionFailed::TooLarge));
}

#[test]
fn test_operand_takes_receiver_shape() {
    let v = BitVector::new(0, 8, true).unwrap();
    let operand = v.operand("0xF").unwrap();
    assert_eq!(operand.width(), 8);
    assert_eq!(operand.dec(), "-1");
    let unsigned = BitVector::new(0, 8, false).unwrap();
    assert_eq!(unsigned.operand("0xF").unwrap().dec(), "15");
    assert_eq!(v.compare("0xF"), Ok(Ordering::Greater));
}

#[test]
fn test_radix_rendering_of_negative_values() {
    let v = BitVector::new(-6, 8, true).unwrap();
    assert_eq!(v.to_string_radix(Radix::Binary), "0b11111010");
    assert_eq!(v.to_string_radix(Radix::Octal), "0o372");
    assert_eq!(v.to_string_radix(Radix::Hexadecimal), "0xFA");
    assert_eq!(v.to_string_radix(Radix::Decimal), "-6");
}

#[test]
fn test_debug_shows_bits() {
    let v = BitVector::new(5, 4, false).unwrap();
    assert_eq!(
        format!("{v:?}"),
        "BitVector { width: 4, signed: false, bits: 0b0101 }"
    );
}

mod proptests {
    use std::cmp::Ordering;

    use super::super::{BitVector, Radix};
    use test_strategy::{proptest, Arbitrary};

    /// The value of the low `width` bits of `n`, read with the given
    /// signedness.
    fn wrap(n: i64, width: usize, signed: bool) -> i64 {
        let modulus = 1_i64 << width;
        let low = n.rem_euclid(modulus);
        if signed && low >= modulus / 2 {
            low - modulus
        } else {
            low
        }
    }

    #[derive(Debug, Arbitrary)]
    struct BinaryOpInput {
        #[strategy(1..=16usize)]
        width: usize,
        signed: bool,
        #[strategy(-100_000i64..100_000)]
        left: i64,
        #[strategy(-100_000i64..100_000)]
        right: i64,
    }

    impl BinaryOpInput {
        fn vectors(&self) -> (BitVector, BitVector) {
            (
                BitVector::new(self.left, self.width, self.signed).unwrap(),
                BitVector::new(self.right, self.width, self.signed).unwrap(),
            )
        }

        fn expected(&self, n: i64) -> String {
            wrap(n, self.width, self.signed).to_string()
        }

        fn left_value(&self) -> i64 {
            wrap(self.left, self.width, self.signed)
        }

        fn right_value(&self) -> i64 {
            wrap(self.right, self.width, self.signed)
        }
    }

    /// Two operands of independent widths and signedness.
    #[derive(Debug, Arbitrary)]
    struct MixedInput {
        #[strategy(1..=16usize)]
        left_width: usize,
        left_signed: bool,
        #[strategy(-100_000i64..100_000)]
        left: i64,
        #[strategy(1..=16usize)]
        right_width: usize,
        right_signed: bool,
        #[strategy(-100_000i64..100_000)]
        right: i64,
    }

    impl MixedInput {
        fn vectors(&self) -> (BitVector, BitVector) {
            (
                BitVector::new(self.left, self.left_width, self.left_signed).unwrap(),
                BitVector::new(self.right, self.right_width, self.right_signed).unwrap(),
            )
        }

        fn left_value(&self) -> i64 {
            wrap(self.left, self.left_width, self.left_signed)
        }

        fn right_value(&self) -> i64 {
            wrap(self.right, self.right_width, self.right_signed)
        }
    }

    #[derive(Debug, Arbitrary)]
    struct PowInput {
        #[strategy(1..=12usize)]
        width: usize,
        signed: bool,
        #[strategy(-1000i64..1000)]
        base: i64,
        #[strategy(0i64..8)]
        exponent: i64,
    }

    #[proptest]
    fn add_sub_mul_wrap_like_native_integers(input: BinaryOpInput) {
        let (a, b) = input.vectors();
        let (l, r) = (input.left_value(), input.right_value());
        let sum = &a + &b;
        let difference = &a - &b;
        let product = &a * &b;
        assert_eq!(sum.dec(), input.expected(l + r));
        assert_eq!(difference.dec(), input.expected(l - r));
        assert_eq!(product.dec(), input.expected(l * r));
        for result in [&sum, &difference, &product] {
            assert_eq!(result.width(), input.width);
            assert_eq!(result.is_signed(), input.signed);
        }
    }

    #[proptest]
    fn bitwise_operations_match_native_integers(input: BinaryOpInput) {
        let (a, b) = input.vectors();
        let (l, r) = (input.left_value(), input.right_value());
        assert_eq!((&a & &b).dec(), input.expected(l & r));
        assert_eq!((&a | &b).dec(), input.expected(l | r));
        assert_eq!((&a ^ &b).dec(), input.expected(l ^ r));
        assert_eq!((!&a).dec(), input.expected(!l));
    }

    #[proptest]
    fn negation_is_an_involution(input: BinaryOpInput) {
        let (a, _) = input.vectors();
        assert_eq!(a.negate().negate(), a);
        assert_eq!((&a + &a.negate()).dec(), "0");
    }

    #[proptest]
    fn comparison_matches_native_integers(input: BinaryOpInput) {
        let (a, b) = input.vectors();
        let expected = input.left_value().cmp(&input.right_value());
        assert_eq!(a.compare_vector(&b), expected);
        assert_eq!(b.compare_vector(&a), expected.reverse());
        assert_eq!(a == b, expected == Ordering::Equal);
        assert_eq!(a < b, expected == Ordering::Less);
        assert_eq!(a > b, expected == Ordering::Greater);
    }

    #[proptest]
    fn mixed_shapes_compare_symmetrically(input: MixedInput) {
        let (a, b) = input.vectors();
        let expected = input.left_value().cmp(&input.right_value());
        assert_eq!(a.compare_vector(&b), expected);
        assert_eq!(b.compare_vector(&a), expected.reverse());
        assert_eq!(a == b, b == a);
        assert_eq!(a == b, expected == Ordering::Equal);
        assert_eq!(a < b, b > a);
        assert_eq!(a < b, expected == Ordering::Less);
    }

    #[proptest]
    fn mixed_shape_arithmetic_takes_the_left_shape(input: MixedInput) {
        let (a, b) = input.vectors();
        let (l, r) = (input.left_value(), input.right_value());
        let expected = |n: i64| wrap(n, input.left_width, input.left_signed).to_string();
        let sum = &a + &b;
        assert_eq!(sum.width(), input.left_width);
        assert_eq!(sum.is_signed(), input.left_signed);
        assert_eq!(sum.dec(), expected(l + r));
        assert_eq!((&a - &b).dec(), expected(l - r));
        assert_eq!((&a * &b).dec(), expected(l * r));
        assert_eq!((&a & &b).dec(), expected(l & r));
        assert_eq!((&a | &b).dec(), expected(l | r));
        assert_eq!((&a ^ &b).dec(), expected(l ^ r));
    }

    #[proptest]
    fn division_reconstructs_the_dividend(input: BinaryOpInput) {
        let (a, b) = input.vectors();
        let (l, r) = (input.left_value(), input.right_value());
        match a.div_mod(&b) {
            Err(_) => assert_eq!(r, 0),
            Ok((quotient, remainder)) => {
                assert_ne!(r, 0);
                assert_eq!(quotient.dec(), input.expected(l / r));
                assert_eq!(remainder.dec(), input.expected(l % r));
                assert_eq!(&(&quotient * &b) + &remainder, a);
            }
        }
    }

    #[proptest]
    fn pow_is_repeated_multiplication(input: PowInput) {
        let base = BitVector::new(input.base, input.width, input.signed).unwrap();
        let exponent = BitVector::new(input.exponent, input.width, input.signed).unwrap();
        // The exponent is read as a plain bit pattern.
        let times = wrap(input.exponent, input.width, false);
        let mut expected = BitVector::new(1, input.width, input.signed).unwrap();
        for _ in 0..times {
            expected = &expected * &base;
        }
        assert_eq!(base.wrapping_pow(&exponent), expected);
    }

    #[proptest]
    fn renderings_convert_back(input: BinaryOpInput) {
        let (a, _) = input.vectors();
        for radix in [
            Radix::Binary,
            Radix::Octal,
            Radix::Decimal,
            Radix::Hexadecimal,
        ] {
            let text = a.to_string_radix(radix);
            let back = BitVector::new(text.as_str(), input.width, input.signed).unwrap();
            assert_eq!(back.bits(), a.bits(), "{text}");
        }
    }
}
