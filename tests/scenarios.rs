use anyhow::Result;

use wideint::{DivResult, U256, U512};

#[test]
fn squaring_2_pow_128_wraps_to_zero() {
    let x = U256::from_halves(1, 0);
    assert_eq!(x * x, U256::ZERO);

    // the widening product keeps the 2^256 bit
    assert_eq!(x.widening_mul(x), U512::from_halves(U256::ONE, U256::ZERO));
}

#[test]
fn dividing_max_by_ten() -> Result<()> {
    let expected_quot: U256 =
        "11579208923731619542357098500868790785326998466564056403945758400791312963993".parse()?;
    let res = U256::MAX.udivrem(U256::from(10u8));
    assert_eq!(
        res,
        DivResult {
            quot: expected_quot,
            rem: U256::from(5u8),
        }
    );
    Ok(())
}

#[test]
fn max_renders_all_78_digits() {
    assert_eq!(
        U256::MAX.to_string(),
        "115792089237316195423570985008687907853269984665640564039457584007913129639935"
    );
}

#[test]
fn hex_literal_lands_in_the_low_word() -> Result<()> {
    let x: U256 = "0xdeadbeefcafebabe".parse()?;
    assert_eq!(x, U256::from(0xdeadbeefcafebabe_u64));
    assert_eq!(x.high_half(), 0);
    Ok(())
}

#[test]
fn big_endian_store_of_one() {
    let bytes = U256::ONE.to_be_bytes();
    assert_eq!(bytes[31], 0x01);
    assert!(bytes[..31].iter().all(|b| *b == 0));
    assert_eq!(U256::from_be_bytes(bytes), U256::ONE);
}

#[test]
fn signed_division_truncates_toward_zero() {
    // -7 / 2 = -3 rem -1 in two's complement
    let minus_seven = U256::from(7u8).wrapping_neg();
    let res = minus_seven.sdivrem(U256::from(2u8));
    assert_eq!(
        res,
        DivResult {
            quot: U256::from(3u8).wrapping_neg(),
            rem: U256::ONE.wrapping_neg(),
        }
    );
}

#[test]
fn powers_of_two_hit_the_top_bit_then_wrap() {
    let two = U256::from(2u8);
    assert_eq!(two.pow(U256::from(255u8)), U256::ONE << 255);
    assert_eq!(two.pow(U256::from(256u16)), U256::ZERO);
}
