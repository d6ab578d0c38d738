use std::ops::{Mul, MulAssign};

use super::{U256, U512};

/// Full 128x128 -> 256 bit product from four 64-bit partial products.
pub(super) fn wide_mul_u128(x: u128, y: u128) -> U256 {
    let (x_lo, x_hi) = (x as u64, (x >> 64) as u64);
    let (y_lo, y_hi) = (y as u64, (y >> 64) as u64);

    let t0 = x_lo as u128 * y_lo as u128;
    let t1 = x_hi as u128 * y_lo as u128;
    let t2 = x_lo as u128 * y_hi as u128;
    let t3 = x_hi as u128 * y_hi as u128;

    // none of these folds can carry: (2^64 - 1)^2 + 2 * (2^64 - 1) < 2^128
    let u1 = t1 + (t0 >> 64);
    let u2 = t2 + (u1 as u64 as u128);

    let lo = (u2 << 64) | (t0 as u64 as u128);
    let hi = t3 + (u2 >> 64) + (u1 >> 64);
    U256::from_halves(hi, lo)
}

impl U256 {
    /// Full 256x256 -> 512 bit product.
    pub fn widening_mul(self, rhs: Self) -> U512 {
        let t0 = wide_mul_u128(self.lo, rhs.lo);
        let t1 = wide_mul_u128(self.hi, rhs.lo);
        let t2 = wide_mul_u128(self.lo, rhs.hi);
        let t3 = wide_mul_u128(self.hi, rhs.hi);

        let u1 = t1.wrapping_add(U256::from(t0.hi));
        let u2 = t2.wrapping_add(U256::from(u1.lo));

        // the shift by the half width truncates u2 into the upper half,
        // which is exactly the widening behaviour wanted here
        let lo = (u2 << 128) | U256::from(t0.lo);
        let hi = t3
            .wrapping_add(U256::from(u2.hi))
            .wrapping_add(U256::from(u1.hi));
        U512::from_halves(hi, lo)
    }

    /// Truncated product: the low 256 bits of the full product.
    ///
    /// One full half-multiply plus the low halves of the crossed terms.
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let t = wide_mul_u128(self.lo, rhs.lo);
        let hi = self
            .lo
            .wrapping_mul(rhs.hi)
            .wrapping_add(self.hi.wrapping_mul(rhs.lo))
            .wrapping_add(t.hi);
        Self::from_halves(hi, t.lo)
    }
}

impl U512 {
    /// Truncated product, schoolbook over the underlying 64-bit words.
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let u = self.to_words();
        let v = rhs.to_words();
        let mut p = [0u64; 8];

        for j in 0..8 {
            let mut carry = 0u64;
            for i in 0..(8 - j - 1) {
                let t = u[i] as u128 * v[j] as u128 + p[i + j] as u128 + carry as u128;
                p[i + j] = t as u64;
                carry = (t >> 64) as u64;
            }
            // the top word only ever needs the wrapped low half
            p[7] = p[7]
                .wrapping_add(u[8 - j - 1].wrapping_mul(v[j]))
                .wrapping_add(carry);
        }
        Self::from_words(p)
    }
}

macro_rules! impl_uint_mul {
    ($name:ident) => {
        impl Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
        }

        impl Mul<u64> for $name {
            type Output = Self;

            fn mul(self, rhs: u64) -> Self {
                self.wrapping_mul(Self::from(rhs))
            }
        }

        impl MulAssign for $name {
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl $name {
            /// Right-to-left binary exponentiation modulo `2^N`.
            pub fn pow(self, exponent: Self) -> Self {
                let mut base = self;
                let mut exponent = exponent;
                let mut result = Self::ONE;
                while !exponent.is_zero() {
                    if exponent.bit(0) {
                        result = result.wrapping_mul(base);
                    }
                    base = base.wrapping_mul(base);
                    exponent = exponent >> 1;
                }
                result
            }
        }
    };
}

impl_uint_mul!(U256);
impl_uint_mul!(U512);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_mul_u128() {
        assert_eq!(wide_mul_u128(0, u128::MAX), U256::ZERO);
        assert_eq!(wide_mul_u128(1, 7), U256::from(7u8));
        assert_eq!(
            wide_mul_u128(u64::MAX as u128, u64::MAX as u128),
            U256::from_words([1, u64::MAX - 1, 0, 0])
        );
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(
            wide_mul_u128(u128::MAX, u128::MAX),
            U256::from_halves(u128::MAX - 1, 1)
        );
        assert_eq!(
            wide_mul_u128(1 << 64, 1 << 64),
            U256::from_halves(1, 0)
        );
    }

    #[test]
    fn test_mul() {
        let a = U256::from(5u8);
        let b = U256::from(6u8);
        assert_eq!(a * b, U256::from(30u8));
        assert_eq!(a * U256::ZERO, U256::ZERO);
        assert_eq!(a * U256::ONE, a);
        assert_eq!(a * 6u64, U256::from(30u8));

        let a = U256::from(u64::MAX);
        assert_eq!(a * a, U256::from_words([1, u64::MAX - 1, 0, 0]));

        let a = U256::from(u128::MAX);
        assert_eq!(a * a, U256::from_halves(u128::MAX - 1, 1));

        let mut a = U256::from(1234u16);
        a *= U256::from(56u8);
        assert_eq!(a, U256::from(69104u32));
    }

    #[test]
    fn test_mul_wraps() {
        // 2^128 * 2^128 = 2^256 = 0
        let a = U256::from_halves(1, 0);
        assert_eq!(a * a, U256::ZERO);

        // (2^256 - 1)^2 = 1 mod 2^256
        assert_eq!(U256::MAX * U256::MAX, U256::ONE);
        assert_eq!(U512::MAX * U512::MAX, U512::ONE);

        assert_eq!(U256::MAX * U256::from(2u8), U256::MAX - U256::ONE);
    }

    #[test]
    fn test_widening_mul() {
        let a = U256::from(u64::MAX);
        assert_eq!(
            a.widening_mul(a),
            U512::from_words([1, u64::MAX - 1, 0, 0, 0, 0, 0, 0])
        );

        // 2^128 * 2^128 = 2^256
        let a = U256::from_halves(1, 0);
        assert_eq!(
            a.widening_mul(a),
            U512::from_halves(U256::ONE, U256::ZERO)
        );

        // (2^256 - 1)^2 = (2^256 - 2) * 2^256 + 1
        assert_eq!(
            U256::MAX.widening_mul(U256::MAX),
            U512::from_halves(U256::MAX - U256::ONE, U256::ONE)
        );

        assert_eq!(U256::MAX.widening_mul(U256::ZERO), U512::ZERO);
    }

    #[test]
    fn test_widening_matches_truncated() {
        let a = U256::from_words([
            0xb4830d2b3cc4b4bb,
            0x4d847515b57d26be,
            0xf140fe29591db8b1,
            0xbfc2c416d5e95510,
        ]);
        let b = U256::from_words([
            0xe8772512ce1f7b9f,
            0x451aa7d52bf5c78d,
            0x642d57d46c59d77f,
            0x02837cdd88dda035,
        ]);
        assert_eq!(a.widening_mul(b).low_half(), a.wrapping_mul(b));
        assert_eq!(a.widening_mul(b), b.widening_mul(a));

        // the 512-bit word loop agrees with the 256-bit recursion
        assert_eq!(
            U512::from(a) * U512::from(b),
            a.widening_mul(b)
        );
    }

    #[test]
    fn test_pow() {
        let two = U256::from(2u8);
        assert_eq!(two.pow(U256::from(10u8)), U256::from(1024u16));
        assert_eq!(two.pow(U256::from(255u8)), U256::ONE << 255);
        assert_eq!(two.pow(U256::from(256u16)), U256::ZERO);

        let three = U256::from(3u8);
        assert_eq!(three.pow(U256::from(5u8)), U256::from(243u8));
        assert_eq!(three.pow(U256::ZERO), U256::ONE);
        assert_eq!(U256::ZERO.pow(U256::ZERO), U256::ONE);
        assert_eq!(U256::ZERO.pow(U256::from(3u8)), U256::ZERO);

        assert_eq!(U512::from(2u8).pow(U512::from(511u16)), U512::ONE << 511);
        assert_eq!(U512::from(2u8).pow(U512::from(512u16)), U512::ZERO);
    }
}
