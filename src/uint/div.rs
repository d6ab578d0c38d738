use std::ops::{Div, DivAssign, Rem, RemAssign};

use super::{U256, U512};

/// Quotient and remainder pair returned by `udivrem` and `sdivrem`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DivResult<T> {
    pub quot: T,
    pub rem: T,
}

/// Divide the two-word value `(hi, lo)` by `d`. Requires `hi < d` so the
/// quotient fits a single word.
fn div_mod_word(hi: u64, lo: u64, d: u64) -> (u64, u64) {
    debug_assert!(hi < d);
    let n = (hi as u128) << 64 | lo as u128;
    ((n / d as u128) as u64, (n % d as u128) as u64)
}

macro_rules! impl_uint_div {
    ($name:ident, words: $words:literal) => {
        impl $name {
            /// Unsigned division with remainder: `self = quot * v + rem`
            /// with `rem < v`.
            ///
            /// # Panics
            /// Panics when `v` is zero.
            pub fn udivrem(self, v: Self) -> DivResult<Self> {
                assert!(!v.is_zero(), "attempt to divide by zero");

                if self < v {
                    return DivResult {
                        quot: Self::ZERO,
                        rem: self,
                    };
                }

                let n = v.count_significant_words();

                if n == 1 {
                    // single-word divisor, short division
                    let d = v.to_words()[0];
                    let mut q = self.to_words();
                    let mut rem = 0u64;
                    for w in q.iter_mut().rev() {
                        let (qw, r) = div_mod_word(rem, *w, d);
                        *w = qw;
                        rem = r;
                    }
                    let mut r_words = [0u64; $words];
                    r_words[0] = rem;
                    return DivResult {
                        quot: Self::from_words(q),
                        rem: Self::from_words(r_words),
                    };
                }

                let m = self.count_significant_words() - n;
                let (q, r) = Self::divrem_knuth(self.to_words(), v.to_words(), n, m);
                DivResult {
                    quot: Self::from_words(q),
                    rem: Self::from_words(r),
                }
            }

            /// Knuth TAOCP 4.3.1 Algorithm D in base 2^64.
            ///
            /// `n` is the significant word count of `v` (at least 2), `m`
            /// the word count difference between dividend and divisor.
            fn divrem_knuth(
                u: [u64; $words],
                v: [u64; $words],
                n: usize,
                m: usize,
            ) -> ([u64; $words], [u64; $words]) {
                debug_assert!(n >= 2 && n + m <= $words);

                // D1: normalise so the divisor's top bit is set, bounding
                // the trial quotient error to at most one after refinement
                let shift = v[n - 1].leading_zeros();
                let mut vn = [0u64; $words];
                if shift == 0 {
                    vn = v;
                } else {
                    for i in (1..n).rev() {
                        vn[i] = (v[i] << shift) | (v[i - 1] >> (64 - shift));
                    }
                    vn[0] = v[0] << shift;
                }

                // the shifted dividend takes one extra word
                let mut un = [0u64; $words + 1];
                if shift == 0 {
                    un[..$words].copy_from_slice(&u);
                } else {
                    un[$words] = u[$words - 1] >> (64 - shift);
                    for i in (1..$words).rev() {
                        un[i] = (u[i] << shift) | (u[i - 1] >> (64 - shift));
                    }
                    un[0] = u[0] << shift;
                }

                let mut q = [0u64; $words];
                let v_top = vn[n - 1];
                let v_next = vn[n - 2];

                // D2..D7: one quotient word per pass, most significant first
                for j in (0..=m).rev() {
                    // D3: trial quotient from the top two dividend words
                    let mut q_hat = if un[j + n] >= v_top {
                        // the unclamped estimate overflows a word; with a
                        // normalised divisor the true digit is at least
                        // B - 2, so the add-back below covers the error
                        u64::MAX
                    } else {
                        let (mut q_hat, mut r_hat) =
                            div_mod_word(un[j + n], un[j + n - 1], v_top);
                        // refine against the next divisor word; this loop
                        // runs at most twice
                        loop {
                            let lhs = q_hat as u128 * v_next as u128;
                            let rhs = (r_hat as u128) << 64 | un[j + n - 2] as u128;
                            if lhs <= rhs {
                                break;
                            }
                            q_hat -= 1;
                            let (r, overflow) = r_hat.overflowing_add(v_top);
                            r_hat = r;
                            if overflow {
                                break;
                            }
                        }
                        q_hat
                    };

                    // D4: multiply and subtract
                    let mut qv = [0u64; $words + 1];
                    let mut carry = 0u64;
                    for i in 0..n {
                        let t = q_hat as u128 * vn[i] as u128 + carry as u128;
                        qv[i] = t as u64;
                        carry = (t >> 64) as u64;
                    }
                    qv[n] = carry;

                    let mut borrow = false;
                    for i in 0..=n {
                        let (d, b1) = un[j + i].overflowing_sub(qv[i]);
                        let (d, b2) = d.overflowing_sub(borrow as u64);
                        un[j + i] = d;
                        borrow = b1 | b2;
                    }

                    // D6: the estimate was one too large, add the divisor back
                    if borrow {
                        q_hat -= 1;
                        let mut carry = false;
                        for i in 0..n {
                            let (s, c1) = un[j + i].overflowing_add(vn[i]);
                            let (s, c2) = s.overflowing_add(carry as u64);
                            un[j + i] = s;
                            carry = c1 | c2;
                        }
                        un[j + n] = un[j + n].wrapping_add(carry as u64);
                    }

                    // D5
                    q[j] = q_hat;
                }

                // D8: shift the remainder back
                let mut r = [0u64; $words];
                if shift == 0 {
                    r.copy_from_slice(&un[..$words]);
                } else {
                    for i in 0..$words {
                        r[i] = (un[i] >> shift) | (un[i + 1] << (64 - shift));
                    }
                }
                (q, r)
            }

            /// Signed division interpreting both operands as two's
            /// complement: the quotient is negative when exactly one
            /// operand is, the remainder takes the dividend's sign.
            ///
            /// # Panics
            /// Panics when `v` is zero.
            pub fn sdivrem(self, v: Self) -> DivResult<Self> {
                let u_neg = self.bit($words * 64 - 1);
                let v_neg = v.bit($words * 64 - 1);

                let u_abs = if u_neg { self.wrapping_neg() } else { self };
                let v_abs = if v_neg { v.wrapping_neg() } else { v };

                let res = u_abs.udivrem(v_abs);

                DivResult {
                    quot: if u_neg ^ v_neg {
                        res.quot.wrapping_neg()
                    } else {
                        res.quot
                    },
                    rem: if u_neg { res.rem.wrapping_neg() } else { res.rem },
                }
            }

            pub fn checked_divrem(self, v: Self) -> Option<DivResult<Self>> {
                if v.is_zero() {
                    None
                } else {
                    Some(self.udivrem(v))
                }
            }

            pub fn checked_div(self, v: Self) -> Option<Self> {
                self.checked_divrem(v).map(|res| res.quot)
            }

            pub fn checked_rem(self, v: Self) -> Option<Self> {
                self.checked_divrem(v).map(|res| res.rem)
            }
        }

        impl Div for $name {
            type Output = Self;

            fn div(self, rhs: Self) -> Self {
                self.udivrem(rhs).quot
            }
        }

        impl Div<u64> for $name {
            type Output = Self;

            fn div(self, rhs: u64) -> Self {
                self.udivrem(Self::from(rhs)).quot
            }
        }

        impl DivAssign for $name {
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }

        impl Rem for $name {
            type Output = Self;

            fn rem(self, rhs: Self) -> Self {
                self.udivrem(rhs).rem
            }
        }

        impl Rem<u64> for $name {
            type Output = Self;

            fn rem(self, rhs: u64) -> Self {
                self.udivrem(Self::from(rhs)).rem
            }
        }

        impl RemAssign for $name {
            fn rem_assign(&mut self, rhs: Self) {
                *self = *self % rhs;
            }
        }
    };
}

impl_uint_div!(U256, words: 4);
impl_uint_div!(U512, words: 8);
