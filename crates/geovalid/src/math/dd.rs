//! Double-double ("DD") extended-precision arithmetic.
//!
//! Purpose
//! - Represent a real number as an unevaluated sum `hi + lo` of two `f64`
//!   with `|lo| <= ulp(hi)/2`, giving roughly 106 bits of mantissa.
//! - Used by the robust orientation predicate and the proper-intersection
//!   point computation, where plain `f64` loses the sign near degeneracies.
//!
//! Model
//! - All operations are built from error-free transformations (two-sum and
//!   Dekker two-product with the splitting constant `2^27 + 1`).
//! - Every arithmetic result is renormalized before it is returned.
//! - Nothing here panics. NaN inputs pass through the rounding and sign
//!   helpers unchanged.
//!
//! Code cross-refs: `algorithm::orientation::orientation_index`,
//! `algorithm::intersector::intersection_dd`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Dekker splitting constant `2^27 + 1`.
const SPLIT: f64 = 134_217_729.0;

/// Extended-precision value `hi + lo`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DD {
    hi: f64,
    lo: f64,
}

impl DD {
    /// Construct from raw parts. The caller is responsible for non-overlap.
    #[inline]
    pub const fn new(hi: f64, lo: f64) -> Self {
        Self { hi, lo }
    }

    #[inline]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    #[inline]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Closest `f64` to the represented value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.hi + self.lo
    }

    /// Integer part of the high word (saturating, NaN → 0).
    #[inline]
    pub fn to_i32(&self) -> i32 {
        self.hi as i32
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.hi.is_nan()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.hi == 0.0 && self.lo == 0.0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0)
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.hi > 0.0 || (self.hi == 0.0 && self.lo > 0.0)
    }

    /// Sign as -1, 0 or 1. The low word only decides when `hi == 0`.
    pub fn signum(&self) -> i32 {
        if self.hi > 0.0 {
            return 1;
        }
        if self.hi < 0.0 {
            return -1;
        }
        if self.lo > 0.0 {
            return 1;
        }
        if self.lo < 0.0 {
            return -1;
        }
        0
    }

    /// Add `yhi + ylo` (two-sum on both words, then renormalize).
    pub fn add_parts(self, yhi: f64, ylo: f64) -> DD {
        let s = self.hi + yhi;
        let t = self.lo + ylo;
        let e = s - self.hi;
        let f = t - self.lo;
        let s_err = (yhi - e) + (self.hi - (s - e));
        let t_err = (ylo - f) + (self.lo - (t - f));
        let e = s_err + t;
        let big = s + e;
        let h = e + (s - big);
        let e = t_err + h;
        let zhi = big + e;
        let zlo = e + (big - zhi);
        DD::new(zhi, zlo)
    }

    /// Add a plain double.
    pub fn add_f64(self, y: f64) -> DD {
        let s = self.hi + y;
        let e = s - self.hi;
        let s_err = (y - e) + (self.hi - (s - e));
        let f = s_err + self.lo;
        let big = s + f;
        let h = f + (s - big);
        let zhi = big + h;
        let zlo = h + (big - zhi);
        DD::new(zhi, zlo)
    }

    /// Multiply by `yhi + ylo` (Dekker split of both high words).
    pub fn mul_parts(self, yhi: f64, ylo: f64) -> DD {
        let c = SPLIT * self.hi;
        let hx = c - (c - self.hi);
        let tx = self.hi - hx;
        let d = SPLIT * yhi;
        let hy = d - (d - yhi);
        let ty = yhi - hy;
        let prod = self.hi * yhi;
        let err = ((((hx * hy - prod) + hx * ty) + tx * hy) + tx * ty)
            + (self.hi * ylo + self.lo * yhi);
        let zhi = prod + err;
        let zlo = err + (prod - zhi);
        DD::new(zhi, zlo)
    }

    /// Divide by `yhi + ylo`.
    pub fn div_parts(self, yhi: f64, ylo: f64) -> DD {
        let q = self.hi / yhi;
        let c = SPLIT * q;
        let hc = c - (c - q);
        let tc = q - hc;
        let u = SPLIT * yhi;
        let hy = u - (u - yhi);
        let ty = yhi - hy;
        let prod = q * yhi;
        let err = (((hc * hy - prod) + hc * ty) + tc * hy) + tc * ty;
        let corr = ((((self.hi - prod) - err) + self.lo) - q * ylo) / yhi;
        let zhi = q + corr;
        let zlo = (q - zhi) + corr;
        DD::new(zhi, zlo)
    }

    /// `1 / self`.
    pub fn reciprocal(self) -> DD {
        DD::from(1.0).div_parts(self.hi, self.lo)
    }

    #[inline]
    pub fn sqr(self) -> DD {
        self * self
    }

    pub fn abs(self) -> DD {
        if self.is_nan() {
            return self;
        }
        if self.is_negative() {
            return -self;
        }
        self
    }

    /// Largest integer `<= self`.
    pub fn floor(self) -> DD {
        if self.is_nan() {
            return self;
        }
        let fhi = self.hi.floor();
        // hi already integral: the low word decides.
        let flo = if fhi == self.hi { self.lo.floor() } else { 0.0 };
        DD::new(fhi, flo)
    }

    /// Smallest integer `>= self`.
    pub fn ceil(self) -> DD {
        if self.is_nan() {
            return self;
        }
        let chi = self.hi.ceil();
        let clo = if chi == self.hi { self.lo.ceil() } else { 0.0 };
        DD::new(chi, clo)
    }

    /// Round towards zero.
    pub fn trunc(self) -> DD {
        if self.is_nan() {
            return self;
        }
        if self.is_positive() {
            self.floor()
        } else {
            self.ceil()
        }
    }

    /// Round to nearest, halves rounded up: `floor(self + 0.5)`.
    pub fn rint(self) -> DD {
        if self.is_nan() {
            return self;
        }
        (self + 0.5).floor()
    }

    /// Base-10 order of magnitude of `x`, i.e. `floor(log10(|x|))`.
    ///
    /// `log10` may come out one below the true value for exact powers of
    /// ten; the result is bumped when `10^mag * 10 <= |x|`.
    ///
    /// Zero gives `i32::MIN`, infinities give `i32::MAX`, NaN gives 0.
    pub fn magnitude(x: f64) -> i32 {
        let x_abs = x.abs();
        let log = x_abs.log10().floor();
        if !log.is_finite() {
            return log as i32;
        }
        let mut mag = log as i32;
        let approx = 10f64.powi(mag);
        // 10^mag underflows to zero for the smallest subnormals.
        if approx > 0.0 && approx * 10.0 <= x_abs {
            mag += 1;
        }
        mag
    }
}

impl From<f64> for DD {
    #[inline]
    fn from(x: f64) -> Self {
        DD::new(x, 0.0)
    }
}

impl fmt::Display for DD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e} + {:e}", self.hi, self.lo)
    }
}

impl Neg for DD {
    type Output = DD;
    #[inline]
    fn neg(self) -> DD {
        if self.is_nan() {
            return self;
        }
        DD::new(-self.hi, -self.lo)
    }
}

impl Add for DD {
    type Output = DD;
    #[inline]
    fn add(self, rhs: DD) -> DD {
        self.add_parts(rhs.hi, rhs.lo)
    }
}

impl Add<f64> for DD {
    type Output = DD;
    #[inline]
    fn add(self, rhs: f64) -> DD {
        self.add_f64(rhs)
    }
}

impl Sub for DD {
    type Output = DD;
    #[inline]
    fn sub(self, rhs: DD) -> DD {
        self.add_parts(-rhs.hi, -rhs.lo)
    }
}

impl Sub<f64> for DD {
    type Output = DD;
    #[inline]
    fn sub(self, rhs: f64) -> DD {
        self.add_parts(-rhs, 0.0)
    }
}

impl Mul for DD {
    type Output = DD;
    #[inline]
    fn mul(self, rhs: DD) -> DD {
        self.mul_parts(rhs.hi, rhs.lo)
    }
}

impl Mul<f64> for DD {
    type Output = DD;
    #[inline]
    fn mul(self, rhs: f64) -> DD {
        self.mul_parts(rhs, 0.0)
    }
}

impl Div for DD {
    type Output = DD;
    #[inline]
    fn div(self, rhs: DD) -> DD {
        self.div_parts(rhs.hi, rhs.lo)
    }
}

impl Div<f64> for DD {
    type Output = DD;
    #[inline]
    fn div(self, rhs: f64) -> DD {
        self.div_parts(rhs, 0.0)
    }
}

macro_rules! assign_via_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for DD {
            #[inline]
            fn $method(&mut self, rhs: DD) {
                *self = *self $op rhs;
            }
        }
        impl $trait<f64> for DD {
            #[inline]
            fn $method(&mut self, rhs: f64) {
                *self = *self $op rhs;
            }
        }
    };
}

assign_via_binop!(AddAssign, add_assign, +);
assign_via_binop!(SubAssign, sub_assign, -);
assign_via_binop!(MulAssign, mul_assign, *);
assign_via_binop!(DivAssign, div_assign, /);
