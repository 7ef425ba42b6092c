//! Arithmetic operators for [`Dual`] and [`Dual2`].
//!
//! Every operator is implemented once on references; owned and mixed
//! ownership forms forward to it. Mixing first and second order operands
//! promotes to [`Dual2`].
//!
//! Like integer division, `/` panics when the divisor, or its real part, is
//! zero. [`Number::checked_div`](super::Number::checked_div) and
//! [`Number::checked_div_f64`](super::Number::checked_div_f64) report the
//! same condition as a `Domain` error instead.

use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use super::{outer, Chain, Dual, Dual2};

impl Dual {
    fn add_scalar(&self, rhs: f64) -> Dual {
        Dual::from_parts(self.real + rhs, Arc::clone(&self.vars), self.grad.clone())
    }

    fn scale(&self, rhs: f64) -> Dual {
        Dual::from_parts(self.real * rhs, Arc::clone(&self.vars), &self.grad * rhs)
    }

    pub(crate) fn recip(&self) -> Dual {
        let x = self.real;
        assert!(x != 0.0, "attempt to divide a dual number by zero");
        self.chain(1.0 / x, -1.0 / (x * x), 2.0 / (x * x * x))
    }
}

impl Dual2 {
    fn add_scalar(&self, rhs: f64) -> Dual2 {
        Dual2::from_parts(
            self.real + rhs,
            Arc::clone(&self.vars),
            self.grad.clone(),
            self.hess.clone(),
        )
    }

    fn scale(&self, rhs: f64) -> Dual2 {
        Dual2::from_parts(
            self.real * rhs,
            Arc::clone(&self.vars),
            &self.grad * rhs,
            &self.hess * rhs,
        )
    }

    pub(crate) fn recip(&self) -> Dual2 {
        let x = self.real;
        assert!(x != 0.0, "attempt to divide a dual number by zero");
        self.chain(1.0 / x, -1.0 / (x * x), 2.0 / (x * x * x))
    }
}

// Dual ∘ Dual

impl Add<&Dual> for &Dual {
    type Output = Dual;

    fn add(self, rhs: &Dual) -> Dual {
        let (vars, a, b) = self.aligned(rhs);
        Dual::from_parts(self.real + rhs.real, vars, a + b)
    }
}

impl Sub<&Dual> for &Dual {
    type Output = Dual;

    fn sub(self, rhs: &Dual) -> Dual {
        let (vars, a, b) = self.aligned(rhs);
        Dual::from_parts(self.real - rhs.real, vars, a - b)
    }
}

impl Mul<&Dual> for &Dual {
    type Output = Dual;

    fn mul(self, rhs: &Dual) -> Dual {
        let (vars, a, b) = self.aligned(rhs);
        Dual::from_parts(self.real * rhs.real, vars, a * rhs.real + b * self.real)
    }
}

impl Div<&Dual> for &Dual {
    type Output = Dual;

    fn div(self, rhs: &Dual) -> Dual {
        self * &rhs.recip()
    }
}

// Dual2 ∘ Dual2

impl Add<&Dual2> for &Dual2 {
    type Output = Dual2;

    fn add(self, rhs: &Dual2) -> Dual2 {
        let (a, b) = self.aligned(rhs);
        Dual2::from_parts(a.real + b.real, a.vars, a.grad + b.grad, a.hess + b.hess)
    }
}

impl Sub<&Dual2> for &Dual2 {
    type Output = Dual2;

    fn sub(self, rhs: &Dual2) -> Dual2 {
        let (a, b) = self.aligned(rhs);
        Dual2::from_parts(a.real - b.real, a.vars, a.grad - b.grad, a.hess - b.hess)
    }
}

impl Mul<&Dual2> for &Dual2 {
    type Output = Dual2;

    fn mul(self, rhs: &Dual2) -> Dual2 {
        let (a, b) = self.aligned(rhs);
        let cross = outer(&a.grad, &b.grad);
        let hess = &a.hess * b.real + &b.hess * a.real + &cross + &cross.t();
        let grad = &a.grad * b.real + &b.grad * a.real;
        Dual2::from_parts(a.real * b.real, a.vars, grad, hess)
    }
}

impl Div<&Dual2> for &Dual2 {
    type Output = Dual2;

    fn div(self, rhs: &Dual2) -> Dual2 {
        self * &rhs.recip()
    }
}

// Mixed order: promote to Dual2

macro_rules! promote_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<&Dual2> for &Dual {
            type Output = Dual2;

            fn $method(self, rhs: &Dual2) -> Dual2 {
                $imp::$method(&Dual2::from(self), rhs)
            }
        }

        impl $imp<&Dual> for &Dual2 {
            type Output = Dual2;

            fn $method(self, rhs: &Dual) -> Dual2 {
                $imp::$method(self, &Dual2::from(rhs))
            }
        }
    };
}

promote_binop!(Add, add);
promote_binop!(Sub, sub);
promote_binop!(Mul, mul);
promote_binop!(Div, div);

macro_rules! forward_owned {
    ($imp:ident, $method:ident, $lhs:ty, $rhs:ty, $out:ty) => {
        impl $imp<$rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                $imp::$method(&self, &rhs)
            }
        }

        impl $imp<&$rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: &$rhs) -> $out {
                $imp::$method(&self, rhs)
            }
        }

        impl $imp<$rhs> for &$lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                $imp::$method(self, &rhs)
            }
        }
    };
}

macro_rules! forward_all_binops {
    ($lhs:ty, $rhs:ty, $out:ty) => {
        forward_owned!(Add, add, $lhs, $rhs, $out);
        forward_owned!(Sub, sub, $lhs, $rhs, $out);
        forward_owned!(Mul, mul, $lhs, $rhs, $out);
        forward_owned!(Div, div, $lhs, $rhs, $out);
    };
}

forward_all_binops!(Dual, Dual, Dual);
forward_all_binops!(Dual2, Dual2, Dual2);
forward_all_binops!(Dual, Dual2, Dual2);
forward_all_binops!(Dual2, Dual, Dual2);

// Scalar operands

macro_rules! scalar_ops {
    ($t:ty) => {
        impl Add<f64> for &$t {
            type Output = $t;

            fn add(self, rhs: f64) -> $t {
                self.add_scalar(rhs)
            }
        }

        impl Add<&$t> for f64 {
            type Output = $t;

            fn add(self, rhs: &$t) -> $t {
                rhs.add_scalar(self)
            }
        }

        impl Sub<f64> for &$t {
            type Output = $t;

            fn sub(self, rhs: f64) -> $t {
                self.add_scalar(-rhs)
            }
        }

        impl Sub<&$t> for f64 {
            type Output = $t;

            fn sub(self, rhs: &$t) -> $t {
                rhs.scale(-1.0).add_scalar(self)
            }
        }

        impl Mul<f64> for &$t {
            type Output = $t;

            fn mul(self, rhs: f64) -> $t {
                self.scale(rhs)
            }
        }

        impl Mul<&$t> for f64 {
            type Output = $t;

            fn mul(self, rhs: &$t) -> $t {
                rhs.scale(self)
            }
        }

        impl Div<f64> for &$t {
            type Output = $t;

            fn div(self, rhs: f64) -> $t {
                assert!(rhs != 0.0, "attempt to divide a dual number by zero");
                self.scale(1.0 / rhs)
            }
        }

        impl Div<&$t> for f64 {
            type Output = $t;

            fn div(self, rhs: &$t) -> $t {
                rhs.recip().scale(self)
            }
        }

        impl Neg for &$t {
            type Output = $t;

            fn neg(self) -> $t {
                self.scale(-1.0)
            }
        }

        impl Neg for $t {
            type Output = $t;

            fn neg(self) -> $t {
                self.scale(-1.0)
            }
        }

        forward_scalar!(Add, add, $t);
        forward_scalar!(Sub, sub, $t);
        forward_scalar!(Mul, mul, $t);
        forward_scalar!(Div, div, $t);
    };
}

macro_rules! forward_scalar {
    ($imp:ident, $method:ident, $t:ty) => {
        impl $imp<f64> for $t {
            type Output = $t;

            fn $method(self, rhs: f64) -> $t {
                $imp::$method(&self, rhs)
            }
        }

        impl $imp<$t> for f64 {
            type Output = $t;

            fn $method(self, rhs: $t) -> $t {
                $imp::$method(self, &rhs)
            }
        }
    };
}

scalar_ops!(Dual);
scalar_ops!(Dual2);
