//! Elementary functions with exact first and second derivatives.

use ndarray::Array1;
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{PI, SQRT_2};
use std::ops::Mul;
use std::sync::Arc;

use super::{outer, Dual, Dual2};
use crate::error::{MathError, MathResult};

/// Applies a scalar function through the chain rule.
///
/// Given `f(u)`, `f'(u)` and `f''(u)` at the real part `u`, returns `f` of
/// the value: `∇f = f'∇u` and `Hf = f'Hu + f'' ∇u∇uᵀ`. Orders that do not
/// carry a derivative ignore the corresponding argument.
pub trait Chain: Sized {
    /// Real part fed to the scalar function.
    fn re(&self) -> f64;

    /// Builds `f(self)` from the scalar function's value and derivatives.
    fn chain(&self, f0: f64, f1: f64, f2: f64) -> Self;
}

impl Chain for f64 {
    fn re(&self) -> f64 {
        *self
    }

    fn chain(&self, f0: f64, _f1: f64, _f2: f64) -> Self {
        f0
    }
}

impl Chain for Dual {
    fn re(&self) -> f64 {
        self.real
    }

    fn chain(&self, f0: f64, f1: f64, _f2: f64) -> Self {
        Dual::from_parts(f0, Arc::clone(&self.vars), &self.grad * f1)
    }
}

impl Chain for Dual2 {
    fn re(&self) -> f64 {
        self.real
    }

    fn chain(&self, f0: f64, f1: f64, f2: f64) -> Self {
        let grad: Array1<f64> = &self.grad * f1;
        let hess = &self.hess * f1 + outer(&self.grad, &self.grad) * f2;
        Dual2::from_parts(f0, Arc::clone(&self.vars), grad, hess)
    }
}

fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Transcendental functions on `f64`, [`Dual`] and [`Dual2`].
///
/// Fallible functions check the domain on the real part before any
/// derivative is computed.
pub trait MathFuncs: Sized {
    /// `eˣ`.
    fn exp(&self) -> Self;
    /// Natural logarithm. `Domain` for non-positive arguments.
    fn try_ln(&self) -> MathResult<Self>;
    /// Square root. `Domain` for non-positive arguments.
    fn try_sqrt(&self) -> MathResult<Self>;
    /// Sine.
    fn sin(&self) -> Self;
    /// Cosine.
    fn cos(&self) -> Self;
    /// Integer power.
    ///
    /// # Panics
    ///
    /// When the real part is zero and `n` is negative, like `/`.
    fn powi(&self, n: i32) -> Self;
    /// Real power. `Domain` for a negative base with a non-integer exponent,
    /// and for a zero base unless the exponent is a non-negative integer.
    fn try_powf(&self, p: f64) -> MathResult<Self>;
    /// `selfᵖ` with a differentiable exponent, as `exp(p·ln self)`.
    fn try_pow(&self, p: &Self) -> MathResult<Self>;
    /// Standard normal CDF.
    fn norm_cdf(&self) -> Self;
    /// Inverse standard normal CDF. `Domain` outside `(0, 1)`.
    fn inv_norm_cdf(&self) -> MathResult<Self>;
}

impl<T> MathFuncs for T
where
    T: Chain + Clone + Mul<Output = T>,
{
    fn exp(&self) -> Self {
        let e = self.re().exp();
        self.chain(e, e, e)
    }

    fn try_ln(&self) -> MathResult<Self> {
        let x = self.re();
        if x <= 0.0 {
            return Err(MathError::domain("ln", x, "must be positive"));
        }
        Ok(self.chain(x.ln(), 1.0 / x, -1.0 / (x * x)))
    }

    fn try_sqrt(&self) -> MathResult<Self> {
        let x = self.re();
        if x <= 0.0 {
            return Err(MathError::domain("sqrt", x, "must be positive"));
        }
        let s = x.sqrt();
        Ok(self.chain(s, 0.5 / s, -0.25 / (s * x)))
    }

    fn sin(&self) -> Self {
        let (s, c) = self.re().sin_cos();
        self.chain(s, c, -s)
    }

    fn cos(&self) -> Self {
        let (s, c) = self.re().sin_cos();
        self.chain(c, -s, -c)
    }

    fn powi(&self, n: i32) -> Self {
        let x = self.re();
        assert!(n >= 0 || x != 0.0, "attempt to divide a dual number by zero");
        let nf = f64::from(n);
        // vanishing coefficients stay zero at x = 0 instead of 0 * inf
        let f1 = if n == 0 { 0.0 } else { nf * x.powi(n.saturating_sub(1)) };
        let f2 = if n == 0 || n == 1 {
            0.0
        } else {
            nf * (nf - 1.0) * x.powi(n.saturating_sub(2))
        };
        self.chain(x.powi(n), f1, f2)
    }

    fn try_powf(&self, p: f64) -> MathResult<Self> {
        let x = self.re();
        if p.fract() == 0.0 && p.abs() < f64::from(i32::MAX) {
            if x == 0.0 && p < 0.0 {
                return Err(MathError::domain("powf", x, "zero base needs a non-negative exponent"));
            }
            return Ok(self.powi(p as i32));
        }
        if x < 0.0 {
            return Err(MathError::domain("powf", x, "negative base needs an integer exponent"));
        }
        if x == 0.0 {
            return Err(MathError::domain(
                "powf",
                x,
                "fractional power has no derivatives at zero",
            ));
        }
        Ok(self.chain(x.powf(p), p * x.powf(p - 1.0), p * (p - 1.0) * x.powf(p - 2.0)))
    }

    fn try_pow(&self, p: &Self) -> MathResult<Self> {
        Ok((p.clone() * self.try_ln()?).exp())
    }

    fn norm_cdf(&self) -> Self {
        let x = self.re();
        let pdf = norm_pdf(x);
        self.chain(0.5 * erfc(-x / SQRT_2), pdf, -x * pdf)
    }

    fn inv_norm_cdf(&self) -> MathResult<Self> {
        let p = self.re();
        if !(p > 0.0 && p < 1.0) {
            return Err(MathError::domain("inv_norm_cdf", p, "must lie in (0, 1)"));
        }
        let y = -SQRT_2 * erfc_inv(2.0 * p);
        let pdf = norm_pdf(y);
        Ok(self.chain(y, 1.0 / pdf, y / (pdf * pdf)))
    }
}
