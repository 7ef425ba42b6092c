//! The numeric abstraction curves are generic over.

use ndarray::{Array1, Array2};
use std::fmt::{self, Debug, Display};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use super::{Dual, Dual2, MathFuncs, VarSet};
use crate::error::{MathError, MathResult};

/// Derivative order carried by a numeric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdOrder {
    /// Plain `f64`.
    Zero,
    /// [`Dual`].
    One,
    /// [`Dual2`].
    Two,
}

impl Display for AdOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            AdOrder::Zero => 0,
            AdOrder::One => 1,
            AdOrder::Two => 2,
        };
        write!(f, "{n}")
    }
}

/// First derivatives by tag name.
pub trait Gradient {
    /// Derivatives for the requested tags, zero where a tag is absent.
    fn gradient(&self, vars: &[&str]) -> Array1<f64>;
}

impl Gradient for f64 {
    fn gradient(&self, vars: &[&str]) -> Array1<f64> {
        Array1::zeros(vars.len())
    }
}

impl Gradient for Dual {
    fn gradient(&self, vars: &[&str]) -> Array1<f64> {
        Dual::gradient(self, vars)
    }
}

impl Gradient for Dual2 {
    fn gradient(&self, vars: &[&str]) -> Array1<f64> {
        Dual2::gradient(self, vars)
    }
}

/// A value the curve engine can compute with: `f64`, [`Dual`] or [`Dual2`].
///
/// The AD order is a property of the type, so code generic over `Number`
/// is monomorphised per order and never inspects values at run time.
pub trait Number:
    Clone
    + Debug
    + Send
    + Sync
    + PartialEq
    + 'static
    + From<f64>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Sum
    + MathFuncs
    + Gradient
{
    /// Derivative order of the type.
    const ORDER: AdOrder;

    /// Real part.
    fn real(&self) -> f64;

    /// Creates one independent variable per entry of `reals`, all sharing `vars`.
    ///
    /// Variable `i` has unit derivative with respect to tag `i`.
    ///
    /// # Errors
    ///
    /// `Configuration` when the lengths differ.
    fn seed(reals: &[f64], vars: &VarSet) -> MathResult<Vec<Self>>;

    /// Division that rejects a zero divisor instead of producing infinities.
    fn checked_div(&self, rhs: &Self) -> MathResult<Self> {
        if rhs.real() == 0.0 {
            return Err(MathError::domain("div", 0.0, "divisor must be non-zero"));
        }
        Ok(self.clone() / rhs.clone())
    }

    /// [`checked_div`](Number::checked_div) for a plain `f64` divisor.
    fn checked_div_f64(&self, rhs: f64) -> MathResult<Self> {
        if rhs == 0.0 {
            return Err(MathError::domain("div", rhs, "divisor must be non-zero"));
        }
        Ok(self.clone() / rhs)
    }
}

fn check_seed_len(reals: &[f64], vars: &VarSet) -> MathResult<()> {
    if reals.len() == vars.len() {
        Ok(())
    } else {
        Err(MathError::configuration(format!(
            "{} values seeded against {} variables",
            reals.len(),
            vars.len()
        )))
    }
}

impl Number for f64 {
    const ORDER: AdOrder = AdOrder::Zero;

    fn real(&self) -> f64 {
        *self
    }

    fn seed(reals: &[f64], vars: &VarSet) -> MathResult<Vec<Self>> {
        check_seed_len(reals, vars)?;
        Ok(reals.to_vec())
    }
}

impl Number for Dual {
    const ORDER: AdOrder = AdOrder::One;

    fn real(&self) -> f64 {
        self.real
    }

    fn seed(reals: &[f64], vars: &VarSet) -> MathResult<Vec<Self>> {
        check_seed_len(reals, vars)?;
        let n = vars.len();
        Ok(reals
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut grad = Array1::zeros(n);
                grad[i] = 1.0;
                Dual::from_parts(*r, Arc::clone(vars), grad)
            })
            .collect())
    }
}

impl Number for Dual2 {
    const ORDER: AdOrder = AdOrder::Two;

    fn real(&self) -> f64 {
        self.real
    }

    fn seed(reals: &[f64], vars: &VarSet) -> MathResult<Vec<Self>> {
        check_seed_len(reals, vars)?;
        let n = vars.len();
        Ok(reals
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut grad = Array1::zeros(n);
                grad[i] = 1.0;
                Dual2::from_parts(*r, Arc::clone(vars), grad, Array2::zeros((n, n)))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dual::var_set;

    fn generic_square<T: Number>(x: T) -> T {
        x.clone() * x
    }

    #[test]
    fn orders() {
        assert_eq!(<f64 as Number>::ORDER, AdOrder::Zero);
        assert_eq!(<Dual as Number>::ORDER, AdOrder::One);
        assert_eq!(<Dual2 as Number>::ORDER, AdOrder::Two);
        assert!(AdOrder::Two > AdOrder::One);
        assert_eq!(AdOrder::Two.to_string(), "2");
    }

    #[test]
    fn seed_shares_vars() {
        let vars = var_set(["c0", "c1", "c2"]).unwrap();
        let seeded = Dual::seed(&[1.0, 0.99, 0.97], &vars).unwrap();
        assert!(seeded.iter().all(|d| Arc::ptr_eq(d.vars(), &vars)));
        assert_eq!(seeded[1].dual().to_vec(), vec![0.0, 1.0, 0.0]);
        assert!(Dual2::seed(&[1.0], &vars).is_err());
        assert_eq!(f64::seed(&[1.0, 2.0, 3.0], &vars).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn generic_code_runs_on_every_order() {
        assert_eq!(generic_square(3.0_f64), 9.0);
        let d = generic_square(Dual::new(3.0, vec!["x".into()]));
        assert_eq!(d.gradient(&["x"])[0], 6.0);
        let d2 = generic_square(Dual2::new(3.0, vec!["x".into()]));
        assert_eq!(d2.hessian(&["x"])[[0, 0]], 2.0);
    }

    #[test]
    fn checked_div_rejects_zero() {
        let x = Dual::new(1.0, vec!["x".into()]);
        assert!(matches!(
            x.checked_div(&Dual::constant(0.0)),
            Err(MathError::Domain { .. })
        ));
        assert_eq!(4.0_f64.checked_div(&2.0).unwrap(), 2.0);
    }

    #[test]
    fn checked_div_f64_rejects_zero() {
        let x = Dual2::new(3.0, vec!["x".into()]);
        assert!(matches!(x.checked_div_f64(0.0), Err(MathError::Domain { .. })));
        assert!(matches!(1.0_f64.checked_div_f64(0.0), Err(MathError::Domain { .. })));

        let half = Dual::new(3.0, vec!["x".into()]).checked_div_f64(2.0).unwrap();
        assert_eq!(half.real(), 1.5);
        assert_eq!(half.gradient(&["x"])[0], 0.5);
    }
}
