//! First-order dual numbers.

use indexmap::IndexSet;
use ndarray::Array1;
use std::fmt;
use std::sync::Arc;

use super::{project_grad, select, union_vars, var_set, VarSet};
use crate::error::{MathError, MathResult};

/// A value with its gradient with respect to a set of tagged variables.
#[derive(Clone, Debug)]
pub struct Dual {
    pub(crate) real: f64,
    pub(crate) vars: VarSet,
    pub(crate) grad: Array1<f64>,
}

impl Dual {
    /// Seeds a value whose gradient is one for every named variable.
    ///
    /// Duplicated names collapse to a single tag.
    pub fn new(real: f64, vars: Vec<String>) -> Self {
        let vars: IndexSet<String> = vars.into_iter().collect();
        let grad = Array1::ones(vars.len());
        Self {
            real,
            vars: Arc::new(vars),
            grad,
        }
    }

    /// Builds a value with an explicit gradient.
    ///
    /// # Errors
    ///
    /// `Configuration` when the tags contain duplicates or the gradient length
    /// differs from the number of tags.
    pub fn try_new(real: f64, vars: Vec<String>, grad: Vec<f64>) -> MathResult<Self> {
        let vars = var_set(vars)?;
        if grad.len() != vars.len() {
            return Err(MathError::configuration(format!(
                "gradient has {} entries for {} variables",
                grad.len(),
                vars.len()
            )));
        }
        Ok(Self {
            real,
            vars,
            grad: Array1::from(grad),
        })
    }

    /// A value with no variables.
    pub fn constant(real: f64) -> Self {
        Self {
            real,
            vars: Arc::new(IndexSet::new()),
            grad: Array1::zeros(0),
        }
    }

    /// Builds a value sharing the tags of `other`.
    pub fn vars_from(other: &Dual, real: f64, grad: Array1<f64>) -> MathResult<Self> {
        if grad.len() != other.vars.len() {
            return Err(MathError::configuration(format!(
                "gradient has {} entries for {} variables",
                grad.len(),
                other.vars.len()
            )));
        }
        Ok(Self {
            real,
            vars: Arc::clone(&other.vars),
            grad,
        })
    }

    pub(crate) fn from_parts(real: f64, vars: VarSet, grad: Array1<f64>) -> Self {
        Self { real, vars, grad }
    }

    /// Real part.
    pub fn real(&self) -> f64 {
        self.real
    }

    /// Variable tags in gradient order.
    pub fn vars(&self) -> &VarSet {
        &self.vars
    }

    /// Gradient in tag order.
    pub fn dual(&self) -> &Array1<f64> {
        &self.grad
    }

    /// First derivatives for the requested tags; zero for tags not present.
    pub fn gradient(&self, vars: &[&str]) -> Array1<f64> {
        select(&self.grad, &self.vars, vars)
    }

    /// Re-expresses the value on a superset of its tags.
    pub fn to_new_vars(&self, vars: &VarSet) -> Self {
        Self {
            real: self.real,
            vars: Arc::clone(vars),
            grad: project_grad(&self.grad, &self.vars, vars),
        }
    }

    /// Aligns two operands onto the union of their tags.
    pub(crate) fn aligned(&self, other: &Dual) -> (VarSet, Array1<f64>, Array1<f64>) {
        let vars = union_vars(&self.vars, &other.vars);
        let a = project_grad(&self.grad, &self.vars, &vars);
        let b = project_grad(&other.grad, &other.vars, &vars);
        (vars, a, b)
    }
}

impl From<f64> for Dual {
    fn from(real: f64) -> Self {
        Dual::constant(real)
    }
}

/// Equal when the real parts and the derivative of every tag agree, in any tag order.
impl PartialEq for Dual {
    fn eq(&self, other: &Self) -> bool {
        if self.real != other.real {
            return false;
        }
        let (_, a, b) = self.aligned(other);
        a == b
    }
}

impl fmt::Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Dual: {:.6}, (", self.real)?;
        for (i, v) in self.vars.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(v)?;
        }
        f.write_str("), [")?;
        for (i, g) in self.grad.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{g:.1}")?;
        }
        f.write_str("]>")
    }
}

impl std::iter::Sum for Dual {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dual::constant(0.0), |acc, x| acc + x)
    }
}
