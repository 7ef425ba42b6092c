//! Second-order dual numbers.

use indexmap::IndexSet;
use ndarray::{Array1, Array2};
use std::fmt;
use std::sync::Arc;

use super::{project_grad, project_hess, select, union_vars, var_set, Dual, VarSet};
use crate::error::{MathError, MathResult};

/// A value with its gradient and full Hessian.
///
/// `hess[[i, j]]` is `∂²f/∂xᵢ∂xⱼ` for the tags at positions `i` and `j`.
#[derive(Clone, Debug)]
pub struct Dual2 {
    pub(crate) real: f64,
    pub(crate) vars: VarSet,
    pub(crate) grad: Array1<f64>,
    pub(crate) hess: Array2<f64>,
}

impl Dual2 {
    /// Seeds a value with unit gradient and zero Hessian.
    pub fn new(real: f64, vars: Vec<String>) -> Self {
        let vars: IndexSet<String> = vars.into_iter().collect();
        let n = vars.len();
        Self {
            real,
            vars: Arc::new(vars),
            grad: Array1::ones(n),
            hess: Array2::zeros((n, n)),
        }
    }

    /// Builds a value with explicit derivatives.
    ///
    /// `hess` is the row-major flattened `n × n` Hessian; an empty vector means zero.
    ///
    /// # Errors
    ///
    /// `Configuration` on duplicate tags or when either derivative has the wrong shape.
    pub fn try_new(real: f64, vars: Vec<String>, grad: Vec<f64>, hess: Vec<f64>) -> MathResult<Self> {
        let vars = var_set(vars)?;
        let n = vars.len();
        if grad.len() != n {
            return Err(MathError::configuration(format!(
                "gradient has {} entries for {n} variables",
                grad.len()
            )));
        }
        let hess = if hess.is_empty() {
            Array2::zeros((n, n))
        } else {
            Array2::from_shape_vec((n, n), hess).map_err(|_| {
                MathError::configuration(format!("Hessian must be square with side {n}"))
            })?
        };
        Ok(Self {
            real,
            vars,
            grad: Array1::from(grad),
            hess,
        })
    }

    /// A value with no variables.
    pub fn constant(real: f64) -> Self {
        Self {
            real,
            vars: Arc::new(IndexSet::new()),
            grad: Array1::zeros(0),
            hess: Array2::zeros((0, 0)),
        }
    }

    /// Builds a value sharing the tags of `other`.
    pub fn vars_from(other: &Dual2, real: f64, grad: Array1<f64>, hess: Array2<f64>) -> MathResult<Self> {
        let n = other.vars.len();
        if grad.len() != n || hess.dim() != (n, n) {
            return Err(MathError::configuration(format!(
                "derivatives do not match {n} shared variables"
            )));
        }
        Ok(Self {
            real,
            vars: Arc::clone(&other.vars),
            grad,
            hess,
        })
    }

    pub(crate) fn from_parts(real: f64, vars: VarSet, grad: Array1<f64>, hess: Array2<f64>) -> Self {
        Self {
            real,
            vars,
            grad,
            hess,
        }
    }

    /// Real part.
    pub fn real(&self) -> f64 {
        self.real
    }

    /// Variable tags in derivative order.
    pub fn vars(&self) -> &VarSet {
        &self.vars
    }

    /// Gradient in tag order.
    pub fn dual(&self) -> &Array1<f64> {
        &self.grad
    }

    /// Hessian in tag order.
    pub fn dual2(&self) -> &Array2<f64> {
        &self.hess
    }

    /// First derivatives for the requested tags; zero for tags not present.
    pub fn gradient(&self, vars: &[&str]) -> Array1<f64> {
        select(&self.grad, &self.vars, vars)
    }

    /// Second derivatives for the requested tags; zero rows and columns for tags not present.
    pub fn hessian(&self, vars: &[&str]) -> Array2<f64> {
        let idx: Vec<Option<usize>> = vars.iter().map(|v| self.vars.get_index_of(*v)).collect();
        Array2::from_shape_fn((vars.len(), vars.len()), |(i, j)| match (idx[i], idx[j]) {
            (Some(a), Some(b)) => self.hess[[a, b]],
            _ => 0.0,
        })
    }

    /// Drops the second-order part.
    pub fn to_dual(&self) -> Dual {
        Dual::from_parts(self.real, Arc::clone(&self.vars), self.grad.clone())
    }

    /// Re-expresses the value on a superset of its tags.
    pub fn to_new_vars(&self, vars: &VarSet) -> Self {
        Self {
            real: self.real,
            vars: Arc::clone(vars),
            grad: project_grad(&self.grad, &self.vars, vars),
            hess: project_hess(&self.hess, &self.vars, vars),
        }
    }

    /// Aligns two operands onto the union of their tags.
    pub(crate) fn aligned(&self, other: &Dual2) -> (Dual2, Dual2) {
        let vars = union_vars(&self.vars, &other.vars);
        (self.to_new_vars(&vars), other.to_new_vars(&vars))
    }
}

impl From<f64> for Dual2 {
    fn from(real: f64) -> Self {
        Dual2::constant(real)
    }
}

impl From<Dual> for Dual2 {
    fn from(d: Dual) -> Self {
        let n = d.vars.len();
        Dual2::from_parts(d.real, d.vars, d.grad, Array2::zeros((n, n)))
    }
}

impl From<&Dual> for Dual2 {
    fn from(d: &Dual) -> Self {
        Dual2::from(d.clone())
    }
}

impl PartialEq for Dual2 {
    fn eq(&self, other: &Self) -> bool {
        if self.real != other.real {
            return false;
        }
        let (a, b) = self.aligned(other);
        a.grad == b.grad && a.hess == b.hess
    }
}

impl fmt::Display for Dual2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Dual2: {:.6}, (", self.real)?;
        for (i, v) in self.vars.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(v)?;
        }
        write!(f, "), {}, {}>", self.grad, self.hess)
    }
}

impl std::iter::Sum for Dual2 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dual2::constant(0.0), |acc, x| acc + x)
    }
}
