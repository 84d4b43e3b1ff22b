//! Vartype conversion for quadratic models.
//!
//! Substituting `s = 2x - 1` (or `x = (s + 1) / 2`) into every term and
//! collecting coefficients yields an equivalent model in the other encoding.
//! Constant contributions of each term accumulate into the offset.

use crate::variable::Variable;
use crate::vartype::Vartype;

use super::QuadraticModel;

impl<V: Variable> QuadraticModel<V> {
    /// Returns an equivalent model under `target`.
    ///
    /// For every complete assignment `a`, the energy of the converted model at
    /// the converted assignment equals the energy of `self` at `a`, up to
    /// floating-point rounding.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use mipsampler_core::{QuadraticModel, Vartype};
    ///
    /// let ising = QuadraticModel::from_ising([(0, 0.5)], [((0, 1), -1.0)], 0.0).unwrap();
    /// let qubo = ising.change_vartype(Vartype::Binary);
    ///
    /// let spins = BTreeMap::from([(0, 1), (1, -1)]);
    /// let bits = BTreeMap::from([(0, 1), (1, 0)]);
    /// assert_eq!(ising.energy(&spins).unwrap(), qubo.energy(&bits).unwrap());
    /// ```
    pub fn change_vartype(&self, target: Vartype) -> Self {
        match (self.vartype, target) {
            (Vartype::Spin, Vartype::Binary) => self.spin_to_binary(),
            (Vartype::Binary, Vartype::Spin) => self.binary_to_spin(),
            _ => self.clone(),
        }
    }

    /// Shorthand for `change_vartype(Vartype::Spin)`.
    pub fn spin(&self) -> Self {
        self.change_vartype(Vartype::Spin)
    }

    /// Shorthand for `change_vartype(Vartype::Binary)`.
    pub fn binary(&self) -> Self {
        self.change_vartype(Vartype::Binary)
    }

    fn spin_to_binary(&self) -> Self {
        let mut out = self.clone();
        out.vartype = Vartype::Binary;

        // h s = 2h x - h
        for (dst, &h) in out.linear.iter_mut().zip(&self.linear) {
            *dst = 2.0 * h;
            out.offset -= h;
        }

        // J s_u s_v = 4J x_u x_v - 2J x_u - 2J x_v + J
        for (pair, bias) in out.quadratic.iter_mut() {
            let j = *bias;
            *bias = 4.0 * j;
            let (u, v) = pair.as_tuple();
            out.linear[self.index[u]] -= 2.0 * j;
            out.linear[self.index[v]] -= 2.0 * j;
            out.offset += j;
        }
        out
    }

    fn binary_to_spin(&self) -> Self {
        let mut out = self.clone();
        out.vartype = Vartype::Spin;

        // a x = a/2 s + a/2
        for (dst, &a) in out.linear.iter_mut().zip(&self.linear) {
            *dst = 0.5 * a;
            out.offset += 0.5 * a;
        }

        // b x_u x_v = b/4 (s_u s_v + s_u + s_v + 1)
        for (pair, bias) in out.quadratic.iter_mut() {
            let quarter = 0.25 * *bias;
            *bias = quarter;
            let (u, v) = pair.as_tuple();
            out.linear[self.index[u]] += quarter;
            out.linear[self.index[v]] += quarter;
            out.offset += quarter;
        }
        out
    }
}
