//! Integer-program formulation selector.

use std::fmt;
use std::str::FromStr;

use crate::error::SamplerError;

/// How quadratic terms are handed to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Method {
    /// Every product gets an auxiliary link variable bound by three
    /// linear constraints; the objective is linear.
    #[cfg_attr(feature = "serde", serde(alias = "mip"))]
    Linear,

    /// Products go straight into the objective; the solver handles the
    /// quadratic terms natively.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "miqp"))]
    Quadratic,
}

impl Method {
    /// Returns the canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Linear => "linear",
            Method::Quadratic => "quadratic",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SamplerError;

    /// Accepts `linear` / `quadratic`, and `mip` / `miqp` as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" | "mip" => Ok(Method::Linear),
            "quadratic" | "miqp" => Ok(Method::Quadratic),
            other => Err(SamplerError::invalid(format!(
                "unsupported method '{other}', expected 'linear' or 'quadratic'"
            ))),
        }
    }
}
