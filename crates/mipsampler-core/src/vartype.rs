//! Binary variable encodings.
//!
//! Both encodings are affinely related per variable: `binary = (spin + 1) / 2`.

use std::fmt;
use std::str::FromStr;

use crate::error::SamplerError;

/// Encoding of a two-valued variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Vartype {
    /// Values in `{0, 1}`.
    Binary,
    /// Values in `{-1, +1}`.
    Spin,
}

impl Vartype {
    /// Returns the two admissible values, low first.
    pub const fn values(self) -> [i8; 2] {
        match self {
            Vartype::Binary => [0, 1],
            Vartype::Spin => [-1, 1],
        }
    }

    /// Returns true if `value` is admissible under this encoding.
    pub const fn contains(self, value: i8) -> bool {
        match self {
            Vartype::Binary => value == 0 || value == 1,
            Vartype::Spin => value == -1 || value == 1,
        }
    }

    /// Converts a single value from this encoding into `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mipsampler_core::Vartype;
    ///
    /// assert_eq!(Vartype::Binary.convert_value(0, Vartype::Spin), Some(-1));
    /// assert_eq!(Vartype::Spin.convert_value(1, Vartype::Binary), Some(1));
    /// assert_eq!(Vartype::Binary.convert_value(2, Vartype::Spin), None);
    /// ```
    pub const fn convert_value(self, value: i8, target: Vartype) -> Option<i8> {
        if !self.contains(value) {
            return None;
        }
        Some(match (self, target) {
            (Vartype::Binary, Vartype::Spin) => 2 * value - 1,
            (Vartype::Spin, Vartype::Binary) => (value + 1) / 2,
            _ => value,
        })
    }

    /// Returns the other encoding.
    pub const fn other(self) -> Vartype {
        match self {
            Vartype::Binary => Vartype::Spin,
            Vartype::Spin => Vartype::Binary,
        }
    }
}

impl fmt::Display for Vartype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vartype::Binary => write!(f, "BINARY"),
            Vartype::Spin => write!(f, "SPIN"),
        }
    }
}

impl FromStr for Vartype {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(Vartype::Binary),
            "spin" => Ok(Vartype::Spin),
            other => Err(SamplerError::invalid(format!("unknown vartype '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("SPIN".parse::<Vartype>().unwrap(), Vartype::Spin);
        assert_eq!("binary".parse::<Vartype>().unwrap(), Vartype::Binary);
        assert!("ternary".parse::<Vartype>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_display_parses_back() {
        for vartype in [Vartype::Binary, Vartype::Spin] {
            assert_eq!(vartype.to_string().parse::<Vartype>().unwrap(), vartype);
            assert_eq!(vartype.other().other(), vartype);
            assert_ne!(vartype.other(), vartype);
        }
    }

    #[test]
    fn test_convert_value() {
        assert_eq!(Vartype::Binary.convert_value(0, Vartype::Spin), Some(-1));
        assert_eq!(Vartype::Spin.convert_value(1, Vartype::Binary), Some(1));
        assert_eq!(Vartype::Spin.convert_value(0, Vartype::Binary), None);
        assert_eq!(Vartype::Binary.convert_value(1, Vartype::Binary), Some(1));
    }
}
