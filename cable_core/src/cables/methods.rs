//! BS 7671 Appendix 4 reference installation methods.
//!
//! Plans describe the route in words ("clipped-direct", "conduit",
//! "buried"); the capacity tables are keyed by reference method. `FromStr`
//! accepts either form.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Reference installation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstallationMethod {
    /// Enclosed in conduit in a thermally insulating wall
    A1,
    /// Multicore cable in conduit in a thermally insulating wall
    A2,
    /// Enclosed in conduit on or in a masonry wall
    B1,
    /// Enclosed in trunking on a wall
    B2,
    /// Clipped direct
    #[default]
    C,
    /// In ducts in the ground
    D1,
    /// Direct buried
    D2,
    /// In free air or on perforated tray
    E,
    /// On ventilated tray or ladder
    F,
    /// Spaced on cleats
    G,
}

impl InstallationMethod {
    pub const ALL: [InstallationMethod; 10] = [
        InstallationMethod::A1,
        InstallationMethod::A2,
        InstallationMethod::B1,
        InstallationMethod::B2,
        InstallationMethod::C,
        InstallationMethod::D1,
        InstallationMethod::D2,
        InstallationMethod::E,
        InstallationMethod::F,
        InstallationMethod::G,
    ];

    /// Column index in the capacity tables
    pub fn column(&self) -> usize {
        match self {
            InstallationMethod::A1 => 0,
            InstallationMethod::A2 => 1,
            InstallationMethod::B1 => 2,
            InstallationMethod::B2 => 3,
            InstallationMethod::C => 4,
            InstallationMethod::D1 => 5,
            InstallationMethod::D2 => 6,
            InstallationMethod::E => 7,
            InstallationMethod::F => 8,
            InstallationMethod::G => 9,
        }
    }

    /// Reference code as printed in BS 7671 ("B1", "C")
    pub fn code(&self) -> &'static str {
        match self {
            InstallationMethod::A1 => "A1",
            InstallationMethod::A2 => "A2",
            InstallationMethod::B1 => "B1",
            InstallationMethod::B2 => "B2",
            InstallationMethod::C => "C",
            InstallationMethod::D1 => "D1",
            InstallationMethod::D2 => "D2",
            InstallationMethod::E => "E",
            InstallationMethod::F => "F",
            InstallationMethod::G => "G",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationMethod::A1 => "Method A1 (conduit in insulated wall)",
            InstallationMethod::A2 => "Method A2 (multicore in insulated wall)",
            InstallationMethod::B1 => "Method B1 (enclosed in conduit)",
            InstallationMethod::B2 => "Method B2 (enclosed in trunking)",
            InstallationMethod::C => "Method C (clipped direct)",
            InstallationMethod::D1 => "Method D1 (in ducts in ground)",
            InstallationMethod::D2 => "Method D2 (direct buried)",
            InstallationMethod::E => "Method E (free air / perforated tray)",
            InstallationMethod::F => "Method F (ventilated tray / ladder)",
            InstallationMethod::G => "Method G (spaced on cleats)",
        }
    }

    /// Buried in the ground, directly or in ducts
    pub fn is_underground(&self) -> bool {
        matches!(self, InstallationMethod::D1 | InstallationMethod::D2)
    }
}

impl std::fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for InstallationMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();

        for method in Self::ALL {
            if text == method.code().to_lowercase() {
                return Ok(method);
            }
        }

        let method = if text.contains("trunking") {
            InstallationMethod::B2
        } else if text.contains("conduit") && (text.contains("insulat") || text.contains("stud")) {
            InstallationMethod::A1
        } else if text.contains("conduit") {
            InstallationMethod::B1
        } else if text.contains("duct") {
            InstallationMethod::D1
        } else if text.contains("buried") || text.contains("underground") || text.contains("in ground") {
            InstallationMethod::D2
        } else if text.contains("insulation") || text.contains("insulated") {
            InstallationMethod::A2
        } else if text.contains("ladder") || text.contains("ventilated") {
            InstallationMethod::F
        } else if text.contains("cleat") || text.contains("spaced") {
            InstallationMethod::G
        } else if text.contains("tray") || text.contains("free air") || text.contains("free-air") {
            InstallationMethod::E
        } else if text.contains("clip") || text.contains("surface") || text.contains("direct") {
            InstallationMethod::C
        } else {
            return Err(CalcError::unknown_installation_method(s));
        };
        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("C".parse::<InstallationMethod>().unwrap(), InstallationMethod::C);
        assert_eq!("b1".parse::<InstallationMethod>().unwrap(), InstallationMethod::B1);
        assert_eq!(" D2 ".parse::<InstallationMethod>().unwrap(), InstallationMethod::D2);
    }

    #[test]
    fn test_parse_descriptors() {
        let cases = [
            ("clipped-direct", InstallationMethod::C),
            ("Clipped direct to surface", InstallationMethod::C),
            ("conduit", InstallationMethod::B1),
            ("conduit in insulated stud wall", InstallationMethod::A1),
            ("mini trunking", InstallationMethod::B2),
            ("buried", InstallationMethod::D2),
            ("direct buried", InstallationMethod::D2),
            ("in ducts", InstallationMethod::D1),
            ("in-insulation", InstallationMethod::A2),
            ("cable tray", InstallationMethod::E),
            ("ladder", InstallationMethod::F),
            ("cleats", InstallationMethod::G),
        ];
        for (text, expected) in cases {
            assert_eq!(text.parse::<InstallationMethod>().unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_unknown_descriptor() {
        let err = "floating".parse::<InstallationMethod>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_INSTALLATION_METHOD");
    }

    #[test]
    fn test_columns_are_unique() {
        let mut seen = [false; 10];
        for method in InstallationMethod::ALL {
            assert!(!seen[method.column()]);
            seen[method.column()] = true;
        }
    }
}
