//! IEEE-754 rounding mode selection
//!
//! A single [`RoundingMode`] drives both numeric engines: the per-element
//! soft-float operations in [`crate::element`] and the BLAS-style routines in
//! [`crate::blas`]. The mode is passed explicitly to every kernel call, so
//! there is no process-wide rounding state and concurrent calls with
//! different modes cannot observe each other.
//!
//! Hosts identify modes by a one-character discriminant:
//!
//! | Discriminant | Mode |
//! |--------------|------|
//! | `n` | round to nearest, ties to even |
//! | `z` | round toward zero |
//! | `u` | round toward positive infinity |
//! | `d` | round toward negative infinity |
//! | `a` | round to nearest, ties away from zero |

use std::fmt;

use rustc_apfloat::Round;

use crate::error::{KernelError, KernelResult};

/// One of the five IEEE-754 rounding-direction attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Nearest, ties to even
    #[default]
    Nearest,
    /// Toward zero (truncate)
    TowardZero,
    /// Toward positive infinity
    Up,
    /// Toward negative infinity
    Down,
    /// Nearest, ties away from zero
    Away,
}

impl RoundingMode {
    /// All modes in discriminant order `n z u d a`
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::Nearest,
        RoundingMode::TowardZero,
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Away,
    ];

    /// Parse a host discriminant
    ///
    /// # Examples
    ///
    /// ```
    /// use tenacc_kernels::RoundingMode;
    ///
    /// assert_eq!(RoundingMode::from_discriminant('z').unwrap(), RoundingMode::TowardZero);
    /// assert!(RoundingMode::from_discriminant('x').is_err());
    /// ```
    pub fn from_discriminant(discriminant: char) -> KernelResult<Self> {
        match discriminant {
            'n' => Ok(RoundingMode::Nearest),
            'z' => Ok(RoundingMode::TowardZero),
            'u' => Ok(RoundingMode::Up),
            'd' => Ok(RoundingMode::Down),
            'a' => Ok(RoundingMode::Away),
            other => Err(KernelError::InvalidRounding {
                discriminant: other,
            }),
        }
    }

    /// The host discriminant for this mode
    pub const fn discriminant(self) -> char {
        match self {
            RoundingMode::Nearest => 'n',
            RoundingMode::TowardZero => 'z',
            RoundingMode::Up => 'u',
            RoundingMode::Down => 'd',
            RoundingMode::Away => 'a',
        }
    }

    /// The soft-float rounding attribute both engines use
    pub(crate) const fn to_round(self) -> Round {
        match self {
            RoundingMode::Nearest => Round::NearestTiesToEven,
            RoundingMode::TowardZero => Round::TowardZero,
            RoundingMode::Up => Round::TowardPositive,
            RoundingMode::Down => Round::TowardNegative,
            RoundingMode::Away => Round::NearestTiesToAway,
        }
    }
}

impl TryFrom<char> for RoundingMode {
    type Error = KernelError;

    fn try_from(discriminant: char) -> KernelResult<Self> {
        RoundingMode::from_discriminant(discriminant)
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::Nearest => "nearest",
            RoundingMode::TowardZero => "toward-zero",
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
            RoundingMode::Away => "away",
        };
        f.write_str(name)
    }
}
