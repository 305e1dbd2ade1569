use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A display refresh rate in Hz, held as an exact ratio.
///
/// NTSC-style rates are not integers: 59.94 Hz is `60000 / 1001`. Keeping the
/// ratio means a 59.94 Hz panel never compares equal to a 60 Hz one and
/// divisibility checks carry no float error.
///
/// Both terms must be non-zero. That is a precondition of every constructor,
/// checked only in debug builds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RefreshRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl RefreshRate {
    pub const NTSC_59_94: Self = Self {
        numerator: 60_000,
        denominator: 1_001,
    };

    pub fn new(numerator: u32, denominator: u32) -> Self {
        debug_assert!(
            numerator > 0 && denominator > 0,
            "refresh rate terms must be positive, got {numerator}/{denominator}"
        );
        Self {
            numerator,
            denominator,
        }
    }

    pub fn from_hz(hz: u32) -> Self {
        Self::new(hz, 1)
    }

    /// Approximate value in Hz. For display and logging only.
    pub fn value(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    /// Nearest whole Hz, ties to even.
    pub fn rounded_hz(self) -> u32 {
        let rounded = round_ratio(u64::from(self.numerator), u64::from(self.denominator));
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    /// Number of refreshes per rendered frame that best approximates
    /// `target_hz`: `round(self / target_hz)`, never below one.
    ///
    /// Rounds to nearest with ties to even, so a 60 Hz display targeting
    /// 25 Hz gets 2 (2.4 rounded) and one targeting 24 Hz also gets 2 (2.5
    /// rounded to even).
    pub fn sync_divisor_for(self, target_hz: u32) -> u32 {
        debug_assert!(target_hz > 0, "target rate must be positive");
        let denominator = u64::from(self.denominator) * u64::from(target_hz.max(1));
        let divisor = round_ratio(u64::from(self.numerator), denominator).max(1);
        u32::try_from(divisor).unwrap_or(u32::MAX)
    }

    /// The rate seen when only every `divisor`-th refresh presents a frame.
    pub fn divided_by(self, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        let common = gcd(self.numerator, divisor);
        Self::new(
            self.numerator / common,
            self.denominator.saturating_mul(divisor / common),
        )
    }

    /// Whether `hz` divides this rate into a whole number of refreshes.
    pub fn is_multiple_of(self, hz: u32) -> bool {
        if hz == 0 {
            return false;
        }
        u64::from(self.numerator) % (u64::from(self.denominator) * u64::from(hz)) == 0
    }

    /// Lowest-terms form.
    pub fn reduced(self) -> Self {
        let common = gcd(self.numerator, self.denominator);
        Self::new(self.numerator / common, self.denominator / common)
    }
}

impl Default for RefreshRate {
    fn default() -> Self {
        Self::from_hz(60)
    }
}

impl PartialEq for RefreshRate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RefreshRate {}

impl PartialOrd for RefreshRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RefreshRate {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.numerator) * u64::from(other.denominator);
        let rhs = u64::from(other.numerator) * u64::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for RefreshRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reduced = self.reduced();
        if reduced.denominator == 1 {
            write!(f, "{} Hz", reduced.numerator)
        } else {
            write!(f, "{:.2} Hz", reduced.value())
        }
    }
}

fn round_ratio(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    match (remainder * 2).cmp(&denominator) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 0 => quotient,
        Ordering::Equal => quotient + 1,
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}
