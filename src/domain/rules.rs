use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Trait for cellular automaton rules.
///
/// A rule only sees the committed state of one cell and how many of its
/// 8 neighbors are alive; it never mutates anything.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> String;

    /// Apply rule to compute the next state of a cell
    fn next_state(&self, alive: bool, neighbors: u8) -> bool;
}

/// Standard Life transition (B3/S23):
/// 1. Live cell with 2-3 neighbors survives
/// 2. Dead cell with exactly 3 neighbors becomes alive
/// 3. All other cases result in death
pub const fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

/// Conway's Game of Life (B3/S23)
#[derive(Clone, Copy, Debug, Default)]
pub struct ConwayRule;

impl Rule for ConwayRule {
    fn name(&self) -> String {
        "Conway".to_owned()
    }

    fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        next_state(alive, neighbors)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule must start with 'B', found '{got}'")]
    MissingBirth { got: String },

    #[error("neighbor count {got} is out of range 0..=8")]
    CountOutOfRange { got: u32 },

    #[error("invalid character '{got}' in rule")]
    InvalidChar { got: char },
}

/// Outer-totalistic rule in `B<digits>/S<digits>` notation.
///
/// Bit `n` of `birth` (resp. `survival`) is set when a dead (resp. live)
/// cell with `n` live neighbors is alive in the next generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BirthSurvival {
    birth: u16,
    survival: u16,
}

impl BirthSurvival {
    pub const CONWAY: Self = Self {
        birth: 1 << 3,
        survival: (1 << 2) | (1 << 3),
    };

    pub const HIGHLIFE: Self = Self {
        birth: (1 << 3) | (1 << 6),
        survival: (1 << 2) | (1 << 3),
    };

    pub const fn births_on(&self, neighbors: u8) -> bool {
        neighbors <= 8 && self.birth & (1u16 << neighbors) != 0
    }

    pub const fn survives_on(&self, neighbors: u8) -> bool {
        neighbors <= 8 && self.survival & (1u16 << neighbors) != 0
    }
}

impl Default for BirthSurvival {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl Rule for BirthSurvival {
    fn name(&self) -> String {
        self.to_string()
    }

    fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survives_on(neighbors)
        } else {
            self.births_on(neighbors)
        }
    }
}

impl FromStr for BirthSurvival {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum Section {
            Birth,
            Survival,
        }

        let s = s.trim();
        if !s.starts_with(['B', 'b']) {
            return Err(RuleError::MissingBirth { got: s.to_owned() });
        }

        let mut section = Section::Birth;
        let mut rule = Self { birth: 0, survival: 0 };

        for c in s.chars() {
            match c {
                'B' | 'b' => section = Section::Birth,
                'S' | 's' => section = Section::Survival,
                '/' => {}
                c => {
                    let n = c.to_digit(10).ok_or(RuleError::InvalidChar { got: c })?;
                    if n > 8 {
                        return Err(RuleError::CountOutOfRange { got: n });
                    }
                    match section {
                        Section::Birth => rule.birth |= 1u16 << n,
                        Section::Survival => rule.survival |= 1u16 << n,
                    }
                }
            }
        }

        Ok(rule)
    }
}

impl fmt::Display for BirthSurvival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=8u8)
                .filter(|&n| mask & (1u16 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };
        write!(f, "B{}/S{}", digits(self.birth), digits(self.survival))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_table_exhaustive() {
        for neighbors in 0..=8u8 {
            let survives = neighbors == 2 || neighbors == 3;
            assert_eq!(ConwayRule.next_state(true, neighbors), survives, "alive with {neighbors}");
            assert_eq!(ConwayRule.next_state(false, neighbors), neighbors == 3, "dead with {neighbors}");
        }
    }

    #[test]
    fn test_underpopulation_and_overpopulation() {
        assert!(!next_state(true, 0));
        assert!(!next_state(true, 1));
        assert!(!next_state(true, 4));
        assert!(!next_state(true, 8));
    }

    #[test]
    fn test_parse_conway_matches_builtin() {
        let rule: BirthSurvival = "B3/S23".parse().unwrap();
        assert_eq!(rule, BirthSurvival::CONWAY);
        for neighbors in 0..=8u8 {
            for alive in [true, false] {
                assert_eq!(rule.next_state(alive, neighbors), ConwayRule.next_state(alive, neighbors));
            }
        }
    }

    #[test]
    fn test_highlife_reproduction() {
        let rule: BirthSurvival = "b36/s23".parse().unwrap();
        assert_eq!(rule, BirthSurvival::HIGHLIFE);
        assert!(rule.next_state(false, 6));
        assert!(!rule.next_state(true, 6));
    }

    #[test]
    fn test_seeds_rule_has_empty_survival() {
        let rule: BirthSurvival = "B2/S".parse().unwrap();
        assert!(rule.next_state(false, 2));
        assert!((0..=8).all(|n| !rule.next_state(true, n)));
        assert_eq!(rule.to_string(), "B2/S");
    }

    #[test]
    fn test_display_round_trips_notation() {
        assert_eq!(BirthSurvival::CONWAY.to_string(), "B3/S23");
        assert_eq!(BirthSurvival::HIGHLIFE.name(), "B36/S23");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("S23".parse::<BirthSurvival>(), Err(RuleError::MissingBirth { got: "S23".into() }));
        assert_eq!("B9/S23".parse::<BirthSurvival>(), Err(RuleError::CountOutOfRange { got: 9 }));
        assert_eq!("B3/S2x".parse::<BirthSurvival>(), Err(RuleError::InvalidChar { got: 'x' }));
    }
}
