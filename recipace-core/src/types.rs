use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement system used for unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    pub const ALL: &'static [UnitSystem] = &[UnitSystem::Imperial, UnitSystem::Metric];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "Imperial",
            UnitSystem::Metric => "Metric",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::ALL
            .iter()
            .copied()
            .find(|u| u.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown unit system: {}", s))
    }
}

/// A 1 to 5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| {
            format!(
                "Rating must be between {} and {}, got {}",
                Rating::MIN,
                Rating::MAX,
                value
            )
        })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_system_parse() {
        assert_eq!("metric".parse::<UnitSystem>(), Ok(UnitSystem::Metric));
        assert_eq!("Imperial".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
        assert!("cubits".parse::<UnitSystem>().is_err());
        assert_eq!(UnitSystem::default(), UnitSystem::Imperial);
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(Rating::default().value(), 3);
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert_eq!(Rating::new(5).map(|r| r.value()), Some(5));
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
