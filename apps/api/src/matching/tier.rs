use serde::{Deserialize, Serialize};

/// Presentation bucket for a 0–100 match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    PerfectMatch,
    GoodMatch,
    PotentialMatch,
    NeedsUpskilling,
}

impl MatchTier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => MatchTier::PerfectMatch,
            s if s >= 60.0 => MatchTier::GoodMatch,
            s if s >= 40.0 => MatchTier::PotentialMatch,
            _ => MatchTier::NeedsUpskilling,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::PerfectMatch => "Perfect Match",
            MatchTier::GoodMatch => "Good Match",
            MatchTier::PotentialMatch => "Potential Match",
            MatchTier::NeedsUpskilling => "Needs Upskilling",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(MatchTier::from_score(100.0), MatchTier::PerfectMatch);
        assert_eq!(MatchTier::from_score(80.0), MatchTier::PerfectMatch);
        assert_eq!(MatchTier::from_score(79.9), MatchTier::GoodMatch);
        assert_eq!(MatchTier::from_score(60.0), MatchTier::GoodMatch);
        assert_eq!(MatchTier::from_score(40.0), MatchTier::PotentialMatch);
        assert_eq!(MatchTier::from_score(39.0), MatchTier::NeedsUpskilling);
        assert_eq!(MatchTier::from_score(0.0), MatchTier::NeedsUpskilling);
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        let json = serde_json::to_string(&MatchTier::NeedsUpskilling).unwrap();
        assert_eq!(json, r#""needs_upskilling""#);
        assert_eq!(MatchTier::GoodMatch.label(), "Good Match");
    }
}
