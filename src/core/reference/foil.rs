use serde::{Deserialize, Serialize};

/// Which foilness values a set was printed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoilPolicy {
    ForceFoil,
    ForceNonFoil,
    #[default]
    Either,
}

impl FoilPolicy {
    /// Read the policy from a set's raw `foil` list. Only a single `"No"` or
    /// `"Only"` marker is definite.
    pub fn from_markers<S: AsRef<str>>(markers: &[S]) -> Self {
        match markers {
            [marker] if marker.as_ref().trim().eq_ignore_ascii_case("only") => Self::ForceFoil,
            [marker] if marker.as_ref().trim().eq_ignore_ascii_case("no") => Self::ForceNonFoil,
            _ => Self::Either,
        }
    }

    /// Foilness every printing in the set has, if it is fixed.
    pub fn forced(&self) -> Option<bool> {
        match self {
            Self::ForceFoil => Some(true),
            Self::ForceNonFoil => Some(false),
            Self::Either => None,
        }
    }

    /// Whether a listing with the given asserted foilness can belong to the
    /// set. Missing information never excludes.
    pub fn admits(&self, foilness: Option<bool>) -> bool {
        match (self.forced(), foilness) {
            (Some(forced), Some(asserted)) => forced == asserted,
            _ => true,
        }
    }
}
