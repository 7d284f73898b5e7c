//! Query result type.

/// A single result from a similarity query.
///
/// `distance` is metric-dependent but lower is always better: metrics whose
/// natural reading is "higher is more similar" (histogram intersection) are
/// negated before reaching this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// The stored identifier of the matched image.
    pub path: String,
    /// The distance to the query descriptor (lower = more similar).
    pub distance: f32,
}

impl Match {
    /// Create a new match.
    #[must_use]
    pub fn new(path: impl Into<String>, distance: f32) -> Self {
        Self { path: path.into(), distance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_match() {
        let m = Match::new("pic.0001.jpg", 0.25);
        assert_eq!(m.path, "pic.0001.jpg");
        assert_eq!(m.distance, 0.25);
    }
}
