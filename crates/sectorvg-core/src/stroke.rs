use smallvec::SmallVec;

/// The default dash pattern: an 8 point dash followed by a 4 point gap.
pub const DEFAULT_DASH_PATTERN: [f32; 2] = [8.0, 4.0];

/// The dash pattern used when stroking a path.
///
/// An empty pattern strokes a solid line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineDash {
    /// Alternating dash and gap lengths.
    ///
    /// A list with an odd number of entries is repeated once to make it even.
    pub segments: SmallVec<[f32; 4]>,

    /// The distance into the pattern at which to start.
    pub offset: usize,
}

impl LineDash {
    /// Creates a dash pattern, returning `None` if any length is negative or
    /// not finite.
    pub fn new(segments: &[f32]) -> Option<Self> {
        if segments.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return None;
        }

        Some(Self {
            segments: segments.iter().copied().collect(),
            offset: 0,
        })
    }

    pub fn is_solid(&self) -> bool {
        self.segments.iter().all(|s| *s == 0.0)
    }

    /// Returns this pattern with every length multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            segments: self.segments.iter().map(|s| s * factor).collect(),
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_lengths() {
        assert!(LineDash::new(&[4.0, -1.0]).is_none());
        assert!(LineDash::new(&[f32::NAN]).is_none());
    }

    #[test]
    fn empty_pattern_is_solid() {
        assert!(LineDash::new(&[]).unwrap().is_solid());
        assert!(!LineDash::new(&DEFAULT_DASH_PATTERN).unwrap().is_solid());
    }
}
