use serde::{Deserialize, Serialize};

/// Face descriptor produced by an external embedding model. The length is
/// fixed per model but not known to this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(Vec<f64>);

impl Descriptor {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean norm of the difference vector, or `None` when the two
    /// descriptors do not have the same length.
    pub fn euclidean_distance(&self, other: &Descriptor) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }

        let sum: f64 = self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum();

        Some(sum.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(values: &[f64]) -> Descriptor {
        Descriptor::new(values.to_vec())
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = d(&[0.25, -1.5, 3.0, 0.0]);
        assert_eq!(a.euclidean_distance(&a), Some(0.0));
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (d(&[0.0, 0.0, 0.0]), d(&[10.0, 10.0, 10.0])),
            (d(&[1.0, -2.0]), d(&[-3.5, 4.25])),
            (d(&[0.1; 128]), d(&[0.3; 128])),
        ];

        for (a, b) in &pairs {
            assert_eq!(a.euclidean_distance(b), b.euclidean_distance(a));
        }
    }

    #[test]
    fn distance_matches_known_value() {
        let dist = d(&[0.0, 0.0, 0.0])
            .euclidean_distance(&d(&[10.0, 10.0, 10.0]))
            .unwrap();
        assert!((dist - 300f64.sqrt()).abs() < 1e-12);
        assert!((dist - 17.3205).abs() < 1e-4);
    }

    #[test]
    fn mismatched_lengths_have_no_distance() {
        assert_eq!(d(&[1.0, 2.0]).euclidean_distance(&d(&[1.0])), None);
        assert_eq!(d(&[]).euclidean_distance(&d(&[1.0])), None);
    }

    #[test]
    fn serializes_as_plain_array() {
        let json = serde_json::to_string(&d(&[0.5, 1.0])).unwrap();
        assert_eq!(json, "[0.5,1.0]");

        let parsed: Descriptor = serde_json::from_str("[1, 2.5]").unwrap();
        assert_eq!(parsed.values(), &[1.0, 2.5]);
    }
}
