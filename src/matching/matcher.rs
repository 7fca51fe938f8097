use crate::errors::{MatchError, MatchResult};
use crate::models::{Descriptor, UserStore};

/// Nearest enrolled user to a query descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Closest {
    /// `None` only when the store is empty.
    pub username: Option<String>,
    /// `f64::INFINITY` when the store is empty.
    pub distance: f64,
}

impl Closest {
    fn none() -> Self {
        Self { username: None, distance: f64::INFINITY }
    }

    /// Whether the closest user lies within `threshold`.
    pub fn within(&self, threshold: f64) -> bool {
        self.username.is_some() && self.distance <= threshold
    }

    /// Distance as it goes on the wire; JSON has no infinity.
    pub fn wire_distance(&self) -> Option<f64> {
        Some(self.distance).filter(|d| d.is_finite())
    }
}

/// Linear scan over every enrolled user. Ties go to the user found first.
///
/// Stored descriptors whose length differs from the query are skipped.
/// Fails only when users exist but none of them could be compared.
pub fn find_closest(query: &Descriptor, users: &UserStore) -> MatchResult<Closest> {
    let mut best = Closest::none();
    let mut first_mismatch = None;

    for (username, record) in users.iter() {
        let Some(distance) = query.euclidean_distance(&record.descriptor) else {
            tracing::warn!(
                "Skipping {}: descriptor has {} values, query has {}",
                username,
                record.descriptor.len(),
                query.len()
            );
            first_mismatch.get_or_insert_with(|| MatchError::DimensionMismatch {
                username: username.to_string(),
                expected: query.len(),
                found: record.descriptor.len(),
            });
            continue;
        };

        if distance < best.distance {
            best = Closest {
                username: Some(username.to_string()),
                distance,
            };
        }
    }

    if best.username.is_none() {
        if let Some(err) = first_mismatch {
            return Err(err);
        }
    }

    tracing::trace!("Closest of {} users: {:?}", users.len(), best);
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRecord;

    fn store(entries: Vec<(&str, Vec<f64>)>) -> UserStore {
        let mut users = UserStore::new();
        for (name, values) in entries {
            users.upsert(name.to_string(), UserRecord { descriptor: Descriptor::new(values) });
        }
        users
    }

    fn q(values: &[f64]) -> Descriptor {
        Descriptor::new(values.to_vec())
    }

    #[test]
    fn empty_store_has_no_closest() {
        let closest = find_closest(&q(&[0.0, 0.0]), &UserStore::new()).unwrap();
        assert_eq!(closest.username, None);
        assert!(closest.distance.is_infinite());
        assert_eq!(closest.wire_distance(), None);
        assert!(!closest.within(f64::MAX));
    }

    #[test]
    fn scans_every_entry_for_the_minimum() {
        let users = store(vec![
            ("far", vec![5.0, 5.0]),
            ("near", vec![1.0, 0.0]),
            ("exact", vec![0.0, 0.1]),
        ]);

        let closest = find_closest(&q(&[0.0, 0.0]), &users).unwrap();
        assert_eq!(closest.username.as_deref(), Some("exact"));
        assert!((closest.distance - 0.1).abs() < 1e-12);
        assert!(closest.within(0.5));
    }

    #[test]
    fn ties_go_to_the_first_enrolled() {
        let users = store(vec![
            ("first", vec![1.0, 0.0]),
            ("second", vec![0.0, 1.0]),
        ]);

        let closest = find_closest(&q(&[0.0, 0.0]), &users).unwrap();
        assert_eq!(closest.username.as_deref(), Some("first"));
        assert_eq!(closest.distance, 1.0);
    }

    #[test]
    fn far_users_are_still_reported() {
        let users = store(vec![("alice", vec![0.0, 0.0, 0.0])]);

        let closest = find_closest(&q(&[10.0, 10.0, 10.0]), &users).unwrap();
        assert_eq!(closest.username.as_deref(), Some("alice"));
        assert!(!closest.within(0.5));
        assert!((closest.wire_distance().unwrap() - 17.3205).abs() < 1e-4);
    }

    #[test]
    fn threshold_is_inclusive() {
        let users = store(vec![("alice", vec![0.5])]);
        let closest = find_closest(&q(&[0.0]), &users).unwrap();
        assert!(closest.within(0.5));
    }

    #[test]
    fn entries_of_another_length_are_skipped() {
        let users = store(vec![
            ("short", vec![]),
            ("alice", vec![0.0, 0.0]),
            ("bob", vec![0.0]),
        ]);

        let closest = find_closest(&q(&[0.0, 0.0]), &users).unwrap();
        assert_eq!(closest.username.as_deref(), Some("alice"));
        assert_eq!(closest.distance, 0.0);
    }

    #[test]
    fn no_comparable_entry_names_the_first_mismatch() {
        let users = store(vec![("alice", vec![0.0, 0.0, 0.0]), ("bob", vec![0.0])]);

        let err = find_closest(&q(&[0.0, 0.0]), &users).unwrap_err();
        assert_eq!(
            err,
            MatchError::DimensionMismatch {
                username: "alice".into(),
                expected: 2,
                found: 3,
            }
        );
    }
}
