use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use super::Descriptor;

/// Value stored under each username in the users file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub descriptor: Descriptor,
}

/// Every enrolled user, in enrollment order.
///
/// Serialized as a JSON object keyed by username. Order matters: the
/// matcher breaks distance ties in favour of the earliest entry, so the
/// order found in the file is kept on load and written back on save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStore {
    entries: Vec<(String, UserRecord)>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.position(username).map(|i| &self.entries[i].1)
    }

    /// Insert a new user at the end, or replace an existing user's record
    /// in place.
    pub fn upsert(&mut self, username: String, record: UserRecord) {
        match self.position(&username) {
            Some(i) => self.entries[i].1 = record,
            None => self.entries.push((username, record)),
        }
    }

    pub fn remove(&mut self, username: &str) -> Option<UserRecord> {
        self.position(username)
            .map(|i| self.entries.remove(i).1)
    }

    pub fn usernames(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserRecord)> {
        self.entries.iter().map(|(name, record)| (name.as_str(), record))
    }

    fn position(&self, username: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == username)
    }
}

impl Serialize for UserStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UserStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UserStoreVisitor;

        impl<'de> Visitor<'de> for UserStoreVisitor {
            type Value = UserStore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping usernames to user records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<UserStore, A::Error> {
                let mut store = UserStore::new();
                while let Some((name, record)) = access.next_entry::<String, UserRecord>()? {
                    // Repeated keys: last value wins, first position is kept.
                    store.upsert(name, record);
                }
                Ok(store)
            }
        }

        deserializer.deserialize_map(UserStoreVisitor)
    }
}
