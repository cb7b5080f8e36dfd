use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency every salary is settled in after adaptation.
pub const CANONICAL_CURRENCY: &str = "RUB";

/// Textual form of `published_at` in persisted records and on screen.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    pub name: String,
    pub url: String,
}

/// Canonical vacancy produced by a provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub title: String,
    pub url: String,
    pub currency: String,
    /// `None` when the listing carries no usable amount.
    pub salary: Option<u64>,
    pub description: Option<String>,
    pub city: String,
    #[serde(with = "published_at")]
    pub published_at: NaiveDateTime,
    pub employer: Employer,
}

/// Identity used to spot the same listing posted twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub title: String,
    pub salary: Option<u64>,
    pub employer: String,
}

impl VacancyRecord {
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            title: self.title.clone(),
            salary: self.salary,
            employer: self.employer.name.clone(),
        }
    }

    /// Salary that is known and non-zero.
    pub fn usable_salary(&self) -> Option<u64> {
        self.salary.filter(|s| *s > 0)
    }

    pub fn published_at_text(&self) -> String {
        self.published_at.format(PUBLISHED_AT_FORMAT).to_string()
    }
}

mod published_at {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PUBLISHED_AT_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(PUBLISHED_AT_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, PUBLISHED_AT_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Ordered `synthetic id -> record` mapping.
///
/// Serializes as a JSON object whose key order is the insertion order, which
/// is the provider's response order (and so reflects any requested sort).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacancySet {
    entries: Vec<(String, VacancyRecord)>,
}

impl VacancySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. An id that is already present is replaced in place.
    pub fn insert(&mut self, id: impl Into<String>, record: VacancyRecord) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = record,
            None => self.entries.push((id, record)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VacancyRecord> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, record)| record)
    }

    /// Record at a 1-based position, as shown in listings.
    pub fn nth(&self, position: usize) -> Option<(&str, &VacancyRecord)> {
        position
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(|(id, record)| (id.as_str(), record))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VacancyRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn records(&self) -> impl Iterator<Item = &VacancyRecord> {
        self.entries.iter().map(|(_, record)| record)
    }
}

impl IntoIterator for VacancySet {
    type Item = (String, VacancyRecord);
    type IntoIter = std::vec::IntoIter<(String, VacancyRecord)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, VacancyRecord)> for VacancySet {
    fn from_iter<I: IntoIterator<Item = (String, VacancyRecord)>>(iter: I) -> Self {
        let mut set = VacancySet::new();
        for (id, record) in iter {
            set.insert(id, record);
        }
        set
    }
}

impl Serialize for VacancySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VacancySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = VacancySet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of vacancy records keyed by id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<VacancySet, A::Error> {
                let mut set = VacancySet::new();
                while let Some((id, record)) = access.next_entry::<String, VacancyRecord>()? {
                    set.insert(id, record);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}
