use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier carried by every entity.
///
/// Backends hand these out either as JSON numbers or as strings; both forms
/// are preserved as received. Equality is strict across representations, so
/// `1` and `"1"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(i64),
    Str(String),
}

impl EntityId {
    /// Numeric view of the id, used for maximum tracking. String ids that do
    /// not parse as integers have no numeric value.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            EntityId::Num(n) => Some(*n),
            EntityId::Str(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Num(n) => write!(f, "{}", n),
            EntityId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Num(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Str(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Str(s)
    }
}

/// A record the CRUD units can manage: any serializable type with an id.
///
/// `secondary_id` is the optional foreign-key-like counter some entities
/// carry; the fetch unit tracks its maximum alongside the maximum id.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier used for collection lookup and for `{path}/{id}` URLs.
    fn id(&self) -> EntityId;

    fn secondary_id(&self) -> Option<i64> {
        None
    }
}

/// A sports club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: EntityId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Entity for Club {
    fn id(&self) -> EntityId {
        self.id.clone()
    }
}

/// A trainer, optionally linked to a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: EntityId,
    pub name: String,
    /// Schedule the trainer is booked under, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules_id: Option<i64>,
}

impl Entity for Trainer {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn secondary_id(&self) -> Option<i64> {
        self.schedules_id
    }
}

/// A bookable area within a club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: EntityId,
    pub name: String,
}

impl Entity for Area {
    fn id(&self) -> EntityId {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_deserializes_both_forms() {
        let ids: Vec<EntityId> = serde_json::from_str(r#"[7, "7", "area-3"]"#).unwrap();
        assert_eq!(
            ids,
            vec![
                EntityId::Num(7),
                EntityId::Str("7".to_string()),
                EntityId::Str("area-3".to_string()),
            ]
        );
    }

    #[test]
    fn entity_id_equality_is_strict() {
        assert_ne!(EntityId::Num(1), EntityId::Str("1".to_string()));
    }

    #[test]
    fn as_number_coerces_numeric_strings() {
        assert_eq!(EntityId::Num(42).as_number(), Some(42));
        assert_eq!(EntityId::from("42").as_number(), Some(42));
        assert_eq!(EntityId::from("club-9").as_number(), None);
    }

    #[test]
    fn entity_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&EntityId::Num(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&EntityId::from("t-1")).unwrap(),
            "\"t-1\""
        );
    }

    #[test]
    fn trainer_secondary_id_is_schedules_id() {
        let trainer: Trainer =
            serde_json::from_str(r#"{"id": 2, "name": "Sam", "schedules_id": 11}"#).unwrap();
        assert_eq!(trainer.secondary_id(), Some(11));

        let unscheduled: Trainer = serde_json::from_str(r#"{"id": 3, "name": "Kim"}"#).unwrap();
        assert_eq!(unscheduled.secondary_id(), None);
    }

    #[test]
    fn club_omits_absent_address() {
        let club = Club {
            id: EntityId::Num(1),
            name: "Riverside".to_string(),
            address: None,
        };
        let json = serde_json::to_value(&club).unwrap();
        assert!(json.get("address").is_none());
    }
}
