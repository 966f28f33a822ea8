//! Entity records and the roster they are evaluated against.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use itertools::Itertools;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::YearBounds;
use crate::error::RosterError;
use crate::schema::{AttributeDescriptor, AttributeKind, Schema};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AttributeValue {
    Categorical(String),
    Year(i32),
    Tags(BTreeSet<String>),
}

impl AttributeValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Categorical(_) => AttributeKind::Categorical,
            Self::Year(_) => AttributeKind::Ordinal,
            Self::Tags(_) => AttributeKind::Set,
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tags(tags.into_iter().map(Into::into).collect())
    }

    fn from_json(
        entity: &str,
        attr: &AttributeDescriptor,
        raw: &Value,
    ) -> Result<Self, RosterError> {
        let mistyped = |expected| RosterError::MistypedAttribute {
            entity: entity.to_owned(),
            attribute: attr.key.clone(),
            expected,
        };

        match attr.kind {
            AttributeKind::Categorical => match raw {
                Value::String(s) => Ok(Self::Categorical(s.clone())),
                Value::Number(n) => Ok(Self::Categorical(n.to_string())),
                Value::Bool(b) => Ok(Self::Categorical(b.to_string())),
                _ => Err(mistyped("a string or number")),
            },
            AttributeKind::Ordinal => raw
                .as_i64()
                .and_then(|year| i32::try_from(year).ok())
                .map(Self::Year)
                .ok_or_else(|| mistyped("an integer year")),
            AttributeKind::Set => match raw {
                Value::String(s) => Ok(Self::tags([s.as_str()])),
                Value::Array(items) => items
                    .iter()
                    .map(|item| item.as_str().map(String::from))
                    .collect::<Option<BTreeSet<_>>>()
                    .map(Self::Tags)
                    .ok_or_else(|| mistyped("a list of strings")),
                _ => Err(mistyped("a list of strings")),
            },
        }
    }
}

/// One roster entry. `values` is laid out in schema order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Entity {
    name: String,
    values: Vec<AttributeValue>,
}

impl Entity {
    pub fn new(name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, idx: usize) -> Option<&AttributeValue> {
        self.values.get(idx)
    }

    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    fn from_json(index: usize, raw: &Value, schema: &Schema) -> Result<Self, RosterError> {
        let object: &Map<String, Value> =
            raw.as_object().ok_or(RosterError::NotAnObject { index })?;

        let name = object
            .get(&schema.name_key)
            .and_then(Value::as_str)
            .ok_or_else(|| RosterError::MissingName {
                index,
                key: schema.name_key.clone(),
            })?;

        let values = schema
            .iter()
            .map(|attr| {
                let raw = object.get(&attr.key).ok_or_else(|| RosterError::MissingAttribute {
                    entity: name.to_owned(),
                    attribute: attr.key.clone(),
                })?;
                AttributeValue::from_json(name, attr, raw)
            })
            .try_collect()?;

        Ok(Self::new(name, values))
    }
}

/// An ordered, immutable collection of entities with unique names.
#[derive(Debug, Clone)]
pub struct Roster {
    schema: Schema,
    entities: Vec<Entity>,
}

impl Roster {
    /// Validates the entities against the schema and year bounds.
    pub fn new(
        schema: Schema,
        entities: Vec<Entity>,
        years: &YearBounds,
    ) -> Result<Self, RosterError> {
        if entities.len() < 2 {
            return Err(RosterError::TooSmall(entities.len()));
        }

        let mut seen = HashSet::new();
        for entity in &entities {
            if !seen.insert(entity.name()) {
                return Err(RosterError::DuplicateName(entity.name.clone()));
            }
            check_shape(entity, &schema, years)?;
        }

        Ok(Self { schema, entities })
    }

    pub fn from_json_value(
        value: &Value,
        schema: Schema,
        years: &YearBounds,
    ) -> Result<Self, RosterError> {
        let entries = value.as_array().ok_or(RosterError::NotAnArray)?;

        let entities: Vec<Entity> = entries
            .iter()
            .enumerate()
            .map(|(index, raw)| Entity::from_json(index, raw, &schema))
            .try_collect()?;

        Self::new(schema, entities, years)
    }

    pub fn from_json_str(
        json: &str,
        schema: Schema,
        years: &YearBounds,
    ) -> Result<Self, RosterError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value, schema, years)
    }

    pub fn load(
        path: impl AsRef<Path>,
        schema: Schema,
        years: &YearBounds,
    ) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let roster = Self::from_json_str(&json, schema, years)?;
        debug!(path = %path.display(), entities = roster.len(), "roster loaded");
        Ok(roster)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }
}

fn check_shape(entity: &Entity, schema: &Schema, years: &YearBounds) -> Result<(), RosterError> {
    if entity.values.len() != schema.len() {
        let attribute = schema
            .iter()
            .nth(entity.values.len())
            .map(|attr| attr.key.clone())
            .unwrap_or_default();
        return Err(RosterError::MissingAttribute {
            entity: entity.name.clone(),
            attribute,
        });
    }

    for (attr, value) in schema.iter().zip(&entity.values) {
        if attr.kind != value.kind() {
            return Err(RosterError::MistypedAttribute {
                entity: entity.name.clone(),
                attribute: attr.key.clone(),
                expected: match attr.kind {
                    AttributeKind::Categorical => "a string or number",
                    AttributeKind::Ordinal => "an integer year",
                    AttributeKind::Set => "a list of strings",
                },
            });
        }

        match value {
            AttributeValue::Year(year) if !years.contains(*year) => {
                return Err(RosterError::YearOutOfBounds {
                    entity: entity.name.clone(),
                    year: *year,
                    earliest: years.earliest,
                    latest_exclusive: years.latest_exclusive,
                });
            }
            AttributeValue::Tags(tags) if tags.is_empty() => {
                warn!(entity = entity.name(), attribute = %attr.key, "empty tag set");
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = r#"[
        {
            "championName": "Axe",
            "gender": "Male",
            "attribute": "Strength",
            "rangeType": "Melee",
            "complexity": 1,
            "releaseYear": 2004,
            "species": ["Red Mist Orc"],
            "lane": ["Offlane"]
        },
        {
            "championName": "Crystal Maiden",
            "gender": "Female",
            "attribute": "Intelligence",
            "rangeType": "Ranged",
            "complexity": 1,
            "releaseYear": 2004,
            "species": "Human",
            "lane": ["Support", "Safe Lane"],
            "title": "Rylai"
        }
    ]"#;

    fn load(json: &str) -> Result<Roster, RosterError> {
        Roster::from_json_str(json, Schema::dotadle(), &YearBounds::default())
    }

    #[test]
    fn loads_dotadle_records() {
        let roster = load(ROSTER).unwrap();
        assert_eq!(roster.len(), 2);

        let maiden = roster.get("Crystal Maiden").unwrap();
        assert_eq!(maiden.value(3), Some(&AttributeValue::Categorical("1".into())));
        assert_eq!(maiden.value(4), Some(&AttributeValue::Year(2004)));
        assert_eq!(maiden.value(5), Some(&AttributeValue::tags(["Human"])));
        assert_eq!(maiden.value(6), Some(&AttributeValue::tags(["Safe Lane", "Support"])));
        assert_eq!(
            roster.iter().map(Entity::name).collect_vec(),
            vec!["Axe", "Crystal Maiden"]
        );
    }

    fn edited(edit: impl FnOnce(&mut Vec<Value>)) -> Result<Roster, RosterError> {
        let mut value: Value = serde_json::from_str(ROSTER).unwrap();
        edit(value.as_array_mut().unwrap());
        Roster::from_json_value(&value, Schema::dotadle(), &YearBounds::default())
    }

    #[test]
    fn rejects_missing_attribute() {
        let result = edited(|entries| {
            entries[1].as_object_mut().unwrap().remove("gender");
        });

        match result {
            Err(RosterError::MissingAttribute { entity, attribute }) => {
                assert_eq!(entity, "Crystal Maiden");
                assert_eq!(attribute, "gender");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_mistyped_attributes() {
        let result = edited(|entries| entries[1]["releaseYear"] = Value::from("2004"));
        assert!(matches!(
            result,
            Err(RosterError::MistypedAttribute { attribute, .. }) if attribute == "releaseYear"
        ));

        let result = edited(|entries| entries[0]["lane"] = serde_json::json!(["Offlane", 3]));
        assert!(matches!(
            result,
            Err(RosterError::MistypedAttribute { attribute, .. }) if attribute == "lane"
        ));
    }

    #[test]
    fn rejects_duplicates_and_tiny_rosters() {
        let result = edited(|entries| entries[1]["championName"] = Value::from("Axe"));
        assert!(matches!(result, Err(RosterError::DuplicateName(name)) if name == "Axe"));

        assert!(matches!(load("[]"), Err(RosterError::TooSmall(0))));
        assert!(matches!(load("{}"), Err(RosterError::NotAnArray)));
        assert!(matches!(load("[1, 2]"), Err(RosterError::NotAnObject { index: 0 })));
        assert!(matches!(load("[1, "), Err(RosterError::Json(_))));
    }

    #[test]
    fn rejects_years_outside_bounds() {
        let result = edited(|entries| entries[0]["releaseYear"] = Value::from(2025));
        assert!(matches!(
            result,
            Err(RosterError::YearOutOfBounds { year: 2025, .. })
        ));
    }

    #[test]
    fn validates_hand_built_entities() {
        let schema = Schema::dotadle();
        let short = Entity::new("Short", vec![AttributeValue::Categorical("Male".into())]);
        let other = Entity::new("Other", vec![]);

        assert!(matches!(
            Roster::new(schema, vec![short, other], &YearBounds::default()),
            Err(RosterError::MissingAttribute { attribute, .. }) if attribute == "attribute"
        ));
    }
}
