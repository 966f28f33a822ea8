//! Attribute schema shared by the loader, the feedback model and the filter.

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttributeKind {
    /// A single value from a small vocabulary, compared for equality.
    Categorical,
    /// The release year, compared as higher / lower / equal.
    Ordinal,
    /// A set of tags, compared as exact / partial / disjoint.
    Set,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AttributeDescriptor {
    pub key: String,
    pub kind: AttributeKind,
}

impl AttributeDescriptor {
    pub fn new(key: &str, kind: AttributeKind) -> Self {
        Self {
            key: key.to_owned(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Schema {
    /// JSON key holding an entity's unique name.
    pub name_key: String,
    pub attributes: Vec<AttributeDescriptor>,
}

impl Schema {
    pub fn new(name_key: &str, attributes: Vec<AttributeDescriptor>) -> Self {
        Self {
            name_key: name_key.to_owned(),
            attributes,
        }
    }

    /// The hero attributes shown by dotadle.
    pub fn dotadle() -> Self {
        use AttributeKind::*;

        Self::new(
            "championName",
            vec![
                AttributeDescriptor::new("gender", Categorical),
                AttributeDescriptor::new("attribute", Categorical),
                AttributeDescriptor::new("rangeType", Categorical),
                AttributeDescriptor::new("complexity", Categorical),
                AttributeDescriptor::new("releaseYear", Ordinal),
                AttributeDescriptor::new("species", Set),
                AttributeDescriptor::new("lane", Set),
            ],
        )
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter()
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.key == key)
    }
}
