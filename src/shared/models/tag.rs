use serde::{Deserialize, Serialize};

/// A tag, as a bare name or with a usage count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TagRepr")]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagRepr {
    Name(String),
    Full {
        #[serde(alias = "tag")]
        name: String,
        #[serde(default)]
        count: Option<u64>,
    },
}

impl From<TagRepr> for Tag {
    fn from(repr: TagRepr) -> Self {
        match repr {
            TagRepr::Name(name) => Tag { name, count: None },
            TagRepr::Full { name, count } => Tag { name, count },
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag {
            name: name.to_string(),
            count: None,
        }
    }
}
