//! Registered readers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Membership tier of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// Student member.
    Student,
    /// Teaching staff.
    Teacher,
    /// Regular member.
    Regular,
    /// VIP member.
    Vip,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Student => "STUDENT",
            Tier::Teacher => "TEACHER",
            Tier::Regular => "REGULAR",
            Tier::Vip => "VIP",
        })
    }
}

/// A party who can borrow items. Equality is by identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    id: String,
    name: String,
    contact: String,
    tier: Tier,
}

impl Actor {
    /// Creates an actor.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        contact: impl Into<String>,
        tier: Tier,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact: contact.into(),
            tier,
        }
    }

    /// Returns the identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact string.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Returns the tier.
    pub const fn tier(&self) -> Tier {
        self.tier
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} <{}> [{}]", self.id, self.name, self.contact, self.tier)
    }
}
