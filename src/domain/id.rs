use {
    derive_more::Display,
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Store-assigned payment identifier (UUIDv7, sortable by creation time).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }

    /// `None` for anything that is not a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}
