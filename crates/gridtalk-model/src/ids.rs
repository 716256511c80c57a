#![deny(unsafe_code)]

use std::fmt;

use crate::error::BoardError;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, BoardError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(BoardError::InvalidId(value));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a board. Assigned by the persistence collaborator on
    /// first save; locally created boards carry a provisional id.
    BoardId
);
string_id!(
    /// Identifier of a page within a board.
    PageId
);
string_id!(
    /// Identifier of a button within a page.
    ButtonId
);
string_id!(
    /// Identifier of an embedded video region within a page.
    RegionId
);
