use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

mod error;

pub use error::{Error, Result};

/// The maximum allowed length for an [`EntityID`].
const ENTITY_ID_MAX_LEN: usize = 255;

/// A validated resource adaptor entity name.
///
/// # Examples
///
/// ```
/// # use ra_statistics::entity::EntityID;
/// let entity = EntityID::new("DiameterRA").unwrap();
/// assert_eq!(entity.as_ref(), "DiameterRA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityID(Arc<str>);

impl EntityID {
    /// Creates a new `EntityID` from the given raw name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyEntityID`] for an empty (or blank) name and
    /// [`Error::InvalidEntityID`] if the name exceeds [`ENTITY_ID_MAX_LEN`] bytes
    /// or contains control characters.
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        if src.trim().is_empty() {
            return Err(Error::EmptyEntityID);
        }
        if src.len() > ENTITY_ID_MAX_LEN || src.chars().any(char::is_control) {
            return Err(Error::InvalidEntityID(src.to_owned()));
        }

        Ok(Self(src.into()))
    }

    pub fn to_arc(&self) -> Arc<str> {
        Arc::clone(&self.0)
    }
}

impl AsRef<str> for EntityID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for EntityID {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for EntityID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_valid() {
        let id: EntityID = "SipRA".parse().unwrap();
        assert_eq!(id.to_string(), "SipRA");
        assert_eq!(&*id.to_arc(), "SipRA");
    }

    #[test]
    fn test_entity_id_empty() {
        assert!(matches!(EntityID::new(""), Err(Error::EmptyEntityID)));
        assert!(matches!(EntityID::new("   "), Err(Error::EmptyEntityID)));
    }

    #[test]
    fn test_entity_id_too_long() {
        let long = "a".repeat(ENTITY_ID_MAX_LEN + 1);
        assert!(matches!(
            EntityID::new(&long),
            Err(Error::InvalidEntityID(_))
        ));
        assert!(EntityID::new("a".repeat(ENTITY_ID_MAX_LEN)).is_ok());
    }

    #[test]
    fn test_entity_id_control_characters() {
        assert!(matches!(
            EntityID::new("RA\n1"),
            Err(Error::InvalidEntityID(_))
        ));
    }
}
