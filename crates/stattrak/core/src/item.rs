//! Objects that carry lore.

/// An object whose lore can hold statistics.
///
/// Implemented by whatever owns the host's objects. The router only ever
/// holds one `&mut` to a given object, so writes to one object's lore are
/// serialised by the borrow.
pub trait LoreHolder {
    /// Host material name, used for [`ItemCategory`](crate::ItemCategory) checks.
    fn material(&self) -> &str;

    /// Current lore lines.
    ///
    /// `None` when the object cannot carry metadata at all; such objects are
    /// never updated. An object without lore yet returns `Some(&[])`.
    fn lore(&self) -> Option<&[String]>;

    /// Replaces the lore with `lore`.
    fn commit_lore(&mut self, lore: Vec<String>);
}

/// In-memory object used by the replay tool and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub material: String,
    #[cfg_attr(feature = "serde", serde(default = "empty_lore"))]
    pub lore: Option<Vec<String>>,
}

#[cfg(feature = "serde")]
fn empty_lore() -> Option<Vec<String>> {
    Some(Vec::new())
}

impl Item {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            lore: Some(Vec::new()),
        }
    }

    /// An object that cannot carry metadata.
    pub fn without_metadata(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            lore: None,
        }
    }

    pub fn with_lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = Some(lines.into_iter().map(Into::into).collect());
        self
    }
}

impl LoreHolder for Item {
    fn material(&self) -> &str {
        &self.material
    }

    fn lore(&self) -> Option<&[String]> {
        self.lore.as_deref()
    }

    fn commit_lore(&mut self, lore: Vec<String>) {
        if let Some(current) = self.lore.as_mut() {
            *current = lore;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_replaces_lore() {
        let mut item = Item::new("IRON_SWORD").with_lore(["old"]);
        item.commit_lore(vec!["new".into()]);
        assert_eq!(item.lore(), Some(&["new".to_string()][..]));
    }

    #[test]
    fn commit_without_metadata_is_ignored() {
        let mut item = Item::without_metadata("AIR");
        item.commit_lore(vec!["§d Kills: 1".into()]);
        assert_eq!(item.lore(), None);
    }
}
