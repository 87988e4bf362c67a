//! Physical devices.

use super::{Base, FolderKind, Item};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A device. Its raw id is the display name, so a rename re-paths its ports.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    #[serde(flatten)]
    pub base: Base,
    pub display_name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub description: String,
}

impl Equipment {
    /// Device under the Equipment folder.
    pub fn new(display_name: impl Into<String>, model: impl Into<String>) -> Equipment {
        let display_name = display_name.into();
        Equipment {
            base: Base::new(display_name.clone(), FolderKind::Equipment.name()),
            display_name,
            model: model.into(),
            description: String::new(),
        }
    }

    /// `Name (Model)`, or the bare name without a model.
    pub fn display_id(&self) -> String {
        if self.model.is_empty() {
            self.display_name.clone()
        } else {
            format!("{} ({})", self.display_name, self.model)
        }
    }

    /// By display name.
    pub fn compare(&self, other: &Equipment) -> Ordering {
        self.display_name.cmp(&other.display_name)
    }

    /// Name present and equal to the raw id, Equipment folder parent, unique name.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let path = self.base.path();
        self.base.check()?;
        let name = self.display_name.trim();
        if name.is_empty() {
            return Err(Error::invalid(&path, "display_name", "required"));
        }
        if self.base.raw_id != self.display_name {
            return Err(Error::invalid(
                &path,
                "raw_id",
                format!("must match the display name {:?}", self.display_name),
            ));
        }
        self.base.check_folder_parent(catalog, FolderKind::Equipment)?;

        for sibling in self.base.siblings(catalog) {
            if let Item::Equipment(other) = sibling {
                if other.display_name.trim().eq_ignore_ascii_case(name) {
                    return Err(Error::invalid(
                        &path,
                        "display_name",
                        format!("equipment {name:?} already exists"),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_id() {
        assert_eq!(Equipment::new("core-sw", "USW-48").display_id(), "core-sw (USW-48)");
        assert_eq!(Equipment::new("patch", "").display_id(), "patch");
    }

    #[test]
    fn test_validate() {
        let mut catalog = Catalog::new();
        catalog.add(Equipment::new("core-sw", "USW-48").into()).unwrap();
        assert!(Equipment::new("edge-sw", "").validate(&catalog).is_ok());
        assert!(Equipment::new("Core-SW", "").validate(&catalog).is_err());

        let mut renamed = Equipment::new("edge-sw", "");
        renamed.display_name = "edge-sw-2".to_string();
        assert!(renamed.validate(&catalog).is_err());
    }
}
