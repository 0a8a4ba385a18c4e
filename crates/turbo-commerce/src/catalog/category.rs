//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Icon CSS class used by listings, when the backend supplies one.
    #[serde(rename = "iconCSS", default, skip_serializing_if = "Option::is_none")]
    pub icon_css: Option<String>,
}

impl ProductCategory {
    /// Create a new category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon_css: None,
        }
    }

    /// Set the icon CSS class.
    pub fn with_icon(mut self, icon_css: impl Into<String>) -> Self {
        self.icon_css = Some(icon_css.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let cat = ProductCategory::new(1, "Beauty").with_icon("fas fa-spa");
        assert_eq!(cat.id, CategoryId::new(1));
        assert_eq!(cat.icon_css.as_deref(), Some("fas fa-spa"));
    }

    #[test]
    fn test_category_wire_format() {
        let cat: ProductCategory =
            serde_json::from_str(r#"{"id":2,"name":"Furniture","iconCSS":"fas fa-couch"}"#)
                .unwrap();
        assert_eq!(cat.name, "Furniture");

        let bare: ProductCategory = serde_json::from_str(r#"{"id":3,"name":"Shoes"}"#).unwrap();
        assert!(bare.icon_css.is_none());
        assert_eq!(serde_json::to_string(&bare).unwrap(), r#"{"id":3,"name":"Shoes"}"#);
    }
}
