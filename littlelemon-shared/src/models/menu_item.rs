/// Menu item model
///
/// A named, priced dish with a description. Menu items have no relationships
/// to other records.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE menu_items (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(200) NOT NULL,
///     price INTEGER NOT NULL CHECK (price >= 0),
///     description VARCHAR(1000) NOT NULL DEFAULT ''
/// );
/// ```
///
/// # Example
///
/// ```
/// use littlelemon_shared::models::menu_item::MenuItem;
///
/// let item = MenuItem {
///     id: 1,
///     name: "IceCream".to_string(),
///     price: 80,
///     description: "Delicious".to_string(),
/// };
/// assert_eq!(item.to_string(), "IceCream : 80");
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Menu item record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    /// Unique menu item ID (assigned by the store)
    pub id: i64,

    /// Dish name
    pub name: String,

    /// Price in whole currency units
    pub price: i32,

    /// Free-form description
    pub description: String,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.price)
    }
}

/// Input for creating or fully replacing a menu item
///
/// `menu_item_description` is accepted as an alias for `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewMenuItem {
    /// Dish name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// Price in whole currency units
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i32,

    /// Free-form description
    #[serde(default, alias = "menu_item_description")]
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,
}

impl NewMenuItem {
    /// Builds the stored record for this input under the given ID
    pub fn into_record(self, id: i64) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ice_cream() -> NewMenuItem {
        NewMenuItem {
            name: "IceCream".to_string(),
            price: 80,
            description: "Delicious".to_string(),
        }
    }

    #[test]
    fn test_display() {
        let item = ice_cream().into_record(1);
        assert_eq!(item.to_string(), "IceCream : 80");
    }

    #[test]
    fn test_description_alias() {
        let parsed: NewMenuItem = serde_json::from_str(
            r#"{"name": "Pizza", "price": 15, "menu_item_description": "Cheesy"}"#,
        )
        .unwrap();
        assert_eq!(parsed.description, "Cheesy");
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let parsed: NewMenuItem =
            serde_json::from_str(r#"{"name": "Pizza", "price": 15}"#).unwrap();
        assert_eq!(parsed.description, "");
    }

    #[test]
    fn test_price_must_be_numeric() {
        let parsed = serde_json::from_str::<NewMenuItem>(
            r#"{"name": "Pizza", "price": "fifteen", "description": ""}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(ice_cream().validate().is_ok());

        let mut empty_name = ice_cream();
        empty_name.name = String::new();
        assert!(empty_name.validate().is_err());

        let mut negative = ice_cream();
        negative.price = -1;
        let errors = negative.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }
}
