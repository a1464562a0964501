//! Menu of items and their processing costs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in items, used when no config overrides them
const DEFAULT_MENU: &[(&str, u32)] = &[
    ("americano", 2),
    ("latte", 3),
    ("cappuccino", 3),
    ("mocha", 4),
    ("tea", 1),
    ("macchiato", 2),
    ("hot_chocolate", 4),
];

/// Errors from building a menu
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("Menu item '{0}' must cost at least 1")]
    ZeroCost(String),

    #[error("Menu must contain at least one item")]
    Empty,
}

/// Item name to fixed processing cost, kept sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct Menu {
    items: BTreeMap<String, u32>,
}

impl Menu {
    /// Build a menu, refusing zero-cost items
    pub fn new(items: BTreeMap<String, u32>) -> Result<Self, MenuError> {
        if items.is_empty() {
            return Err(MenuError::Empty);
        }
        if let Some((name, _)) = items.iter().find(|(_, cost)| **cost == 0) {
            return Err(MenuError::ZeroCost(name.clone()));
        }
        Ok(Self { items })
    }

    /// Cost of an item, if it is on the menu
    pub fn cost(&self, item: &str) -> Option<u32> {
        self.items.get(item).copied()
    }

    /// Items sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.items.iter().map(|(name, cost)| (name.as_str(), *cost))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            items: DEFAULT_MENU
                .iter()
                .map(|(name, cost)| (name.to_string(), *cost))
                .collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, u32>> for Menu {
    type Error = MenuError;

    fn try_from(items: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl From<Menu> for BTreeMap<String, u32> {
    fn from(menu: Menu) -> Self {
        menu.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menu() {
        let menu = Menu::default();
        assert_eq!(menu.len(), 7);
        assert_eq!(menu.cost("americano"), Some(2));
        assert_eq!(menu.cost("hot_chocolate"), Some(4));
        assert_eq!(menu.cost("espresso"), None);
    }

    #[test]
    fn test_iter_is_sorted_by_name() {
        let menu = Menu::default();
        let names: Vec<_> = menu.iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"americano"));
        assert_eq!(names.last(), Some(&"tea"));
    }

    #[test]
    fn test_zero_cost_rejected() {
        let items = BTreeMap::from([("water".to_string(), 0), ("tea".to_string(), 1)]);
        assert_eq!(Menu::new(items), Err(MenuError::ZeroCost("water".to_string())));
        assert_eq!(Menu::new(BTreeMap::new()), Err(MenuError::Empty));
    }

    #[test]
    fn test_deserialize_validates() {
        let menu: Menu = serde_yaml::from_str("espresso: 1\nflat_white: 3\n").unwrap();
        assert_eq!(menu.cost("flat_white"), Some(3));
        assert_eq!(menu.cost("americano"), None);

        let result: Result<Menu, _> = serde_yaml::from_str("espresso: 0\n");
        assert!(result.is_err());
    }
}
