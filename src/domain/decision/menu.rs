//! Menu items as seen by the decision engine.
//!
//! The catalog owns these; the engine only reads them.

use crate::domain::foundation::{MenuItemId, RestaurantId};

/// Weak reference to the restaurant serving a dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantRef {
    pub id: RestaurantId,
    pub name: String,
}

impl RestaurantRef {
    pub fn new(id: RestaurantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A selectable dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    id: MenuItemId,
    dish_name: String,
    restaurant: RestaurantRef,
}

impl MenuItem {
    pub fn new(id: MenuItemId, dish_name: impl Into<String>, restaurant: RestaurantRef) -> Self {
        Self {
            id,
            dish_name: dish_name.into(),
            restaurant,
        }
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    pub fn dish_name(&self) -> &str {
        &self.dish_name
    }

    pub fn restaurant(&self) -> &RestaurantRef {
        &self.restaurant
    }
}
