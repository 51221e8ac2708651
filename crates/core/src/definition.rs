//! Declarative menu definitions.
//!
//! A [`MenuDefinition`] is the data form of a menu: group/id/order/title and
//! friends per entry, deserialized from RON and replayed as plain `add`
//! calls. Parsing lives here; everything the definition produces goes
//! through the same insertion path as hand-built menus.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::item::{Icon, ItemHandle};
use crate::menu::ActionMenu;
use crate::order::{self, OrderError};

/// An error produced while loading or applying a menu definition.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The definition failed to parse.
    #[error("failed to parse menu definition: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// An entry carries an order with an invalid category encoding.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// One entry of a [`MenuDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// The group the item belongs to.
    #[serde(default)]
    pub group: i32,

    /// The item identifier.
    #[serde(default)]
    pub id: i32,

    /// The raw order integer, category bits included.
    #[serde(default)]
    pub order: i32,

    /// The display title.
    pub title: String,

    /// The condensed title, if any.
    #[serde(default)]
    pub title_condensed: Option<String>,

    /// A deferred icon reference, resolved by the presentation surface.
    #[serde(default)]
    pub icon: Option<String>,

    /// The shortcut matched in qwerty mode.
    #[serde(default)]
    pub alphabetic_shortcut: Option<char>,

    /// The shortcut matched outside qwerty mode.
    #[serde(default)]
    pub numeric_shortcut: Option<char>,

    /// Whether the item starts enabled.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// Whether the item starts visible.
    #[serde(default = "enabled_by_default")]
    pub visible: bool,

    /// Whether the item can carry a checked state.
    #[serde(default)]
    pub checkable: bool,

    /// Whether the item starts checked.
    #[serde(default)]
    pub checked: bool,

    /// The action payload attached to the item.
    #[serde(default)]
    pub action: Option<Action>,
}

fn enabled_by_default() -> bool {
    true
}

/// A complete declarative menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDefinition {
    /// The entries of the menu, in declaration order; sorting happens on
    /// insertion.
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

impl MenuDefinition {
    /// Parses a definition from RON text.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Parse`] if the text is not a valid
    /// definition.
    pub fn from_ron(source: &str) -> Result<Self, DefinitionError> {
        Ok(ron::from_str(source)?)
    }

    /// Replays this definition into `menu` as a sequence of `add` calls,
    /// returning the created items in declaration order.
    ///
    /// Every entry's order is resolved up front, so a malformed entry leaves
    /// `menu` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Order`] if any entry's order encodes an
    /// invalid category.
    pub fn populate(&self, menu: &mut ActionMenu) -> Result<Vec<ItemHandle>, DefinitionError> {
        for item in &self.items {
            let _ = order::resolve(item.order)?;
        }

        let mut handles = Vec::with_capacity(self.items.len());

        for definition in &self.items {
            let item = menu.add(
                definition.group,
                definition.id,
                definition.order,
                definition.title.clone(),
            )?;

            if let Some(condensed) = &definition.title_condensed {
                let _ = item.set_title_condensed(condensed.clone());
            }

            if let Some(icon) = &definition.icon {
                let _ = item.set_icon(Icon::Named(icon.clone()));
            }

            if let Some(shortcut) = definition.alphabetic_shortcut {
                let _ = item.set_alphabetic_shortcut(shortcut);
            }

            if let Some(shortcut) = definition.numeric_shortcut {
                let _ = item.set_numeric_shortcut(shortcut);
            }

            let _ = item
                .set_enabled(definition.enabled)
                .set_visible(definition.visible)
                .set_checkable(definition.checkable)
                .set_checked(definition.checked)
                .set_action(definition.action.clone());

            handles.push(item);
        }

        Ok(handles)
    }
}
