//! Action payloads and the seams to the host platform.
//!
//! An [`Action`] is a declarative description of something the host can
//! perform on behalf of a menu item, such as a deep link or a share payload.
//! The model never performs actions itself; it hands them to an
//! [`ActionDispatcher`] installed on the menu, and discovers candidate
//! handlers through a [`HandlerRegistry`].

use std::fmt;

use crate::item::Icon;
use crate::menu::ActionMenu;
use crate::order::OrderError;

/// The stable identifier of an installed action handler
/// (e.g. an application able to receive a share payload).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandlerId(String);

impl HandlerId {
    /// Creates a handler identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for HandlerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A declarative action descriptor attached to a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    /// The verb to perform, e.g. `"share.send"`.
    pub name: String,

    /// Text content carried by the action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: Option<String>,

    /// Attachment references (paths or URIs) carried by the action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attachments: Vec<String>,

    /// The explicit handler to deliver the action to; `None` lets the host
    /// choose.
    #[cfg_attr(feature = "serde", serde(default))]
    pub handler: Option<HandlerId>,
}

impl Action {
    /// Creates an action with the given verb and nothing else.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            attachments: Vec::new(),
            handler: None,
        }
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds an attachment reference.
    #[must_use]
    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachments.push(attachment.into());
        self
    }

    /// Pins the action to an explicit handler.
    #[must_use]
    pub fn with_handler(mut self, handler: HandlerId) -> Self {
        self.handler = Some(handler);
        self
    }
}

/// Performs [`Action`]s on behalf of the menu model.
///
/// This is the seam to the host platform; the model calls it from
/// [`ItemHandle::invoke`](crate::item::ItemHandle::invoke) when an item with
/// an attached payload is activated without a handling callback.
pub trait ActionDispatcher {
    /// Performs the given action.
    fn dispatch(&self, action: &Action);
}

/// An installed handler able to service an [`Action`], as reported by a
/// [`HandlerRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    /// Stable identifier, used to pin actions to this handler.
    pub id: HandlerId,
    /// Human-readable label, used as the menu item title.
    pub label: String,
    /// Icon representing the handler, if it has one.
    pub icon: Option<Icon>,
}

/// Enumerates the handlers installed on the host that can service a given
/// action.
pub trait HandlerRegistry {
    /// The handlers able to service `action`, in the host's preference
    /// order.
    fn query(&self, action: &Action) -> Vec<Handler>;
}

impl ActionMenu {
    /// Adds one item per handler able to service `template`, each carrying
    /// the template pinned to that handler.
    ///
    /// Unless `append` is set, the target group is cleared first. Every
    /// added item shares `item_id` and `order`; titles and icons come from
    /// the handlers. Returns the number of items added.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidCategory`] if `order` encodes an unknown
    /// category; in that case the group clear (if any) has already happened
    /// but no item is inserted.
    pub fn add_action_options(
        &mut self,
        group_id: i32,
        item_id: i32,
        order: i32,
        registry: &dyn HandlerRegistry,
        template: &Action,
        append: bool,
    ) -> Result<usize, OrderError> {
        if !append {
            self.remove_group(group_id);
        }

        let handlers = registry.query(template);
        log::debug!(
            "resolved {} handlers for action {:?}",
            handlers.len(),
            template.name
        );

        let count = handlers.len();

        for handler in handlers {
            let item = self.add(group_id, item_id, order, handler.label)?;
            let _ = item
                .set_icon(handler.icon)
                .set_action(template.clone().with_handler(handler.id));
        }

        Ok(count)
    }
}

/// Builds a share-target menu: one item per handler able to service
/// `action`, skipping the `excluded` handlers.
///
/// Items land in group `1` with their registry index as both identifier and
/// order, so the host's preference order is preserved.
///
/// # Errors
///
/// Returns [`OrderError::InvalidCategory`] if a registry index overflows
/// into the category bits; registries are expected to stay far below that.
pub fn share_menu(
    registry: &dyn HandlerRegistry,
    action: &Action,
    excluded: &[HandlerId],
) -> Result<ActionMenu, OrderError> {
    let mut menu = ActionMenu::new();

    let handlers = registry
        .query(action)
        .into_iter()
        .filter(|handler| !excluded.contains(&handler.id));

    for (index, handler) in handlers.enumerate() {
        let item = menu.add(1, index as i32, index as i32, handler.label)?;
        let _ = item
            .set_icon(handler.icon)
            .set_action(action.clone().with_handler(handler.id));
    }

    Ok(menu)
}
