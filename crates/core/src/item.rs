//! Menu items and the shared handles a menu hands out.
//!
//! Items are owned behind [`Rc`]`<`[`RefCell`]`>` so that a menu and any
//! snapshot cloned from it (see [`ActionMenu::clone_first`]) observe the same
//! underlying state. The model is single-threaded by design; if a menu must
//! cross threads, wrap the whole collection in external synchronization.
//!
//! [`ActionMenu::clone_first`]: crate::menu::ActionMenu::clone_first

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::action::{Action, ActionDispatcher};
use crate::order::{self, OrderError};

/// The shortcut character of an item that has no shortcut assigned.
pub const NO_SHORTCUT: char = '0';

bitflags::bitflags! {
    /// The state flags of an [`ActionItem`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ItemFlags: u8 {
        /// The item can carry a checked state.
        const CHECKABLE = 1 << 0;
        /// The item is currently checked.
        const CHECKED = 1 << 1;
        /// The checked state is exclusive within the item's group.
        const EXCLUSIVE = 1 << 2;
        /// The item is hidden from the presentation surface.
        const HIDDEN = 1 << 3;
        /// The item can be activated.
        const ENABLED = 1 << 4;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::ENABLED
    }
}

/// An image attached to a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Icon {
    /// A deferred reference, resolved by the presentation surface
    /// (e.g. a themed icon name).
    Named(String),

    /// Realized, encoded image bytes.
    Data(Vec<u8>),
}

/// A single actionable entry of an [`ActionMenu`].
///
/// Items are created through [`ActionMenu::add`] or [`ActionItem::new`] and
/// configured through their [`ItemHandle`].
///
/// [`ActionMenu`]: crate::menu::ActionMenu
/// [`ActionMenu::add`]: crate::menu::ActionMenu::add
pub struct ActionItem {
    pub(crate) group_id: i32,
    pub(crate) item_id: i32,
    pub(crate) category_order: i32,
    pub(crate) order: i32,
    pub(crate) title: String,
    pub(crate) title_condensed: String,
    pub(crate) icon: Option<Icon>,
    pub(crate) flags: ItemFlags,
    pub(crate) alphabetic_shortcut: char,
    pub(crate) numeric_shortcut: char,
    pub(crate) action: Option<Action>,
    pub(crate) dispatcher: Option<Rc<dyn ActionDispatcher>>,
    pub(crate) on_activate: Option<Rc<dyn Fn(&ItemHandle) -> bool>>,
}

impl ActionItem {
    /// Creates a new item.
    ///
    /// `order` may carry a category in its upper 16 bits; the comparable
    /// order is resolved once, here.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidCategory`] if `order` encodes an unknown
    /// category.
    pub fn new(
        group_id: i32,
        item_id: i32,
        order: i32,
        title: impl Into<String>,
    ) -> Result<Self, OrderError> {
        Ok(Self {
            group_id,
            item_id,
            category_order: order,
            order: order::resolve(order)?,
            title: title.into(),
            title_condensed: String::new(),
            icon: None,
            flags: ItemFlags::default(),
            alphabetic_shortcut: NO_SHORTCUT,
            numeric_shortcut: NO_SHORTCUT,
            action: None,
            dispatcher: None,
            on_activate: None,
        })
    }
}

impl fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("group_id", &self.group_id)
            .field("item_id", &self.item_id)
            .field("order", &self.order)
            .field("title", &self.title)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// A shared, mutable handle to an [`ActionItem`].
///
/// A menu stores handles, not items; cloning a handle (or shallow-cloning a
/// menu) shares the item, and mutation through any handle is visible through
/// all of them. Use [`ItemHandle::same`] to test for shared identity.
///
/// All setters return `&Self` so an item can be configured fluently right
/// after insertion.
#[derive(Clone)]
pub struct ItemHandle(Rc<RefCell<ActionItem>>);

impl ItemHandle {
    /// Wraps an item into a shareable handle.
    #[must_use]
    pub fn new(item: ActionItem) -> Self {
        Self(Rc::new(RefCell::new(item)))
    }

    /// Returns `true` if both handles point at the same underlying item.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// The group this item belongs to.
    #[must_use]
    pub fn group_id(&self) -> i32 {
        self.0.borrow().group_id
    }

    /// The identifier of this item.
    #[must_use]
    pub fn item_id(&self) -> i32 {
        self.0.borrow().item_id
    }

    /// The raw order integer the item was created with, category bits
    /// included.
    #[must_use]
    pub fn category_order(&self) -> i32 {
        self.0.borrow().category_order
    }

    /// The resolved, comparable order of this item.
    #[must_use]
    pub fn order(&self) -> i32 {
        self.0.borrow().order
    }

    /// The display title.
    #[must_use]
    pub fn title(&self) -> String {
        self.0.borrow().title.clone()
    }

    /// The condensed title, falling back to the full title when no condensed
    /// form was set.
    #[must_use]
    pub fn title_condensed(&self) -> String {
        let item = self.0.borrow();

        if item.title_condensed.is_empty() {
            item.title.clone()
        } else {
            item.title_condensed.clone()
        }
    }

    /// The attached icon, if any.
    #[must_use]
    pub fn icon(&self) -> Option<Icon> {
        self.0.borrow().icon.clone()
    }

    /// The attached action payload, if any.
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        self.0.borrow().action.clone()
    }

    /// The shortcut character matched in qwerty mode.
    #[must_use]
    pub fn alphabetic_shortcut(&self) -> char {
        self.0.borrow().alphabetic_shortcut
    }

    /// The shortcut character matched outside qwerty mode.
    #[must_use]
    pub fn numeric_shortcut(&self) -> char {
        self.0.borrow().numeric_shortcut
    }

    /// Whether the item can carry a checked state.
    #[must_use]
    pub fn is_checkable(&self) -> bool {
        self.0.borrow().flags.contains(ItemFlags::CHECKABLE)
    }

    /// Whether the item is checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.0.borrow().flags.contains(ItemFlags::CHECKED)
    }

    /// Whether the checked state is exclusive within the item's group.
    #[must_use]
    pub fn is_exclusive_checkable(&self) -> bool {
        self.0.borrow().flags.contains(ItemFlags::EXCLUSIVE)
    }

    /// Whether the item can be activated.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.0.borrow().flags.contains(ItemFlags::ENABLED)
    }

    /// Whether the item is shown by the presentation surface.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.0.borrow().flags.contains(ItemFlags::HIDDEN)
    }

    /// Replaces the display title. The condensed title is left untouched.
    pub fn set_title(&self, title: impl Into<String>) -> &Self {
        self.0.borrow_mut().title = title.into();
        self
    }

    /// Sets the condensed title. An empty string clears it.
    pub fn set_title_condensed(&self, title: impl Into<String>) -> &Self {
        self.0.borrow_mut().title_condensed = title.into();
        self
    }

    /// Replaces the icon. Setting realized [`Icon::Data`] discards any
    /// deferred [`Icon::Named`] reference, and `None` clears the icon.
    pub fn set_icon(&self, icon: impl Into<Option<Icon>>) -> &Self {
        self.0.borrow_mut().icon = icon.into();
        self
    }

    /// Sets whether the item can carry a checked state.
    pub fn set_checkable(&self, checkable: bool) -> &Self {
        self.0.borrow_mut().flags.set(ItemFlags::CHECKABLE, checkable);
        self
    }

    /// Sets the checked state.
    pub fn set_checked(&self, checked: bool) -> &Self {
        self.0.borrow_mut().flags.set(ItemFlags::CHECKED, checked);
        self
    }

    /// Sets whether the checked state is exclusive within the item's group.
    pub fn set_exclusive_checkable(&self, exclusive: bool) -> &Self {
        self.0.borrow_mut().flags.set(ItemFlags::EXCLUSIVE, exclusive);
        self
    }

    /// Sets whether the item can be activated.
    pub fn set_enabled(&self, enabled: bool) -> &Self {
        self.0.borrow_mut().flags.set(ItemFlags::ENABLED, enabled);
        self
    }

    /// Sets whether the item is shown by the presentation surface.
    pub fn set_visible(&self, visible: bool) -> &Self {
        self.0.borrow_mut().flags.set(ItemFlags::HIDDEN, !visible);
        self
    }

    /// Sets the shortcut matched in qwerty mode.
    pub fn set_alphabetic_shortcut(&self, shortcut: char) -> &Self {
        self.0.borrow_mut().alphabetic_shortcut = shortcut;
        self
    }

    /// Sets the shortcut matched outside qwerty mode.
    pub fn set_numeric_shortcut(&self, shortcut: char) -> &Self {
        self.0.borrow_mut().numeric_shortcut = shortcut;
        self
    }

    /// Sets both shortcut characters at once.
    pub fn set_shortcut(&self, numeric: char, alphabetic: char) -> &Self {
        let mut item = self.0.borrow_mut();
        item.numeric_shortcut = numeric;
        item.alphabetic_shortcut = alphabetic;
        drop(item);
        self
    }

    /// Attaches an action payload performed when [`invoke`] falls through the
    /// activation callback. `None` detaches it.
    ///
    /// [`invoke`]: ItemHandle::invoke
    pub fn set_action(&self, action: impl Into<Option<Action>>) -> &Self {
        self.0.borrow_mut().action = action.into();
        self
    }

    /// Registers the activation callback tried first by [`invoke`].
    ///
    /// The callback receives this handle, so it may freely mutate the item it
    /// was activated on. Returning `true` marks the activation as handled.
    ///
    /// [`invoke`]: ItemHandle::invoke
    pub fn set_on_activate(&self, callback: impl Fn(&ItemHandle) -> bool + 'static) -> &Self {
        self.0.borrow_mut().on_activate = Some(Rc::new(callback));
        self
    }

    pub(crate) fn has_dispatcher(&self) -> bool {
        self.0.borrow().dispatcher.is_some()
    }

    pub(crate) fn set_dispatcher(&self, dispatcher: Option<Rc<dyn ActionDispatcher>>) {
        self.0.borrow_mut().dispatcher = dispatcher;
    }

    /// Activates this item.
    ///
    /// The activation callback is tried first; if it is absent or returns
    /// `false` and an action payload is attached, the payload is dispatched
    /// and the activation counts as handled. Returns whether the activation
    /// was handled.
    pub fn invoke(&self) -> bool {
        let callback = self.0.borrow().on_activate.clone();

        if let Some(callback) = callback {
            if callback(self) {
                return true;
            }
        }

        let (action, dispatcher) = {
            let item = self.0.borrow();

            (item.action.clone(), item.dispatcher.clone())
        };

        if let Some(action) = action {
            if let Some(dispatcher) = dispatcher {
                dispatcher.dispatch(&action);
            } else {
                log::warn!("no dispatcher installed; dropping action {:?}", action.name);
            }

            return true;
        }

        false
    }
}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.borrow().fmt(f)
    }
}

impl From<ActionItem> for ItemHandle {
    fn from(item: ActionItem) -> Self {
        Self::new(item)
    }
}
