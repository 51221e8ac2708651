//! The menu model at the heart of panel_menu.
//!
//! This crate is the presentation-free half of a slide-in panel: an ordered,
//! category-aware collection of actionable items ([`ActionMenu`]) that a host
//! surface renders as a list or a paged grid and feeds user activations back
//! into. Nothing here draws, animates, or owns a window.
//!
//! Build a menu by adding items; every insertion lands at its sorted
//! position:
//!
//! ```
//! use panel_menu_core::{ActionMenu, Category};
//!
//! let mut menu = ActionMenu::new();
//!
//! let save = menu.add(0, 1, 0, "Save")?;
//! let _ = save.set_alphabetic_shortcut('s');
//!
//! let _ = menu.add(0, 2, Category::System.with_order(0), "Quit")?;
//!
//! // System-category items sort after everything uncategorized.
//! assert_eq!(menu.item(1).title(), "Quit");
//! # Ok::<(), panel_menu_core::OrderError>(())
//! ```
//!
//! The presentation surface iterates `len`/`item` in order, partitions with
//! [`PageLayout`] when rendering a paged grid, and calls
//! [`ItemHandle::invoke`] on activation.

pub mod action;
pub mod item;
pub mod menu;
pub mod order;
pub mod paging;

#[cfg(feature = "serde")]
pub mod definition;

pub use action::{Action, ActionDispatcher, Handler, HandlerId, HandlerRegistry, share_menu};
pub use item::{ActionItem, Icon, ItemFlags, ItemHandle};
pub use menu::ActionMenu;
pub use order::{Category, OrderError};
pub use paging::PageLayout;

#[cfg(feature = "serde")]
pub use definition::{DefinitionError, ItemDefinition, MenuDefinition};
