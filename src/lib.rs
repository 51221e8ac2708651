//! panel_menu is a platform-agnostic action menu model for slide-in panel
//! surfaces.
//!
//! A panel surface (bottom sheet, action sheet, grid pager) renders an
//! [`ActionMenu`] and forwards user activations back into it; the menu keeps
//! its items sorted by category priority and user order, supports bulk group
//! operations, shortcut lookup, share-target construction, and paginated
//! grid partitioning. Rendering itself is out of scope by design.
//!
//! The whole model lives in [`panel_menu_core`]; this crate re-exports it.
//!
//! # Example
//!
//! ```
//! use panel_menu::{ActionMenu, Category, PageLayout};
//!
//! let mut menu = ActionMenu::new();
//!
//! let _ = menu.add(0, 1, 0, "Open")?;
//! let _ = menu.add(0, 2, 1, "Rename")?;
//! let _ = menu.add(0, 3, Category::Secondary.with_order(0), "Details")?;
//!
//! // Two columns per page, one row: "Details" sorts last, onto page two.
//! let page = menu.page(PageLayout::new(1, 2), 1);
//! assert_eq!(page.item(0).title(), "Details");
//! # Ok::<(), panel_menu::OrderError>(())
//! ```

pub use panel_menu_core::*;

/// The menu model crate, re-exported whole for direct module access
/// (e.g. `panel_menu::core::order`).
pub use panel_menu_core as core;
