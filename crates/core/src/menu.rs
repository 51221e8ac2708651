//! The ordered action menu collection.
//!
//! An [`ActionMenu`] keeps its items sorted by their resolved order (see
//! [`crate::order`]) at all times: every insertion finds the correct slot
//! with a backward scan, which keeps equal-order items in insertion order.
//! Menus are small (tens of items), so every operation is a plain linear
//! scan over the sequence.
//!
//! The presentation surface iterates the menu with [`ActionMenu::len`] and
//! [`ActionMenu::item`] (or [`ActionMenu::iter`]) and forwards activations
//! back through [`ItemHandle::invoke`].

use std::rc::Rc;

use crate::action::ActionDispatcher;
use crate::item::{ActionItem, ItemHandle};
use crate::order::OrderError;
use crate::paging::PageLayout;

/// An ordered collection of menu items with category-aware sorting.
#[derive(Default)]
pub struct ActionMenu {
    items: Vec<ItemHandle>,
    qwerty_mode: bool,
    dispatcher: Option<Rc<dyn ActionDispatcher>>,
}

impl ActionMenu {
    /// Creates an empty menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the dispatcher that performs action payloads when an item is
    /// invoked without a handling callback.
    ///
    /// The dispatcher is handed to items as they are added; items already in
    /// the menu are updated as well.
    pub fn set_dispatcher(&mut self, dispatcher: Rc<dyn ActionDispatcher>) {
        for item in &self.items {
            item.set_dispatcher(Some(dispatcher.clone()));
        }

        self.dispatcher = Some(dispatcher);
    }

    /// Creates a new item and inserts it at its sorted position.
    ///
    /// `order` may carry a category in its upper 16 bits. The returned handle
    /// can be used to configure the item fluently.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidCategory`] if `order` encodes an unknown
    /// category; nothing is inserted in that case.
    pub fn add(
        &mut self,
        group_id: i32,
        item_id: i32,
        order: i32,
        title: impl Into<String>,
    ) -> Result<ItemHandle, OrderError> {
        let item = ActionItem::new(group_id, item_id, order, title)?;

        Ok(self.add_item(ItemHandle::new(item)))
    }

    /// Inserts a pre-built (possibly shared) item at its sorted position.
    ///
    /// The item keeps its own dispatcher if it has one; otherwise it inherits
    /// the menu's.
    pub fn add_item(&mut self, item: ItemHandle) -> ItemHandle {
        if !item.has_dispatcher() {
            item.set_dispatcher(self.dispatcher.clone());
        }

        let index = find_insert_index(&self.items, item.order());
        self.items.insert(index, item.clone());

        item
    }

    /// The number of items in the menu.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the menu holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; use [`ActionMenu::get`] for a
    /// non-panicking lookup.
    #[must_use]
    pub fn item(&self, index: usize) -> ItemHandle {
        self.items[index].clone()
    }

    /// The item at `index`, or `None` if the index is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ItemHandle> {
        self.items.get(index).cloned()
    }

    /// Iterates the items in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, ItemHandle> {
        self.items.iter()
    }

    /// The first item whose identifier matches `id`, if any.
    ///
    /// Identifiers are not required to be unique; lookups return the first
    /// match in sequence order.
    #[must_use]
    pub fn find_item(&self, id: i32) -> Option<ItemHandle> {
        self.items.iter().find(|item| item.item_id() == id).cloned()
    }

    /// Removes the first item whose identifier matches `id`. Does nothing if
    /// no item matches.
    pub fn remove_item(&mut self, id: i32) {
        if let Some(index) = self.items.iter().position(|item| item.item_id() == id) {
            let _ = self.items.remove(index);
        }
    }

    /// Removes every item belonging to `group_id`, keeping the relative
    /// order of the remainder.
    pub fn remove_group(&mut self, group_id: i32) {
        self.items.retain(|item| item.group_id() != group_id);
    }

    /// Removes every item that is currently invisible.
    pub fn remove_invisible(&mut self) {
        self.items.retain(ItemHandle::is_visible);
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sets the checkable flag on every item of `group_id`, along with
    /// whether the checked state is exclusive within the group.
    pub fn set_group_checkable(&mut self, group_id: i32, checkable: bool, exclusive: bool) {
        for item in self.group(group_id) {
            let _ = item
                .set_checkable(checkable)
                .set_exclusive_checkable(exclusive);
        }
    }

    /// Sets the enabled flag on every item of `group_id`.
    pub fn set_group_enabled(&mut self, group_id: i32, enabled: bool) {
        for item in self.group(group_id) {
            let _ = item.set_enabled(enabled);
        }
    }

    /// Sets the visible flag on every item of `group_id`.
    pub fn set_group_visible(&mut self, group_id: i32, visible: bool) {
        for item in self.group(group_id) {
            let _ = item.set_visible(visible);
        }
    }

    /// Returns `true` if any item is visible.
    #[must_use]
    pub fn has_visible_items(&self) -> bool {
        self.items.iter().any(ItemHandle::is_visible)
    }

    /// Switches which shortcut character is matched by shortcut lookups:
    /// the alphabetic one in qwerty mode, the numeric one otherwise.
    pub fn set_qwerty_mode(&mut self, qwerty: bool) {
        self.qwerty_mode = qwerty;
    }

    /// The first item whose active shortcut matches `key`, if any.
    #[must_use]
    pub fn find_item_with_shortcut(&self, key: char) -> Option<ItemHandle> {
        let qwerty = self.qwerty_mode;

        self.items
            .iter()
            .find(|item| {
                let shortcut = if qwerty {
                    item.alphabetic_shortcut()
                } else {
                    item.numeric_shortcut()
                };

                shortcut == key
            })
            .cloned()
    }

    /// Returns `true` if `key` is the active shortcut of any item.
    #[must_use]
    pub fn is_shortcut_key(&self, key: char) -> bool {
        self.find_item_with_shortcut(key).is_some()
    }

    /// Invokes the first item whose identifier matches `id`.
    ///
    /// Returns `false` if no item matches or the activation went unhandled.
    pub fn perform_identifier_action(&self, id: i32) -> bool {
        self.find_item(id).is_some_and(|item| item.invoke())
    }

    /// Invokes the first item whose active shortcut matches `key`.
    ///
    /// Returns `false` if no item matches or the activation went unhandled.
    pub fn perform_shortcut(&self, key: char) -> bool {
        self.find_item_with_shortcut(key)
            .is_some_and(|item| item.invoke())
    }

    /// Produces a menu sharing the first `n` items of this one.
    ///
    /// The clone is shallow: both menus hold handles to the same items, and
    /// mutating an item through either menu is visible through the other.
    /// This is intended for snapshotting a public view of a menu that keeps
    /// being built; construct fresh [`ActionItem`]s instead if isolation is
    /// required.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`ActionMenu::len`].
    #[must_use]
    pub fn clone_first(&self, n: usize) -> Self {
        Self {
            items: self.items[..n].to_vec(),
            qwerty_mode: self.qwerty_mode,
            dispatcher: self.dispatcher.clone(),
        }
    }

    /// Produces a menu sharing the items of one page of this menu, for
    /// paginated grid rendering.
    ///
    /// Pages partition the sequence in index order; pagination never reorders
    /// the model. An out-of-range `page` yields an empty menu.
    #[must_use]
    pub fn page(&self, layout: PageLayout, page: usize) -> Self {
        Self {
            items: self.items[layout.range(page, self.items.len())].to_vec(),
            qwerty_mode: self.qwerty_mode,
            dispatcher: self.dispatcher.clone(),
        }
    }

    fn group(&self, group_id: i32) -> impl Iterator<Item = &ItemHandle> {
        self.items
            .iter()
            .filter(move |item| item.group_id() == group_id)
    }
}

impl<'a> IntoIterator for &'a ActionMenu {
    type Item = &'a ItemHandle;
    type IntoIter = std::slice::Iter<'a, ItemHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Finds the sorted insertion slot for an item with the given resolved
/// order.
///
/// Scans backward and inserts after the first item whose order is less than
/// or equal, so consecutively added equal-order items keep their insertion
/// order.
fn find_insert_index(items: &[ItemHandle], order: i32) -> usize {
    for (index, item) in items.iter().enumerate().rev() {
        if item.order() <= order {
            return index + 1;
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::order::Category;

    fn ids(menu: &ActionMenu) -> Vec<i32> {
        menu.iter().map(ItemHandle::item_id).collect()
    }

    fn is_sorted(menu: &ActionMenu) -> bool {
        let orders: Vec<i32> = menu.iter().map(ItemHandle::order).collect();

        orders.windows(2).all(|pair| pair[0] <= pair[1])
    }

    #[test]
    fn insertion_keeps_the_menu_sorted() {
        let mut menu = ActionMenu::new();

        for (id, order) in [(1, 7), (2, 3), (3, 9), (4, 0), (5, 3)] {
            let _ = menu.add(0, id, order, format!("item {id}")).unwrap();
            assert!(is_sorted(&menu));
        }

        // Equal-order items keep insertion order: 2 before 5.
        assert_eq!(ids(&menu), vec![4, 2, 5, 1, 3]);
    }

    #[test]
    fn category_bits_dominate_user_order() {
        // A and C carry CONTAINER (priority 4), B carries no category
        // (priority 1); the resolved keys sort B < C < A.
        let mut menu = ActionMenu::new();
        let _ = menu.add(1, 1, 0x0001_0005, "A").unwrap();
        let _ = menu.add(1, 2, 0x0000_0003, "B").unwrap();
        let _ = menu.add(1, 3, 0x0001_0002, "C").unwrap();

        assert_eq!(ids(&menu), vec![2, 3, 1]);
    }

    #[test]
    fn categories_sort_by_priority_regardless_of_insertion_order() {
        let categories = [
            Category::None,
            Category::Alternative,
            Category::Secondary,
            Category::Container,
            Category::System,
        ];

        let mut menu = ActionMenu::new();

        for (id, category) in categories.into_iter().enumerate() {
            let _ = menu
                .add(0, id as i32, category.with_order(0), "item")
                .unwrap();
        }

        // Add a second round in reverse to prove order independence.
        for (id, category) in categories.into_iter().enumerate().rev() {
            let _ = menu
                .add(1, id as i32 + 10, category.with_order(0), "item")
                .unwrap();
        }

        assert!(is_sorted(&menu));
        assert_eq!(ids(&menu), vec![0, 10, 1, 11, 2, 12, 3, 13, 4, 14]);
    }

    #[test]
    fn invalid_category_aborts_the_insertion() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(0, 1, 0, "ok").unwrap();

        assert!(menu.add(0, 2, 7 << 16, "bad").is_err());
        assert_eq!(menu.len(), 1);
    }

    #[test]
    fn find_item_returns_the_first_match() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(0, 7, 0, "first").unwrap();
        let _ = menu.add(0, 7, 1, "second").unwrap();

        assert_eq!(menu.find_item(7).unwrap().title(), "first");
        assert!(menu.find_item(8).is_none());
    }

    #[test]
    fn remove_item_is_a_no_op_for_unknown_ids() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(0, 1, 0, "keep").unwrap();

        menu.remove_item(2);
        assert_eq!(menu.len(), 1);

        menu.remove_item(1);
        assert!(menu.is_empty());
    }

    #[test]
    fn remove_group_keeps_the_remainder_in_order() {
        let mut menu = ActionMenu::new();

        for (id, group) in [1, 2, 1, 3, 1].into_iter().enumerate() {
            let _ = menu.add(group, id as i32, id as i32, "item").unwrap();
        }

        menu.remove_group(1);

        assert_eq!(menu.len(), 2);
        assert_eq!(ids(&menu), vec![1, 3]);
        assert_eq!(
            menu.iter().map(ItemHandle::group_id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn group_mutations_leave_other_groups_untouched() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(1, 1, 0, "a").unwrap();
        let _ = menu.add(2, 2, 1, "b").unwrap();
        let _ = menu.add(1, 3, 2, "c").unwrap();

        menu.set_group_enabled(1, false);
        menu.set_group_visible(1, false);
        menu.set_group_checkable(1, true, true);

        for item in &menu {
            if item.group_id() == 1 {
                assert!(!item.is_enabled());
                assert!(!item.is_visible());
                assert!(item.is_checkable());
                assert!(item.is_exclusive_checkable());
            } else {
                assert!(item.is_enabled());
                assert!(item.is_visible());
                assert!(!item.is_checkable());
            }
        }
    }

    #[test]
    fn visibility_scan_and_filter() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(0, 1, 0, "a").unwrap().set_visible(false);
        let _ = menu.add(0, 2, 1, "b").unwrap();

        assert!(menu.has_visible_items());

        menu.remove_invisible();
        assert_eq!(ids(&menu), vec![2]);

        // Idempotent: a second pass changes nothing.
        menu.remove_invisible();
        assert_eq!(ids(&menu), vec![2]);

        menu.set_group_visible(0, false);
        assert!(!menu.has_visible_items());
    }

    #[test]
    fn shortcut_lookup_respects_qwerty_mode() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(0, 1, 0, "a").unwrap().set_shortcut('1', 'a');
        let _ = menu.add(0, 2, 1, "b").unwrap().set_shortcut('2', 'a');

        // Numeric shortcuts by default.
        assert!(menu.find_item_with_shortcut('a').is_none());
        assert_eq!(menu.find_item_with_shortcut('2').unwrap().item_id(), 2);

        menu.set_qwerty_mode(true);

        // First match in sequence order wins.
        assert_eq!(menu.find_item_with_shortcut('a').unwrap().item_id(), 1);
        assert!(menu.find_item_with_shortcut('z').is_none());
        assert!(menu.is_shortcut_key('a'));
        assert!(!menu.is_shortcut_key('1'));
    }

    #[test]
    fn perform_actions_report_whether_they_were_handled() {
        let hits = Rc::new(RefCell::new(0));
        let mut menu = ActionMenu::new();

        let on_activate = {
            let hits = hits.clone();

            move |_: &ItemHandle| {
                *hits.borrow_mut() += 1;
                true
            }
        };

        let _ = menu
            .add(0, 1, 0, "a")
            .unwrap()
            .set_shortcut('1', 'a')
            .set_on_activate(on_activate);
        let _ = menu.add(0, 2, 1, "b").unwrap();

        assert!(menu.perform_identifier_action(1));
        assert!(!menu.perform_identifier_action(2));
        assert!(!menu.perform_identifier_action(99));

        assert!(menu.perform_shortcut('1'));
        assert!(!menu.perform_shortcut('x'));

        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn clone_first_shares_the_items() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(0, 1, 0, "a").unwrap();
        let _ = menu.add(0, 2, 1, "b").unwrap();
        let _ = menu.add(0, 3, 2, "c").unwrap();

        let snapshot = menu.clone_first(2);

        assert_eq!(snapshot.len(), 2);

        for index in 0..2 {
            assert!(snapshot.item(index).same(&menu.item(index)));
        }

        // Mutation through either menu is visible through the other.
        let _ = snapshot.item(0).set_enabled(false);
        assert!(!menu.item(0).is_enabled());
    }

    #[test]
    #[should_panic]
    fn item_panics_out_of_range() {
        let menu = ActionMenu::new();
        let _ = menu.item(0);
    }

    #[test]
    fn get_is_the_non_panicking_lookup() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(0, 1, 0, "a").unwrap();

        assert!(menu.get(0).is_some());
        assert!(menu.get(1).is_none());
    }

    #[test]
    fn pages_share_items_and_preserve_order() {
        let mut menu = ActionMenu::new();

        for id in 0..5 {
            let _ = menu.add(0, id, id, "item").unwrap();
        }

        let layout = PageLayout::new(1, 2);

        assert_eq!(ids(&menu.page(layout, 0)), vec![0, 1]);
        assert_eq!(ids(&menu.page(layout, 1)), vec![2, 3]);
        assert_eq!(ids(&menu.page(layout, 2)), vec![4]);
        assert!(menu.page(layout, 3).is_empty());

        assert!(menu.page(layout, 2).item(0).same(&menu.item(4)));
    }

    #[test]
    fn clear_empties_the_menu() {
        let mut menu = ActionMenu::new();
        let _ = menu.add(0, 1, 0, "a").unwrap();

        menu.clear();

        assert!(menu.is_empty());
        assert!(!menu.has_visible_items());
    }
}
