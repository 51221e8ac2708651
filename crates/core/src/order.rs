//! Category-aware ordering of menu items.
//!
//! An item's order integer packs two pieces of information: the upper 16 bits
//! name a *category* (a coarse priority bucket) and the lower 16 bits carry
//! the user-specified order within that category. [`resolve`] turns such an
//! integer into a single comparable key by replacing the category index with
//! its fixed priority.

/// The part of an order integer that the user can provide.
pub const USER_MASK: i32 = 0x0000_ffff;

/// Bit shift of the user portion of the order integer.
pub const USER_SHIFT: u32 = 0;

/// The part of an order integer that supplies the category of the item.
pub const CATEGORY_MASK: i32 = !USER_MASK;

/// Bit shift of the category portion of the order integer.
pub const CATEGORY_SHIFT: u32 = 16;

/// Priority of each category index, from most background (0) to most
/// prominent. Index 5 is reserved and sorts before everything else.
const CATEGORY_TO_ORDER: [i32; 6] = [
    1, // no category
    4, // container
    5, // system
    3, // secondary
    2, // alternative
    0, // reserved
];

/// A coarse priority bucket for menu items.
///
/// Categories are the primary sort key of a menu: every item of a higher
/// priority category sorts after every item of a lower one, regardless of
/// the user-specified order bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// No category; sorts between [`Category::Alternative`] and
    /// [`Category::Secondary`].
    #[default]
    None = 0,

    /// Container items, e.g. entries that open a nested surface.
    Container = 1,

    /// System-provided items; the most prominent bucket.
    System = 2,

    /// Secondary, less frequently used items.
    Secondary = 3,

    /// Alternative actions on the data the menu was built for.
    Alternative = 4,
}

impl Category {
    /// The category portion of an order integer for this category.
    #[must_use]
    pub const fn order_bits(self) -> i32 {
        (self as i32) << CATEGORY_SHIFT
    }

    /// Combines this category with a user order into a raw order integer.
    ///
    /// Only the low 16 bits of `user_order` are kept.
    #[must_use]
    pub const fn with_order(self, user_order: i32) -> i32 {
        self.order_bits() | (user_order & USER_MASK)
    }
}

/// An error produced while resolving an order integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// The upper bits of the order integer do not name a valid category.
    #[error("order {category_order:#010x} does not contain a valid category")]
    InvalidCategory {
        /// The raw order integer that failed to resolve.
        category_order: i32,
    },
}

/// Resolves the ordering of an item across all items, even ones from other
/// categories.
///
/// This grabs the category from the upper bits of `category_order`, replaces
/// it with the category's fixed priority, and combines it with the lower
/// bits; the result is directly comparable between any two items.
///
/// # Errors
///
/// Returns [`OrderError::InvalidCategory`] if the upper bits do not name a
/// known category. Malformed encodings are never clamped.
pub fn resolve(category_order: i32) -> Result<i32, OrderError> {
    let index = (category_order & CATEGORY_MASK) >> CATEGORY_SHIFT;

    if index < 0 || index >= CATEGORY_TO_ORDER.len() as i32 {
        return Err(OrderError::InvalidCategory { category_order });
    }

    Ok((CATEGORY_TO_ORDER[index as usize] << CATEGORY_SHIFT) | (category_order & USER_MASK))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_category_keeps_user_bits() {
        assert_eq!(resolve(0x0000_0003), Ok(1 << 16 | 3));
    }

    #[test]
    fn category_index_is_replaced_by_priority() {
        // CONTAINER (index 1) has priority 4.
        assert_eq!(resolve(Category::Container.with_order(2)), Ok(4 << 16 | 2));
        // SYSTEM (index 2) has priority 5.
        assert_eq!(resolve(Category::System.with_order(0)), Ok(5 << 16));
        // ALTERNATIVE (index 4) has priority 2.
        assert_eq!(resolve(Category::Alternative.with_order(9)), Ok(2 << 16 | 9));
    }

    #[test]
    fn category_priorities_are_totally_ordered() {
        let none = resolve(Category::None.with_order(0)).unwrap();
        let alternative = resolve(Category::Alternative.with_order(0)).unwrap();
        let secondary = resolve(Category::Secondary.with_order(0)).unwrap();
        let container = resolve(Category::Container.with_order(0)).unwrap();
        let system = resolve(Category::System.with_order(0)).unwrap();

        assert!(none < alternative);
        assert!(alternative < secondary);
        assert!(secondary < container);
        assert!(container < system);
    }

    #[test]
    fn reserved_category_sorts_first() {
        let reserved = resolve(5 << CATEGORY_SHIFT | 0xffff).unwrap();
        let none = resolve(0).unwrap();

        assert!(reserved < none);
    }

    #[test]
    fn unknown_category_index_is_an_error() {
        assert_eq!(
            resolve(6 << CATEGORY_SHIFT),
            Err(OrderError::InvalidCategory {
                category_order: 6 << CATEGORY_SHIFT
            })
        );
    }

    #[test]
    fn negative_category_index_is_an_error() {
        let malformed = i32::MIN;

        assert_eq!(
            resolve(malformed),
            Err(OrderError::InvalidCategory {
                category_order: malformed
            })
        );
    }
}
