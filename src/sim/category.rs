//! Collision categories
//!
//! Every physics body carries exactly one `Category`. Collision and contact
//! filters are `CategorySet`s; all interpretation goes through `contains`.

use serde::{Deserialize, Serialize};

/// What kind of entity a physics body represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// The shrimp
    Player,
    /// Ceiling and land strips
    World,
    /// Coral pillars
    Obstacle,
    /// Invisible volume that awards a point
    ScoreTrigger,
    /// A score trigger that already paid out
    Consumed,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Player,
        Category::World,
        Category::Obstacle,
        Category::ScoreTrigger,
        Category::Consumed,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of categories (collision mask / contact-test mask)
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    pub const fn only(category: Category) -> Self {
        Self(category.bit())
    }

    pub const fn with(self, category: Category) -> Self {
        Self(self.0 | category.bit())
    }

    #[inline]
    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        Self::only(category)
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl std::fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let set = CategorySet::only(Category::World).with(Category::Obstacle);
        assert!(set.contains(Category::World));
        assert!(set.contains(Category::Obstacle));
        assert!(!set.contains(Category::Player));
        assert!(!set.contains(Category::ScoreTrigger));
    }

    #[test]
    fn test_collect_and_iter() {
        let set: CategorySet = [Category::Consumed, Category::Player].into_iter().collect();
        let back: Vec<_> = set.iter().collect();
        assert_eq!(back, vec![Category::Player, Category::Consumed]);
        assert!(CategorySet::EMPTY.is_empty());
        assert_eq!(format!("{:?}", set), "{Player, Consumed}");
    }
}
