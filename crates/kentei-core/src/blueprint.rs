//! The exam blueprint: one quota table shared by assembly and lookup.
//!
//! The sampler draws per-category counts from a [`Blueprint`], and
//! [`Blueprint::category_at`] resolves a paper position back to its
//! category from the same table, so the two can never disagree about
//! where a block starts or ends.

use std::ops::Range;

use crate::error::BlueprintError;
use crate::model::Category;

const STANDARD_QUOTAS: [(Category, usize); 4] = [
    (Category::Knowledge, 50),
    (Category::Disaster, 25),
    (Category::Life, 15),
    (Category::Culture, 10),
];

/// Ordered per-category quota table.
///
/// The order of entries is the block order of the assembled exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    quotas: Vec<(Category, usize)>,
}

impl Blueprint {
    /// The standard 100-question exam: 50 knowledge, 25 disaster,
    /// 15 life, 10 culture.
    pub fn standard() -> Self {
        Blueprint {
            quotas: STANDARD_QUOTAS.to_vec(),
        }
    }

    /// Build a custom quota table, e.g. for short practice drills.
    ///
    /// Entries keep their given order as the block order. Duplicate
    /// categories and zero quotas are rejected.
    pub fn new(quotas: Vec<(Category, usize)>) -> Result<Self, BlueprintError> {
        for (i, (category, quota)) in quotas.iter().enumerate() {
            if *quota == 0 {
                return Err(BlueprintError::ZeroQuota(*category));
            }
            if quotas[..i].iter().any(|(seen, _)| seen == category) {
                return Err(BlueprintError::DuplicateCategory(*category));
            }
        }
        Ok(Blueprint { quotas })
    }

    /// How many questions this blueprint draws from a category.
    pub fn quota(&self, category: Category) -> usize {
        self.quotas
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, quota)| *quota)
            .unwrap_or(0)
    }

    /// Total exam length.
    pub fn total(&self) -> usize {
        self.quotas.iter().map(|(_, quota)| quota).sum()
    }

    /// Categories in block order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.quotas.iter().map(|(category, _)| *category)
    }

    /// Half-open position ranges per category, as prefix sums of the
    /// quota table. The standard blueprint yields [0,50) knowledge,
    /// [50,75) disaster, [75,90) life, [90,100) culture.
    pub fn segments(&self) -> Vec<(Category, Range<usize>)> {
        let mut start = 0;
        self.quotas
            .iter()
            .map(|(category, quota)| {
                let range = start..start + quota;
                start += quota;
                (*category, range)
            })
            .collect()
    }

    /// The category owning a zero-based paper position.
    pub fn category_at(&self, index: usize) -> Result<Category, BlueprintError> {
        let mut end = 0;
        for (category, quota) in &self.quotas {
            end += quota;
            if index < end {
                return Ok(*category);
            }
        }
        Err(BlueprintError::IndexOutOfRange {
            index,
            total: self.total(),
        })
    }
}

impl Default for Blueprint {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_totals() {
        let blueprint = Blueprint::standard();
        assert_eq!(blueprint.total(), 100);
        assert_eq!(blueprint.quota(Category::Knowledge), 50);
        assert_eq!(blueprint.quota(Category::Disaster), 25);
        assert_eq!(blueprint.quota(Category::Life), 15);
        assert_eq!(blueprint.quota(Category::Culture), 10);
    }

    #[test]
    fn category_at_block_boundaries() {
        let blueprint = Blueprint::standard();
        assert_eq!(blueprint.category_at(0).unwrap(), Category::Knowledge);
        assert_eq!(blueprint.category_at(49).unwrap(), Category::Knowledge);
        assert_eq!(blueprint.category_at(50).unwrap(), Category::Disaster);
        assert_eq!(blueprint.category_at(74).unwrap(), Category::Disaster);
        assert_eq!(blueprint.category_at(75).unwrap(), Category::Life);
        assert_eq!(blueprint.category_at(89).unwrap(), Category::Life);
        assert_eq!(blueprint.category_at(90).unwrap(), Category::Culture);
        assert_eq!(blueprint.category_at(99).unwrap(), Category::Culture);
    }

    #[test]
    fn category_at_rejects_out_of_range() {
        let blueprint = Blueprint::standard();
        assert_eq!(
            blueprint.category_at(100),
            Err(BlueprintError::IndexOutOfRange {
                index: 100,
                total: 100
            })
        );
        assert!(blueprint.category_at(usize::MAX).is_err());
    }

    #[test]
    fn segments_are_prefix_sums() {
        let blueprint = Blueprint::standard();
        let segments = blueprint.segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], (Category::Knowledge, 0..50));
        assert_eq!(segments[1], (Category::Disaster, 50..75));
        assert_eq!(segments[2], (Category::Life, 75..90));
        assert_eq!(segments[3], (Category::Culture, 90..100));
    }

    #[test]
    fn custom_blueprint_keeps_given_order() {
        let blueprint = Blueprint::new(vec![
            (Category::Culture, 2),
            (Category::Knowledge, 3),
        ])
        .unwrap();
        assert_eq!(blueprint.total(), 5);
        assert_eq!(blueprint.category_at(0).unwrap(), Category::Culture);
        assert_eq!(blueprint.category_at(1).unwrap(), Category::Culture);
        assert_eq!(blueprint.category_at(2).unwrap(), Category::Knowledge);
        assert_eq!(blueprint.category_at(4).unwrap(), Category::Knowledge);
        assert!(blueprint.category_at(5).is_err());
    }

    #[test]
    fn custom_blueprint_rejects_duplicates_and_zero() {
        let dup = Blueprint::new(vec![
            (Category::Life, 5),
            (Category::Life, 5),
        ]);
        assert_eq!(dup, Err(BlueprintError::DuplicateCategory(Category::Life)));

        let zero = Blueprint::new(vec![(Category::Knowledge, 0)]);
        assert_eq!(zero, Err(BlueprintError::ZeroQuota(Category::Knowledge)));
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(Blueprint::default(), Blueprint::standard());
    }

    #[test]
    fn quota_of_absent_category_is_zero() {
        let blueprint = Blueprint::new(vec![(Category::Knowledge, 10)]).unwrap();
        assert_eq!(blueprint.quota(Category::Culture), 0);
    }
}
