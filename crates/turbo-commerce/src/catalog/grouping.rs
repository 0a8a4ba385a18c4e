//! Grouping the catalog by category for display.

use std::collections::btree_map::{BTreeMap, Entry};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::CategoryId;

/// Products sharing one category, in their original relative order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    /// The group key.
    pub category_id: CategoryId,
    /// Members of the group.
    pub products: Vec<Product>,
}

impl CategoryGroup {
    /// Name of the category, taken from the first member whose category
    /// id equals the group key.
    pub fn category_name(&self) -> Option<&str> {
        self.products
            .iter()
            .find(|p| p.category_id == self.category_id)
            .map(|p| p.category_name.as_str())
    }

    /// Number of products in the group.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Group products by category id.
///
/// Groups come back ordered ascending by category id. Within a group,
/// products keep the order they had in the input.
pub fn group_by_category(products: &[Product]) -> Vec<CategoryGroup> {
    let mut groups: BTreeMap<CategoryId, Vec<Product>> = BTreeMap::new();
    for product in products {
        groups
            .entry(product.category_id)
            .or_default()
            .push(product.clone());
    }

    groups
        .into_iter()
        .map(|(category_id, products)| CategoryGroup {
            category_id,
            products,
        })
        .collect()
}

/// Verify that every category id maps to a single category name.
pub fn check_category_names(products: &[Product]) -> Result<(), CommerceError> {
    let mut names: BTreeMap<CategoryId, &str> = BTreeMap::new();
    for product in products {
        match names.entry(product.category_id) {
            Entry::Vacant(slot) => {
                slot.insert(&product.category_name);
            }
            Entry::Occupied(seen) if *seen.get() != product.category_name => {
                return Err(CommerceError::CategoryNameMismatch {
                    category_id: product.category_id,
                    first: (*seen.get()).to_string(),
                    second: product.category_name.clone(),
                });
            }
            Entry::Occupied(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn product(id: i32, category: i32) -> Product {
        Product::new(
            id,
            format!("Product {}", id),
            Decimal::ONE,
            category,
            format!("Category {}", category),
        )
    }

    #[test]
    fn test_groups_sorted_by_category() {
        let products = vec![product(1, 3), product(2, 1), product(3, 2), product(4, 1)];
        let groups = group_by_category(&products);

        let keys: Vec<i32> = groups.iter().map(|g| g.category_id.get()).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_group_members_keep_input_order() {
        let products = vec![product(9, 1), product(2, 2), product(5, 1), product(1, 1)];
        let groups = group_by_category(&products);

        let ids: Vec<i32> = groups[0].products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![9, 5, 1]);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn test_category_name() {
        let groups = group_by_category(&[product(1, 4)]);
        assert_eq!(groups[0].category_name(), Some("Category 4"));
        assert_eq!(groups[0].len(), 1);
    }

    #[test]
    fn test_category_name_mismatch_detected() {
        let mut renamed = product(2, 1);
        renamed.category_name = "Other".to_string();

        let err = check_category_names(&[product(1, 1), renamed]).unwrap_err();
        assert!(matches!(
            err,
            CommerceError::CategoryNameMismatch { category_id, .. } if category_id.get() == 1
        ));
    }

    #[test]
    fn test_consistent_names_pass() {
        assert!(check_category_names(&[product(1, 1), product(2, 1), product(3, 2)]).is_ok());
    }

    proptest! {
        #[test]
        fn grouping_partitions_input(categories in prop::collection::vec(0i32..8, 0..40)) {
            let products: Vec<Product> = categories
                .iter()
                .enumerate()
                .map(|(i, c)| product(i as i32, *c))
                .collect();

            let groups = group_by_category(&products);

            let total: usize = groups.iter().map(CategoryGroup::len).sum();
            prop_assert_eq!(total, products.len());

            for pair in groups.windows(2) {
                prop_assert!(pair[0].category_id < pair[1].category_id);
            }

            for group in &groups {
                prop_assert!(!group.is_empty());
                prop_assert!(group.products.iter().all(|p| p.category_id == group.category_id));
                let ids: Vec<i32> = group.products.iter().map(|p| p.id.get()).collect();
                let mut sorted = ids.clone();
                sorted.sort_unstable();
                prop_assert_eq!(ids, sorted);
            }
        }

        #[test]
        fn shared_category_yields_same_name(
            categories in prop::collection::vec(0i32..4, 1..30),
            pick in any::<prop::sample::Index>(),
        ) {
            let products: Vec<Product> = categories
                .iter()
                .enumerate()
                .map(|(i, c)| product(i as i32, *c))
                .collect();
            prop_assert!(check_category_names(&products).is_ok());

            let chosen = &products[pick.index(products.len())];
            let groups = group_by_category(&products);
            let group = groups
                .iter()
                .find(|g| g.category_id == chosen.category_id)
                .unwrap();

            for member in &group.products {
                prop_assert_eq!(group.category_name(), Some(member.category_name.as_str()));
            }
        }
    }
}
