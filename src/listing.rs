//! Listing Utilities
//!
//! Helper functions for receipt list rendering: ordering, filtering and
//! pagination. All pure, over the full fetched set.

use std::cmp::Reverse;
use std::num::NonZeroUsize;

use crate::models::{Person, Purpose, Receipt};

/// Active person/purpose filter. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptFilter {
    pub person: Option<Person>,
    pub purpose: Option<Purpose>,
}

impl ReceiptFilter {
    pub fn is_active(&self) -> bool {
        self.person.is_some() || self.purpose.is_some()
    }

    pub fn matches(&self, receipt: &Receipt) -> bool {
        tag_matches(
            self.person.as_ref().map(Person::as_str),
            receipt.person.as_ref().map(Person::as_str),
        ) && tag_matches(
            self.purpose.as_ref().map(Purpose::as_str),
            receipt.purpose.as_ref().map(Purpose::as_str),
        )
    }
}

/// A receipt without a value never matches an active filter
fn tag_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(wanted), Some(actual)) => wanted.trim().to_lowercase() == actual.trim().to_lowercase(),
    }
}

/// Receipts matching `filter`, in their current order
pub fn filter_receipts(receipts: &[Receipt], filter: &ReceiptFilter) -> Vec<Receipt> {
    receipts.iter().filter(|r| filter.matches(r)).cloned().collect()
}

/// Newest first; undated receipts last. Stable, so equal dates keep the
/// service's order.
pub fn sort_newest_first(receipts: &mut [Receipt]) {
    receipts.sort_by_key(|r| (r.date.is_none(), Reverse(r.date)));
}

/// Number of pages, `ceil(total / size)`
pub fn page_count(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get())
}

/// Items on 1-indexed `page`; empty when out of range
pub fn page_slice<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> &[T] {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size);
    if page == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Clamp a requested page into `1..=pages` (page 1 when there are none)
pub fn clamp_page(page: usize, pages: usize) -> usize {
    page.clamp(1, pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::receipt;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// Receipt tags as the service might spell them
    #[derive(Debug, Clone)]
    struct Row {
        person: Option<&'static str>,
        purpose: &'static str,
    }

    impl Arbitrary for Row {
        fn arbitrary(g: &mut Gen) -> Self {
            Row {
                person: *g.choose(&[None, Some("Harsha"), Some(" hesh"), Some("HESH "), Some("Sam")]).unwrap(),
                purpose: *g.choose(&["Work", "uber", " Ecom ", "Gift"]).unwrap(),
            }
        }
    }

    fn build(rows: &[Row]) -> Vec<Receipt> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                receipt(
                    &i.to_string(),
                    "2024-01-01",
                    row.person.map(Person::parse),
                    Purpose::parse(row.purpose),
                )
            })
            .collect()
    }

    fn normalized(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    #[quickcheck]
    fn prop_empty_filter_matches_all(rows: Vec<Row>) -> bool {
        let receipts = build(&rows);
        filter_receipts(&receipts, &ReceiptFilter::default()) == receipts
    }

    #[quickcheck]
    fn prop_filter_is_exact_subset(rows: Vec<Row>, pick_person: bool, pick_purpose: bool) -> bool {
        let receipts = build(&rows);
        let filter = ReceiptFilter {
            person: pick_person.then(|| Person::parse("hesh")),
            purpose: pick_purpose.then(|| Purpose::parse("UBER")),
        };

        let expected: Vec<String> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                let person_ok = !pick_person || row.person.map(normalized).as_deref() == Some("hesh");
                let purpose_ok = !pick_purpose || normalized(row.purpose) == "uber";
                person_ok && purpose_ok
            })
            .map(|(i, _)| i.to_string())
            .collect();

        let actual: Vec<String> = filter_receipts(&receipts, &filter)
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        actual == expected
    }

    #[quickcheck]
    fn prop_pages_cover_items_once(len: u8, page_size: u8) -> bool {
        let page_size = size(usize::from(page_size % 20) + 1);
        let items: Vec<usize> = (0..usize::from(len)).collect();

        let pages = page_count(items.len(), page_size);
        let joined: Vec<usize> = (1..=pages)
            .flat_map(|p| page_slice(&items, p, page_size).to_vec())
            .collect();

        pages == (items.len() + page_size.get() - 1) / page_size.get()
            && joined == items
            && page_slice(&items, pages + 1, page_size).is_empty()
    }

    #[test]
    fn test_newest_first() {
        let mut receipts = vec![
            receipt("1", "2024-01-01", None, Purpose::Work),
            receipt("3", "", None, Purpose::Work),
            receipt("2", "2024-03-01", None, Purpose::Work),
        ];
        sort_newest_first(&mut receipts);

        let ids: Vec<_> = receipts.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["2", "1", "3"]);
    }

    #[test]
    fn test_person_filter_skips_unset() {
        let receipts = vec![
            receipt("1", "2024-01-01", Some(Person::Hesh), Purpose::Work),
            receipt("2", "2024-01-02", None, Purpose::Work),
        ];
        let filter = ReceiptFilter {
            person: Some(Person::Hesh),
            purpose: None,
        };
        assert!(filter.is_active());
        assert_eq!(filter_receipts(&receipts, &filter).len(), 1);
    }

    #[test]
    fn test_unlisted_tags_compare_case_insensitively() {
        let receipts = vec![
            receipt("1", "2024-01-01", Some(Person::parse("ÉLODIE ")), Purpose::parse("Café")),
            receipt("2", "2024-01-02", Some(Person::parse("Elodie")), Purpose::Work),
        ];
        let filter = ReceiptFilter {
            person: Some(Person::parse("élodie")),
            purpose: Some(Purpose::parse(" CAFÉ")),
        };

        let matched = filter_receipts(&receipts, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.as_str(), "1");
    }

    #[test]
    fn test_page_bounds() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(page_count(0, size(15)), 0);
        assert_eq!(page_count(16, size(15)), 2);
        assert_eq!(page_slice(&items, 2, size(2)), &[3, 4]);
        assert_eq!(page_slice(&items, 3, size(2)), &[5]);
        assert!(page_slice(&items, 0, size(2)).is_empty());
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }
}
