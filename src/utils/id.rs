//! Generated identifiers for catalog, review and cart records.
//!
//! Identifiers embed a millisecond timestamp. A process-wide watermark bumps
//! the value past the last one handed out, so two calls in the same
//! millisecond still yield distinct ids.

use std::sync::atomic::{AtomicI64, Ordering};

use uuid::Uuid;

static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

fn next_millis() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let mut assigned = now;
    let _ = LAST_MILLIS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        assigned = now.max(last + 1);
        Some(assigned)
    });
    assigned
}

/// Numeric-string book identifier.
pub fn book_id() -> String {
    next_millis().to_string()
}

/// Review identifier of the form `review-<millis>`.
pub fn review_id() -> String {
    format!("review-{}", next_millis())
}

/// Cart line-item identifier of the form `cart-<millis>-<suffix>`.
pub fn cart_item_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("cart-{}-{}", next_millis(), &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn book_ids_are_numeric_strings() {
        let id = book_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn ids_are_unique_under_rapid_generation() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(book_id()));
        }
        for _ in 0..1000 {
            assert!(seen.insert(review_id()));
        }
        for _ in 0..1000 {
            assert!(seen.insert(cart_item_id()));
        }
    }

    #[test]
    fn entity_prefixes_match_their_kind() {
        assert!(review_id().starts_with("review-"));
        assert!(cart_item_id().starts_with("cart-"));
    }
}
