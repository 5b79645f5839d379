//! Occurrence counting over arbitrary keys.
//!
//! Results are returned as [`BTreeMap`]s so iteration order depends only on the keys,
//! never on the order the items arrived in.

use std::collections::BTreeMap;

/// Counts how often each key occurs.
///
/// # Examples
///
/// ```
/// # use chequemate_stats::frequency::count;
/// let counts = count(['a', 'b', 'a']);
/// assert_eq!(counts[&'a'], 2);
/// assert_eq!(counts[&'b'], 1);
/// ```
#[must_use]
pub fn count<K, I>(items: I) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Converts occurrence counts into fractions of the total.
///
/// The returned fractions sum to 1.0 unless `counts` is empty, in which case the
/// result is empty as well.
#[must_use]
pub fn fractions_from_counts<K>(counts: BTreeMap<K, usize>) -> BTreeMap<K, f64>
where
    K: Ord,
{
    let total = counts.values().sum::<usize>().max(1);
    #[expect(clippy::cast_precision_loss)]
    let total = total as f64;
    counts
        .into_iter()
        .map(|(key, c)| {
            #[expect(clippy::cast_precision_loss)]
            let c = c as f64;
            (key, c / total)
        })
        .collect()
}

/// Counts `items` and converts the counts into fractions of the total.
#[must_use]
pub fn fractions<K, I>(items: I) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    fractions_from_counts(count(items))
}
