//! Ordering of physical child names.

/// Sort directory entry names ascending, in place.
///
/// Listings of large directories make this a hot path, so it uses the
/// allocation-free unstable sort. Names within one listing are unique, which
/// makes the result identical to a stable sort. Ordering is plain byte order,
/// the same order the logical model uses for its children, so the two
/// sequences can be merged with a single comparison per step.
pub fn sort_names(names: &mut [String]) {
    if names.len() > 1 {
        names.sort_unstable();
    }
}
