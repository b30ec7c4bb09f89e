//! Key allocation policy, kept free of locking so it can be tested alone.

/// Probe forward from `counter` for the first key that `is_taken` rejects.
///
/// Returns the key together with the counter value it was formatted from.
/// The caller advances its counter past that value after a successful
/// insert, so counter values are never handed out twice. Terminates as
/// long as only finitely many keys are taken.
pub fn probe_key<F>(mut counter: u64, is_taken: F) -> (String, u64)
where
    F: Fn(&str) -> bool,
{
    loop {
        let candidate = counter.to_string();
        if !is_taken(&candidate) {
            return (candidate, counter);
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn empty_set_yields_counter() {
        let (key, at) = probe_key(0, |_| false);
        assert_eq!(key, "0");
        assert_eq!(at, 0);

        let (key, at) = probe_key(41, |_| false);
        assert_eq!(key, "41");
        assert_eq!(at, 41);
    }

    #[test]
    fn skips_occupied_keys() {
        let taken: HashSet<&str> = ["3", "4", "6"].into_iter().collect();
        let (key, at) = probe_key(3, |k| taken.contains(k));
        assert_eq!(key, "5");
        assert_eq!(at, 5);
    }

    #[test]
    fn ignores_keys_behind_counter() {
        let taken: HashSet<&str> = ["0", "1"].into_iter().collect();
        let (key, _) = probe_key(7, |k| taken.contains(k));
        assert_eq!(key, "7");
    }

    #[test]
    fn non_numeric_keys_never_collide() {
        let (key, _) = probe_key(0, |k| k == "does-not-exist");
        assert_eq!(key, "0");
    }
}
