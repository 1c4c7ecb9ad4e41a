//! Dotted key paths.
//!
//! A path like `server.http.port` addresses a value three levels deep. Paths
//! are split on every `.`, so empty segments (`a..b`) are kept as empty keys.

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Split a path into its parent segments and the final key.
///
/// `"a.b.c"` yields parents `["a", "b"]` and key `"c"`; a single-segment path
/// yields no parents.
pub fn split_parent(path: &str) -> (Vec<&str>, &str) {
    match path.rsplit_once(SEPARATOR) {
        Some((parents, last)) => (parents.split(SEPARATOR).collect(), last),
        None => (Vec::new(), path),
    }
}

/// Join a parent path and a child key.
pub fn join(parent: &str, key: &str) -> String {
    let mut joined = String::with_capacity(parent.len() + key.len() + 1);
    joined.push_str(parent);
    joined.push(SEPARATOR);
    joined.push_str(key);
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_single_segment() {
        let (parents, last) = split_parent("k");
        assert!(parents.is_empty());
        assert_eq!(last, "k");
    }

    #[test]
    fn test_split_nested() {
        let (parents, last) = split_parent("k.k2b.k3a");
        assert_eq!(parents, vec!["k", "k2b"]);
        assert_eq!(last, "k3a");
    }

    #[test]
    fn test_split_keeps_empty_segments() {
        let (parents, last) = split_parent("a..b.");
        assert_eq!(parents, vec!["a", "", "b"]);
        assert_eq!(last, "");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("parent.parent2", "k4"), "parent.parent2.k4");
    }
}
