//! POSIX-style path helpers for item lookup and completion.
//!
//! Item names inside a file form a `/`-separated hierarchy. Completion splits
//! a partially typed path at its last separator so that `grp/subgrp/ite<TAB>`
//! lists the keys of `grp/subgrp`.

/// Split a path at its last `/`.
///
/// Mirrors `posixpath.split`: the head keeps no trailing separator (unless it
/// is the root itself) and the tail is everything after the last separator.
///
/// # Examples
/// * `"a/b/c"` → `("a/b", "c")`
/// * `"name"` → `("", "name")`
/// * `"a/"` → `("a", "")`
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => {
            let head = &path[..idx];
            let tail = &path[idx + 1..];
            if head.is_empty() && path.starts_with('/') {
                ("/", tail)
            } else {
                (head, tail)
            }
        }
        None => ("", path),
    }
}

/// Join a directory part and a name with a single `/`.
///
/// An empty directory yields the name unchanged, so `join(split(p).0, key)`
/// produces candidates in the same form the user typed.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Split a path into its non-empty components.
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_nested() {
        assert_eq!(split("a/b/c"), ("a/b", "c"));
        assert_eq!(split("grp/subgrp/ite"), ("grp/subgrp", "ite"));
    }

    #[test]
    fn test_split_flat() {
        assert_eq!(split("name"), ("", "name"));
        assert_eq!(split(""), ("", ""));
    }

    #[test]
    fn test_split_trailing_separator() {
        assert_eq!(split("a/"), ("a", ""));
        assert_eq!(split("a/b/"), ("a/b", ""));
    }

    #[test]
    fn test_split_rooted() {
        assert_eq!(split("/a"), ("/", "a"));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "name"), "name");
        assert_eq!(join("a", "b"), "a/b");
        assert_eq!(join("a/b", "c"), "a/b/c");
        assert_eq!(join("a/", "b"), "a/b");
    }

    #[test]
    fn test_join_round_trips_split() {
        let (dir, _) = split("grp/subgrp/item1");
        assert_eq!(join(dir, "item2"), "grp/subgrp/item2");
    }

    #[test]
    fn test_components() {
        let parts: Vec<&str> = components("a/b/c").collect();
        assert_eq!(parts, vec!["a", "b", "c"]);

        let parts: Vec<&str> = components("/a//b/").collect();
        assert_eq!(parts, vec!["a", "b"]);

        assert_eq!(components("").count(), 0);
    }
}
