use std::path::{Component, Path, PathBuf};

const GLOB_META: &[char] = &['*', '?', '['];

/// Strips a leading `./` and uses `/` as the separator.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut normalized = path.as_str();
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.trim_start_matches('/');
    }
    normalized.to_owned()
}

pub fn path_to_string(path: &Path) -> String {
    normalize_path(&path.to_string_lossy())
}

pub fn has_glob_meta(component: &str) -> bool {
    component.contains(GLOB_META)
}

/// Splits a normalized pattern into its literal leading directory and the
/// number of components left after it. `None` for the count means the rest
/// contains `**` and can match at any depth.
pub fn split_literal_prefix(pattern: &str) -> (PathBuf, Option<usize>) {
    let components: Vec<&str> = pattern.split('/').collect();
    let literal = components
        .iter()
        .take_while(|c| !has_glob_meta(c))
        .count();

    let mut prefix = PathBuf::new();
    if pattern.starts_with('/') {
        prefix.push(Component::RootDir.as_os_str());
    }
    for component in components.iter().take(literal).filter(|c| !c.is_empty()) {
        prefix.push(component);
    }

    let rest = &components[literal..];
    let depth = if rest.iter().any(|c| *c == "**") {
        None
    } else {
        Some(rest.len())
    };
    (prefix, depth)
}

/// Final component of `entry`, if it has one.
pub fn base_name(entry: &str) -> Option<&str> {
    match Path::new(entry).components().next_back()? {
        Component::Normal(name) => name.to_str(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_leading_dot_segments() {
        assert_eq!(normalize_path("./src/a.js"), "src/a.js");
        assert_eq!(normalize_path(".//README*"), "README*");
        assert_eq!(normalize_path("src\\a.js"), "src/a.js");
        assert_eq!(normalize_path("../lib/*.js"), "../lib/*.js");
    }

    #[test]
    fn splits_literal_prefix() {
        assert_eq!(split_literal_prefix("src/**"), (PathBuf::from("src"), None));
        assert_eq!(
            split_literal_prefix("src/lib/*.js"),
            (PathBuf::from("src/lib"), Some(1))
        );
        assert_eq!(split_literal_prefix("README*"), (PathBuf::new(), Some(1)));
        assert_eq!(
            split_literal_prefix("/tmp/pkg/LICENSE*"),
            (PathBuf::from("/tmp/pkg"), Some(1))
        );
        assert_eq!(split_literal_prefix("src/a.js"), (PathBuf::from("src/a.js"), Some(0)));
    }

    #[test]
    fn base_name_of_entries() {
        assert_eq!(base_name("src/a.js"), Some("a.js"));
        assert_eq!(base_name("docs/"), Some("docs"));
        assert_eq!(base_name("."), None);
        assert_eq!(base_name(".."), None);
    }
}
