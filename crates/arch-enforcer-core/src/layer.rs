//! A single architecture layer and its allow-list.

use std::fmt;

/// Namespace separator used by layer names and references.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// A named layer with the namespace prefixes it may depend on.
///
/// Membership checks use plain string-prefix matching, not namespace
/// segment boundaries: a child `App\Use` also admits `App\User`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    children: Vec<String>,
}

impl Layer {
    /// Creates a layer. Duplicate children keep their first position.
    #[must_use]
    pub fn new<N, I, S>(name: N, children: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for child in children {
            let child = child.into();
            if !unique.contains(&child) {
                unique.push(child);
            }
        }
        Self {
            name: name.into(),
            children: unique,
        }
    }

    /// Returns the layer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the allowed namespace prefixes, in configuration order.
    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// A strict layer lists itself among its children.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.children.iter().any(|c| c == &self.name)
    }

    /// Whether any child is a string-prefix of `name_or_namespace`.
    #[must_use]
    pub fn has_child(&self, name_or_namespace: Option<&str>) -> bool {
        let Some(candidate) = name_or_namespace else {
            return false;
        };
        self.children
            .iter()
            .any(|child| candidate.starts_with(child.as_str()))
    }

    /// Strips `root\` from the front of a layer name.
    ///
    /// ```
    /// use arch_enforcer_core::Layer;
    ///
    /// assert_eq!(Layer::remove_root_namespace("App\\Application", "App"), "Application");
    /// assert_eq!(Layer::remove_root_namespace("Other\\Domain", "App"), "Other\\Domain");
    /// ```
    #[must_use]
    pub fn remove_root_namespace<'a>(name: &'a str, root: &str) -> &'a str {
        if name == root {
            return "";
        }
        name.strip_prefix(root)
            .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
            .unwrap_or(name)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
