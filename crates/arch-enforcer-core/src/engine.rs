//! Per-file rule engine.
//!
//! Decides, for every name a file references, whether the file's layer may
//! use it, producing [`Violation`]s for the ones it may not.

use tracing::debug;

use crate::architecture::Architecture;
use crate::extractor::BuiltinSymbols;
use crate::layer::Layer;
use crate::layer_file::LayerFile;
use crate::types::{Location, Violation};

/// Evaluates namespace references against an [`Architecture`].
pub struct RuleEngine<'a> {
    architecture: &'a Architecture,
    builtins: &'a dyn BuiltinSymbols,
}

impl<'a> RuleEngine<'a> {
    /// Creates an engine over a shared architecture.
    #[must_use]
    pub fn new(architecture: &'a Architecture, builtins: &'a dyn BuiltinSymbols) -> Self {
        Self {
            architecture,
            builtins,
        }
    }

    /// Checks every reference of a file.
    ///
    /// Files without a namespace, or whose namespace belongs to no layer,
    /// are outside the architecture and always pass.
    #[must_use]
    pub fn check(&self, file: &LayerFile<'_>) -> Vec<Violation> {
        let Some(layer) = file.layer() else {
            debug!("Skipping {}: not in any layer", file.path().display());
            return Vec::new();
        };

        let subject = file.display_name();
        file.references()
            .iter()
            .filter(|reference| !self.can_use(layer, &reference.name))
            .map(|reference| {
                Violation::new(
                    Location::new(file.path(), reference.line),
                    subject.as_str(),
                    reference.name.as_str(),
                )
            })
            .collect()
    }

    /// Whether `layer` may reference `namespace`.
    #[must_use]
    pub fn can_use(&self, layer: &Layer, namespace: &str) -> bool {
        let used_layer = self.layer_name_or_namespace(namespace);
        let strict = layer.is_strict();
        let known = self.architecture.has_layer(used_layer);

        if layer.name() == used_layer {
            return true;
        }

        if !strict && !known {
            return true;
        }

        if layer.has_child(Some(used_layer)) {
            return true;
        }

        if strict && !known {
            let builtin = self.builtins.is_builtin(namespace);
            debug!("{layer} is strict, {namespace} built-in: {builtin}");
            return builtin;
        }

        false
    }

    /// The owning layer's name, or the namespace itself when untracked.
    fn layer_name_or_namespace<'n>(&'n self, namespace: &'n str) -> &'n str {
        self.architecture
            .resolve_layer(Some(namespace))
            .map_or(namespace, Layer::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{FileAnalysis, NameExtractor, NameRef, NoBuiltins};

    /// Returns a fixed analysis regardless of the source text.
    struct FixedExtractor {
        namespace: Option<&'static str>,
        references: &'static [&'static str],
    }

    impl NameExtractor for FixedExtractor {
        fn language_id(&self) -> &'static str {
            "fixed"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".php"]
        }

        fn extract(&self, _source: &str) -> FileAnalysis {
            FileAnalysis {
                namespace: self.namespace.map(String::from),
                references: self
                    .references
                    .iter()
                    .enumerate()
                    .map(|(i, r)| NameRef::new(*r, i + 3))
                    .collect(),
            }
        }
    }

    struct Builtins(&'static [&'static str]);

    impl BuiltinSymbols for Builtins {
        fn is_builtin(&self, name: &str) -> bool {
            self.0.contains(&name)
        }
    }

    fn check(
        architecture: &Architecture,
        builtins: &dyn BuiltinSymbols,
        namespace: Option<&'static str>,
        references: &'static [&'static str],
    ) -> Vec<Violation> {
        let extractor = FixedExtractor {
            namespace,
            references,
        };
        let file = LayerFile::new("src/LayerA/Service.php", "", &extractor, architecture);
        RuleEngine::new(architecture, builtins).check(&file)
    }

    fn abc_architecture() -> Architecture {
        Architecture::new([
            ("Test\\LayerA", vec!["Test\\LayerB"]),
            ("Test\\LayerB", vec![]),
            ("Test\\LayerC", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn reports_reference_outside_self_and_children() {
        let v = check(
            &abc_architecture(),
            &NoBuiltins,
            Some("Test\\LayerA"),
            &[
                "Test\\LayerA\\StatementA",
                "Test\\LayerB\\StatementB",
                "Test\\LayerC\\StatementC",
            ],
        );
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].namespace, "Test\\LayerC\\StatementC");
        assert_eq!(v[0].location.line, 5);
        assert_eq!(v[0].subject, "Test\\LayerA\\Service");
    }

    #[test]
    fn strict_layer_rejects_unlisted_known_layer() {
        let arch = Architecture::new([
            ("Test\\LayerA", vec!["Test\\LayerA"]),
            ("Test\\LayerB", vec![]),
        ])
        .unwrap();
        let v = check(
            &arch,
            &NoBuiltins,
            Some("Test\\LayerA"),
            &["Test\\LayerA\\StatementA", "Test\\LayerB\\StatementB"],
        );
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].namespace, "Test\\LayerB\\StatementB");
    }

    #[test]
    fn strict_layer_may_use_itself() {
        let arch = Architecture::new([("Test\\LayerA", vec!["Test\\LayerA"])]).unwrap();
        let v = check(
            &arch,
            &NoBuiltins,
            Some("Test\\LayerA"),
            &["Test\\LayerA\\StatementA"],
        );
        assert!(v.is_empty());
    }

    #[test]
    fn non_strict_layer_may_use_untracked_namespace() {
        let arch = Architecture::new([("Test\\LayerA", Vec::<String>::new())]).unwrap();
        let v = check(
            &arch,
            &NoBuiltins,
            Some("Test\\LayerA"),
            &["Some\\Other\\Location\\StatementA"],
        );
        assert!(v.is_empty());
    }

    #[test]
    fn strict_layer_rejects_untracked_namespace() {
        let arch = Architecture::new([("Test\\LayerA", vec!["Test\\LayerA"])]).unwrap();
        let v = check(
            &arch,
            &NoBuiltins,
            Some("Test\\LayerA"),
            &["Some\\Other\\Location\\StatementA"],
        );
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn strict_layer_may_use_builtins() {
        let arch = Architecture::new([("Test\\LayerA", vec!["Test\\LayerA"])]).unwrap();
        let v = check(
            &arch,
            &Builtins(&["SplFileInfo"]),
            Some("Test\\LayerA"),
            &["Test\\LayerA\\StatementA", "SplFileInfo"],
        );
        assert!(v.is_empty());
    }

    #[test]
    fn strict_layer_may_use_listed_external_namespace() {
        let arch =
            Architecture::new([("Test\\LayerA", vec!["Test\\LayerA", "External"])]).unwrap();
        let v = check(
            &arch,
            &NoBuiltins,
            Some("Test\\LayerA"),
            &["External\\Other\\Layer\\Namespace"],
        );
        assert!(v.is_empty());
    }

    #[test]
    fn file_without_namespace_always_passes() {
        let v = check(
            &abc_architecture(),
            &NoBuiltins,
            None,
            &["Test\\LayerC\\StatementC"],
        );
        assert!(v.is_empty());
    }

    #[test]
    fn file_outside_architecture_always_passes() {
        let v = check(
            &abc_architecture(),
            &NoBuiltins,
            Some("Vendor\\Package"),
            &["Test\\LayerC\\StatementC"],
        );
        assert!(v.is_empty());
    }

    #[test]
    fn file_without_references_passes() {
        let v = check(&abc_architecture(), &NoBuiltins, Some("Test\\LayerA"), &[]);
        assert!(v.is_empty());
    }

    #[test]
    fn repeated_references_are_reported_each_time() {
        let v = check(
            &abc_architecture(),
            &NoBuiltins,
            Some("Test\\LayerA"),
            &["Test\\LayerC\\X", "Test\\LayerC\\X"],
        );
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].location.line, 3);
        assert_eq!(v[1].location.line, 4);
    }

    #[test]
    fn can_use_decision_order() {
        let arch = Architecture::new([
            ("App\\Domain", vec!["App\\Domain"]),
            ("App\\Infra", vec!["App\\Domain"]),
        ])
        .unwrap();
        let engine = RuleEngine::new(&arch, &NoBuiltins);
        let domain = arch.get("App\\Domain").unwrap();
        let infra = arch.get("App\\Infra").unwrap();

        assert!(engine.can_use(domain, "App\\Domain\\User"));
        assert!(!engine.can_use(domain, "App\\Infra\\Db"));
        assert!(!engine.can_use(domain, "Vendor\\Lib"));
        assert!(engine.can_use(infra, "App\\Domain\\User"));
        assert!(engine.can_use(infra, "Vendor\\Lib"));
    }
}
