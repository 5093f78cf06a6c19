//! Validates the fixture project under `tests/fixtures/layered`.

use std::fs;
use std::path::{Path, PathBuf};

use arch_enforcer_core::{validate, Analyzer, Config, ConfigFormat, ScanResult};
use arch_enforcer_php::{PhpBuiltins, PhpExtractor};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/layered")
}

fn collect_php(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_php(&path, out);
        } else if path.extension().is_some_and(|e| e == "php") {
            out.push(path);
        }
    }
}

fn scan(config: &Config) -> ScanResult {
    let analyzer = Analyzer::builder()
        .architecture(config.architecture().unwrap().clone())
        .extractor(PhpExtractor::new())
        .builtins(PhpBuiltins::new().with_symbols(&config.builtins))
        .build()
        .unwrap();

    let mut files = Vec::new();
    collect_php(&fixture_root().join("src"), &mut files);
    files.sort();

    analyzer.analyze(
        files
            .into_iter()
            .map(|path| {
                let source = fs::read_to_string(&path).unwrap();
                (path, source)
            }),
    )
}

#[test]
fn reports_only_the_forbidden_layer_reference() {
    let config = Config::from_file(&fixture_root().join("architecture.toml")).unwrap();
    let result = scan(&config);

    assert_eq!(result.scanned(), 5);
    assert_eq!(result.issues(), 1);
    assert_eq!(result.failed(), 1);

    let violation = result.violations().next().unwrap();
    assert_eq!(violation.location.line, 7);
    assert!(violation.location.file.ends_with("LayerA/Service.php"));
    assert_eq!(
        violation.message(),
        "Test\\LayerA\\Service:7 cannot use Test\\LayerC\\StatementC"
    );
}

#[test]
fn file_without_namespace_is_never_reported() {
    let config = Config::from_file(&fixture_root().join("architecture.toml")).unwrap();
    let result = scan(&config);

    let bootstrap = result
        .files
        .iter()
        .find(|f| f.path.ends_with("bootstrap.php"))
        .unwrap();
    assert!(bootstrap.is_ok());
    assert_eq!(bootstrap.subject, "bootstrap.php");
}

#[test]
fn strict_layer_allows_runtime_builtins_only() {
    let config = Config::parse(
        r#"
[architecture]
'Test\LayerA' = ['Test\LayerB']
'Test\LayerB' = []
'Test\LayerC' = ['Test\LayerC']
"#,
        ConfigFormat::Toml,
    )
    .unwrap();
    let result = scan(&config);

    // StatementC extends \RuntimeException, which the runtime provides.
    let layer_c = result
        .files
        .iter()
        .find(|f| f.subject == "Test\\LayerC\\StatementC")
        .unwrap();
    assert!(layer_c.is_ok());
    assert_eq!(result.issues(), 1);
}

#[test]
fn strict_layer_rejects_unknown_external_class() {
    let config = Config::parse(
        r#"{"architecture": {"Test\\LayerB": ["Test\\LayerB"], "Test\\LayerC": ["Test\\LayerC"]}}"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let analyzer = Analyzer::builder()
        .architecture(config.architecture().unwrap().clone())
        .extractor(PhpExtractor::new())
        .builtins(PhpBuiltins::new())
        .build()
        .unwrap();

    let report = analyzer.analyze_source(
        "src/LayerC/Mailer.php",
        "<?php\nnamespace Test\\LayerC;\n\nuse Vendor\\Mail\\Transport;\n\nclass Mailer extends \\Exception {}\n",
    );
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].namespace, "Vendor\\Mail\\Transport");
    assert_eq!(report.violations[0].location.line, 4);
}

#[test]
fn layer_directories_satisfy_purity() {
    let config = Config::from_file(&fixture_root().join("architecture.toml")).unwrap();
    let architecture = config.architecture().unwrap();

    validate::check_purity(
        architecture,
        &fixture_root().join("src"),
        config.root_namespace.as_deref(),
    )
    .unwrap();
    validate::check_circular(architecture).unwrap();
}

#[test]
fn strict_layer_allows_namespaced_runtime_classes() {
    let config = Config::parse(
        r#"{"architecture": {"Test\\LayerC": ["Test\\LayerC"]}}"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let analyzer = Analyzer::builder()
        .architecture(config.architecture().unwrap().clone())
        .extractor(PhpExtractor::new())
        .builtins(PhpBuiltins::new())
        .build()
        .unwrap();

    let report = analyzer.analyze_source(
        "src/LayerC/Dice.php",
        "<?php\nnamespace Test\\LayerC;\n\nuse Random\\Randomizer;\nuse Random\\Engine\\Mt19937;\n\n$label = \"rolled {$this->roll(\\Vendor\\Dice::SIDES)}\";\n",
    );
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].namespace, "Vendor\\Dice");
    assert_eq!(report.violations[0].location.line, 7);
}
