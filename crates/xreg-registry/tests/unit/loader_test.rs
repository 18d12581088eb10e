//! Tests for the manifest loader

use tempfile::TempDir;
use xreg_domain::{Error, Resolution};
use xreg_registry::{FeatureSet, ManifestLoader, RegistryOptions};

#[test]
fn test_load_str_and_finalize() {
    let manifest = "\
#pragma link off all globals;
#pragma link off all classes;
#pragma link C++ global gHaVars;
#pragma link C++ class THaVar+;
//#pragma link C++ class THaOdata+;
";
    let mut registry = ManifestLoader::new().load_str(manifest).unwrap();
    let effective = registry.finalize(&FeatureSet::new()).unwrap();

    assert!(effective.is_exposed("gHaVars").unwrap().visible);
    assert_eq!(effective.is_exposed("THaVar").unwrap().version, 1);
    assert_eq!(
        effective.is_exposed("THaOdata").unwrap().resolution,
        Resolution::Suppressed
    );
    assert_eq!(effective.lookup("THaVar").unwrap().provenance.line, Some(4));
}

#[test]
fn test_else_branch_negates_predicate() {
    let manifest = "\
#ifdef ONLINE_ET
#pragma link C++ class THaOnlRun+;
#else
#pragma link C++ class THaOfflineRun+;
#endif
";
    let loader = ManifestLoader::new();

    let mut online = loader.load_str(manifest).unwrap();
    let online = online
        .finalize(&FeatureSet::from_iter(["ONLINE_ET"]))
        .unwrap();
    assert!(online.is_exposed("THaOnlRun").unwrap().visible);
    assert!(!online.is_exposed("THaOfflineRun").unwrap().visible);

    let mut offline = loader.load_str(manifest).unwrap();
    let offline = offline.finalize(&FeatureSet::new()).unwrap();
    assert!(!offline.is_exposed("THaOnlRun").unwrap().visible);
    assert!(offline.is_exposed("THaOfflineRun").unwrap().visible);
}

#[test]
fn test_duplicate_else_is_rejected() {
    let manifest = "#ifdef A\n#else\n#else\n#endif\n";
    match ManifestLoader::new().load_str(manifest) {
        Err(Error::ManifestSyntax { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected ManifestSyntax, got {other:?}"),
    }
}

#[test]
fn test_stray_endif_reports_line() {
    let manifest = "#pragma link C++ class THaVar+;\n#endif\n";
    match ManifestLoader::new().load_str(manifest) {
        Err(Error::UnmatchedEndConditional { line }) => assert_eq!(line, Some(2)),
        other => panic!("Expected UnmatchedEndConditional, got {other:?}"),
    }
}

#[test]
fn test_unterminated_block_reports_opening_line() {
    let manifest = "#pragma link off all classes;\n#ifdef ONLINE_ET\n#pragma link C++ class THaOnlRun+;\n";
    let mut registry = ManifestLoader::new().load_str(manifest).unwrap();
    match registry.finalize(&FeatureSet::new()) {
        Err(Error::UnterminatedConditionalBlock { line, .. }) => assert_eq!(line, Some(2)),
        other => panic!("Expected UnterminatedConditionalBlock, got {other:?}"),
    }
}

#[test]
fn test_malformed_symbol_reports_line() {
    let manifest = "#pragma link off all classes;\n#pragma link C++ class THaDetMap::+;\n";
    let error = ManifestLoader::new().load_str(manifest).unwrap_err();
    assert_eq!(error.line(), Some(2));
    match error.root() {
        Error::MalformedSymbolName { name, .. } => assert_eq!(name, "THaDetMap::"),
        other => panic!("Expected MalformedSymbolName, got {other:?}"),
    }
}

#[test]
fn test_load_file_labels_provenance() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("LinkDef.h");
    std::fs::write(&path, "#pragma link C++ class THaVDC+;\n").unwrap();

    let mut registry = ManifestLoader::new().load_file(&path).unwrap();
    let effective = registry.finalize(&FeatureSet::new()).unwrap();
    let provenance = &effective.lookup("THaVDC").unwrap().provenance;
    assert_eq!(provenance.source.as_deref(), Some(path.display().to_string().as_str()));
    assert_eq!(provenance.line, Some(1));
}

#[test]
fn test_load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = ManifestLoader::new().load_file(&temp_dir.path().join("missing.h"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_loader_passes_options() {
    let manifest = "#pragma link C++ class THaTrack+4;\n#pragma link C++ class THaTrack+2;\n";
    let mut registry = ManifestLoader::new()
        .with_options(RegistryOptions {
            strict_versions: true,
        })
        .load_str(manifest)
        .unwrap();
    match registry.finalize(&FeatureSet::new()) {
        Err(Error::VersionRegression { line, .. }) => assert_eq!(line, Some(2)),
        other => panic!("Expected VersionRegression, got {other:?}"),
    }
}

#[test]
fn test_rule_sharing_line_with_block_comment_is_applied() {
    let manifest = "\
#pragma link off all classes;
/* legacy */ #pragma link C++ class THaVDC+;
/* start
 end */ #pragma link C++ class THaCut+;
";
    let mut registry = ManifestLoader::new().load_str(manifest).unwrap();
    let effective = registry.finalize(&FeatureSet::new()).unwrap();

    assert_eq!(effective.len(), 2);
    assert!(effective.is_exposed("THaVDC").unwrap().visible);
    assert_eq!(effective.lookup("THaCut").unwrap().provenance.line, Some(4));
}

#[test]
fn test_malformed_commented_rule_does_not_abort_load() {
    let manifest = "\
#pragma link C++ class THaDetMap+;
//#pragma link C++ class THaDetMap::;
";
    let mut registry = ManifestLoader::new().load_str(manifest).unwrap();
    let effective = registry.finalize(&FeatureSet::new()).unwrap();

    assert!(effective.inactive_declarations().is_empty());
    assert!(effective.is_exposed("THaDetMap").unwrap().visible);
}
