//! Tests for the manifest directive parser

use xreg_domain::{Error, Polarity, PolicyKind, SymbolKind};
use xreg_registry::manifest::parse_line;
use xreg_registry::{DirectiveKind, FeaturePredicate, parse_manifest};

fn rule(line: &str) -> (String, SymbolKind, Polarity, Option<u32>, bool) {
    match parse_line(1, line).unwrap() {
        Some(DirectiveKind::Rule {
            name,
            kind,
            polarity,
            version,
            inactive,
        }) => (name, kind, polarity, version, inactive),
        other => panic!("Expected rule for {line:?}, got {other:?}"),
    }
}

#[test]
fn test_default_policy_lines() {
    assert_eq!(
        parse_line(1, "#pragma link off all globals;").unwrap(),
        Some(DirectiveKind::DefaultPolicy {
            kind: PolicyKind::Global,
            polarity: Polarity::Hide
        })
    );
    assert_eq!(
        parse_line(1, "#pragma link C++ all functions;").unwrap(),
        Some(DirectiveKind::DefaultPolicy {
            kind: PolicyKind::Function,
            polarity: Polarity::Expose
        })
    );
}

#[test]
fn test_class_with_version_suffixes() {
    assert_eq!(
        rule("#pragma link C++ class THaVar+;"),
        ("THaVar".into(), SymbolKind::Class, Polarity::Expose, Some(1), false)
    );
    assert_eq!(
        rule("#pragma link C++ class THaTrack+3;"),
        ("THaTrack".into(), SymbolKind::Class, Polarity::Expose, Some(3), false)
    );
    assert_eq!(
        rule("#pragma link C++ class THaEvent;"),
        ("THaEvent".into(), SymbolKind::Class, Polarity::Expose, None, false)
    );
    assert_eq!(
        rule("#pragma link C++ class THaRaw-!"),
        ("THaRaw".into(), SymbolKind::Class, Polarity::Expose, None, false)
    );
}

#[test]
fn test_nested_global_and_function_targets() {
    assert_eq!(
        rule("#pragma link C++ class THaDetMap::Module+;").0,
        "THaDetMap::Module"
    );
    assert_eq!(
        rule("#pragma link C++ global gHaVars;"),
        ("gHaVars".into(), SymbolKind::GlobalObject, Polarity::Expose, None, false)
    );
    assert_eq!(
        rule("#pragma link off function compute;"),
        ("compute".into(), SymbolKind::FreeFunction, Polarity::Hide, None, false)
    );
}

#[test]
fn test_commented_directive_is_inactive() {
    assert_eq!(
        rule("//#pragma link C++ class THaOdata+;"),
        ("THaOdata".into(), SymbolKind::Class, Polarity::Expose, Some(1), true)
    );
    assert_eq!(parse_line(1, "// just a note").unwrap(), None);
    assert_eq!(parse_line(1, "//#pragma link off all classes;").unwrap(), None);
}

#[test]
fn test_trailing_comment_is_ignored() {
    assert_eq!(
        rule("#pragma link C++ class THaVDC+;   // drift chambers").0,
        "THaVDC"
    );
}

#[test]
fn test_conditional_lines() {
    assert_eq!(
        parse_line(1, "#ifdef ONLINE_ET").unwrap(),
        Some(DirectiveKind::BeginConditional(FeaturePredicate::defined(
            "ONLINE_ET"
        )))
    );
    assert_eq!(
        parse_line(1, "#ifndef __CINT__").unwrap(),
        Some(DirectiveKind::BeginConditional(
            FeaturePredicate::not_defined("__CINT__")
        ))
    );
    assert_eq!(
        parse_line(1, "#if !defined(ONLINE_ET)").unwrap(),
        Some(DirectiveKind::BeginConditional(
            FeaturePredicate::not_defined("ONLINE_ET")
        ))
    );
    assert_eq!(
        parse_line(1, "#if defined HAS_EPICS").unwrap(),
        Some(DirectiveKind::BeginConditional(FeaturePredicate::defined(
            "HAS_EPICS"
        )))
    );
    assert_eq!(parse_line(1, "#else").unwrap(), Some(DirectiveKind::Else));
    assert_eq!(
        parse_line(1, "#endif // __CINT__").unwrap(),
        Some(DirectiveKind::EndConditional)
    );
}

#[test]
fn test_unsupported_lines_are_syntax_errors() {
    for line in [
        "#include \"THaVar.h\"",
        "#pragma link C++ namespace Podd;",
        "#pragma link C++ class;",
        "class THaVar;",
    ] {
        match parse_line(7, line) {
            Err(Error::ManifestSyntax { line: 7, .. }) => {}
            other => panic!("Expected syntax error for {line:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_manifest_lines_and_block_comments() {
    let manifest = "\
/* Exposure manifest
   #pragma link C++ class Hidden+;
*/
#pragma link off all classes;

#pragma link C++ class THaVar+;
/* one-liner */
#pragma link C++ class THaCut+;
";
    let directives = parse_manifest(manifest).unwrap();
    let lines: Vec<usize> = directives.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![4, 6, 8]);
}

#[test]
fn test_directive_after_one_line_block_comment() {
    assert_eq!(
        rule("/* x */ #pragma link C++ class THaVDC+;").0,
        "THaVDC"
    );

    let directives = parse_manifest("/* legacy */ #pragma link C++ class THaVDC+;\n").unwrap();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].line, 1);
}

#[test]
fn test_directive_after_multi_line_block_comment_closes() {
    let directives = parse_manifest("/* a\n b */ #pragma link C++ class THaVDC+;\n").unwrap();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].line, 2);
    assert!(matches!(
        &directives[0].kind,
        DirectiveKind::Rule { name, inactive: false, .. } if name == "THaVDC"
    ));
}

#[test]
fn test_trailing_block_comment_is_ignored() {
    assert_eq!(
        rule("#pragma link C++ class THaVDC+; /* note */").0,
        "THaVDC"
    );
    assert_eq!(
        parse_line(1, "#ifdef __CINT__ /* dictionary build */").unwrap(),
        Some(DirectiveKind::BeginConditional(FeaturePredicate::defined(
            "__CINT__"
        )))
    );
    assert_eq!(
        rule("#pragma link C++ class /* drift */ THaVDC+;").0,
        "THaVDC"
    );
}

#[test]
fn test_text_outside_block_comment_is_still_checked() {
    match parse_manifest("/* a\n b */ class THaVDC;\n") {
        Err(Error::ManifestSyntax { line: 2, .. }) => {}
        other => panic!("Expected syntax error on line 2, got {other:?}"),
    }
}

#[test]
fn test_line_comment_does_not_open_block_comment() {
    let directives = parse_manifest("// see /* legacy\n#pragma link C++ class THaVDC+;\n").unwrap();
    assert_eq!(directives.len(), 1);
    assert_eq!(directives[0].line, 2);
}

#[test]
fn test_malformed_commented_rules_are_ignored() {
    assert_eq!(parse_line(1, "//#pragma link C++ class THaDetMap::;").unwrap(), None);
    assert_eq!(parse_line(1, "//#pragma link C++ class A B;").unwrap(), None);
    assert_eq!(
        rule("//#pragma link C++ class THaScalerKey+; /* old */"),
        ("THaScalerKey".into(), SymbolKind::Class, Polarity::Expose, Some(1), true)
    );
}
