//! Manifest directive parser
//!
//! Turns manifest text into a list of directives, one per meaningful line.
//! The accepted dialect is the `#pragma link` family plus `#ifdef`-style
//! conditional blocks:
//!
//! ```text
//! #pragma link off all classes;
//! #pragma link C++ class THaVDC+;
//! #pragma link C++ class THaDetMap::Module+;
//! //#pragma link C++ class THaOdata+;
//! #ifdef ONLINE_ET
//! #pragma link C++ class THaOnlRun+;
//! #endif
//! ```
//!
//! Active directives are purely syntactic: their symbol names are validated
//! when the directives are applied to a registry.

use crate::conditional::FeaturePredicate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use xreg_domain::constants::IMPLICIT_VERSION_TAG;
use xreg_domain::{Error, Polarity, PolicyKind, Result, SymbolKind, SymbolName};

static PRAGMA_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*pragma\s+link\s+(?P<polarity>off|C\+\+)\s+(?P<body>.*?)\s*;?\s*$")
        .expect("Invalid regex")
});

static LINK_ALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^all\s+(?P<kind>globals|classes|functions)$").expect("Invalid regex")
});

static LINK_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<kind>global|class|struct|function)\s+(?P<target>\S+)$")
        .expect("Invalid regex")
});

static TARGET_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+?)(?P<plus>\+(?P<version>\d+)?)?(?P<flags>[-!]*)$")
        .expect("Invalid regex")
});

static IFDEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*(?P<test>ifdef|ifndef)\s+(?P<feature>\w+)\s*$").expect("Invalid regex")
});

static IF_DEFINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*if\s+(?P<negate>!\s*)?defined\s*(?:\(\s*(?P<paren>\w+)\s*\)|\s+(?P<bare>\w+))\s*$")
        .expect("Invalid regex")
});

static ELSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*else\b").expect("Invalid regex"));

static ENDIF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*endif\b").expect("Invalid regex"));

/// What a manifest line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `#pragma link off all classes;` and friends
    DefaultPolicy { kind: PolicyKind, polarity: Polarity },
    /// `#pragma link C++ class NAME+;` and friends
    Rule {
        name: String,
        kind: SymbolKind,
        polarity: Polarity,
        version: Option<u32>,
        /// Commented-out directive, kept as declared-but-inactive
        inactive: bool,
    },
    BeginConditional(FeaturePredicate),
    Else,
    EndConditional,
}

/// One directive with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub line: usize,
    pub kind: DirectiveKind,
}

/// Parse a whole manifest
///
/// Comments are removed before parsing, so a directive may share its line
/// with a block comment or follow the end of a multi-line one.
pub fn parse_manifest(content: &str) -> Result<Vec<Directive>> {
    let mut directives = Vec::new();
    let mut in_block_comment = false;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let scanned = scan_comments(raw, &mut in_block_comment);
        if let Some(kind) = parse_scanned(line, &scanned)? {
            directives.push(Directive { line, kind });
        }
    }

    Ok(directives)
}

/// Parse one line on its own
///
/// Returns `None` for blank lines and plain comments. A block comment left
/// open runs to the end of the line.
pub fn parse_line(line: usize, text: &str) -> Result<Option<DirectiveKind>> {
    let mut in_block_comment = false;
    parse_scanned(line, &scan_comments(text, &mut in_block_comment))
}

/// A line with its comments separated out
struct ScannedLine<'a> {
    /// Text outside comments, each block comment replaced by a space
    code: String,
    /// Text after a `//` that is not inside a block comment
    line_comment: Option<&'a str>,
}

fn scan_comments<'a>(raw: &'a str, in_block_comment: &mut bool) -> ScannedLine<'a> {
    let mut code = String::new();
    let mut rest = raw;
    loop {
        if *in_block_comment {
            let Some(end) = rest.find("*/") else {
                return ScannedLine {
                    code,
                    line_comment: None,
                };
            };
            rest = &rest[end + 2..];
            *in_block_comment = false;
            code.push(' ');
            continue;
        }

        match (rest.find("/*"), rest.find("//")) {
            (Some(open), slashes) if slashes.is_none_or(|slashes| open < slashes) => {
                code.push_str(&rest[..open]);
                rest = &rest[open + 2..];
                *in_block_comment = true;
            }
            (_, Some(slashes)) => {
                code.push_str(&rest[..slashes]);
                return ScannedLine {
                    code,
                    line_comment: Some(&rest[slashes + 2..]),
                };
            }
            _ => {
                code.push_str(rest);
                return ScannedLine {
                    code,
                    line_comment: None,
                };
            }
        }
    }
}

fn parse_scanned(line: usize, scanned: &ScannedLine<'_>) -> Result<Option<DirectiveKind>> {
    let text = scanned.code.trim();
    if text.is_empty() {
        return Ok(scanned
            .line_comment
            .and_then(|commented| parse_commented(line, commented)));
    }

    if !text.starts_with('#') {
        return Err(Error::syntax(line, format!("expected a directive, found '{text}'")));
    }

    if let Some(captures) = PRAGMA_LINK.captures(text) {
        let polarity = match &captures["polarity"] {
            "off" => Polarity::Hide,
            _ => Polarity::Expose,
        };
        return parse_link_body(line, &captures["body"], polarity, false).map(Some);
    }

    parse_conditional(text)
        .map(Some)
        .ok_or_else(|| Error::syntax(line, format!("unsupported directive '{text}'")))
}

/// Commented-out link rule, kept as inactive
///
/// Commented text never fails a load: anything that is not a well-formed
/// rule with a valid symbol name is ignored like any other comment.
fn parse_commented(line: usize, commented: &str) -> Option<DirectiveKind> {
    let mut in_block_comment = false;
    let scanned = scan_comments(commented, &mut in_block_comment);
    let captures = PRAGMA_LINK.captures(scanned.code.trim())?;
    let polarity = match &captures["polarity"] {
        "off" => Polarity::Hide,
        _ => Polarity::Expose,
    };
    match parse_link_body(line, &captures["body"], polarity, true) {
        Ok(DirectiveKind::Rule { ref name, .. }) if SymbolName::parse(name).is_err() => {
            debug!(line, name = %name, "Ignoring commented-out rule with malformed name");
            None
        }
        Ok(rule @ DirectiveKind::Rule { .. }) => Some(rule),
        _ => None,
    }
}

fn parse_link_body(
    line: usize,
    body: &str,
    polarity: Polarity,
    inactive: bool,
) -> Result<DirectiveKind> {
    if let Some(captures) = LINK_ALL.captures(body) {
        let kind: PolicyKind = captures["kind"].parse()?;
        return Ok(DirectiveKind::DefaultPolicy { kind, polarity });
    }

    let captures = LINK_ITEM
        .captures(body)
        .ok_or_else(|| Error::syntax(line, format!("unsupported link target '{body}'")))?;
    let kind = match &captures["kind"] {
        "global" => SymbolKind::GlobalObject,
        "function" => SymbolKind::FreeFunction,
        _ => SymbolKind::Class,
    };
    let (name, version) = split_target(line, &captures["target"])?;

    Ok(DirectiveKind::Rule {
        name,
        kind,
        polarity,
        version,
        inactive,
    })
}

/// Split `NAME+N` into the name and its version tag
fn split_target(line: usize, target: &str) -> Result<(String, Option<u32>)> {
    let captures = TARGET_SUFFIX
        .captures(target)
        .ok_or_else(|| Error::syntax(line, format!("invalid link target '{target}'")))?;

    let version = match (captures.name("plus"), captures.name("version")) {
        (_, Some(digits)) => Some(digits.as_str().parse::<u32>().map_err(|_| {
            Error::syntax(line, format!("version tag '{}' out of range", digits.as_str()))
        })?),
        (Some(_), None) => Some(IMPLICIT_VERSION_TAG),
        (None, None) => None,
    };

    Ok((captures["name"].to_string(), version))
}

fn parse_conditional(text: &str) -> Option<DirectiveKind> {
    if let Some(captures) = IFDEF.captures(text) {
        let feature = &captures["feature"];
        let predicate = match &captures["test"] {
            "ifdef" => FeaturePredicate::defined(feature),
            _ => FeaturePredicate::not_defined(feature),
        };
        return Some(DirectiveKind::BeginConditional(predicate));
    }

    if let Some(captures) = IF_DEFINED.captures(text) {
        let feature = captures
            .name("paren")
            .or_else(|| captures.name("bare"))?
            .as_str();
        let predicate = if captures.name("negate").is_some() {
            FeaturePredicate::not_defined(feature)
        } else {
            FeaturePredicate::defined(feature)
        };
        return Some(DirectiveKind::BeginConditional(predicate));
    }

    if ELSE.is_match(text) {
        return Some(DirectiveKind::Else);
    }
    if ENDIF.is_match(text) {
        return Some(DirectiveKind::EndConditional);
    }
    None
}
