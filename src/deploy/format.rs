//! Pure format predicates used by the validation rules.
//!
//! None of these perform I/O: DNS names are checked syntactically, PEM
//! blocks structurally, and subnet ranges only for joint presence.

use std::net::IpAddr;
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

static WORKER_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^m5$|^m5a$|^m4$").expect("valid regex"));

// Unanchored: a tag passes if it contains a `key=value` pair anywhere.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\w)+=(?-u:\w)+").expect("valid regex"));

static GITHUB_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9][a-zA-Z0-9-]*$").expect("valid regex"));

static GITHUB_TEAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9-]+$").expect("valid regex"));

static DNS_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62}(\.[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})*[._]?$")
        .expect("valid regex")
});

const MAX_DNS_NAME_LEN: usize = 255;

/// Returns `true` if `value` is exactly one of `allowed` (case-sensitive).
#[must_use]
pub fn is_member(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

/// Returns `true` if `value` is a supported AWS worker instance family.
#[must_use]
pub fn is_worker_type(value: &str) -> bool {
    WORKER_TYPE_RE.is_match(value)
}

/// Returns `true` if `tag` contains a `key=value` pair of word characters.
#[must_use]
pub fn is_tag(tag: &str) -> bool {
    TAG_RE.is_match(tag)
}

/// Returns `true` if `name` is a plausible GitHub user or organization name.
#[must_use]
pub fn is_github_name(name: &str) -> bool {
    GITHUB_NAME_RE.is_match(name)
}

/// Returns `true` if `name` is a plausible GitHub team slug.
#[must_use]
pub fn is_github_team(name: &str) -> bool {
    GITHUB_TEAM_RE.is_match(name)
}

/// Returns `true` if `host` is a syntactically valid DNS name.
///
/// IP literals and values carrying a scheme (`https://...`) are rejected.
#[must_use]
pub fn is_dns_name(host: &str) -> bool {
    if host.is_empty() || host.chars().filter(|c| *c != '.').count() > MAX_DNS_NAME_LEN {
        return false;
    }

    host.parse::<IpAddr>().is_err() && DNS_NAME_RE.is_match(host)
}

/// A structurally decoded PEM block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    /// Label from the `BEGIN` line, e.g. `CERTIFICATE`
    pub label: String,
    /// Decoded body bytes
    pub contents: Vec<u8>,
}

/// Returns `true` if `input` contains at least one decodable PEM block.
#[must_use]
pub fn is_pem_decodable(input: &str) -> bool {
    decode_pem(input).is_some()
}

/// Decodes the first well-formed PEM block in `input`.
///
/// A block starts with `-----BEGIN <label>-----` at the start of a line and
/// ends with the matching `-----END <label>-----` on a line of its own.
/// Leading `Key: Value` header lines are skipped up to the first line
/// without a colon. Malformed blocks are skipped.
#[must_use]
pub fn decode_pem(input: &str) -> Option<PemBlock> {
    let mut rest = input;
    loop {
        let start = find_pem_begin(rest)?;
        rest = &rest[start + PEM_BEGIN.len()..];

        let (type_line, after_type) = split_line(rest);
        let Some(label) = type_line.strip_suffix(PEM_DASHES) else {
            continue;
        };

        if let Some(contents) = decode_pem_block(label, after_type) {
            return Some(PemBlock {
                label: label.to_string(),
                contents,
            });
        }
    }
}

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_END: &str = "\n-----END ";
const PEM_DASHES: &str = "-----";

fn find_pem_begin(data: &str) -> Option<usize> {
    if data.starts_with(PEM_BEGIN) {
        return Some(0);
    }
    data.find("\n-----BEGIN ").map(|i| i + 1)
}

// Splits off one line, dropping trailing spaces, tabs and `\r`.
fn split_line(data: &str) -> (&str, &str) {
    let (line, rest) = data.split_once('\n').unwrap_or((data, ""));
    (line.trim_end_matches([' ', '\t', '\r']), rest)
}

fn decode_pem_block(label: &str, mut rest: &str) -> Option<Vec<u8>> {
    let mut has_headers = false;
    loop {
        if rest.is_empty() {
            return None;
        }
        let (line, next) = split_line(rest);
        if !line.contains(':') {
            break;
        }
        has_headers = true;
        rest = next;
    }

    // Without headers the END line may follow the BEGIN line directly.
    let (body_end, trailer_start) = if !has_headers && rest.starts_with(&PEM_END[1..]) {
        (0, PEM_END.len() - 1)
    } else {
        let index = rest.find(PEM_END)?;
        (index, index + PEM_END.len())
    };

    let trailer = rest[trailer_start..]
        .strip_prefix(label)?
        .strip_prefix(PEM_DASHES)?;
    if !split_line(trailer).0.is_empty() {
        return None;
    }

    let encoded: String = rest[..body_end]
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .collect();
    STANDARD.decode(encoded).ok()
}

/// Checks that a pair of ranges is either both present or both absent.
///
/// Returns the keys of the present and missing halves when only one is
/// given. Range syntax and overlap are not checked.
#[must_use]
pub fn missing_pair_half<T>(first: (T, &str), second: (T, &str)) -> Option<(T, T)> {
    match (first.1.is_empty(), second.1.is_empty()) {
        (false, true) => Some((first.0, second.0)),
        (true, false) => Some((second.0, first.0)),
        _ => None,
    }
}
