use regex::Regex;
use std::sync::LazyLock;

/// `<type>[(<scope>)][!]: <description>`, whitespace tolerated around every part.
/// The type may contain inner whitespace but no `:`, `(`, `)` or `!`.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^\s:()!][^:()!]*?)\s*(?:\(([^:()]*)\))?\s*(!)?\s*:\s*(.*?)\s*$")
        .expect("header regex is valid")
});

/// `<token>: <value>` or `<token> #<value>`. Tokens are ASCII word characters and
/// hyphens; `BREAKING CHANGE` is the one token allowed a space.
static FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?i-u:BREAKING CHANGE)|(?-u:[\w-])+)(?:(:)[ \t]*|[ \t]+(#))(.*)$")
        .expect("footer regex is valid")
});

const COMPLETES_INITIAL_DEVELOPMENT: [&str; 2] =
    ["COMPLETES INITIAL DEVELOPMENT", "COMPLETES-INITIAL-DEVELOPMENT"];

/// Coarse classification of the commit type used for bump decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Feat,
    Fix,
    Chore,
    Other,
}

impl TypeKind {
    /// Exact, case-sensitive match on the type: `Feat` is `Other`
    pub fn classify(commit_type: &str) -> Self {
        match commit_type {
            "feat" | "feature" => TypeKind::Feat,
            "fix" => TypeKind::Fix,
            "chore" => TypeKind::Chore,
            _ => TypeKind::Other,
        }
    }
}

/// How a footer token was separated from its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FooterSeparator {
    /// `Token: value`
    Colon,
    /// `Token #value`
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Footer {
    pub token: String,
    pub separator: FooterSeparator,
    pub value: String,
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommitMessage {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub body: Option<String>,
    pub footers: Vec<Footer>,
    pub breaking_change: Option<String>,
    pub completes_initial_development: bool,
    pub type_kind: TypeKind,
}

impl ParsedCommitMessage {
    /// Parse a commit message according to conventional commits.
    ///
    /// Returns `None` when the header does not have the
    /// `type(scope): description` shape. Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    ///
    /// CRLF line endings are normalized to LF first, so a body written with
    /// Windows line endings comes back with LF separators.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.replace("\r\n", "\n");
        let (header, rest) = match normalized.split_once('\n') {
            Some((header, rest)) => (header, rest),
            None => (normalized.as_str(), ""),
        };

        let captures = HEADER_RE.captures(header)?;
        let r#type = captures[1].trim_end().to_string();
        let scope = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let has_exclamation = captures.get(3).is_some();
        let description = captures[4].to_string();
        if description.is_empty() {
            return None;
        }

        let sections = split_sections(rest);

        let mut breaking_change = None;
        let mut footers = Vec::new();
        for footer in sections.footers {
            if is_breaking_change_token(&footer.token) {
                // Later BREAKING CHANGE footers are ignored; the first one describes the break
                if breaking_change.is_none() {
                    breaking_change = Some(footer.value);
                }
            } else {
                footers.push(footer);
            }
        }
        if breaking_change.is_none() && has_exclamation {
            breaking_change = Some(description.clone());
        }

        let type_kind = TypeKind::classify(&r#type);
        Some(ParsedCommitMessage {
            r#type,
            scope,
            description,
            body: sections.body,
            footers,
            breaking_change,
            completes_initial_development: sections.completes_initial_development,
            type_kind,
        })
    }

    pub fn is_breaking_change(&self) -> bool {
        self.breaking_change.is_some()
    }
}

fn is_breaking_change_token(token: &str) -> bool {
    token.eq_ignore_ascii_case("BREAKING CHANGE") || token.eq_ignore_ascii_case("BREAKING-CHANGE")
}

fn is_completes_initial_development(text: &str) -> bool {
    COMPLETES_INITIAL_DEVELOPMENT.contains(&text.trim())
}

#[derive(Debug, Default)]
struct Sections {
    body: Option<String>,
    footers: Vec<Footer>,
    completes_initial_development: bool,
}

/// Split everything after the header into body paragraphs and footers.
///
/// The body ends at the first paragraph whose first line looks like a footer.
/// From there on, lines starting with a footer token open a new footer and
/// anything else continues the previous one.
fn split_sections(rest: &str) -> Sections {
    let mut sections = Sections::default();
    let mut body_paragraphs: Vec<String> = Vec::new();
    let mut in_footers = false;

    for paragraph in paragraphs(rest) {
        if is_completes_initial_development(&paragraph) {
            sections.completes_initial_development = true;
            continue;
        }

        if !in_footers {
            let opens_footer = paragraph
                .lines()
                .next()
                .is_some_and(|line| FOOTER_RE.is_match(line));
            if !opens_footer {
                body_paragraphs.push(paragraph);
                continue;
            }
            in_footers = true;
        }

        let mut first_line = true;
        for line in paragraph.lines() {
            if is_completes_initial_development(line) {
                sections.completes_initial_development = true;
                continue;
            }

            if let Some(captures) = FOOTER_RE.captures(line) {
                let separator = if captures.get(2).is_some() {
                    FooterSeparator::Colon
                } else {
                    FooterSeparator::Hash
                };
                sections.footers.push(Footer {
                    token: captures[1].to_string(),
                    separator,
                    value: captures[4].trim_end().to_string(),
                });
            } else if let Some(last) = sections.footers.last_mut() {
                let joiner = if first_line { "\n\n" } else { "\n" };
                if last.value.is_empty() {
                    last.value.push_str(line.trim_end());
                } else {
                    last.value.push_str(joiner);
                    last.value.push_str(line.trim_end());
                }
            }
            first_line = false;
        }
    }

    if !body_paragraphs.is_empty() {
        sections.body = Some(body_paragraphs.join("\n\n"));
    }
    sections
}

/// Blank-line separated paragraphs, each trimmed of surrounding blank lines
fn paragraphs(text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                result.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        result.push(current.join("\n"));
    }
    result
}
