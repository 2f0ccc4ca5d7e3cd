//! Line-oriented extraction of rule blocks from YAML-shaped contract text.
//!
//! Only a narrow subset is understood: one top-level section holding a list of
//! `- id: <name>` blocks, each with a nested list of required substrings.
//! Everything else is skipped, never rejected.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// One named rule with the literal substrings a target must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleBlock {
    pub id: String,
    pub required: Vec<String>,
}

impl RuleBlock {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            required: Vec::new(),
        }
    }

    /// Add a required substring; duplicates keep their first position.
    pub fn require(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !self.required.contains(&value) {
            self.required.push(value);
        }
    }
}

/// Keys recognised by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSyntax {
    /// Top-level key that opens the rule section.
    pub section_key: String,
    /// Block keys whose bullet lists hold required substrings.
    pub list_keys: Vec<String>,
}

impl Default for ContractSyntax {
    fn default() -> Self {
        Self {
            section_key: "contract".to_string(),
            list_keys: vec!["must_contain".to_string(), "required".to_string()],
        }
    }
}

/// Parser position between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Outside the rule section; lines are ignored.
    Outside,
    /// Inside the rule section, before the first block.
    InSection,
    /// Inside a block; `collecting` is set while a required list is open.
    InBlock { collecting: bool },
}

/// Shape of a single contract line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or comment-only line.
    Blank,
    /// `<section_key>:` with nothing after the colon.
    SectionMarker,
    /// Any other bare `identifier:` at column zero.
    TopLevelKey,
    /// `- id: <value>`, carrying the unquoted value (possibly empty).
    BlockMarker(String),
    /// One of the list keys with nothing after the colon.
    ListMarker,
    /// `- <value>`, carrying the unquoted value.
    Bullet(String),
    Other,
}

/// Classify a line against the contract syntax.
pub fn classify_line(line: &str, syntax: &ContractSyntax) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return LineKind::Blank;
    }
    if bare_key(trimmed) == Some(syntax.section_key.as_str()) {
        return LineKind::SectionMarker;
    }
    if is_top_level_key(line) {
        return LineKind::TopLevelKey;
    }
    if let Some(id) = parse_block_marker(line) {
        return LineKind::BlockMarker(id);
    }
    if let Some(key) = bare_key(trimmed) {
        if syntax.list_keys.iter().any(|list_key| list_key == key) {
            return LineKind::ListMarker;
        }
    }
    if let Some(value) = parse_bullet(line) {
        return LineKind::Bullet(value);
    }
    LineKind::Other
}

/// Streaming state machine that turns contract lines into rule blocks.
#[derive(Debug)]
pub struct ContractParser<'a> {
    syntax: &'a ContractSyntax,
    state: ParseState,
    current: Option<RuleBlock>,
    blocks: Vec<RuleBlock>,
}

impl<'a> ContractParser<'a> {
    pub fn new(syntax: &'a ContractSyntax) -> Self {
        Self {
            syntax,
            state: ParseState::Outside,
            current: None,
            blocks: Vec::new(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Blocks flushed so far, excluding the one still open.
    pub fn blocks(&self) -> &[RuleBlock] {
        &self.blocks
    }

    /// Advance the machine by one line.
    pub fn feed(&mut self, line: &str) {
        let kind = classify_line(line, self.syntax);
        match (self.state, kind) {
            (_, LineKind::Blank) => {}
            (_, LineKind::SectionMarker) => {
                self.flush();
                self.state = ParseState::InSection;
            }
            (ParseState::Outside, _) => {}
            (_, LineKind::TopLevelKey) => {
                self.flush();
                self.state = ParseState::Outside;
            }
            (_, LineKind::BlockMarker(id)) => {
                self.flush();
                self.current = Some(RuleBlock::new(id));
                self.state = ParseState::InBlock { collecting: false };
            }
            (ParseState::InBlock { .. }, LineKind::ListMarker) => {
                self.state = ParseState::InBlock { collecting: true };
            }
            (ParseState::InBlock { collecting: true }, LineKind::Bullet(value)) => {
                if let Some(block) = self.current.as_mut() {
                    block.require(value);
                }
            }
            (ParseState::InBlock { collecting: true }, _) => {
                self.state = ParseState::InBlock { collecting: false };
            }
            _ => {}
        }
    }

    /// Flush the open block and return every block in document order.
    pub fn finish(mut self) -> Vec<RuleBlock> {
        self.flush();
        self.blocks
    }

    fn flush(&mut self) {
        if let Some(block) = self.current.take() {
            tracing::debug!(
                event = "rule_block_extracted",
                id = %block.id,
                required = block.required.len()
            );
            self.blocks.push(block);
        }
    }
}

/// Extract rule blocks using the default `contract` / `must_contain` syntax.
pub fn extract_rule_blocks(text: &str) -> Vec<RuleBlock> {
    extract_rule_blocks_with(text, &ContractSyntax::default())
}

/// Extract rule blocks with an explicit syntax.
pub fn extract_rule_blocks_with(text: &str, syntax: &ContractSyntax) -> Vec<RuleBlock> {
    let mut parser = ContractParser::new(syntax);
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}

fn top_level_key_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+\s*:\s*$").ok())
        .as_ref()
}

fn block_marker_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*-\s+id\s*:(?:\s+(.*?))?\s*$").ok())
        .as_ref()
}

fn bullet_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*-\s+(.+?)\s*$").ok())
        .as_ref()
}

fn is_top_level_key(line: &str) -> bool {
    top_level_key_re().is_some_and(|re| re.is_match(line))
}

fn parse_block_marker(line: &str) -> Option<String> {
    let caps = block_marker_re()?.captures(line)?;
    let value = caps.get(1).map_or("", |value| value.as_str());
    Some(unquote(value))
}

fn parse_bullet(line: &str) -> Option<String> {
    let caps = bullet_re()?.captures(line)?;
    Some(unquote(&caps[1]))
}

/// `key:` with nothing after the colon, returning the key.
fn bare_key(trimmed: &str) -> Option<&str> {
    let key = trimmed.strip_suffix(':')?.trim_end();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some(key)
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}
