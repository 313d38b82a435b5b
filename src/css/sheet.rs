//! Style sheets
//!
//! Splits style-sheet text into top-level rule blocks and builds [`CssRule`] values from them.
//! Grouping at-rules are flattened into the outer rule list; at-rules without a rule kind here
//! (`@import`, `@keyframes`, ...) are skipped. A rule body the tokenizer rejects leaves that rule
//! with an empty block; only unbalanced braces or strings fail the whole sheet.

use crate::css::rule::CssRule;
use crate::css::tokenizer::{CssTokenizer, DeclarationTokenizer, strip_comments};
use crate::error::{DomError, Result};
use std::fmt;

const GROUPING_AT_RULES: &[&str] = &["media", "supports", "layer"];

/// `prelude { body }` as found in the text
#[derive(Debug, PartialEq)]
struct Block<'a> {
    prelude: &'a str,
    body: &'a str,
}

/// Ordered list of rules parsed from a style sheet
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: Vec<CssRule>,
}

impl StyleSheet {
    /// Empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` with the default declaration tokenizer
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &CssTokenizer)
    }

    /// Parse `text`, tokenizing rule bodies with `tokenizer`
    pub fn parse_with(text: &str, tokenizer: &dyn DeclarationTokenizer) -> Result<Self> {
        let sanitized = strip_comments(text);
        let mut sheet = Self::new();
        sheet.collect_rules(&sanitized, tokenizer)?;
        Ok(sheet)
    }

    fn collect_rules(&mut self, text: &str, tokenizer: &dyn DeclarationTokenizer) -> Result<()> {
        for block in split_blocks(text)? {
            let Some(at_rule) = block.prelude.strip_prefix('@') else {
                let selector = block.prelude.split_whitespace().collect::<Vec<_>>().join(" ");
                let rule = CssRule::style_rule(selector);
                self.push_with_body(rule, block.body, tokenizer);
                continue;
            };

            let (keyword, rest) = at_rule
                .split_once(char::is_whitespace)
                .unwrap_or((at_rule, ""));
            let keyword = keyword.to_ascii_lowercase();

            match keyword.as_str() {
                "font-face" => self.push_with_body(CssRule::font_face(), block.body, tokenizer),
                "page" => self.push_with_body(CssRule::page(rest.trim()), block.body, tokenizer),
                k if GROUPING_AT_RULES.contains(&k) => self.collect_rules(block.body, tokenizer)?,
                _ => log::debug!("Skipping unsupported at-rule @{}", keyword),
            }
        }

        Ok(())
    }

    fn push_with_body(
        &mut self,
        mut rule: CssRule,
        body: &str,
        tokenizer: &dyn DeclarationTokenizer,
    ) {
        match tokenizer.tokenize(body) {
            Ok(properties) => {
                for property in properties {
                    rule.append_property(property);
                }
            }
            Err(e) => log::warn!("Dropping declarations of {:?}: {}", rule.to_css(), e),
        }
        self.rules.push(rule);
    }

    /// Append a rule
    pub fn push(&mut self, rule: CssRule) {
        self.rules.push(rule);
    }

    /// Rules in source order
    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut [CssRule] {
        &mut self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// One serialized rule per line
    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .map(CssRule::to_css)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Split `text` into top-level blocks, dropping block-less statements such as `@import x;`
fn split_blocks(text: &str) -> Result<Vec<Block<'_>>> {
    let mut blocks = Vec::new();
    let mut quote: Option<u8> = None;
    let mut escape = false;
    let mut depth = 0usize;
    let mut start = 0;
    let mut body_start = 0;

    for (idx, &byte) in text.as_bytes().iter().enumerate() {
        if escape {
            escape = false;
            continue;
        }
        if byte == b'\\' {
            escape = true;
            continue;
        }

        if let Some(open) = quote {
            if byte == open {
                quote = None;
            }
            continue;
        }

        match byte {
            b'\'' | b'"' => quote = Some(byte),
            b'{' => {
                if depth == 0 {
                    body_start = idx + 1;
                }
                depth += 1;
            }
            b'}' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    DomError::Syntax(format!("unexpected '}}' at offset {idx}"))
                })?;
                if depth == 0 {
                    blocks.push(Block {
                        prelude: text[start..body_start - 1].trim(),
                        body: &text[body_start..idx],
                    });
                    start = idx + 1;
                }
            }
            b';' if depth == 0 => {
                log::debug!("Skipping statement {:?}", text[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }

    if quote.is_some() {
        return Err(DomError::Syntax("unterminated string".to_string()));
    }
    if depth > 0 {
        return Err(DomError::Syntax("missing '}'".to_string()));
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::rule::RuleKind;

    #[test]
    fn test_split_blocks() {
        let blocks = split_blocks("@import url(a.css); p { color: red } a{b:'}'}").unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], Block { prelude: "p", body: " color: red " });
        assert_eq!(blocks[1], Block { prelude: "a", body: "b:'}'" });
    }

    #[test]
    fn test_parse_rule_kinds() {
        let mut sheet = StyleSheet::parse(
            "@font-face { font-family: Mono; src: url(mono.woff2) }\n\
             @page :left { margin-left: 3cm }\n\
             h1,\n  h2 { font-weight: bold !important }",
        )
        .unwrap();

        assert_eq!(sheet.len(), 3);
        let kinds: Vec<_> = sheet.rules().iter().map(CssRule::kind).collect();
        assert_eq!(kinds, vec![RuleKind::FontFace, RuleKind::Page, RuleKind::Style]);

        let rules = sheet.rules_mut();
        assert_eq!(rules[0].get("family").as_deref(), Some("Mono"));
        assert_eq!(rules[1].selector_text(), Some(":left"));
        assert_eq!(rules[1].get("marginLeft").as_deref(), Some("3cm"));
        assert_eq!(rules[2].selector_text(), Some("h1, h2"));
        assert_eq!(
            rules[2].style_mut().get_property_priority("font-weight"),
            Some("important")
        );
    }

    #[test]
    fn test_grouping_and_unknown_at_rules() {
        let sheet = StyleSheet::parse(
            "/* base */ @charset \"utf-8\";\n\
             @media (min-width: 600px) { .wide { width: 50% } @supports (display: grid) { .g { display: grid } } }\n\
             @keyframes spin { from { color: red } to { color: blue } }\n\
             .x { color: red }",
        )
        .unwrap();

        assert_eq!(
            sheet.to_css(),
            ".wide { width: 50%; }\n.g { display: grid; }\n.x { color: red; }"
        );
    }

    #[test]
    fn test_bad_rule_body_keeps_later_rules() {
        let sheet = StyleSheet::parse(
            "p { width: calc(1px; } @font-face { src: url(a.woff) format('woff' } q { color: red }",
        )
        .unwrap();

        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.to_css(), "p { }\n@font-face { }\nq { color: red; }");
    }

    #[test]
    fn test_escaped_braces_do_not_split() {
        let sheet = StyleSheet::parse(r".a\{b { content: \} } .c { color: red }").unwrap();

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rules()[0].selector_text(), Some(r".a\{b"));
        assert_eq!(sheet.to_css(), ".a\\{b { content: \\}; }\n.c { color: red; }");
    }

    #[test]
    fn test_unbalanced_sheet_fails() {
        assert!(StyleSheet::parse("p { color: red").is_err());
        assert!(StyleSheet::parse("p { color: red } }").is_err());
        assert!(StyleSheet::parse("p { content: 'x }").is_err());
    }
}
