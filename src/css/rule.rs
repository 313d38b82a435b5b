//! CSS rules
//!
//! Each rule kind owns its declaration block and a fixed table mapping accessor names
//! (`family`, `unicodeRange`, ...) onto property names.

use crate::css::declaration::DeclarationBlock;
use crate::css::property::Property;
use crate::error::{DomError, Result};
use std::fmt;

/// Named accessor of a rule, bound to one property of its declaration block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessor {
    pub name: &'static str,
    pub property: &'static str,
}

const fn accessor(name: &'static str, property: &'static str) -> Accessor {
    Accessor { name, property }
}

const STYLE_ACCESSORS: &[Accessor] = &[
    accessor("color", "color"),
    accessor("background", "background"),
    accessor("display", "display"),
    accessor("fontFamily", "font-family"),
    accessor("fontSize", "font-size"),
    accessor("fontWeight", "font-weight"),
    accessor("margin", "margin"),
    accessor("padding", "padding"),
    accessor("width", "width"),
    accessor("height", "height"),
];

const FONT_FACE_ACCESSORS: &[Accessor] = &[
    accessor("family", "font-family"),
    accessor("src", "src"),
    accessor("style", "font-style"),
    accessor("weight", "font-weight"),
    accessor("stretch", "font-stretch"),
    accessor("unicodeRange", "unicode-range"),
    accessor("variant", "font-variant"),
    accessor("featureSettings", "font-feature-settings"),
];

const PAGE_ACCESSORS: &[Accessor] = &[
    accessor("size", "size"),
    accessor("margin", "margin"),
    accessor("marginTop", "margin-top"),
    accessor("marginRight", "margin-right"),
    accessor("marginBottom", "margin-bottom"),
    accessor("marginLeft", "margin-left"),
    accessor("pageBreakBefore", "page-break-before"),
    accessor("pageBreakAfter", "page-break-after"),
];

/// Kind tag of a [`CssRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Style,
    FontFace,
    Page,
}

impl RuleKind {
    /// At-rule keyword, `None` for style rules
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Style => None,
            Self::FontFace => Some("font-face"),
            Self::Page => Some("page"),
        }
    }

    /// Accessor table of this kind
    pub fn accessors(self) -> &'static [Accessor] {
        match self {
            Self::Style => STYLE_ACCESSORS,
            Self::FontFace => FONT_FACE_ACCESSORS,
            Self::Page => PAGE_ACCESSORS,
        }
    }

    /// Property name behind `accessor`
    pub fn property_for(self, accessor: &str) -> Option<&'static str> {
        self.accessors()
            .iter()
            .find(|entry| entry.name == accessor)
            .map(|entry| entry.property)
    }

    fn label(self) -> &'static str {
        self.keyword().unwrap_or("style")
    }
}

/// `selector { ... }`
#[derive(Debug, Default)]
pub struct StyleRule {
    pub selector_text: String,
    pub style: DeclarationBlock,
}

/// `@font-face { ... }`
#[derive(Debug, Default)]
pub struct FontFaceRule {
    pub style: DeclarationBlock,
}

/// `@page [selector] { ... }`
#[derive(Debug, Default)]
pub struct PageRule {
    pub selector_text: String,
    pub style: DeclarationBlock,
}

/// A rule holding a declaration block
#[derive(Debug)]
pub enum CssRule {
    Style(StyleRule),
    FontFace(FontFaceRule),
    Page(PageRule),
}

impl CssRule {
    /// Empty style rule for `selector_text`
    pub fn style_rule(selector_text: impl Into<String>) -> Self {
        Self::Style(StyleRule {
            selector_text: selector_text.into(),
            style: DeclarationBlock::new(),
        })
    }

    /// Empty `@font-face` rule
    pub fn font_face() -> Self {
        Self::FontFace(FontFaceRule::default())
    }

    /// Empty `@page` rule; `selector_text` may be empty
    pub fn page(selector_text: impl Into<String>) -> Self {
        Self::Page(PageRule {
            selector_text: selector_text.into(),
            style: DeclarationBlock::new(),
        })
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Style(_) => RuleKind::Style,
            Self::FontFace(_) => RuleKind::FontFace,
            Self::Page(_) => RuleKind::Page,
        }
    }

    /// Declaration block of the rule
    pub fn style(&self) -> &DeclarationBlock {
        match self {
            Self::Style(rule) => &rule.style,
            Self::FontFace(rule) => &rule.style,
            Self::Page(rule) => &rule.style,
        }
    }

    /// Mutable declaration block of the rule
    pub fn style_mut(&mut self) -> &mut DeclarationBlock {
        match self {
            Self::Style(rule) => &mut rule.style,
            Self::FontFace(rule) => &mut rule.style,
            Self::Page(rule) => &mut rule.style,
        }
    }

    /// Selector text for style and page rules
    pub fn selector_text(&self) -> Option<&str> {
        match self {
            Self::Style(rule) => Some(&rule.selector_text),
            Self::Page(rule) => Some(&rule.selector_text),
            Self::FontFace(_) => None,
        }
    }

    /// Append a tokenized declaration while building the rule
    pub fn append_property(&mut self, property: Property) -> &mut Self {
        self.style_mut().append_property(property);
        self
    }

    /// Value behind a named accessor; `None` for unknown accessors or unset properties
    pub fn get(&mut self, accessor: &str) -> Option<String> {
        let property = self.kind().property_for(accessor)?;
        self.style_mut().get_property_value(property)
    }

    /// Set the property behind a named accessor
    pub fn set(&mut self, accessor: &str, value: &str) -> Result<()> {
        let kind = self.kind();
        let property = kind
            .property_for(accessor)
            .ok_or_else(|| DomError::UnknownAccessor {
                rule: kind.label().to_string(),
                accessor: accessor.to_string(),
            })?;

        self.style_mut().set_property(property, value);
        Ok(())
    }

    /// Serialize as `prelude { declarations }`
    pub fn to_css(&self) -> String {
        let prelude = match self {
            Self::Style(rule) => rule.selector_text.clone(),
            Self::FontFace(_) => "@font-face".to_string(),
            Self::Page(rule) if rule.selector_text.is_empty() => "@page".to_string(),
            Self::Page(rule) => format!("@page {}", rule.selector_text),
        };

        let body = self.style().to_css();
        if body.is_empty() {
            format!("{prelude} {{ }}")
        } else {
            format!("{prelude} {{ {body} }}")
        }
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
