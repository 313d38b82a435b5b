pub mod declaration;
pub mod property;
pub mod rule;
pub mod sheet;
pub mod tokenizer;

pub use declaration::DeclarationBlock;
pub use property::{IMPORTANT, Property};
pub use rule::{Accessor, CssRule, FontFaceRule, PageRule, RuleKind, StyleRule};
pub use sheet::StyleSheet;
pub use tokenizer::{CssTokenizer, DeclarationTokenizer};
