//! CSS declaration blocks
//!
//! A [`DeclarationBlock`] is the structured form of a `style` attribute or of a rule body.
//! Lookups resolve to the first property with a matching name. Every read resynchronizes
//! with the bound text first; every write serializes and pushes.

use crate::binding::{TextBinding, TextBound, TextModel};
use crate::css::property::Property;
use crate::css::tokenizer::{CssTokenizer, DeclarationTokenizer};
use crate::error::Result;
use std::fmt;
use std::rc::Rc;

/// Property sequence plus the tokenizer used to rebuild it
pub struct PropertyList {
    properties: Vec<Property>,
    tokenizer: Rc<dyn DeclarationTokenizer>,
}

impl PropertyList {
    fn new(tokenizer: Rc<dyn DeclarationTokenizer>) -> Self {
        Self {
            properties: Vec::new(),
            tokenizer,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|property| property.is_named(name))
    }

    fn find(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.is_named(name))
    }
}

impl TextModel for PropertyList {
    fn rebuild(&mut self, text: &str) -> Result<()> {
        self.properties = self.tokenizer.tokenize(text)?;
        Ok(())
    }

    fn serialize(&self) -> String {
        serialize_properties(&self.properties)
    }

    fn clear(&mut self) {
        self.properties.clear();
    }
}

impl fmt::Debug for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.properties).finish()
    }
}

/// Each property followed by `;`, separated by single spaces
fn serialize_properties(properties: &[Property]) -> String {
    properties
        .iter()
        .map(|property| format!("{property};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered collection of CSS declarations, optionally bound to external text
#[derive(Debug)]
pub struct DeclarationBlock {
    store: TextBound<PropertyList>,
}

impl DeclarationBlock {
    /// Empty, unbound block using the default tokenizer
    pub fn new() -> Self {
        Self::with_tokenizer(Rc::new(CssTokenizer))
    }

    /// Empty, unbound block using `tokenizer`
    pub fn with_tokenizer(tokenizer: Rc<dyn DeclarationTokenizer>) -> Self {
        Self {
            store: TextBound::unbound(PropertyList::new(tokenizer)),
        }
    }

    /// Unbound block holding the declarations of `text`
    pub fn parse(text: &str) -> Self {
        let mut block = Self::new();
        block.set_css_text(text);
        block
    }

    /// Block kept in sync with the text behind `binding`
    pub fn bound(binding: Box<dyn TextBinding>) -> Self {
        Self::bound_with_tokenizer(binding, Rc::new(CssTokenizer))
    }

    /// Bound block using `tokenizer` to rebuild from pulled text
    pub fn bound_with_tokenizer(
        binding: Box<dyn TextBinding>,
        tokenizer: Rc<dyn DeclarationTokenizer>,
    ) -> Self {
        Self {
            store: TextBound::bound(PropertyList::new(tokenizer), binding),
        }
    }

    /// Whether the block is attached to external text
    pub fn is_bound(&self) -> bool {
        self.store.is_bound()
    }

    /// Canonical text of the block after resynchronizing
    pub fn css_text(&mut self) -> String {
        self.store.refresh();
        self.to_css()
    }

    /// Replace every declaration with those parsed from `text` and push the result
    pub fn set_css_text(&mut self, text: &str) {
        self.store.reset(text);
    }

    /// Number of declarations
    pub fn length(&mut self) -> usize {
        self.store.refresh().properties.len()
    }

    /// Name of the declaration at `index`
    pub fn item(&mut self, index: usize) -> Option<String> {
        self.store
            .refresh()
            .properties
            .get(index)
            .map(|property| property.name.clone())
    }

    /// Value of the first declaration named `name`
    pub fn get_property_value(&mut self, name: &str) -> Option<String> {
        self.store
            .refresh()
            .find(name)
            .map(|property| property.value.clone())
    }

    /// `"important"` when the first declaration named `name` is important
    pub fn get_property_priority(&mut self, name: &str) -> Option<&'static str> {
        self.store.refresh().find(name).and_then(Property::priority)
    }

    /// Remove the first declaration named `name`, returning its value
    ///
    /// The block is serialized and pushed even when nothing was removed, which keeps the
    /// bound text in canonical form.
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let list = self.store.refresh();
        let removed = list
            .position(name)
            .map(|idx| list.properties.remove(idx).value);

        self.store.commit();
        removed
    }

    /// Set `name` to `value`, replacing the first existing declaration or appending
    ///
    /// `value` may end with `!important`. An empty value removes the declaration; a value
    /// that does not tokenize to a single declaration leaves the block unchanged.
    pub fn set_property(&mut self, name: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.remove_property(name);
            return self;
        }

        let list = self.store.refresh();
        match list.tokenizer.tokenize_value(name, value) {
            Ok(Some(property)) => match list.position(name) {
                Some(idx) => list.properties[idx] = property,
                None => list.properties.push(property),
            },
            Ok(None) => log::debug!("Ignoring invalid value {:?} for {:?}", value, name),
            Err(e) => log::debug!("Ignoring unparsable value {:?} for {:?}: {}", value, name, e),
        }

        self.store.commit();
        self
    }

    /// Append an already tokenized declaration without resynchronizing or pushing
    ///
    /// Used by rule construction, which starts from tokenized properties.
    pub fn append_property(&mut self, property: Property) -> &mut Self {
        self.store.model_mut().properties.push(property);
        self
    }

    /// Declarations after resynchronizing
    pub fn properties(&mut self) -> &[Property] {
        &self.store.refresh().properties
    }

    /// Declarations as currently held, without resynchronizing
    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.store.model().properties.iter()
    }

    /// Serialize the declarations as currently held
    pub fn to_css(&self) -> String {
        serialize_properties(&self.store.model().properties)
    }
}

impl Default for DeclarationBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeclarationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl<'a> IntoIterator for &'a DeclarationBlock {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
