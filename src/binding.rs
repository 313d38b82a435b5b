//! Text-bound stores
//!
//! A [`TextBound`] keeps a structured model (declaration list, token set) in step with an
//! external piece of text such as an attribute value. The external side is reached through a
//! [`TextBinding`]: `pull` reads the current text, `push` writes a new one. Reads re-derive the
//! model only when the pulled text differs from the last text the store produced or consumed.

use crate::error::Result;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Capability to read and write the external text a store is bound to
pub trait TextBinding {
    /// Current external text, or `None` when the source no longer exists
    fn pull(&self) -> Option<String>;

    /// Replace the external text
    fn push(&self, text: &str);
}

/// Structured collection that can be rebuilt from, and serialized to, text
pub trait TextModel {
    /// Replace the whole model with the contents parsed from `text`
    fn rebuild(&mut self, text: &str) -> Result<()>;

    /// Canonical text form of the model
    fn serialize(&self) -> String;

    /// Drop every entry
    fn clear(&mut self);
}

/// A structured model synchronized with an optional external text source
pub struct TextBound<M> {
    model: M,
    last_synced: String,
    binding: Option<Box<dyn TextBinding>>,
}

impl<M: TextModel> TextBound<M> {
    /// Store without an external source; behaves as a plain in-memory collection
    pub fn unbound(model: M) -> Self {
        let last_synced = model.serialize();
        Self {
            model,
            last_synced,
            binding: None,
        }
    }

    /// Store bound to `binding`; the first read pulls the external text
    pub fn bound(model: M, binding: Box<dyn TextBinding>) -> Self {
        Self {
            model,
            last_synced: String::new(),
            binding: Some(binding),
        }
    }

    /// Whether an external source is attached
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Text last produced by a write or consumed by a resync
    pub fn last_synced(&self) -> &str {
        &self.last_synced
    }

    /// Resynchronize with the external text, then hand out the model
    ///
    /// When the pulled text cannot be parsed the model is cleared and the read carries on.
    pub fn refresh(&mut self) -> &mut M {
        let pulled = self.binding.as_ref().and_then(|binding| binding.pull());

        if let Some(text) = pulled {
            if text != self.last_synced {
                match self.model.rebuild(&text) {
                    Ok(()) => log::debug!("Resynchronized store from bound text {:?}", text),
                    Err(e) => {
                        log::warn!("Bound text {:?} could not be parsed, store cleared: {}", text, e);
                        self.model.clear();
                    }
                }
                self.last_synced = text;
            }
        }

        &mut self.model
    }

    /// Serialize the model, remember the text and push it to the external source
    pub fn commit(&mut self) {
        self.last_synced = self.model.serialize();

        if let Some(binding) = &self.binding {
            binding.push(&self.last_synced);
        }
    }

    /// Replace the model with the contents of `text` and push the canonical form
    pub fn reset(&mut self, text: &str) {
        if let Err(e) = self.model.rebuild(text) {
            log::warn!("Text {:?} could not be parsed, store cleared: {}", text, e);
            self.model.clear();
        }
        self.commit();
    }

    /// Model as it currently is, without resynchronizing
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable model without resynchronizing or pushing
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }
}

impl<M: fmt::Debug> fmt::Debug for TextBound<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBound")
            .field("model", &self.model)
            .field("last_synced", &self.last_synced)
            .field("bound", &self.binding.is_some())
            .finish()
    }
}

/// Shared, caller-owned text cell usable as a binding target
///
/// Handy for binding a store to text that lives outside the DOM, such as a rule's
/// serialized body held by an editor.
#[derive(Debug, Clone, Default)]
pub struct SharedText(Rc<RefCell<String>>);

impl SharedText {
    /// Create a cell holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(text.into())))
    }

    /// Current contents
    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    /// Overwrite the contents
    pub fn set(&self, text: impl Into<String>) {
        *self.0.borrow_mut() = text.into();
    }

    /// Binding handle over this cell
    pub fn binding(&self) -> Box<dyn TextBinding> {
        Box::new(self.clone())
    }
}

impl TextBinding for SharedText {
    fn pull(&self) -> Option<String> {
        Some(self.get())
    }

    fn push(&self, text: &str) {
        self.set(text);
    }
}
