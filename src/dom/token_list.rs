//! Space-separated token lists (`class`, `rel`, ...)

use crate::binding::{TextBinding, TextBound, TextModel};
use crate::error::{DomError, Result};
use indexmap::IndexSet;
use std::fmt;

/// Ordered, duplicate-free tokens
#[derive(Debug, Default)]
pub struct Tokens(IndexSet<String>);

impl TextModel for Tokens {
    fn rebuild(&mut self, text: &str) -> Result<()> {
        self.0 = text.split_ascii_whitespace().map(str::to_string).collect();
        Ok(())
    }

    fn serialize(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

fn validate(token: &str) -> Result<()> {
    if token.is_empty() || token.contains(|c: char| c.is_ascii_whitespace()) {
        return Err(DomError::InvalidToken(token.to_string()));
    }
    Ok(())
}

/// Token set kept in step with an attribute value
#[derive(Debug)]
pub struct TokenSet {
    store: TextBound<Tokens>,
}

impl TokenSet {
    /// Unbound, empty set
    pub fn new() -> Self {
        Self {
            store: TextBound::unbound(Tokens::default()),
        }
    }

    /// Unbound set holding the tokens of `text`
    pub fn parse(text: &str) -> Self {
        let mut set = Self::new();
        set.store.reset(text);
        set
    }

    /// Set bound to external text
    pub fn bound(binding: Box<dyn TextBinding>) -> Self {
        Self {
            store: TextBound::bound(Tokens::default(), binding),
        }
    }

    /// Whether the set writes back to external text
    pub fn is_bound(&self) -> bool {
        self.store.is_bound()
    }

    /// Number of distinct tokens after resynchronizing
    pub fn length(&mut self) -> usize {
        self.store.refresh().0.len()
    }

    /// Token at `index`, `None` when out of range
    pub fn item(&mut self, index: usize) -> Option<String> {
        self.store.refresh().0.get_index(index).cloned()
    }

    /// Whether `token` is present
    pub fn contains(&mut self, token: &str) -> bool {
        self.store.refresh().0.contains(token)
    }

    /// Whether any of `tokens` is present
    pub fn contains_any(&mut self, tokens: &[&str]) -> bool {
        let set = &self.store.refresh().0;
        tokens.iter().any(|token| set.contains(*token))
    }

    /// Append `token` unless present; pushes only on change
    pub fn add(&mut self, token: &str) -> Result<()> {
        validate(token)?;
        if self.store.refresh().0.insert(token.to_string()) {
            self.store.commit();
        }
        Ok(())
    }

    /// Remove `token` if present; pushes only on change
    pub fn remove(&mut self, token: &str) -> Result<()> {
        validate(token)?;
        if self.store.refresh().0.shift_remove(token) {
            self.store.commit();
        }
        Ok(())
    }

    /// Remove `token` when present (returns `false`), add it otherwise (returns `true`)
    pub fn toggle(&mut self, token: &str) -> Result<bool> {
        validate(token)?;
        let tokens = &mut self.store.refresh().0;
        let added = if tokens.shift_remove(token) {
            false
        } else {
            tokens.insert(token.to_string());
            true
        };

        self.store.commit();
        Ok(added)
    }

    /// Serialized tokens after resynchronizing
    pub fn value(&mut self) -> String {
        self.store.refresh().serialize()
    }

    /// Tokens after resynchronizing
    pub fn to_vec(&mut self) -> Vec<String> {
        self.store.refresh().0.iter().cloned().collect()
    }

    /// Tokens as currently held, without resynchronizing
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.store.model().0.iter().map(String::as_str)
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.store.model().serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::SharedText;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingBinding {
        text: SharedText,
        pushes: Rc<Cell<usize>>,
    }

    impl TextBinding for CountingBinding {
        fn pull(&self) -> Option<String> {
            self.text.pull()
        }

        fn push(&self, text: &str) {
            self.pushes.set(self.pushes.get() + 1);
            self.text.push(text);
        }
    }

    fn counted_set(initial: &str) -> (TokenSet, SharedText, Rc<Cell<usize>>) {
        let text = SharedText::new(initial);
        let pushes = Rc::new(Cell::new(0));
        let binding = CountingBinding {
            text: text.clone(),
            pushes: Rc::clone(&pushes),
        };
        (TokenSet::bound(Box::new(binding)), text, pushes)
    }

    #[test]
    fn test_resync_deduplicates() {
        let text = SharedText::new("a b a c");
        let mut set = TokenSet::bound(text.binding());

        assert_eq!(set.to_vec(), vec!["a", "b", "c"]);
        assert!(!set.toggle("b").unwrap());
        assert_eq!(text.get(), "a c");
    }

    #[test]
    fn test_add_is_idempotent() {
        let text = SharedText::new("x");
        let mut set = TokenSet::bound(text.binding());

        set.add("y").unwrap();
        set.add("y").unwrap();
        assert!(set.contains("y"));
        assert_eq!(set.length(), 2);
        assert_eq!(text.get(), "x y");
    }

    #[test]
    fn test_toggle_twice_restores() {
        let text = SharedText::new("one two");
        let mut set = TokenSet::bound(text.binding());

        assert!(set.toggle("three").unwrap());
        assert!(!set.toggle("three").unwrap());
        assert_eq!(text.get(), "one two");
        assert_eq!(set.to_vec(), vec!["one", "two"]);
    }

    #[test]
    fn test_toggle_pushes_once() {
        let (mut set, text, pushes) = counted_set("a b");

        assert!(set.toggle("c").unwrap());
        assert_eq!(pushes.get(), 1);
        assert_eq!(text.get(), "a b c");

        assert!(!set.toggle("a").unwrap());
        assert_eq!(pushes.get(), 2);
        assert_eq!(text.get(), "b c");

        // reads in between never push
        assert_eq!(set.length(), 2);
        assert_eq!(pushes.get(), 2);
    }

    #[test]
    fn test_add_and_remove_push_only_on_change() {
        let (mut set, _text, pushes) = counted_set("a");

        set.add("a").unwrap();
        set.remove("z").unwrap();
        assert_eq!(pushes.get(), 0);

        set.add("b").unwrap();
        set.remove("a").unwrap();
        assert_eq!(pushes.get(), 2);
    }

    #[test]
    fn test_noop_writes_do_not_push() {
        let text = SharedText::new("a   b");
        let mut set = TokenSet::bound(text.binding());

        set.add("a").unwrap();
        set.remove("zzz").unwrap();
        assert_eq!(text.get(), "a   b");

        set.remove("a").unwrap();
        assert_eq!(text.get(), "b");
    }

    #[test]
    fn test_item_and_contains_any() {
        let mut set = TokenSet::parse("btn primary");

        assert_eq!(set.item(0).as_deref(), Some("btn"));
        assert_eq!(set.item(2), None);
        assert!(set.contains_any(&["ghost", "primary"]));
        assert!(!set.contains_any(&["ghost"]));
        assert!(!set.contains_any(&[]));
    }

    #[test]
    fn test_invalid_tokens() {
        let mut set = TokenSet::new();

        assert!(matches!(set.add(""), Err(DomError::InvalidToken(_))));
        assert!(matches!(set.toggle("a b"), Err(DomError::InvalidToken(_))));
        assert_eq!(set.length(), 0);
    }
}
