use live_dom::css::{CssRule, IMPORTANT, RuleKind};
use live_dom::{DeclarationBlock, Document, SharedText, StyleSheet, TokenSet};

#[test]
fn test_declaration_block_example() {
    let text = SharedText::new("color: red; font-weight: bold !important;");
    let mut block = DeclarationBlock::bound(text.binding());

    assert_eq!(block.get_property_value("color").as_deref(), Some("red"));
    assert_eq!(block.get_property_priority("font-weight"), Some(IMPORTANT));
    assert_eq!(block.remove_property("color").as_deref(), Some("red"));
    assert_eq!(block.get_property_value("color"), None);
    assert_eq!(text.get(), "font-weight: bold !important;");
}

#[test]
fn test_css_text_is_a_fixed_point() {
    let mut document = Document::new();
    let p = document.create_element("p");
    document
        .set_attribute(p, "style", "  margin : 0 auto ;COLOR:Blue;  --x : 1px !important ;")
        .unwrap();

    let style = document.style(p).unwrap();
    let first = style.css_text();
    style.set_css_text(&first);
    assert_eq!(style.css_text(), first);
    assert_eq!(document.get_attribute(p, "style"), Some(first));
}

#[test]
fn test_style_follows_attribute_changes() {
    let mut document = Document::new();
    let div = document.create_element("div");

    assert_eq!(document.style(div).unwrap().length(), 0);
    document.set_attribute(div, "style", "width: 1px; height: 2px").unwrap();
    assert_eq!(document.style(div).unwrap().item(1).as_deref(), Some("height"));

    // unparsable text degrades to an empty block without touching the attribute
    document.set_attribute(div, "style", "width: calc(1px").unwrap();
    assert_eq!(document.style(div).unwrap().length(), 0);
    assert_eq!(
        document.get_attribute(div, "style").as_deref(),
        Some("width: calc(1px")
    );

    document.style(div).unwrap().set_property("top", "0");
    assert_eq!(document.get_attribute(div, "style").as_deref(), Some("top: 0;"));
}

#[test]
fn test_class_list_properties() {
    let mut document = Document::new();
    let el = document.create_element("span");
    document.set_attribute(el, "class", "a b a c").unwrap();

    let classes = document.class_list(el).unwrap();
    assert_eq!(classes.to_vec(), vec!["a", "b", "c"]);
    assert!(!classes.toggle("b").unwrap());
    assert_eq!(document.get_attribute(el, "class").as_deref(), Some("a c"));

    let classes = document.class_list(el).unwrap();
    classes.add("d").unwrap();
    classes.add("d").unwrap();
    assert!(classes.contains("d"));
    assert_eq!(classes.length(), 3);

    assert!(classes.toggle("z").unwrap());
    assert!(!classes.toggle("z").unwrap());
    assert_eq!(document.get_attribute(el, "class").as_deref(), Some("a c d"));
}

#[test]
fn test_unbound_token_set() {
    let mut set = TokenSet::parse("x  y");
    set.add("z").unwrap();

    assert!(!set.is_bound());
    assert_eq!(set.value(), "x y z");
    assert!(set.contains_any(&["q", "z"]));
}

#[test]
fn test_font_face_rule_accessors() {
    let mut sheet = StyleSheet::parse(
        "@font-face { font-family: 'Fira'; src: url(fira.woff2) format('woff2'); font-weight: 400 }",
    )
    .unwrap();

    let rule = &mut sheet.rules_mut()[0];
    assert_eq!(rule.kind(), RuleKind::FontFace);
    assert_eq!(rule.get("family").as_deref(), Some("'Fira'"));
    assert_eq!(rule.get("weight").as_deref(), Some("400"));

    rule.set("style", "italic").unwrap();
    rule.set("weight", "").unwrap();
    assert!(rule.set("color", "red").is_err());
    assert_eq!(
        rule.to_css(),
        "@font-face { font-family: 'Fira'; src: url(fira.woff2) format('woff2'); font-style: italic; }"
    );
}

#[test]
fn test_rules_round_trip_through_sheet() {
    let mut page = CssRule::page(":first");
    page.set("margin", "1in").unwrap();
    let mut sheet = StyleSheet::new();
    sheet.push(page);
    sheet.push(CssRule::style_rule("p"));

    let text = sheet.to_css();
    assert_eq!(text, "@page :first { margin: 1in; }\np { }");
    assert_eq!(StyleSheet::parse(&text).unwrap().to_css(), text);
}
