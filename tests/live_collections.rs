use live_dom::dom::{LiveCategory, NodeId};
use live_dom::{Document, DocumentOptions, ElementNode};

fn scan(document: &Document, category: LiveCategory) -> Vec<NodeId> {
    let tree = document.tree();
    tree.preorder(tree.root())
        .filter(|&id| {
            tree.node(id)
                .and_then(|node| node.kind())
                .and_then(|kind| kind.live_category())
                == Some(category)
        })
        .collect()
}

fn assert_index_matches_scan(document: &Document, step: &str) {
    for category in LiveCategory::ALL {
        assert_eq!(
            document.live(category),
            scan(document, category).as_slice(),
            "{:?} out of sync after {}",
            category,
            step
        );
    }
}

fn sample_page() -> ElementNode {
    ElementNode::new("html").with_children(vec![
        ElementNode::new("head").with_children(vec![
            ElementNode::new("title").with_text("First"),
            ElementNode::new("script"),
        ]),
        ElementNode::new("body").with_children(vec![
            ElementNode::new("div").with_attribute("id", "a").with_children(vec![
                ElementNode::new("form"),
                ElementNode::new("img"),
            ]),
            ElementNode::new("div")
                .with_attribute("id", "b")
                .with_children(vec![ElementNode::new("script")]),
            ElementNode::new("div").with_attribute("id", "c"),
        ]),
    ])
}

fn by_id(document: &Document, id: &str) -> NodeId {
    let tree = document.tree();
    tree.preorder(tree.root())
        .find(|&node| document.get_attribute(node, "id").as_deref() == Some(id))
        .unwrap()
}

#[test]
fn test_initial_index_matches_scan() {
    let document = Document::from_tree(&sample_page(), DocumentOptions::default()).unwrap();

    assert_index_matches_scan(&document, "load");
    assert_eq!(document.forms().len(), 1);
    assert_eq!(document.images().len(), 1);
    assert_eq!(document.scripts().len(), 2);
}

#[test]
fn test_mutation_walk_keeps_index_in_sync() {
    let mut document = Document::from_tree(&sample_page(), DocumentOptions::default()).unwrap();
    let containers = [
        document.body().unwrap(),
        by_id(&document, "a"),
        by_id(&document, "b"),
        by_id(&document, "c"),
    ];

    let mut pool: Vec<NodeId> = containers[1..].to_vec();
    for tag in ["form", "img", "script", "form", "img", "div"] {
        pool.push(document.create_element(tag));
    }
    pool.extend(document.forms().to_vec());
    pool.extend(document.images().to_vec());

    for step in 0..120usize {
        let node = pool[step % pool.len()];
        let parent = containers[(step * 7) % containers.len()];

        let label = if step % 5 == 4 {
            let _ = document.remove(node);
            format!("step {step}: remove {node}")
        } else {
            let children = document.tree().children(parent).to_vec();
            let reference = children.get((step * 3) % (children.len() + 1)).copied();
            let outcome = document.insert_before(parent, node, reference);
            format!("step {step}: insert {node} under {parent} ({:?})", outcome.is_ok())
        };

        assert_index_matches_scan(&document, &label);
    }
}

#[test]
fn test_detached_subtree_leaves_index_untouched() {
    let mut document = Document::from_tree(&sample_page(), DocumentOptions::default()).unwrap();
    let before = document.images().to_vec();

    let holder = document.create_element("section");
    let img = document.create_element("img");
    document.append_child(holder, img).unwrap();
    assert_eq!(document.images(), before.as_slice());

    let body = document.body().unwrap();
    let first = document.tree().children(body)[0];
    document.insert_before(body, holder, Some(first)).unwrap();
    assert_eq!(document.images()[0], img);
    assert_index_matches_scan(&document, "insert at front");

    let adopted = document.adopt_node(holder).unwrap();
    assert_eq!(adopted, holder);
    assert_eq!(document.images(), before.as_slice());
}

#[test]
fn test_title_slot_falls_back_to_next_title() {
    let page = ElementNode::new("html").with_children(vec![ElementNode::new("head").with_children(vec![
        ElementNode::new("title").with_text("T1"),
        ElementNode::new("title").with_text("T2"),
    ])]);
    let mut document = Document::from_tree(&page, DocumentOptions::default()).unwrap();
    assert_eq!(document.title(), "T1");

    let t1 = document.title_element().unwrap();
    document.remove(t1).unwrap();
    assert_eq!(document.title(), "T2");

    let t2 = document.title_element().unwrap();
    document.remove(t2).unwrap();
    assert_eq!(document.title_element(), None);
    assert_eq!(document.title(), "");
}

#[test]
fn test_body_slot_rescans_document_element() {
    let mut document = Document::from_tree(&sample_page(), DocumentOptions::default()).unwrap();
    let html = document.document_element().unwrap();
    let body = document.body().unwrap();

    let frameset = document.create_element("body");
    document.append_child(html, frameset).unwrap();
    assert_eq!(document.body(), Some(body));

    document.remove(body).unwrap();
    assert_eq!(document.body(), Some(frameset));
    assert!(document.forms().is_empty());

    document.remove(html).unwrap();
    assert_eq!(document.body(), None);
    assert_eq!(document.head(), None);
    assert!(document.scripts().is_empty());
}

#[test]
fn test_computed_views_are_snapshots() {
    let mut document = Document::from_tree(&sample_page(), DocumentOptions::default()).unwrap();
    let body = document.body().unwrap();

    let link = document.create_element("a");
    document.set_attribute(link, "href", "/x").unwrap();
    document.append_child(body, link).unwrap();

    let links = document.links();
    assert_eq!(links, vec![link]);
    assert!(document.anchors().is_empty());

    document.set_attribute(link, "name", "x").unwrap();
    document.remove_attribute(link, "href").unwrap();
    assert_eq!(links, vec![link]);
    assert!(document.links().is_empty());
    assert_eq!(document.anchors(), vec![link]);
    assert_eq!(document.get_elements_by_name("x"), vec![link]);
}
