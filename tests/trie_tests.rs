use any_trie::{Error, Trie, TrieNode};

/// Follows `path` from the root, returning the node reached
fn node_at<'a>(trie: &'a Trie, path: &str) -> Option<&'a TrieNode> {
    let mut node = trie.root();
    for c in path.chars() {
        node = node.get_child(c)?;
    }
    Some(node)
}

/// Checks that every non-root node is terminal or leads to one
fn assert_no_dead_branches(node: &TrieNode) {
    for (_, child) in node.children() {
        assert!(
            child.terminal_count() > 0,
            "dead branch at {:?}",
            child.key_char()
        );
        assert_eq!(child.is_terminal(), child.value().is_some());
        assert_no_dead_branches(child);
    }
}

#[test]
fn test_cat_car_scenario() {
    let mut trie = Trie::new();
    assert!(trie.insert("cat", 1));
    assert!(trie.insert("car", 2));

    assert!(trie.remove("cat"));

    assert_eq!(trie.get::<i32>("cat"), None);
    assert_eq!(trie.get::<i32>("car"), Some(2));

    // "ca" is still needed by "car"
    let ca = node_at(&trie, "ca").expect("prefix node survives");
    assert!(!ca.is_terminal());
    assert!(ca.has_child('r'));
    assert!(!ca.has_child('t'));
    assert_no_dead_branches(trie.root());
}

#[test]
fn test_dog_pruned_to_root() {
    let mut trie = Trie::new();
    trie.insert("dog", String::from("woof"));

    assert!(trie.remove("dog"));

    assert!(!trie.root().has_children());
    assert_eq!(trie.node_count(), 1);
}

#[test]
fn test_remove_exclusive_branch_stops_at_fork() {
    let mut trie = Trie::new();
    trie.insert("team", 1);
    trie.insert("teammate", 2);
    trie.insert("tea", 3);
    trie.insert("ten", 4);

    assert!(trie.remove("teammate"));

    // "mate" is gone, the "team" terminal stays
    let team = node_at(&trie, "team").unwrap();
    assert!(team.is_terminal());
    assert!(!team.has_children());

    assert!(trie.remove("team"));
    let tea = node_at(&trie, "tea").unwrap();
    assert!(tea.is_terminal());
    assert!(!tea.has_children());

    assert!(trie.remove("tea"));
    // "te" still forks to "ten"
    let te = node_at(&trie, "te").unwrap();
    assert_eq!(te.child_count(), 1);
    assert!(te.has_child('n'));

    assert_eq!(trie.len(), 1);
    assert_no_dead_branches(trie.root());
}

#[test]
fn test_duplicate_insert_preserves_first_value() {
    let mut trie = Trie::new();
    assert!(trie.insert("key", 1u8));
    assert!(!trie.insert("key", 2u8));
    assert!(!trie.insert("key", "different type"));

    assert_eq!(trie.get::<u8>("key"), Some(1));
    assert_eq!(trie.len(), 1);
}

#[test]
fn test_empty_key_leaves_trie_unchanged() {
    let mut trie = Trie::new();
    trie.insert("a", 1);
    let nodes = trie.node_count();

    assert!(!trie.insert("", 2));
    assert!(!trie.remove(""));
    assert_eq!(trie.get::<i32>(""), None);

    assert_eq!(trie.node_count(), nodes);
    assert_eq!(trie.len(), 1);
}

#[test]
fn test_mixed_value_types() {
    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    let mut trie = Trie::new();
    trie.insert("origin", Point { x: 0, y: 0 });
    trie.insert("name", String::from("plane"));
    trie.insert("dims", 2usize);

    assert_eq!(trie.get::<Point>("origin"), Some(Point { x: 0, y: 0 }));
    assert_eq!(trie.get::<String>("name").as_deref(), Some("plane"));
    assert_eq!(trie.get::<usize>("dims"), Some(2));

    assert_eq!(trie.get::<String>("origin"), None);
    assert!(matches!(
        trie.try_get::<u32>("dims"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_get_ref_borrows_stored_value() {
    let mut trie = Trie::new();
    trie.insert("big", vec![0u64; 1024]);

    let stored = trie.get_ref::<Vec<u64>>("big").unwrap();
    assert_eq!(stored.len(), 1024);
    assert!(trie.get_ref::<Vec<u32>>("big").is_none());
}

#[test]
fn test_many_keys_then_remove_all() {
    let mut trie = Trie::new();
    let words = [
        "a", "an", "and", "ant", "any", "apple", "apply", "b", "ban", "band", "bandana",
    ];

    for (i, word) in words.iter().enumerate() {
        assert!(trie.insert(word, i));
    }
    assert_eq!(trie.len(), words.len());

    for (i, word) in words.iter().enumerate() {
        assert_eq!(trie.get::<usize>(word), Some(i));
    }

    for word in words.iter().rev() {
        assert!(trie.remove(word));
        assert!(!trie.contains_key(word));
        assert_no_dead_branches(trie.root());
    }

    assert!(trie.is_empty());
    assert_eq!(trie.node_count(), 1);
}

#[test]
fn test_try_variants_report_reason() {
    let mut trie = Trie::new();

    assert_eq!(trie.try_insert("", 0), Err(Error::EmptyKey));
    assert_eq!(trie.try_insert("k", 0), Ok(()));
    assert_eq!(trie.try_insert("k", 0), Err(Error::DuplicateKey));

    assert_eq!(trie.try_get::<i32>("x"), Err(Error::KeyNotFound));
    assert_eq!(trie.try_get::<i32>("k"), Ok(0));

    assert_eq!(trie.try_remove("x"), Err(Error::KeyNotFound));
    assert_eq!(trie.try_remove("k"), Ok(()));
}

#[test]
fn test_error_display() {
    assert_eq!(Error::EmptyKey.to_string(), "empty key");
    assert_eq!(
        Error::TypeMismatch {
            expected: "i32",
            found: "u8",
        }
        .to_string(),
        "type mismatch: requested `i32`, stored `u8`"
    );
    assert_eq!(
        Error::DuplicateChild('a').to_string(),
        "child for 'a' already exists"
    );
}
