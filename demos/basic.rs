//! Examples of using the trie
use any_trie::{Error, Trie};

fn main() {
    let mut trie = Trie::new();

    // Values of different types under different keys
    trie.insert("hello", 1);
    trie.insert("help", String::from("me"));
    trie.insert("helper", 2.5f64);

    assert_eq!(trie.get::<i32>("hello"), Some(1));
    assert_eq!(trie.get::<String>("help"), Some("me".to_string()));
    assert_eq!(trie.get::<f64>("helper"), Some(2.5));

    // Asking for the wrong type
    match trie.try_get::<i32>("help") {
        Ok(value) => println!("help = {}", value),
        Err(Error::TypeMismatch { expected, found }) => {
            println!("help holds {}, not {}", found, expected)
        }
        Err(e) => println!("lookup failed: {}", e),
    }

    // Existing keys are never overwritten
    assert!(!trie.insert("hello", 99));

    // "help" goes away but "helper" keeps the shared path alive
    assert!(trie.remove("help"));
    assert_eq!(trie.get::<f64>("helper"), Some(2.5));

    println!("{:?}", trie);
}
