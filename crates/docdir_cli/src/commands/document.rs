//! Single-document commands.

use docdir_core::Store;
use serde_json::Value;
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

/// Writes a JSON document, taken from `json` or else from stdin.
pub fn write(
    root: &Path,
    collection: &str,
    resource: &str,
    json: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = parse_document(json, io::stdin().lock())?;

    let store = Store::open(root)?;
    store.write(collection, resource, &document)?;

    info!("Wrote {}/{}", collection, resource);
    Ok(())
}

/// Prints a document as pretty JSON.
pub fn read(
    root: &Path,
    collection: &str,
    resource: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(root)?;
    let document: Value = store.read(collection, resource)?;

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// Deletes a single document.
pub fn delete(
    root: &Path,
    collection: &str,
    resource: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(root)?;
    store.delete(collection, resource)?;

    info!("Deleted {}/{}", collection, resource);
    Ok(())
}

/// Parses the document argument, falling back to `input` when absent.
fn parse_document(
    json: Option<&str>,
    mut input: impl Read,
) -> Result<Value, Box<dyn std::error::Error>> {
    let text = match json {
        Some(text) => text.to_string(),
        None => {
            let mut buf = String::new();
            input.read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn argument_takes_precedence_over_input() {
        let doc = parse_document(Some(r#"{"Name":"Alice"}"#), "ignored".as_bytes()).unwrap();
        assert_eq!(doc, json!({"Name": "Alice"}));
    }

    #[test]
    fn reads_input_when_no_argument() {
        let doc = parse_document(None, r#"[1, 2, 3]"#.as_bytes()).unwrap();
        assert_eq!(doc, json!([1, 2, 3]));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(parse_document(Some("{ nope"), io::empty()).is_err());
    }

    #[test]
    fn write_and_delete_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("db");

        write(&root, "users", "alice", Some(r#"{"Name":"Alice","Age":"30"}"#)).unwrap();
        assert!(root.join("users").join("alice.json").is_file());

        read(&root, "users", "alice").unwrap();

        delete(&root, "users", "alice").unwrap();
        assert!(!root.join("users").join("alice.json").exists());
    }
}
