//! Collection-wide commands.

use docdir_core::Store;
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Prints every document of a collection.
///
/// Without `decode` the raw payloads are printed back to back, exactly as
/// stored. With `decode` they are parsed and printed as one JSON array.
pub fn read_all(
    root: &Path,
    collection: &str,
    decode: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(root)?;
    let documents = store.read_all(collection)?;

    if decode {
        let values = documents
            .iter()
            .map(|doc| store.decode::<Value>(doc))
            .collect::<Result<Vec<_>, _>>()?;
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for doc in &documents {
            print!("{}", String::from_utf8_lossy(doc.bytes()));
        }
    }
    Ok(())
}

/// Prints the resource names of a collection, one per line.
pub fn list(root: &Path, collection: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(root)?;
    for name in store.list(collection)? {
        println!("{name}");
    }
    Ok(())
}

/// Prints the collection names of the store, one per line.
pub fn collections(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(root)?;
    for name in store.collections()? {
        println!("{name}");
    }
    Ok(())
}

/// Deletes a whole collection.
pub fn delete(root: &Path, collection: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(root)?;
    store.delete_collection(collection)?;

    info!("Deleted collection {}", collection);
    Ok(())
}
