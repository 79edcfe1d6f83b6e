//! Sample data.

use docdir_core::{Store, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Collection the sample records are written to.
pub const COLLECTION: &str = "users";

/// Postal address of a sample user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub pincode: String,
}

/// A sample user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// Name, also used as the resource name.
    pub name: String,
    /// Age.
    pub age: String,
    /// Phone number.
    pub contact: String,
    /// Employer.
    pub company: String,
    /// Address.
    pub address: Address,
}

fn user(name: &str, age: &str, company: &str, city: &str) -> User {
    User {
        name: name.into(),
        age: age.into(),
        contact: "2929292".into(),
        company: company.into(),
        address: Address {
            city: city.into(),
            state: "karnataka".into(),
            country: "india".into(),
            pincode: "433221".into(),
        },
    }
}

/// The sample employees.
pub fn records() -> Vec<User> {
    vec![
        user("Ravi", "25", "My tech", "bangalore"),
        user("Rahul", "24", "Gojek", "delhi"),
        user("Shivam", "23", "Apple", "chennai"),
        user("Kartik", "21", "URI", "indore"),
        user("Rohan", "34", "FinTech", "bangalore"),
        user("Nitin", "21", "War", "pune"),
    ]
}

/// Writes the sample records into `store`, returning how many were written.
pub fn populate(store: &Store) -> StoreResult<usize> {
    let users = records();
    for user in &users {
        store.write(COLLECTION, &user.name, user)?;
    }
    Ok(users.len())
}

/// Runs the seed command.
pub fn run(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(root)?;
    let count = populate(&store)?;

    info!("Seeded {} records into {:?}", count, root.join(COLLECTION));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populate_writes_every_record() {
        let temp = tempfile::tempdir().unwrap();
        let store = Store::open(temp.path().join("db")).unwrap();

        assert_eq!(populate(&store).unwrap(), 6);
        assert_eq!(store.list(COLLECTION).unwrap().len(), 6);

        let raw = store.read_all(COLLECTION).unwrap();
        let mut decoded: Vec<User> = raw.iter().map(|r| store.decode(r).unwrap()).collect();
        decoded.sort_by(|a, b| a.name.cmp(&b.name));
        let mut expected = records();
        expected.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(decoded, expected);
    }

    #[test]
    fn seeding_twice_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let store = Store::open(temp.path().join("db")).unwrap();

        populate(&store).unwrap();
        populate(&store).unwrap();
        assert_eq!(store.read_all(COLLECTION).unwrap().len(), 6);

        store.delete(COLLECTION, "Rohan").unwrap();
        assert_eq!(store.list(COLLECTION).unwrap().len(), 5);
    }
}
