//! Roster operations: list, add, remove, lookup.
//!
//! Emails are resolved first-match. Duplicate emails are not rejected on
//! add; the first matching record wins on remove and lookup.

use serde_json::Map;
use uuid::Uuid;

use crate::conf::{ClientRecord, FLOW_VISION};
use crate::error::{Error, Result};

/// Roster order, 1-based, as shown to the operator.
pub fn list(clients: &[ClientRecord]) -> Vec<(usize, &str, &str)> {
    clients
        .iter()
        .enumerate()
        .map(|(idx, c)| (idx + 1, c.email.as_str(), c.id.as_str()))
        .collect()
}

/// Append a fresh record for `email` and return it. The id is a new UUIDv4,
/// generated here and never reused.
pub fn add(clients: &mut Vec<ClientRecord>, email: &str) -> ClientRecord {
    let client = ClientRecord {
        email: email.to_string(),
        id: Uuid::new_v4().to_string(),
        enable: true,
        expiry_time: 0,
        flow: FLOW_VISION.to_string(),
        limit_ip: 0,
        reset: 0,
        rest: Map::new(),
    };
    log::debug!("appending client {} ({})", client.email, client.id);
    clients.push(client.clone());
    client
}

/// Drop the first record matching `email`, keeping the rest in order.
pub fn remove(clients: &mut Vec<ClientRecord>, email: &str) -> Result<ClientRecord> {
    match clients.iter().position(|c| c.email == email) {
        Some(idx) => Ok(clients.remove(idx)),
        None => Err(Error::NotFound(email.to_string())),
    }
}

pub fn find_by_email<'a>(clients: &'a [ClientRecord], email: &str) -> Result<&'a ClientRecord> {
    clients
        .iter()
        .find(|c| c.email == email)
        .ok_or_else(|| Error::NotFound(email.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_find_returns_defaults_and_valid_uuid() {
        let mut clients = Vec::new();
        add(&mut clients, "a@x");
        let found = find_by_email(&clients, "a@x").unwrap();
        assert!(Uuid::parse_str(&found.id).is_ok());
        assert!(found.enable);
        assert_eq!(found.expiry_time, 0);
        assert_eq!(found.flow, "xtls-rprx-vision");
        assert_eq!(found.limit_ip, 0);
        assert_eq!(found.reset, 0);
    }

    #[test]
    fn each_add_gets_a_distinct_id() {
        let mut clients = Vec::new();
        let first = add(&mut clients, "a@x");
        let second = add(&mut clients, "b@x");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn duplicate_emails_are_permitted() {
        let mut clients = Vec::new();
        add(&mut clients, "a@x");
        add(&mut clients, "a@x");
        assert_eq!(clients.len(), 2);
        // lookup sees the first one
        let found = find_by_email(&clients, "a@x").unwrap();
        assert_eq!(found.id, clients[0].id);
    }

    #[test]
    fn remove_sole_match_empties_the_roster() {
        let mut clients = Vec::new();
        add(&mut clients, "a@x");
        let removed = remove(&mut clients, "a@x").unwrap();
        assert_eq!(removed.email, "a@x");
        assert!(clients.is_empty());
    }

    #[test]
    fn remove_duplicate_takes_first_occurrence_only() {
        let mut clients = Vec::new();
        let first = add(&mut clients, "a@x");
        add(&mut clients, "b@x");
        let third = add(&mut clients, "a@x");
        let removed = remove(&mut clients, "a@x").unwrap();
        assert_eq!(removed.id, first.id);
        // order of the remainder preserved
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].email, "b@x");
        assert_eq!(clients[1].id, third.id);
    }

    #[test]
    fn remove_absent_email_leaves_roster_untouched() {
        let mut clients = Vec::new();
        add(&mut clients, "a@x");
        add(&mut clients, "b@x");
        let before = clients.clone();
        assert!(matches!(
            remove(&mut clients, "c@x"),
            Err(Error::NotFound(_))
        ));
        assert_eq!(clients, before);
    }

    #[test]
    fn list_is_one_based_and_order_preserving() {
        let mut clients = Vec::new();
        add(&mut clients, "a@x");
        add(&mut clients, "b@x");
        let listed = list(&clients);
        assert_eq!(listed[0].0, 1);
        assert_eq!(listed[0].1, "a@x");
        assert_eq!(listed[1].0, 2);
        assert_eq!(listed[1].1, "b@x");
    }
}
