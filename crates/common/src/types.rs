use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an order, generated fresh for every accepted
/// payment.
///
/// Serializes transparently as the plain UUID string, which is what the
/// `orderid` field of the broker message body and the pay response
/// carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generates a new random order ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_order_ids_do_not_repeat() {
        let id1 = OrderId::new();
        let id2 = OrderId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn serializes_as_the_plain_uuid_string_consumers_decode() {
        let id = OrderId::new();

        // the broker message body carries the bare UUID string
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let decoded: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, id);
    }

    #[test]
    fn display_is_a_parseable_uuid() {
        let id = OrderId::new();
        Uuid::parse_str(&id.to_string()).expect("order id renders as a UUID");
    }
}
