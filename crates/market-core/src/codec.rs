//! # Persisted Cart Format
//!
//! The cart is stored as a JSON array of cart lines:
//!
//! ```json
//! [
//!   { "id": "p1", "title": "Shirt", "image_url": "u", "price": 10, "quantity": 1 }
//! ]
//! ```
//!
//! Decoding validates the schema (see [`crate::validation::validate_items`]),
//! so anything that decodes upholds the [`CartState`] invariants.

use crate::cart::CartState;
use crate::error::{CoreError, CoreResult};
use crate::types::CartItem;
use crate::validation::validate_items;

/// Encodes a cart into its persisted form.
///
/// Applies the same schema checks as [`decode`], so a cart that encodes
/// successfully always decodes back to an equal cart.
///
/// ## Errors
/// [`CoreError::Validation`] if a line would be rejected on load.
pub fn encode(cart: &CartState) -> CoreResult<String> {
    validate_items(cart.items())?;
    serde_json::to_string(cart).map_err(|e| CoreError::MalformedCart(e.to_string()))
}

/// Decodes and validates a persisted cart.
///
/// ## Errors
/// - [`CoreError::MalformedCart`] if the value is not an array of cart lines
/// - [`CoreError::Validation`] if a line breaks an invariant
///   (duplicate id, zero quantity, bad price)
pub fn decode(raw: &str) -> CoreResult<CartState> {
    let items: Vec<CartItem> =
        serde_json::from_str(raw).map_err(|e| CoreError::MalformedCart(e.to_string()))?;

    validate_items(&items)?;

    Ok(CartState::from_items(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartAction;
    use crate::types::CartProduct;

    fn sample_cart() -> CartState {
        let mut cart = CartState::new();
        for (id, price) in [("p1", 10.0), ("p2", 0.99), ("p3", 149.5)] {
            cart.apply(CartAction::Add(CartProduct {
                id: id.to_string(),
                title: format!("Product {}", id),
                image_url: format!("https://img.example/{}.jpg", id),
                price,
            }));
        }
        cart.apply(CartAction::Increment("p2".to_string()));
        cart
    }

    #[test]
    fn test_encode_then_decode_preserves_content_and_order() {
        let cart = sample_cart();
        let raw = encode(&cart).unwrap();

        assert!(raw.starts_with('['));
        assert_eq!(decode(&raw).unwrap(), cart);
    }

    #[test]
    fn test_decode_integer_price_from_seed_producers() {
        let raw = r#"[{"id":"p1","title":"Shirt","image_url":"u","price":10,"quantity":3}]"#;
        let cart = decode(raw).unwrap();

        let item = cart.get("p1").unwrap();
        assert_eq!(item.price, 10.0);
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_decode_rejects_foreign_shapes() {
        for raw in [
            "not json",
            "{}",
            r#"{"products":[]}"#,
            r#"[{"id":"p1"}]"#,
            r#"[{"id":"p1","title":"T","imageUrl":"u","price":1,"quantity":1}]"#,
            r#"[{"id":"p1","title":"T","image_url":"u","price":1,"quantity":-2}]"#,
        ] {
            assert!(
                matches!(decode(raw), Err(CoreError::MalformedCart(_))),
                "expected malformed: {}",
                raw
            );
        }
    }

    #[test]
    fn test_decode_rejects_invariant_violations() {
        let duplicate = r#"[
            {"id":"p1","title":"T","image_url":"u","price":1,"quantity":1},
            {"id":"p1","title":"T","image_url":"u","price":1,"quantity":2}
        ]"#;
        let zero = r#"[{"id":"p1","title":"T","image_url":"u","price":1,"quantity":0}]"#;

        assert!(matches!(decode(duplicate), Err(CoreError::Validation(_))));
        assert!(matches!(decode(zero), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_encode_refuses_what_decode_would_reject() {
        let line = |id: &str, price: f64| CartItem {
            id: id.to_string(),
            title: "T".to_string(),
            image_url: "u".to_string(),
            price,
            quantity: 1,
        };

        for items in [
            vec![line("p1", 10.0), line("p2", -1.0)],
            vec![line("p1", f64::NAN)],
            vec![line("", 1.0)],
            vec![line("p1", 1.0), line("p1", 2.0)],
        ] {
            let cart = CartState::from_items(items);
            assert!(matches!(encode(&cart), Err(CoreError::Validation(_))));
        }
    }

    #[test]
    fn test_reducer_states_always_round_trip() {
        let mut cart = sample_cart();
        cart.apply(CartAction::Add(CartProduct {
            id: "bad".to_string(),
            title: "Negative".to_string(),
            image_url: String::new(),
            price: -1.0,
        }));

        assert_eq!(decode(&encode(&cart).unwrap()).unwrap(), cart);
    }

    #[test]
    fn test_empty_array_is_empty_cart() {
        assert!(decode("[]").unwrap().is_empty());
    }
}
