//! # Validation
//!
//! Schema checks applied to cart data that crosses a trust boundary:
//! persisted carts on load, and product descriptors coming from views.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{CartItem, CartProduct};
use crate::MIN_ITEM_QUANTITY;

/// Validates a product descriptor before it is added to the cart.
///
/// ## Rules
/// - `id` and `title` must be non-blank
/// - `price` must be finite and non-negative
pub fn validate_product(product: &CartProduct) -> Result<(), ValidationError> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }
    if product.title.trim().is_empty() {
        return Err(ValidationError::required("title"));
    }
    validate_price(product.price)
}

/// Validates a full list of cart lines.
///
/// ## Rules
/// - every line has a non-blank id
/// - every quantity is at least [`MIN_ITEM_QUANTITY`]
/// - prices are finite and non-negative
/// - ids are unique
pub fn validate_items(items: &[CartItem]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        if item.id.trim().is_empty() {
            return Err(ValidationError::required("id"));
        }
        if item.quantity < MIN_ITEM_QUANTITY {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        validate_price(item.price)?;
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: item.id.clone(),
            });
        }
    }

    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidNumber {
            field: "price".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            title: "Mug".to_string(),
            image_url: String::new(),
            price: 7.5,
            quantity,
        }
    }

    #[test]
    fn test_valid_items() {
        assert!(validate_items(&[]).is_ok());
        assert!(validate_items(&[item("a", 1), item("b", 12)]).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = validate_items(&[item("a", 1), item("a", 2)]).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { value, .. } if value == "a"));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = validate_items(&[item("a", 0)]).unwrap_err();
        assert!(matches!(err, ValidationError::MustBePositive { .. }));
    }

    #[test]
    fn test_product_rules() {
        let mut product = item("a", 1).product();
        assert!(validate_product(&product).is_ok());

        product.price = -1.0;
        assert!(matches!(
            validate_product(&product),
            Err(ValidationError::InvalidNumber { .. })
        ));

        product.price = 1.0;
        product.id = "  ".to_string();
        assert!(matches!(
            validate_product(&product),
            Err(ValidationError::Required { field }) if field == "id"
        ));
    }
}
