//! `cartCreate` request and response shapes.

use serde::{Deserialize, Serialize};
use trgc::items::CheckoutLine;

use crate::identity::BuyerIdentity;

pub(crate) const CART_CREATE_MUTATION: &str = r"mutation cartCreate($input: CartInput!) {
  cartCreate(input: $input) {
    cart {
      checkoutUrl
    }
    userErrors {
      field
      message
    }
  }
}";

#[derive(Debug, Serialize)]
pub(crate) struct CartCreateRequest<'a> {
    pub query: &'static str,
    pub variables: CartCreateVariables<'a>,
}

impl<'a> CartCreateRequest<'a> {
    pub(crate) fn new(
        lines: &'a [CheckoutLine],
        buyer_identity: Option<&'a BuyerIdentity>,
    ) -> Self {
        Self {
            query: CART_CREATE_MUTATION,
            variables: CartCreateVariables {
                input: CartInput {
                    lines,
                    buyer_identity,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CartCreateVariables<'a> {
    pub input: CartInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartInput<'a> {
    pub lines: &'a [CheckoutLine],

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_identity: Option<&'a BuyerIdentity>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartCreateResponse {
    pub data: Option<CartCreateData>,

    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartCreateData {
    pub cart_create: Option<CartCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartCreatePayload {
    pub cart: Option<CreatedCart>,

    #[serde(default)]
    pub user_errors: Vec<CartUserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedCart {
    pub checkout_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CartUserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl CartUserError {
    /// `"lines.0.merchandiseId: message"`, or just the message without a field path.
    pub(crate) fn describe(&self) -> String {
        match self.field.as_deref() {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), self.message),
            _ => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use trgc::items::VariantId;

    use crate::identity::BuyerIdentity;

    use super::*;

    #[test]
    fn request_body_without_identity_omits_buyer_identity() -> TestResult {
        let lines = [CheckoutLine {
            merchandise_id: VariantId::new("gid://shopify/ProductVariant/1"),
            quantity: 2,
        }];

        let body = serde_json::to_value(CartCreateRequest::new(&lines, None))?;

        assert_eq!(
            body["variables"],
            json!({
                "input": {
                    "lines": [{ "merchandiseId": "gid://shopify/ProductVariant/1", "quantity": 2 }]
                }
            })
        );
        assert_eq!(body["query"], CART_CREATE_MUTATION);

        Ok(())
    }

    #[test]
    fn request_body_includes_identity() -> TestResult {
        let identity = BuyerIdentity {
            email: Some("member@example.com".to_string()),
            ..BuyerIdentity::default()
        };

        let body = serde_json::to_value(CartCreateRequest::new(&[], Some(&identity)))?;

        assert_eq!(
            body["variables"]["input"]["buyerIdentity"],
            json!({ "email": "member@example.com" })
        );

        Ok(())
    }

    #[test]
    fn user_error_description_joins_field_path() {
        let with_field = CartUserError {
            field: Some(vec!["lines".to_string(), "0".to_string(), "merchandiseId".to_string()]),
            message: "Variant is unavailable".to_string(),
        };
        let without_field = CartUserError {
            field: None,
            message: "Cart is invalid".to_string(),
        };

        assert_eq!(
            with_field.describe(),
            "lines.0.merchandiseId: Variant is unavailable"
        );
        assert_eq!(without_field.describe(), "Cart is invalid");
    }
}
