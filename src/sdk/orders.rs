use super::config::OrdersConfig;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub items: Vec<OrderItem>,
    pub amount: f64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    data: Vec<Order>,
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("order backend returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches the customer's order history from the backend.
///
/// The session token travels in a `token` header; the body is an empty
/// JSON object.
pub fn fetch_user_orders(config: &OrdersConfig, client: &Client) -> Result<Vec<Order>, OrderError> {
    let url = format!("{}/api/order/userorders", config.base_url);
    let response = client
        .post(&url)
        .header("token", &config.token)
        .json(&serde_json::json!({}))
        .send()?;

    let status = response.status();
    let text = response.text()?;
    if !status.is_success() {
        return Err(OrderError::Status(status));
    }

    let parsed: OrdersResponse = serde_json::from_str(&text).map_err(|e| {
        log::error!(
            "Failed to parse orders response. URL: {}\nError: {}. Body: {}",
            url,
            e,
            text
        );
        e
    })?;

    Ok(parsed.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_backend_payload() {
        let body = r#"{
            "success": true,
            "data": [
                {
                    "items": [
                        {"name": "Greek salad", "quantity": 2, "price": 12},
                        {"name": "Lasagna Rolls", "quantity": 1, "price": 14}
                    ],
                    "amount": 38,
                    "status": "Out for delivery"
                }
            ]
        }"#;
        let parsed: OrdersResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 1);
        let order = &parsed.data[0];
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].name, "Greek salad");
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.amount, 38.0);
        assert_eq!(order.status, "Out for delivery");
    }
}
