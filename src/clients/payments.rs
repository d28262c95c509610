use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{build_client, check_status, ClientError};

const SERVICE: &str = "payments";

/// Payment-link generation for the outstanding booking total.
#[derive(Clone)]
pub struct PaymentsClient {
    url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct PaymentLinkRequest<'a> {
    reference: &'a str,
    amount: Decimal,
}

#[derive(Deserialize)]
struct PaymentLinkResponse {
    url: String,
}

impl PaymentsClient {
    pub fn new(url: String, api_key: &str) -> Self {
        PaymentsClient {
            url,
            client: build_client(api_key),
        }
    }

    pub async fn create_payment_link(
        &self,
        reference: &str,
        amount: Decimal,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/payment-links", self.url))
            .json(&PaymentLinkRequest { reference, amount })
            .send()
            .await?;

        let response = check_status(SERVICE, response).await?;
        let link: PaymentLinkResponse = response.json().await?;
        Ok(link.url)
    }
}
