use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{build_client, check_status, ClientError};

const SERVICE: &str = "invoicing";

/// Third-party invoicing API: create an invoice, then tell the provider to
/// send it to the customer.
#[derive(Clone)]
pub struct InvoicingClient {
    url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CreateInvoiceRequest<'a> {
    customer_name: &'a str,
    customer_email: &'a str,
    description: &'a str,
    amount: Decimal,
}

#[derive(Deserialize)]
struct CreateInvoiceResponse {
    id: String,
}

impl InvoicingClient {
    pub fn new(url: String, api_key: &str) -> Self {
        InvoicingClient {
            url,
            client: build_client(api_key),
        }
    }

    /// Returns the provider's invoice id.
    pub async fn create_invoice(
        &self,
        customer_name: &str,
        customer_email: &str,
        description: &str,
        amount: Decimal,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/invoices", self.url))
            .json(&CreateInvoiceRequest {
                customer_name,
                customer_email,
                description,
                amount,
            })
            .send()
            .await?;

        let response = check_status(SERVICE, response).await?;
        let created: CreateInvoiceResponse = response.json().await?;
        Ok(created.id)
    }

    pub async fn send_invoice(&self, invoice_id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/invoices/{}/send", self.url, invoice_id))
            .send()
            .await?;

        check_status(SERVICE, response).await?;
        Ok(())
    }
}
