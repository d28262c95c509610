pub mod email;
pub mod invoicing;
pub mod payments;

pub use email::EmailClient;
pub use invoicing::InvoicingClient;
pub use payments::PaymentsClient;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected {status} response from {service}")]
    UnexpectedStatus {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

fn build_client(api_key: &str) -> reqwest::Client {
    let mut headers = reqwest::header::HeaderMap::new();
    if let Ok(value) = api_key.parse() {
        headers.insert(API_KEY_HEADER, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .expect("reqwest client")
}

async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("unexpected response from {service}: {status} {body}");
        return Err(ClientError::UnexpectedStatus {
            service,
            status,
            body,
        });
    }
    Ok(response)
}
