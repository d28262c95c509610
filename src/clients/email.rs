use serde::Serialize;

use super::{build_client, check_status, ClientError};

const SERVICE: &str = "email";

/// Templated outbound email. The template itself lives with the provider;
/// we post the template name and its parameters.
#[derive(Clone)]
pub struct EmailClient {
    url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    template: &'a str,
    to: &'a str,
    params: serde_json::Value,
}

impl EmailClient {
    pub fn new(url: String, api_key: &str) -> Self {
        EmailClient {
            url,
            client: build_client(api_key),
        }
    }

    pub async fn send_template(
        &self,
        template: &str,
        to: &str,
        params: serde_json::Value,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/send", self.url))
            .json(&SendRequest {
                template,
                to,
                params,
            })
            .send()
            .await?;

        check_status(SERVICE, response).await?;
        Ok(())
    }
}
