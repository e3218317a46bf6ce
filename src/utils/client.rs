use std::ops::{Deref, DerefMut};

use log::{error, info};
use reqwest::Client as ReqwestClient;
use reqwest::Response;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};

pub struct Client {
    client: ReqwestClient,
    base_url: String,
}

impl Client {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        [self.base_url.as_str(), path].join("")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn check_status(rsp: Response) -> ClientResult<Response> {
        let status = rsp.status();
        if !status.is_success() {
            let body = rsp.text().await?;
            if body.is_empty() {
                error!("Unsuccessful response {status} (empty body).");
            } else {
                error!("Unsuccessful response {status}: '{body}'.");
            }
            Err(ClientError::from_response(status, body))
        } else {
            info!("Received a successful response.");
            Ok(rsp)
        }
    }
}

impl Deref for Client {
    type Target = ReqwestClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl DerefMut for Client {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.client
    }
}
