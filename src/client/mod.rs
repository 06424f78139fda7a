use cynic::GraphQlResponse;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

mod error;

pub use error::Error;

/// Variables as they appear at the boundary, before the server types them.
pub type Variables = serde_json::Map<String, Value>;

/// The body of a GraphQL-over-HTTP POST request.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    variables: Option<Value>,
}

impl<'a> QueryRequest<'a> {
    fn new<V: Serialize>(query: &'a str, variables: Option<&V>) -> Result<Self, Error> {
        let variables = variables
            .map(serde_json::to_value)
            .transpose()
            .map_err(Error::Encoding)?
            // `{}` and `null` mean the same thing to the server, always send `null`
            .filter(|value| !matches!(value, Value::Object(map) if map.is_empty()));

        Ok(Self { query, variables })
    }

    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(self).map_err(Error::Encoding)
    }
}

pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    #[cfg(test)]
    pub fn new(url: Url) -> Self {
        Self::with_http(reqwest::Client::new(), url)
    }

    /// Creates a client sharing the connection pool of `client`.
    pub fn with_http(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Sends `query` with `variables` and decodes the response envelope.
    ///
    /// Exactly one HTTP exchange is made per call; failures are never retried.
    /// Fields missing from the response are left to the `Deserialize` impl of
    /// `Query` to default.
    pub async fn execute<Query, Vars>(
        &self,
        query: &str,
        variables: Option<&Vars>,
    ) -> Result<GraphQlResponse<Query>, Error>
    where
        Query: DeserializeOwned,
        Vars: Serialize,
    {
        let body = QueryRequest::new(query, variables)?.to_bytes()?;
        tracing::debug!(url = %self.url, bytes = body.len(), "sending GraphQL request");

        let transport = |source| Error::Transport {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;
        tracing::debug!(url = %self.url, %status, bytes = bytes.len(), "received GraphQL response");

        if !status.is_success() {
            return Err(Error::Status {
                url: self.url.clone(),
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| Error::Decoding {
            url: self.url.clone(),
            source,
        })
    }
}
