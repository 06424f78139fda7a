use reqwest::{StatusCode, Url};

/// How much of a non-2xx body ends up in the error message.
const BODY_PREVIEW_CHARS: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to encode GraphQL request payload")]
    Encoding(#[source] serde_json::Error),

    #[error("request to `{url}` failed")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered, but not with a 2xx status. The body is kept
    /// verbatim since servers rarely send a GraphQL envelope in this case.
    #[error("`{url}` responded with {status}: {}", preview(.body))]
    Status {
        url: Url,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode response from `{url}`")]
    Decoding {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether the failure happened on the wire rather than in (de)serialization.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Status { .. })
    }
}

fn preview(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((end, _)) => format!("{}… ({} bytes)", &body[..end], body.len()),
        None => body.to_owned(),
    }
}
