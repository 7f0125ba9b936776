/// Errors from the assist gateway and its model client.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// The caller asked for something the gateway does not offer.
    #[error("{0}")]
    InvalidRequest(String),

    /// The model replied, but not with parseable JSON.
    #[error("Model reply is not valid JSON: {0}")]
    UpstreamFormat(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model endpoint returned a non-2xx status code.
    #[error("Model API error ({status}): {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The completion carried no message content.
    #[error("Model returned an empty reply")]
    EmptyReply,

    /// The gateway is shutting down and no longer accepts requests.
    #[error("Assist gateway is unavailable")]
    Unavailable,
}
