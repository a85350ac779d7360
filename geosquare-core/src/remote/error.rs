/// a failure at the RPC boundary. the message is kept verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct RemoteError(pub String);
