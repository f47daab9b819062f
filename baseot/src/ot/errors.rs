use std::io;

/// Errors surfaced by the base OT protocol. Any of these aborts the current
/// batch; no partial keys are ever returned.
#[derive(Debug, thiserror::Error)]
pub enum OtError {
    /// Group construction or parameter retrieval failed.
    #[error("curve initialization failed: {0}")]
    CurveInit(&'static str),

    /// Sampling a scalar failed.
    #[error("rng failure: {0}")]
    Rng(#[from] rand::Error),

    /// An arithmetic or conversion primitive reported failure.
    #[error("crypto primitive failure: {0}")]
    CryptoInternal(&'static str),

    /// Malformed length prefix, non-hex payload, or an off-curve or identity
    /// point received.
    #[error("wire decode failure: {0}")]
    WireDecode(String),

    /// The communication agent failed or the stream ended early.
    #[error("transport failure: {0}")]
    Transport(#[from] io::Error),
}
