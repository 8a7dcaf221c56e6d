use std::error::Error as _;

use coordtrace_types::ResolvedStatus;

/// Classifies a terminal `reqwest` failure per §4.5/§7. TLS/certificate
/// failures are handled by the caller (they trigger the unverified-retry,
/// never reach this classifier on their own) — `SslError` is only reachable
/// if the unverified retry *also* fails with a certificate-flavored error.
pub fn classify(err: &reqwest::Error) -> ResolvedStatus {
    if err.is_timeout() {
        ResolvedStatus::Timeout
    } else if err.is_redirect() {
        ResolvedStatus::TooManyRedirects
    } else if is_tls_error(err) {
        ResolvedStatus::SslError
    } else if err.is_connect() {
        ResolvedStatus::ConnectionError
    } else {
        ResolvedStatus::OtherError
    }
}

fn is_tls_error(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(err) = source {
        let msg = err.to_string().to_lowercase();
        if msg.contains("certificate") || msg.contains("tls") || msg.contains("ssl") {
            return true;
        }
        source = err.source();
    }
    false
}
