use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

/// Best-effort client IP for activity logging.
///
/// Reads the `ConnectInfo` extension when the server was started with
/// connect-info support; resolves to `None` otherwise (e.g. in tests).
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(ClientIp(ip))
    }
}

impl ClientIp {
    pub fn as_string(&self) -> Option<String> {
        self.0.map(|ip| ip.to_string())
    }
}

/// Formats an amount the way the original reports did: `Rs. ` prefix and
/// two decimals. Exporters depend on this exact shape.
pub fn format_currency(amount: f64) -> String {
    format!("Rs. {:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_keeps_prefix_and_two_decimals() {
        assert_eq!(format_currency(0.0), "Rs. 0.00");
        assert_eq!(format_currency(1234.5), "Rs. 1234.50");
        assert_eq!(format_currency(0.005), "Rs. 0.01");
    }
}
