use async_trait::async_trait;
use tracing::{debug, info};

#[cfg(test)]
use mockall::automock;

use super::DeviceError;
use crate::geo::RoutePoint;
use crate::search::directions_url;

/// Hands URLs to the system (dialer, maps app, browser).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UrlOpener: Send + Sync {
    async fn can_open(&self, url: &str) -> bool;
    async fn open(&self, url: &str) -> Result<(), DeviceError>;
}

/// Opener for terminals: prints the URL for the user to follow.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleUrlOpener;

#[async_trait]
impl UrlOpener for ConsoleUrlOpener {
    async fn can_open(&self, url: &str) -> bool {
        ["tel:", "http://", "https://"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
    }

    async fn open(&self, url: &str) -> Result<(), DeviceError> {
        println!("{url}");
        Ok(())
    }
}

pub fn phone_url(phone: &str) -> String {
    let number: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{number}")
}

async fn open_if_supported(opener: &dyn UrlOpener, url: &str) -> Result<bool, DeviceError> {
    if !opener.can_open(url).await {
        debug!(url, "URL not supported on this device");
        return Ok(false);
    }
    opener.open(url).await?;
    info!(url, "URL opened");
    Ok(true)
}

/// Starts a call. `Ok(false)` when the device has no dialer.
pub async fn call(opener: &dyn UrlOpener, phone: &str) -> Result<bool, DeviceError> {
    open_if_supported(opener, &phone_url(phone)).await
}

/// Opens driving directions in the maps app.
pub async fn open_directions(
    opener: &dyn UrlOpener,
    from: &RoutePoint,
    to: &RoutePoint,
) -> Result<bool, DeviceError> {
    open_if_supported(opener, &directions_url(from, to)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn calls_when_a_dialer_exists() {
        let mut opener = MockUrlOpener::new();
        opener
            .expect_can_open()
            .with(eq("tel:+22370001111"))
            .return_const(true);
        opener
            .expect_open()
            .with(eq("tel:+22370001111"))
            .times(1)
            .returning(|_| Ok(()));

        assert!(call(&opener, "+223 7000 1111").await.unwrap());
    }

    #[tokio::test]
    async fn does_nothing_without_a_dialer() {
        let mut opener = MockUrlOpener::new();
        opener.expect_can_open().return_const(false);
        opener.expect_open().never();

        assert!(!call(&opener, "+22370001111").await.unwrap());
    }

    #[tokio::test]
    async fn directions_go_to_the_maps_app() {
        let mut opener = MockUrlOpener::new();
        opener.expect_can_open().return_const(true);
        opener
            .expect_open()
            .withf(|url| url.starts_with("http://maps.apple.com/?saddr=12.6,-8&daddr="))
            .times(1)
            .returning(|_| Ok(()));

        let from = RoutePoint::new(Coordinate::new(12.6, -8.0), "A");
        let to = RoutePoint::new(Coordinate::new(12.5, -7.9), "B");
        assert!(open_directions(&opener, &from, &to).await.unwrap());
    }

    #[tokio::test]
    async fn console_opener_accepts_known_schemes() {
        assert!(ConsoleUrlOpener.can_open("tel:123").await);
        assert!(!ConsoleUrlOpener.can_open("sms:123").await);
    }
}
