use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[cfg(test)]
use mockall::automock;

use super::DeviceError;
use crate::config::{NotificationConfig, Platform};

/// Token handed out when running without a push service.
pub const SIMULATOR_PUSH_TOKEN: &str = "SIMULATOR_MOCK_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionResponse {
    pub status: PermissionStatus,
    pub can_ask_again: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPermissionState {
    pub status: PermissionStatus,
    pub is_loading: bool,
    pub can_ask_again: bool,
}

impl Default for NotificationPermissionState {
    fn default() -> Self {
        Self {
            status: PermissionStatus::Undetermined,
            is_loading: true,
            can_ask_again: true,
        }
    }
}

/// Android notification channel settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidChannel {
    pub id: &'static str,
    pub name: &'static str,
    pub vibration_pattern: [u32; 4],
    pub light_color: &'static str,
}

pub const DEFAULT_CHANNEL: AndroidChannel = AndroidChannel {
    id: "default",
    name: "default",
    vibration_pattern: [0, 250, 250, 250],
    light_color: "#FF231F7C",
};

/// The device's push notification service.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PushPlatform: Send + Sync {
    async fn get_permissions(&self) -> Result<PermissionResponse, DeviceError>;
    async fn request_permissions(&self) -> Result<PermissionResponse, DeviceError>;
    async fn set_notification_channel(&self, channel: &AndroidChannel) -> Result<(), DeviceError>;
    async fn push_token(&self, project_id: Option<String>) -> Result<String, DeviceError>;
}

/// Platform for hosts without a push service; every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedPushPlatform;

#[async_trait]
impl PushPlatform for UnsupportedPushPlatform {
    async fn get_permissions(&self) -> Result<PermissionResponse, DeviceError> {
        Err(unsupported())
    }

    async fn request_permissions(&self) -> Result<PermissionResponse, DeviceError> {
        Err(unsupported())
    }

    async fn set_notification_channel(&self, _channel: &AndroidChannel) -> Result<(), DeviceError> {
        Err(unsupported())
    }

    async fn push_token(&self, _project_id: Option<String>) -> Result<String, DeviceError> {
        Err(unsupported())
    }
}

fn unsupported() -> DeviceError {
    DeviceError::Notifications("no push service on this host".to_string())
}

/// Notification permission and push registration.
///
/// In simulator mode the platform is never called: permission is reported
/// as granted and the token is [`SIMULATOR_PUSH_TOKEN`]. Platform errors are
/// logged and degrade to "undetermined", `false` or no token.
pub struct NotificationManager {
    platform: Arc<dyn PushPlatform>,
    os: Platform,
    simulator: bool,
    project_id: Option<String>,
    state: NotificationPermissionState,
}

impl std::fmt::Debug for NotificationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationManager")
            .field("os", &self.os)
            .field("simulator", &self.simulator)
            .field("state", &self.state)
            .finish()
    }
}

impl NotificationManager {
    pub fn new(platform: Arc<dyn PushPlatform>, os: Platform, config: &NotificationConfig) -> Self {
        Self {
            platform,
            os,
            simulator: config.simulator,
            project_id: config.project_id.clone(),
            state: NotificationPermissionState::default(),
        }
    }

    pub fn state(&self) -> NotificationPermissionState {
        self.state
    }

    pub fn is_simulator(&self) -> bool {
        self.simulator
    }

    fn granted_on_simulator(&mut self) {
        self.state = NotificationPermissionState {
            status: PermissionStatus::Granted,
            is_loading: false,
            can_ask_again: true,
        };
    }

    fn apply(&mut self, response: PermissionResponse) {
        self.state = NotificationPermissionState {
            status: response.status,
            is_loading: false,
            can_ask_again: response.can_ask_again,
        };
    }

    pub async fn check_permission(&mut self) -> NotificationPermissionState {
        if self.simulator {
            self.granted_on_simulator();
            return self.state;
        }
        match self.platform.get_permissions().await {
            Ok(response) => self.apply(response),
            Err(e) => {
                error!(error = %e, "Checking notification permission failed");
                self.state = NotificationPermissionState {
                    status: PermissionStatus::Undetermined,
                    is_loading: false,
                    can_ask_again: true,
                };
            }
        }
        self.state
    }

    /// Asks the user; `true` when permission ends up granted.
    pub async fn request_permission(&mut self) -> bool {
        if self.simulator {
            self.granted_on_simulator();
            return true;
        }
        match self.platform.request_permissions().await {
            Ok(response) => {
                self.apply(response);
                response.status == PermissionStatus::Granted
            }
            Err(e) => {
                error!(error = %e, "Requesting notification permission failed");
                false
            }
        }
    }

    /// Push token for this device, asking for permission first if needed.
    pub async fn register_for_push_notifications(&self) -> Option<String> {
        if self.simulator {
            info!("Simulator mode, using mock push token");
            return Some(SIMULATOR_PUSH_TOKEN.to_string());
        }
        match self.try_register().await {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "Push registration failed");
                None
            }
        }
    }

    async fn try_register(&self) -> Result<Option<String>, DeviceError> {
        let mut status = self.platform.get_permissions().await?.status;
        if status != PermissionStatus::Granted {
            status = self.platform.request_permissions().await?.status;
        }
        if status != PermissionStatus::Granted {
            info!("Push notification permission not granted");
            return Ok(None);
        }

        if self.os == Platform::Android {
            self.platform.set_notification_channel(&DEFAULT_CHANNEL).await?;
        }

        let token = self.platform.push_token(self.project_id.clone()).await?;
        Ok(Some(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device_config() -> NotificationConfig {
        NotificationConfig {
            project_id: Some("ilicoo-project".to_string()),
            simulator: false,
        }
    }

    fn granted() -> PermissionResponse {
        PermissionResponse {
            status: PermissionStatus::Granted,
            can_ask_again: true,
        }
    }

    #[tokio::test]
    async fn simulator_never_touches_the_platform() {
        let platform = MockPushPlatform::new();
        let config = NotificationConfig {
            project_id: None,
            simulator: true,
        };
        let mut manager = NotificationManager::new(Arc::new(platform), Platform::Ios, &config);

        assert_eq!(manager.state().status, PermissionStatus::Undetermined);
        assert!(manager.state().is_loading);
        assert_eq!(manager.check_permission().await.status, PermissionStatus::Granted);
        assert!(manager.request_permission().await);
        assert_eq!(
            manager.register_for_push_notifications().await.as_deref(),
            Some(SIMULATOR_PUSH_TOKEN)
        );
    }

    #[tokio::test]
    async fn android_registration_configures_the_channel() {
        let mut platform = MockPushPlatform::new();
        platform.expect_get_permissions().returning(|| {
            Ok(PermissionResponse {
                status: PermissionStatus::Undetermined,
                can_ask_again: true,
            })
        });
        platform.expect_request_permissions().times(1).returning(|| Ok(granted()));
        platform
            .expect_set_notification_channel()
            .withf(|channel| channel.id == "default")
            .times(1)
            .returning(|_| Ok(()));
        platform
            .expect_push_token()
            .withf(|project| project.as_deref() == Some("ilicoo-project"))
            .returning(|_| Ok("ExponentPushToken[abc]".to_string()));

        let manager = NotificationManager::new(Arc::new(platform), Platform::Android, &device_config());
        assert_eq!(
            manager.register_for_push_notifications().await.as_deref(),
            Some("ExponentPushToken[abc]")
        );
    }

    #[tokio::test]
    async fn denied_permission_gives_no_token() {
        let mut platform = MockPushPlatform::new();
        let denied = PermissionResponse {
            status: PermissionStatus::Denied,
            can_ask_again: false,
        };
        platform.expect_get_permissions().returning(move || Ok(denied));
        platform.expect_request_permissions().returning(move || Ok(denied));
        platform.expect_push_token().never();

        let mut manager = NotificationManager::new(Arc::new(platform), Platform::Ios, &device_config());
        assert!(!manager.request_permission().await);
        assert!(!manager.state().can_ask_again);
        assert_eq!(manager.register_for_push_notifications().await, None);
    }

    #[tokio::test]
    async fn platform_errors_degrade() {
        let mut platform = MockPushPlatform::new();
        platform
            .expect_get_permissions()
            .returning(|| Err(DeviceError::Notifications("offline".to_string())));
        platform
            .expect_request_permissions()
            .returning(|| Err(DeviceError::Notifications("offline".to_string())));

        let mut manager = NotificationManager::new(Arc::new(platform), Platform::Ios, &device_config());
        let state = manager.check_permission().await;
        assert_eq!(state.status, PermissionStatus::Undetermined);
        assert!(!state.is_loading);
        assert!(!manager.request_permission().await);
        assert_eq!(manager.register_for_push_notifications().await, None);
    }

    #[tokio::test]
    async fn hosts_without_push_get_no_token() {
        let manager = NotificationManager::new(
            Arc::new(UnsupportedPushPlatform),
            Platform::Android,
            &device_config(),
        );
        assert_eq!(manager.register_for_push_notifications().await, None);
    }
}
