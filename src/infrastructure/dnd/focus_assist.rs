//! Native focus-assist / banner setting strategy

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::DoNotDisturb;
use crate::domain::platform::HostPlatform;

use super::probe::read_setting;

const TOAST_SETTINGS_KEY: &str =
    r"HKCU\Software\Microsoft\Windows\CurrentVersion\Notifications\Settings";
const TOAST_SETTINGS_VALUE: &str = "NOC_GLOBAL_SETTING_TOASTS_ENABLED";

/// Reads the OS notification switch directly.
///
/// Windows: the global toast setting in the registry.
/// Linux: the GNOME `show-banners` key.
pub struct FocusAssistDnd {
    platform: HostPlatform,
}

impl FocusAssistDnd {
    pub fn new(platform: HostPlatform) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl DoNotDisturb for FocusAssistDnd {
    async fn is_suppressed(&self) -> bool {
        let suppressed = match self.platform {
            HostPlatform::Windows => {
                read_setting("reg", &["query", TOAST_SETTINGS_KEY, "/v", TOAST_SETTINGS_VALUE])
                    .await
                    .is_some_and(|out| toasts_disabled(&out))
            }
            HostPlatform::Linux => {
                read_setting(
                    "gsettings",
                    &["get", "org.gnome.desktop.notifications", "show-banners"],
                )
                .await
                .is_some_and(|out| out == "false")
            }
            HostPlatform::MacOs | HostPlatform::Other => false,
        };
        debug!(platform = %self.platform, suppressed, "Focus assist probed");
        suppressed
    }
}

/// `reg query` prints `<name>    REG_DWORD    0x0` when toasts are off
fn toasts_disabled(output: &str) -> bool {
    output
        .lines()
        .find(|line| line.contains(TOAST_SETTINGS_VALUE))
        .and_then(|line| line.split_whitespace().last())
        .is_some_and(|value| value.eq_ignore_ascii_case("0x0"))
}
