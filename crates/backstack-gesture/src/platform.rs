//! Host platform detection and per-platform input hooks.

/// Host platform the app shell runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Plain browser, no native shell.
    Web,
    /// Android native shell (hardware back button available).
    Android,
    /// iOS native shell (edge swipe is the primary back affordance).
    Ios,
    /// Could not be determined (e.g. no window/UA at all).
    Unknown,
}

/// Mobile UA markers, matched case-insensitively.
const MOBILE_UA_MARKERS: &[&str] =
    &["android", "iphone", "ipad", "ipod", "blackberry", "iemobile", "opera mini"];

impl Platform {
    /// Detect the platform, preferring the native bridge's self-reported
    /// name over user-agent sniffing. Falls back to [`Platform::Web`] when a
    /// user agent is present but matches no mobile pattern.
    pub fn detect(native_platform: Option<&str>, user_agent: Option<&str>) -> Self {
        if let Some(name) = native_platform {
            return match name.to_ascii_lowercase().as_str() {
                "android" => Self::Android,
                "ios" => Self::Ios,
                _ => Self::Web,
            };
        }

        let Some(ua) = user_agent else {
            return Self::Unknown;
        };
        let ua = ua.to_ascii_lowercase();
        if ua.contains("android") {
            Self::Android
        } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
            Self::Ios
        } else {
            Self::Web
        }
    }

    /// Whether a user agent looks like a mobile device at all, regardless of
    /// which platform it resolves to.
    pub fn is_mobile_user_agent(user_agent: &str) -> bool {
        let ua = user_agent.to_ascii_lowercase();
        MOBILE_UA_MARKERS.iter().any(|marker| ua.contains(marker))
    }
}

/// Input sources the host driver must wire up for a platform.
///
/// The recognizer itself is platform-independent; these hooks tell the
/// driver which raw event sources to install and which default host
/// behaviors to suppress so they do not fight the swipe detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputHook {
    /// Forward touch events to the edge-swipe recognizer.
    EdgeSwipe,
    /// Suppress the browser's native horizontal overscroll navigation.
    SuppressOverscroll,
    /// Suppress default callout/selection gestures that interfere with
    /// swipe detection.
    SuppressTouchCallout,
    /// Map `Escape` and `Alt+ArrowLeft` to a back shortcut.
    KeyboardShortcuts,
    /// Map the mouse side back button (`button == 3`) to a back shortcut.
    MouseBackButton,
}

/// The input hooks a platform needs.
pub fn input_hooks(platform: Platform) -> &'static [InputHook] {
    match platform {
        Platform::Android => &[InputHook::EdgeSwipe, InputHook::SuppressOverscroll],
        Platform::Ios => &[InputHook::EdgeSwipe, InputHook::SuppressTouchCallout],
        Platform::Web => &[InputHook::KeyboardShortcuts, InputHook::MouseBackButton],
        Platform::Unknown => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_name_wins_over_user_agent() {
        let detected = Platform::detect(Some("android"), Some("Mozilla/5.0 (iPhone)"));
        assert_eq!(detected, Platform::Android);
    }

    #[test]
    fn unknown_bridge_name_means_web() {
        assert_eq!(Platform::detect(Some("electron"), None), Platform::Web);
    }

    #[test]
    fn user_agent_fallback() {
        assert_eq!(Platform::detect(None, Some("Mozilla/5.0 (Linux; Android 14)")), Platform::Android);
        assert_eq!(Platform::detect(None, Some("Mozilla/5.0 (iPad; CPU OS 17_0)")), Platform::Ios);
        assert_eq!(Platform::detect(None, Some("Mozilla/5.0 (X11; Linux x86_64)")), Platform::Web);
        assert_eq!(Platform::detect(None, None), Platform::Unknown);
    }

    #[test]
    fn mobile_user_agent_markers() {
        assert!(Platform::is_mobile_user_agent("Opera Mini/36.2"));
        assert!(Platform::is_mobile_user_agent("Mozilla/5.0 (BlackBerry)"));
        assert!(!Platform::is_mobile_user_agent("Mozilla/5.0 (Windows NT 10.0)"));
    }

    #[test]
    fn platform_hooks() {
        assert!(input_hooks(Platform::Android).contains(&InputHook::EdgeSwipe));
        assert!(input_hooks(Platform::Ios).contains(&InputHook::SuppressTouchCallout));
        assert!(input_hooks(Platform::Web).contains(&InputHook::KeyboardShortcuts));
        assert!(input_hooks(Platform::Unknown).is_empty());
    }
}
