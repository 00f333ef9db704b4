//! App-store link selection for the page footer.

/// Play Store listing for the GeoNet Quake app.
pub const PLAY_STORE_URL: &str =
    "https://play.google.com/store/apps/details?id=nz.org.geonet.quake&hl=en";
/// App Store listing for the GeoNet Quake app.
pub const APP_STORE_URL: &str = "https://itunes.apple.com/nz/app/geonet-quake/id533054360?mt=8";

pub const ANDROID_ICON_CLASS: &str = "fa-brands fa-android fa-1";
pub const APPLE_ICON_CLASS: &str = "fa-brands fa-apple fa-1";

/// Mobile operating system recognised from a user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileOs {
    Android,
    Ios,
    Unknown,
}

/// Classifies a user-agent string into a mobile operating system.
///
/// Android matches case-insensitively. iOS devices are matched on the
/// case-sensitive iPad/iPhone/iPod product tokens; agents that carry
/// MSStream advertise those tokens without being iOS and are excluded.
pub fn classify_user_agent(user_agent: &str) -> MobileOs {
    if user_agent.to_ascii_lowercase().contains("android") {
        return MobileOs::Android;
    }
    let ios_token = ["iPad", "iPhone", "iPod"]
        .iter()
        .any(|token| user_agent.contains(token));
    if ios_token && !user_agent.contains("MSStream") {
        return MobileOs::Ios;
    }
    MobileOs::Unknown
}

/// Store link and icon for the footer app badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLink {
    pub href: &'static str,
    pub icon_class: &'static str,
}

impl AppLink {
    /// Resolves the footer link for a user agent, or `None` when the link
    /// container should stay hidden.
    pub fn for_user_agent(user_agent: &str) -> Option<Self> {
        match classify_user_agent(user_agent) {
            MobileOs::Android => Some(Self {
                href: PLAY_STORE_URL,
                icon_class: ANDROID_ICON_CLASS,
            }),
            MobileOs::Ios => Some(Self {
                href: APP_STORE_URL,
                icon_class: APPLE_ICON_CLASS,
            }),
            MobileOs::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn android_agent_links_to_play_store() {
        let link = AppLink::for_user_agent("Mozilla/5.0 (Linux; Android 10)").unwrap();
        assert_eq!(link.href, PLAY_STORE_URL);
        assert!(link.icon_class.contains("fa-android"));
    }

    #[test]
    fn ios_agents_link_to_app_store() {
        for agent in [
            "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X)",
            "Mozilla/5.0 (iPad; CPU OS 14_2 like Mac OS X)",
            "Mozilla/5.0 (iPod touch; CPU iPhone OS 12_0 like Mac OS X)",
        ] {
            let link = AppLink::for_user_agent(agent).unwrap();
            assert_eq!(link.href, APP_STORE_URL);
            assert_eq!(link.icon_class, APPLE_ICON_CLASS);
        }
    }

    #[test]
    fn android_match_is_case_insensitive() {
        assert_eq!(classify_user_agent("ANDROID 9; SM-G960F"), MobileOs::Android);
    }

    #[test]
    fn ios_tokens_are_case_sensitive() {
        assert_eq!(classify_user_agent("some ipad browser"), MobileOs::Unknown);
    }

    #[test]
    fn msstream_agents_are_not_ios() {
        let agent = "Mozilla/5.0 (Windows Phone 10; iPhone emulation) MSStream";
        assert_eq!(classify_user_agent(agent), MobileOs::Unknown);
    }

    #[test]
    fn unrecognised_agent_hides_the_link() {
        assert!(AppLink::for_user_agent("Mozilla/5.0 (X11; Linux x86_64)").is_none());
        assert!(AppLink::for_user_agent("").is_none());
    }
}
