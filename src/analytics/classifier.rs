//! User-agent classification and visitor fingerprints

/// Operating system bucket derived from the user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
    Unknown,
}

impl Os {
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::MacOs => "Mac OS",
            Os::Linux => "Linux",
            Os::Android => "Android",
            Os::Ios => "iOS",
            Os::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Desktop => "Desktop",
            DeviceClass::Mobile => "Mobile",
        }
    }
}

/// Keyword cascade over the lowercased user agent. First match wins and the
/// order below is contractual: "linux" is checked before "android", so an
/// Android UA that also says "Linux" buckets as Linux/Desktop.
pub fn classify_user_agent(user_agent: &str) -> (Os, DeviceClass) {
    let ua = user_agent.to_lowercase();

    if ua.contains("windows") {
        (Os::Windows, DeviceClass::Desktop)
    } else if ua.contains("macintosh") || ua.contains("mac os") {
        (Os::MacOs, DeviceClass::Desktop)
    } else if ua.contains("linux") {
        (Os::Linux, DeviceClass::Desktop)
    } else if ua.contains("android") {
        (Os::Android, DeviceClass::Mobile)
    } else if ua.contains("iphone") || ua.contains("ipad") {
        (Os::Ios, DeviceClass::Mobile)
    } else {
        (Os::Unknown, DeviceClass::Desktop)
    }
}

/// Approximate visitor identity: user agent concatenated with country, both
/// defaulted to empty. Two people behind the same browser build and country
/// collapse into one "visitor"; the summary documents the count as an
/// estimate.
pub fn fingerprint(user_agent: Option<&str>, country: Option<&str>) -> String {
    let mut key = String::from(user_agent.unwrap_or(""));
    key.push_str(country.unwrap_or(""));
    key
}
