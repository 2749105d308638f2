/// Platform facts derived from a browser user agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserAgentClass {
    pub ie11: bool,
    pub iphone: bool,
    pub mobile: bool,
}

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

pub fn classify_user_agent(user_agent: &str) -> UserAgentClass {
    let lower = user_agent.to_ascii_lowercase();
    UserAgentClass {
        ie11: user_agent.contains("Trident/7.0"),
        iphone: user_agent.contains("iPhone"),
        mobile: MOBILE_MARKERS.iter().any(|marker| lower.contains(marker)),
    }
}
