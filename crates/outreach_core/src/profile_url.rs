use url::Url;

pub const PROFILE_HOST: &str = "linkedin.com";
pub const PROFILE_PATH_PREFIX: &str = "/in/";

/// True when `raw` points at a member profile page.
///
/// The host must contain [`PROFILE_HOST`] and the path must start with
/// [`PROFILE_PATH_PREFIX`]. Anything that does not parse as an absolute URL
/// is not a profile.
pub fn is_profile_url(raw: &str) -> bool {
    let Ok(parsed) = Url::parse(raw.trim()) else {
        return false;
    };
    let host_matches = parsed
        .host_str()
        .is_some_and(|host| host.to_ascii_lowercase().contains(PROFILE_HOST));
    host_matches && parsed.path().starts_with(PROFILE_PATH_PREFIX)
}
