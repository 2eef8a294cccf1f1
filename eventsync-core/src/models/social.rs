use serde::{Deserialize, Serialize};
use std::fmt;

/// Social channels in the order they are rendered on the event page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialChannel {
    Facebook,
    LinkedIn,
    Instagram,
    YouTube,
    TikTok,
}

impl SocialChannel {
    pub const ALL: [SocialChannel; 5] = [
        SocialChannel::Facebook,
        SocialChannel::LinkedIn,
        SocialChannel::Instagram,
        SocialChannel::YouTube,
        SocialChannel::TikTok,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SocialChannel::Facebook => "Facebook",
            SocialChannel::LinkedIn => "LinkedIn",
            SocialChannel::Instagram => "Instagram",
            SocialChannel::YouTube => "YouTube",
            SocialChannel::TikTok => "TikTok",
        }
    }
}

impl fmt::Display for SocialChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Social media links attached to a CRM event. Any channel may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMedia {
    pub facebook: Option<String>,
    pub linked_in: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
}

impl SocialMedia {
    pub fn url(&self, channel: SocialChannel) -> Option<&str> {
        match channel {
            SocialChannel::Facebook => self.facebook.as_deref(),
            SocialChannel::LinkedIn => self.linked_in.as_deref(),
            SocialChannel::Instagram => self.instagram.as_deref(),
            SocialChannel::YouTube => self.youtube.as_deref(),
            SocialChannel::TikTok => self.tiktok.as_deref(),
        }
    }

    pub fn set(&mut self, channel: SocialChannel, url: impl Into<String>) {
        let slot = match channel {
            SocialChannel::Facebook => &mut self.facebook,
            SocialChannel::LinkedIn => &mut self.linked_in,
            SocialChannel::Instagram => &mut self.instagram,
            SocialChannel::YouTube => &mut self.youtube,
            SocialChannel::TikTok => &mut self.tiktok,
        };
        *slot = Some(url.into());
    }

    /// Channels with a non-blank URL, in render order. URLs are trimmed.
    pub fn links(&self) -> impl Iterator<Item = (SocialChannel, &str)> + '_ {
        SocialChannel::ALL.into_iter().filter_map(move |channel| {
            self.url(channel)
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(|url| (channel, url))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_skip_blank_channels() {
        let social = SocialMedia {
            facebook: Some("https://facebook.com/expo".into()),
            linked_in: Some("   ".into()),
            instagram: None,
            youtube: Some(String::new()),
            tiktok: Some(" https://tiktok.com/@expo ".into()),
        };

        let links: Vec<_> = social.links().collect();
        assert_eq!(
            links,
            vec![
                (SocialChannel::Facebook, "https://facebook.com/expo"),
                (SocialChannel::TikTok, "https://tiktok.com/@expo"),
            ]
        );
    }

    #[test]
    fn test_feed_field_names() {
        let social: SocialMedia = serde_json::from_str(
            r#"{"facebook":null,"linkedIn":"https://linkedin.com/x","youtube":"https://youtube.com/x"}"#,
        )
        .unwrap();
        assert_eq!(social.facebook, None);
        assert_eq!(social.url(SocialChannel::LinkedIn), Some("https://linkedin.com/x"));
        assert_eq!(social.url(SocialChannel::YouTube), Some("https://youtube.com/x"));
        assert_eq!(social.tiktok, None);
    }

    #[test]
    fn test_set_channel() {
        let mut social = SocialMedia::default();
        social.set(SocialChannel::Instagram, "https://instagram.com/x");
        assert_eq!(social.links().count(), 1);
    }
}
