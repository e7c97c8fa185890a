//! `video.*` methods and their DTOs.

use serde::{Deserialize, Serialize};

use crate::api::Resource;
use crate::error::Error;
use crate::request::{Params, QueryParams};

const METHOD_VIDEO_GET: &str = "video.get";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoImage {
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFiles {
    #[serde(default)]
    pub external: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoItem {
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub files: VideoFiles,
    #[serde(rename = "image", default)]
    pub images: Vec<VideoImage>,
}

/// Arguments for `video.get`. Every field follows "omit when empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoGetParams {
    pub offset: u32,
    pub count: u32,
    pub extended: bool,
    /// Comma-separated `owner_video` identifiers.
    pub videos: String,
}

impl QueryParams for VideoGetParams {
    fn params(&self) -> Params {
        let mut p = Params::new();
        p.put_nonzero("offset", self.offset);
        p.put_nonzero("count", self.count);
        p.put_nonzero("extended", self.extended);
        p.put_nonzero("videos", self.videos.as_str());
        p
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VideoList {
    pub count: i64,
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

/// `video.*` wrapper.
#[derive(Debug, Clone)]
pub struct Video {
    resource: Resource,
}

impl Video {
    pub(crate) fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn get(&self, params: &VideoGetParams) -> Result<VideoList, Error> {
        self.resource.call(METHOD_VIDEO_GET, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_list_parses_from_api_json() {
        let raw = r#"{"count": 1, "items": [{
            "duration": 183,
            "player": "https://example.com/player",
            "files": {"external": "https://example.com/v.mp4"},
            "image": [{"height": 96, "width": 130, "url": "https://example.com/i.jpg"}]
        }]}"#;
        let list: VideoList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.count, 1);
        assert_eq!(list.items[0].duration, 183);
        assert_eq!(list.items[0].images[0].width, 130);
        assert_eq!(list.items[0].files.external, "https://example.com/v.mp4");
    }

    #[test]
    fn params_follow_omit_when_empty() {
        assert!(VideoGetParams::default().params().is_empty());
        let p = VideoGetParams {
            count: 20,
            videos: "1_123".to_string(),
            ..VideoGetParams::default()
        }
        .params();
        assert_eq!(p.get("count"), Some("20"));
        assert_eq!(p.get("videos"), Some("1_123"));
        assert!(p.get("extended").is_none());
    }
}
