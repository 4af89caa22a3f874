use serde::{Deserialize, Serialize};

/// Body of a successful `GET /next-video`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextVideoResponse {
    #[serde(rename = "videoPath")]
    pub video_path: String,
}
