//! Internet helpers

mod medium;
mod post;

pub use medium::{
    ConvertMediumToMdOutput, MediumClient, MediumConfig, MediumError, DEFAULT_MEDIUM_ENDPOINT,
};
pub use post::{
    post_to_markdown, BodyModel, Content, Creator, IFrame, MediaResource, MediumPostResponse,
    Paragraph, ParagraphMarkup, ParagraphMetadata, Post, PostData,
};
