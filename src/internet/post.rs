//! Medium post model and Markdown rendering

use serde::Deserialize;

/// Base URL for post images
const IMAGE_BASE_URL: &str = "https://miro.medium.com/max/1400";

/// GraphQL response for a single post. Every field defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediumPostResponse {
    pub data: PostData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostData {
    /// `null` when no post has the requested id
    pub post: Option<Post>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Post {
    pub title: String,
    pub creator: Creator,
    pub content: Content,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Creator {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Content {
    pub body_model: BodyModel,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BodyModel {
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub href: Option<String>,
    pub layout: Option<String>,
    pub markups: Vec<ParagraphMarkup>,
    pub metadata: Option<ParagraphMetadata>,
    pub iframe: Option<IFrame>,
}

/// Inline markup over a character range of the paragraph text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphMarkup {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub href: Option<String>,
    pub start: usize,
    pub end: usize,
    pub anchor_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphMetadata {
    pub id: String,
    pub original_width: u32,
    pub original_height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IFrame {
    pub media_resource: MediaResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaResource {
    pub href: String,
    pub iframe_src: String,
    pub iframe_width: u32,
    pub iframe_height: u32,
}

/// Render a post as Markdown.
///
/// Headings, text paragraphs and images are supported; anything else is
/// skipped. Link markups become inline Markdown links.
/// A response without a post renders as an empty title and author.
pub fn post_to_markdown(response: &MediumPostResponse) -> String {
    let missing = Post::default();
    let post = response.data.post.as_ref().unwrap_or(&missing);

    let mut md = String::new();
    md.push_str(&format!("# {}\n", post.title));
    md.push_str(&format!("By {}\n", post.creator.name));

    for paragraph in &post.content.body_model.paragraphs {
        match paragraph.kind.as_str() {
            "H3" => md.push_str(&format!("\n## {}\n", paragraph.text)),
            "H4" => md.push_str(&format!("\n### _{}_\n", paragraph.text)),
            "P" => md.push_str(&format!("\n{}\n", render_links(paragraph))),
            "IMG" => {
                let image_id = paragraph.metadata.as_ref().map(|m| m.id.as_str()).unwrap_or_default();
                md.push_str(&format!("\n![{}]({}/{})\n", paragraph.text, IMAGE_BASE_URL, image_id));
            }
            other => log::debug!("skipping paragraph of type {:?}", other),
        }
    }

    md
}

/// Paragraph text with `A` markups replaced by `[anchor](href)`.
///
/// Offsets count characters and links are applied in order of their start.
/// Overlapping or out-of-range markups are clamped.
fn render_links(paragraph: &Paragraph) -> String {
    let chars: Vec<char> = paragraph.text.chars().collect();
    let mut rendered = String::with_capacity(paragraph.text.len());
    let mut cursor = 0;

    let mut links: Vec<&ParagraphMarkup> = paragraph.markups.iter().filter(|m| m.kind == "A").collect();
    links.sort_by_key(|m| m.start);

    for markup in links {
        let start = markup.start.clamp(cursor, chars.len());
        let end = markup.end.clamp(start, chars.len());

        rendered.extend(&chars[cursor..start]);
        let anchor: String = chars[start..end].iter().collect();
        rendered.push_str(&format!("[{}]({})", anchor, markup.href.as_deref().unwrap_or_default()));
        cursor = end;
    }

    rendered.extend(&chars[cursor..]);
    rendered
}
