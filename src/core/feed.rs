use crate::domain::model::{MediumPost, RawResponse};
use crate::utils::error::{ProfileError, Result};
use crate::utils::html::{first_image_src, strip_query};
use roxmltree::{Document, Node};

pub const SOURCE: &str = "Medium";
pub const MAX_POSTS: usize = 12;
const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

/// Concatenated text of a node, CDATA included.
fn text_of(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn child_text(item: Node, name: &str) -> String {
    item.children()
        .find(|n| n.has_tag_name(name))
        .map(text_of)
        .unwrap_or_default()
}

fn to_post(item: Node) -> MediumPost {
    let encoded = item
        .children()
        .find(|n| n.has_tag_name((CONTENT_NS, "encoded")))
        .map(text_of)
        .unwrap_or_default();
    let link = child_text(item, "link");

    MediumPost {
        title: child_text(item, "title"),
        date: child_text(item, "pubDate"),
        url: strip_query(&link).to_string(),
        image: first_image_src(&encoded),
    }
}

/// Parses an RSS 2.0 document and keeps the first [`MAX_POSTS`] items.
pub fn normalize(xml: &str) -> Result<Vec<MediumPost>> {
    let doc = Document::parse(xml).map_err(|e| ProfileError::structural(SOURCE, e.to_string()))?;

    let channel = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("channel"))
        .ok_or_else(|| ProfileError::structural(SOURCE, "feed has no <channel> element"))?;

    let posts = channel
        .children()
        .filter(|n| n.has_tag_name("item"))
        .take(MAX_POSTS)
        .map(to_post)
        .collect();

    Ok(posts)
}

pub fn from_response(response: &RawResponse) -> Result<Vec<MediumPost>> {
    if !response.is_success() {
        return Err(ProfileError::UpstreamUnavailable {
            source_name: SOURCE,
            status: response.status.as_u16(),
            body: response.body.clone(),
        });
    }
    normalize(&response.body)
}
