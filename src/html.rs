use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::HtmlError;

static BASE64_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-src=["']data:.*?["']"#).expect("Invalid base64 image regex")
});

/// Remove `data-src` attributes that inline an image as a `data:` URL.
pub fn strip_base64_images(html: &str) -> String {
    BASE64_IMAGE.replace_all(html, "").into_owned()
}

/// Collect the `href` of every `<a>` element in document order, skipping
/// blank ones.
pub fn find_urls(html: &str) -> Result<Vec<String>, HtmlError> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").map_err(|e| HtmlError::Selector(e.to_string()))?;

    Ok(document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
        .map(str::to_string)
        .collect())
}
