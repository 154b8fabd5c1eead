use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::info;
use url::Url;

use super::SourceAdapter;
use crate::fetcher::PageFetcher;
use crate::fragment::RawFragment;

const MAX_ARTICLES_PER_PAGE: usize = 15;
const MAX_IMAGES_PER_ARTICLE: usize = 3;
const DESCRIPTION_MAX_CHARS: usize = 200;
const MIN_PARAGRAPH_CHARS: usize = 20;
/// Estimated social mentions per tag on an editorial article.
const MENTIONS_PER_TAG: u64 = 100;

/// Editorial web page listing trend articles (Vogue, Business of Fashion, ...).
pub struct ArticlePageAdapter {
    source: String,
    url: String,
    fetcher: Arc<dyn PageFetcher>,
}

impl ArticlePageAdapter {
    pub fn new(source: &str, url: &str, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            source: source.to_string(),
            url: url.to_string(),
            fetcher,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SourceAdapter for ArticlePageAdapter {
    async fn fetch(&self) -> Result<Vec<RawFragment>> {
        let html = self
            .fetcher
            .fetch_html(&self.url)
            .await
            .with_context(|| format!("{} fetch failed", self.source))?;
        let fragments = parse_articles(&self.source, &self.url, &html);
        info!(source = %self.source, url = %self.url, fragments = fragments.len(), "Parsed article page");
        Ok(fragments)
    }

    fn name(&self) -> &str {
        &self.source
    }
}

/// Extract trend fragments from a listing page.
///
/// - Article blocks: `<article>` or a div whose class mentions
///   article/story/show/collection/post, at most 15 per page
/// - Title from the first h1–h4; blocks without one are skipped
/// - Relative links and images resolve against `base_url`
/// - Repeated titles (nested blocks) are kept once
pub fn parse_articles(source: &str, base_url: &str, html: &str) -> Vec<RawFragment> {
    let base = Url::parse(base_url).ok();
    let document = Html::parse_document(html);

    let article_sel = Selector::parse(
        r#"article, div[class*="article"], div[class*="story"], div[class*="show"], div[class*="collection"], div[class*="post"]"#,
    )
    .unwrap();
    let title_sel = Selector::parse("h1, h2, h3, h4").unwrap();

    let mut seen_titles = HashSet::new();
    let mut fragments = Vec::new();

    for article in document.select(&article_sel) {
        if fragments.len() >= MAX_ARTICLES_PER_PAGE {
            break;
        }

        let title = match article.select(&title_sel).map(element_text).find(|t| !t.is_empty()) {
            Some(t) => t,
            None => continue,
        };
        if !seen_titles.insert(title.to_lowercase()) {
            continue;
        }

        let tags = extract_tags(&article);
        let influencers = tags
            .iter()
            .filter(|t| t.to_lowercase().contains("influencer"))
            .count() as u64;

        let mut fragment = RawFragment::builder()
            .source(source)
            .title(title)
            .description(extract_description(&article))
            .social_mentions(tags.len() as u64 * MENTIONS_PER_TAG)
            .influencer_count(influencers)
            .tags(tags)
            .images(extract_images(&article, base.as_ref()))
            .build();
        fragment.brand = extract_brand(&article);
        fragment.url = extract_link(&article, base.as_ref());

        fragments.push(fragment);
    }

    fragments
}

fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_description(article: &ElementRef) -> String {
    let explicit = Selector::parse(
        r#"[class*="description"], [class*="summary"], [class*="excerpt"]"#,
    )
    .unwrap();
    let paragraph = Selector::parse("p").unwrap();

    let text = article
        .select(&explicit)
        .map(element_text)
        .find(|t| !t.is_empty())
        .or_else(|| {
            article
                .select(&paragraph)
                .map(element_text)
                .find(|t| t.chars().count() > MIN_PARAGRAPH_CHARS)
        })
        .unwrap_or_default();

    truncate_chars(&text, DESCRIPTION_MAX_CHARS)
}

fn extract_tags(article: &ElementRef) -> Vec<String> {
    let sel = Selector::parse(
        r#"span[class*="tag"], a[class*="tag"], span[class*="keyword"], a[class*="keyword"], span[class*="category"], a[class*="category"]"#,
    )
    .unwrap();
    let mut seen = HashSet::new();
    article
        .select(&sel)
        .map(element_text)
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .collect()
}

fn extract_brand(article: &ElementRef) -> Option<String> {
    let sel = Selector::parse(
        r#"span[class*="brand"], a[class*="brand"], span[class*="designer"], a[class*="designer"], span[class*="label"], a[class*="label"]"#,
    )
    .unwrap();
    article.select(&sel).map(element_text).find(|t| !t.is_empty())
}

fn extract_link(article: &ElementRef, base: Option<&Url>) -> Option<String> {
    let sel = Selector::parse("a[href]").unwrap();
    article
        .select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#') && !href.starts_with("javascript:"))
        .find_map(|href| resolve(href, base))
}

fn extract_images(article: &ElementRef, base: Option<&Url>) -> Vec<String> {
    let sel = Selector::parse("img").unwrap();
    article
        .select(&sel)
        .filter_map(|img| {
            let attrs = img.value();
            attrs.attr("src").or_else(|| attrs.attr("data-src"))
        })
        .map(str::trim)
        .filter(|src| !src.is_empty() && !src.starts_with("data:"))
        .filter_map(|src| resolve(src, base))
        .take(MAX_IMAGES_PER_ARTICLE)
        .collect()
}

fn resolve(href: &str, base: Option<&Url>) -> Option<String> {
    let resolved = match base {
        Some(b) => b.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}...", head.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <article>
            <h2>Quiet Luxury Takes Over Paris</h2>
            <p class="excerpt">Understated cashmere and tailored coats from the Paris shows.</p>
            <span class="tag">luxury</span>
            <span class="tag">influencer favourite</span>
            <span class="brand-name">The Row</span>
            <a href="/fashion/quiet-luxury">Read more</a>
            <img src="/images/quiet.jpg">
          </article>
          <div class="story-card">
            <h3>Y2K</h3>
          </div>
          <div class="post">
            <p>No heading in this block at all, so it is not an article.</p>
          </div>
          <div class="collection-item">
            <h3>Gorpcore Hits the Streets of Tokyo</h3>
            <p>Short.</p>
            <p>Technical outerwear keeps showing up on Tokyo street style blogs.</p>
          </div>
        </body></html>
    "#;

    #[test]
    fn extracts_article_fields() {
        let fragments = parse_articles("Vogue", "https://www.vogue.com/fashion/trends", LISTING);
        let first = &fragments[0];
        assert_eq!(first.title, "Quiet Luxury Takes Over Paris");
        assert_eq!(
            first.description,
            "Understated cashmere and tailored coats from the Paris shows."
        );
        assert_eq!(first.tags, vec!["luxury", "influencer favourite"]);
        assert_eq!(first.brand.as_deref(), Some("The Row"));
        assert_eq!(
            first.url.as_deref(),
            Some("https://www.vogue.com/fashion/quiet-luxury")
        );
        assert_eq!(first.images, vec!["https://www.vogue.com/images/quiet.jpg"]);
        assert_eq!(first.social_mentions, 200);
        assert_eq!(first.influencer_count, 1);
    }

    #[test]
    fn skips_blocks_without_headings_and_keeps_short_titles_for_validation() {
        let fragments = parse_articles("Vogue", "https://www.vogue.com/fashion/trends", LISTING);
        let titles: Vec<&str> = fragments.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Quiet Luxury Takes Over Paris",
                "Y2K",
                "Gorpcore Hits the Streets of Tokyo"
            ]
        );
    }

    #[test]
    fn falls_back_to_first_long_paragraph() {
        let fragments = parse_articles("Vogue", "https://www.vogue.com/", LISTING);
        assert_eq!(
            fragments[2].description,
            "Technical outerwear keeps showing up on Tokyo street style blogs."
        );
    }

    #[test]
    fn caps_articles_per_page() {
        let body: String = (0..40)
            .map(|i| format!("<article><h2>Runway story number {i}</h2></article>"))
            .collect();
        let html = format!("<html><body>{body}</body></html>");
        assert_eq!(parse_articles("Vogue", "https://www.vogue.com/", &html).len(), 15);
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let text = "a".repeat(250);
        let out = truncate_chars(&text, DESCRIPTION_MAX_CHARS);
        assert_eq!(out.chars().count(), DESCRIPTION_MAX_CHARS + 3);
        assert!(out.ends_with("..."));
    }
}
