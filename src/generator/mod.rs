//! Generator module - build-time rendering of the home and post pages
//!
//! The build contract mirrors the usual static-generation shape: props plus
//! an optional revalidation interval for the home page, and an empty
//! pre-rendered path set with fallback rendering for post pages.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Context;

use crate::cms::CmsClient;
use crate::content::{normalize, PostDetail, PostFeed, PostSummary};
use crate::helpers;
use crate::templates::TemplateRenderer;
use crate::Spacetraveling;

/// Props for a page plus its revalidation interval in seconds
#[derive(Debug, Clone)]
pub struct StaticProps<T> {
    pub props: T,
    pub revalidate: Option<u64>,
}

/// Which paths are pre-rendered at build time, and whether missing paths
/// are rendered on demand
#[derive(Debug, Clone)]
pub struct StaticPaths {
    pub paths: Vec<String>,
    pub fallback: bool,
}

/// Props for the home page
#[derive(Debug, Clone)]
pub struct HomeProps {
    pub feed: PostFeed,
}

/// Props for a post detail page
#[derive(Debug, Clone)]
pub struct PostProps {
    pub post: PostDetail,
}

/// A post summary prepared for display: the date is already formatted,
/// both for readers and for the `<time datetime>` attribute
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub date_xml: String,
}

/// A post detail prepared for display
#[derive(Debug, Clone, Serialize)]
struct PostView {
    title: String,
    author: String,
    date: String,
    date_xml: String,
    banner_url: String,
    reading_time: usize,
    content: Vec<crate::content::ContentBlock>,
}

/// Renders pages into the public directory
pub struct Generator {
    app: Spacetraveling,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Spacetraveling) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            app: app.clone(),
            renderer,
        })
    }

    /// Fetch the first page of the feed and build the home props.
    /// The home page revalidates on the configured interval.
    pub async fn home_props(&self, client: &CmsClient) -> Result<StaticProps<HomeProps>> {
        let batch = client
            .get_by_type(&self.app.config.cms.document_type)
            .await
            .context("fetching post listing")?;
        let feed = PostFeed::from_batch(&batch)?;

        Ok(StaticProps {
            props: HomeProps { feed },
            revalidate: Some(self.app.config.revalidate_secs),
        })
    }

    /// Fetch a single post and build its props
    pub async fn post_props(&self, client: &CmsClient, slug: &str) -> Result<StaticProps<PostProps>> {
        let doc = client
            .get_by_uid(&self.app.config.cms.document_type, slug)
            .await?;
        let post = normalize::detail(&doc)?;

        Ok(StaticProps {
            props: PostProps { post },
            revalidate: None,
        })
    }

    /// No post paths are enumerated at build time; they render on demand
    pub fn static_paths(&self) -> StaticPaths {
        StaticPaths {
            paths: Vec::new(),
            fallback: true,
        }
    }

    /// Prepare a summary for display
    pub fn post_card(&self, summary: &PostSummary) -> PostCard {
        let config = &self.app.config;
        PostCard {
            uid: summary.uid.clone(),
            title: summary.title.clone(),
            subtitle: summary.subtitle.clone(),
            author: summary.author.clone(),
            date: helpers::format_date(&summary.date, &config.date_format, &config.language),
            date_xml: helpers::date_xml(&summary.date),
        }
    }

    /// Render the home page HTML
    pub fn render_home(&self, props: &HomeProps) -> Result<String> {
        let cards: Vec<PostCard> = props.feed.posts.iter().map(|p| self.post_card(p)).collect();

        let mut context = self.base_context();
        context.insert("canonical", &self.canonical(""));
        context.insert("posts", &cards);
        context.insert("next_page", &props.feed.next_page);

        self.renderer.render("index.html", &context)
    }

    /// Render a post detail page HTML
    pub fn render_post(&self, props: &PostProps) -> Result<String> {
        let config = &self.app.config;
        let post = &props.post;
        let view = PostView {
            title: post.title.clone(),
            author: post.author.clone(),
            date: helpers::format_date(&post.date, &config.date_format, &config.language),
            date_xml: helpers::date_xml(&post.date),
            banner_url: post.banner_url.clone(),
            reading_time: post.reading_time(),
            content: post.content.clone(),
        };

        let mut context = self.base_context();
        context.insert("canonical", &self.canonical(&format!("post/{}", post.uid)));
        context.insert("post", &view);

        self.renderer.render("post.html", &context)
    }

    /// Render and write the home page; returns its path relative to the
    /// public dir, for stamping
    pub fn write_home(&self, props: &HomeProps) -> Result<String> {
        let html = self.render_home(props)?;
        let rel = "index.html".to_string();
        write_page(&self.app.public_dir, &rel, &html)?;
        tracing::info!("Generated home page ({} posts)", props.feed.posts.len());
        Ok(rel)
    }

    /// Render and write a post page; returns its path relative to the
    /// public dir, for stamping
    pub fn write_post(&self, props: &PostProps) -> Result<String> {
        let html = self.render_post(props)?;
        let rel = post_output_path(&props.post.uid);
        write_page(&self.app.public_dir, &rel, &html)?;
        tracing::info!("Generated post page: {}", props.post.uid);
        Ok(rel)
    }

    fn base_context(&self) -> Context {
        let config = &self.app.config;
        let mut context = Context::new();
        context.insert("site_title", &config.title);
        context.insert("site_subtitle", &config.subtitle);
        context.insert("site_description", &config.description);
        context.insert("site_author", &config.author);
        context.insert("language", &config.language);
        context.insert("root", &config.root);
        context
    }

    /// Absolute URL of a page, for the canonical link
    fn canonical(&self, page_path: &str) -> String {
        let config = &self.app.config;
        format!(
            "{}{}{}",
            config.url.trim_end_matches('/'),
            config.root,
            page_path
        )
    }
}

/// Output path of a post page, relative to the public dir
pub fn post_output_path(uid: &str) -> String {
    format!("post/{uid}/index.html")
}

/// Write a rendered page under the public dir, creating parent directories
fn write_page(public_dir: &Path, rel: &str, html: &str) -> Result<PathBuf> {
    let path = public_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::ContentBlock;
    use chrono::DateTime;

    fn test_app(base_dir: &Path) -> Spacetraveling {
        Spacetraveling::with_config(SiteConfig::default(), base_dir)
    }

    fn sample_summary(uid: &str, title: &str) -> PostSummary {
        PostSummary {
            uid: uid.to_string(),
            date: DateTime::parse_from_rfc3339("2021-04-19T20:15:52+00:00").unwrap(),
            title: title.to_string(),
            subtitle: "subtitle".to_string(),
            author: "Ana".to_string(),
        }
    }

    fn sample_detail() -> PostDetail {
        PostDetail {
            uid: "hello-world".to_string(),
            date: DateTime::parse_from_rfc3339("2021-04-19T20:15:52+00:00").unwrap(),
            title: "Hello world".to_string(),
            author: "Ana".to_string(),
            banner_url: "https://images.example/banner.png".to_string(),
            content: vec![ContentBlock {
                heading: "Intro".to_string(),
                body: vec!["one two three".to_string()],
            }],
        }
    }

    #[test]
    fn test_static_paths_render_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(&test_app(dir.path())).unwrap();

        let paths = generator.static_paths();
        assert!(paths.paths.is_empty());
        assert!(paths.fallback);
    }

    #[test]
    fn test_render_home_lists_posts_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(&test_app(dir.path())).unwrap();

        let feed = PostFeed {
            posts: vec![sample_summary("b-post", "Beta"), sample_summary("a-post", "Alpha")],
            next_page: Some("https://cms.example/page2".to_string()),
        };

        let html = generator.render_home(&HomeProps { feed }).unwrap();
        let beta = html.find("Beta").unwrap();
        let alpha = html.find("Alpha").unwrap();
        assert!(beta < alpha);
        // Localized date and the load-more button with the embedded cursor
        assert!(html.contains("19 abril 2021"));
        assert!(html.contains(r#"<time datetime="2021-04-19T20:15:52.000+00:00">"#));
        assert!(html.contains("Carregar mais posts"));
        assert!(html.contains("https://cms.example/page2"));
    }

    #[test]
    fn test_render_home_without_cursor_has_no_button() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(&test_app(dir.path())).unwrap();

        let feed = PostFeed {
            posts: vec![sample_summary("only", "Only")],
            next_page: None,
        };

        let html = generator.render_home(&HomeProps { feed }).unwrap();
        assert!(!html.contains("Carregar mais posts"));
    }

    #[test]
    fn test_render_post_shows_reading_time() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(&test_app(dir.path())).unwrap();

        let html = generator
            .render_post(&PostProps {
                post: sample_detail(),
            })
            .unwrap();
        assert!(html.contains("Hello world"));
        assert!(html.contains("1 min"));
        assert!(html.contains(r#"<time datetime="2021-04-19T20:15:52.000+00:00">"#));
        assert!(html.contains("one two three"));
    }

    #[test]
    fn test_layout_surfaces_site_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            subtitle: "um blog sobre o espaço".to_string(),
            description: "histórias de viagem".to_string(),
            author: "Ana".to_string(),
            url: "https://blog.example/".to_string(),
            ..SiteConfig::default()
        };
        let app = Spacetraveling::with_config(config, dir.path());
        let generator = Generator::new(&app).unwrap();

        let feed = PostFeed {
            posts: vec![sample_summary("only", "Only")],
            next_page: None,
        };
        let html = generator.render_home(&HomeProps { feed }).unwrap();
        assert!(html.contains("um blog sobre o espaço"));
        assert!(html.contains(r#"<meta name="description" content="histórias de viagem">"#));
        assert!(html.contains(r#"<meta name="author" content="Ana">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://blog.example/">"#));

        let html = generator
            .render_post(&PostProps {
                post: sample_detail(),
            })
            .unwrap();
        assert!(html.contains(r#"<link rel="canonical" href="https://blog.example/post/hello-world">"#));
    }

    #[test]
    fn test_write_post_creates_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());
        let generator = Generator::new(&app).unwrap();

        let rel = generator
            .write_post(&PostProps {
                post: sample_detail(),
            })
            .unwrap();
        assert_eq!(rel, "post/hello-world/index.html");
        assert!(app.public_dir.join(&rel).exists());
    }
}
