//! Fetch content and generate static files

use anyhow::Result;

use crate::cache::StampDb;
use crate::generator::Generator;
use crate::Spacetraveling;

/// Generate the site: always the home page, and with `all` every post
/// page as well (post pages otherwise render on demand).
pub async fn run(app: &Spacetraveling, all: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let client = app.cms_client()?;
    let generator = Generator::new(app)?;
    let mut stamps = StampDb::load(&app.base_dir);

    let home = generator.home_props(&client).await?;
    let rel = generator.write_home(&home.props)?;
    stamps.touch(&rel);

    if all {
        // Walk the feed to exhaustion, then render each post
        let mut feed = home.props.feed;
        while feed.has_more() {
            let appended = feed.load_more(&client).await?;
            tracing::debug!("Loaded {} more summaries", appended);
        }

        for summary in &feed.posts {
            let props = generator.post_props(&client, &summary.uid).await?;
            let rel = generator.write_post(&props.props)?;
            stamps.touch(&rel);
        }
        tracing::info!("Pre-rendered {} posts", feed.posts.len());
    } else {
        let paths = generator.static_paths();
        tracing::debug!(
            "{} post paths pre-rendered, fallback={}",
            paths.paths.len(),
            paths.fallback
        );
    }

    stamps.save(&app.base_dir)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
