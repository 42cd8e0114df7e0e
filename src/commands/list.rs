//! List posts known to the CMS

use anyhow::Result;

use crate::content::PostFeed;
use crate::Spacetraveling;

/// Fetch every page of the listing and print it
pub async fn run(app: &Spacetraveling) -> Result<()> {
    let client = app.cms_client()?;

    let batch = client.get_by_type(&app.config.cms.document_type).await?;
    let mut feed = PostFeed::from_batch(&batch)?;
    while feed.has_more() {
        feed.load_more(&client).await?;
    }

    println!("Posts ({}):", feed.posts.len());
    for post in &feed.posts {
        println!(
            "  {} - {} [{}]",
            post.date.format("%Y-%m-%d"),
            post.title,
            post.uid
        );
    }

    Ok(())
}
