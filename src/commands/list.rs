//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);

    match content_type {
        "team" => {
            let members = loader.load_team()?;
            println!("Team members ({}):", members.len());
            for member in members {
                let advisor = if member.is_advisor() { " (advisor)" } else { "" };
                println!(
                    "  {:>3}. {} - {}{} [{}]",
                    member.order, member.name, member.role, advisor, member.slug
                );
            }
        }
        "work" | "case-studies" => {
            let studies = loader.load_case_studies()?;
            println!("Case studies ({}):", studies.len());
            for study in studies {
                println!(
                    "  {} - {} for {} [{}]",
                    study.published_at, study.title, study.client, study.slug
                );
            }
        }
        "insights" | "posts" => {
            let posts = loader.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} by {} [{}]",
                    post.published_at, post.title, post.author, post.slug
                );
            }
        }
        "slugs" => {
            println!("team: {}", loader.team_slugs()?.join(", "));
            println!("work: {}", loader.case_study_slugs()?.join(", "));
            println!("insights: {}", loader.post_slugs()?.join(", "));
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: team, work, insights, slugs",
                content_type
            );
        }
    }

    Ok(())
}
