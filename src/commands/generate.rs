//! Generate static files

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Site;

/// Load all content and generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(site);
    let team = loader.load_team()?;
    let studies = loader.load_case_studies()?;
    let posts = loader.load_posts()?;
    let overview = loader.load_overview()?;

    tracing::info!(
        "Loaded {} team members, {} case studies, {} posts",
        team.len(),
        studies.len(),
        posts.len()
    );

    let generator = Generator::new(site)?;
    generator.generate(&team, &studies, &posts, &overview)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
