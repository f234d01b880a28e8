//! Course library server with sample data
//!
//! This example demonstrates:
//! - Loading server and paging settings from YAML
//! - Seeding an in-memory repository with authors and courses
//! - Field shaping and sorting through the REST API
//!
//! Run with `cargo run --example course_library`, optionally pointing
//! `LIBRARY_CONFIG` at a YAML file (see `demos/course_library/library.yaml`).

use course_library::prelude::*;
use tracing_subscriber::EnvFilter;

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid date {}-{}-{}", year, month, day))
}

fn seed() -> Result<InMemoryCourseLibraryRepository> {
    let authors = vec![
        Author::new("Berry", "Griffin Beak Eldritch", date(1650, 7, 23)?, "Ships"),
        Author::new("Nancy", "Swashbuckler Rye", date(1668, 5, 21)?, "Rum"),
        Author::new("Eli", "Ivory Bones Sweet", date(1701, 12, 16)?, "Singing"),
        Author::new("Arnold", "The Unseen Stafford", date(1702, 3, 6)?, "Singing"),
        Author::new("Seabury", "Toxic Reyson", date(1690, 11, 23)?, "Maps"),
        Author::new("Rushford", "Shark Mansfield", date(1723, 4, 5)?, "Ships"),
    ];

    let courses = vec![
        Course::new(
            authors[0].id,
            "Commandeering a Ship Without Getting Caught",
            Some("Commandeering a ship in rough waters isn't easy.".to_string()),
        ),
        Course::new(
            authors[0].id,
            "Overthrowing Mutiny",
            Some("In this course, the author explains how to deal with mutiny.".to_string()),
        ),
        Course::new(
            authors[1].id,
            "Avoiding Brawling While Drunk as a Pirate",
            None,
        ),
        Course::new(authors[2].id, "Singalong Pirate Hits", None),
    ];

    Ok(InMemoryCourseLibraryRepository::with_data(authors, courses))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_library=debug,tower_http=info")),
        )
        .init();

    println!("📚 Course Library API");
    println!("=====================\n");

    // Load configuration
    let config = match std::env::var("LIBRARY_CONFIG") {
        Ok(path) => LibraryConfig::from_yaml_file(&path)?,
        Err(_) => LibraryConfig::default(),
    };
    let base = config.base_url().to_string();

    println!("✅ Configuration:");
    println!("   - listening on {}", config.bind_address());
    println!(
        "   - page size {} (max {})\n",
        config.pagination.default_page_size, config.pagination.max_page_size
    );

    println!("🧪 Try:");
    println!("   curl '{}/api/authors?fields=id,name'", base);
    println!("   curl '{}/api/authors?orderBy=age%20desc,name'", base);
    println!("   curl '{}/api/authors?mainCategory=Singing&pageSize=1' -i", base);
    println!("   curl '{}/api/authors?orderBy=shoeSize' -i\n", base);

    ServerBuilder::new()
        .with_config(config)
        .with_repository(seed()?)
        .serve()
        .await
}
