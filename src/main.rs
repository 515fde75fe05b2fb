use bcs_client::{GradeOptions, ProviderConfig, SessionContext};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "bcs_client=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = ProviderConfig::new_from_env()?;
    let mut bcs = SessionContext::login(&config).await?;

    println!("{}", serde_json::to_string_pretty(bcs.catalog())?);

    // Optional course id: print that course's grades as well.
    if let Some(course_id) = std::env::args().nth(1) {
        let course_id: i64 = course_id.parse()?;
        bcs.set_course(course_id)?;
        info!("Selected course {} (enrollment {:?})", course_id, bcs.enrollment());

        let grades = bcs.grades(None, GradeOptions::default()).await?;
        println!("{}", serde_json::to_string_pretty(&grades)?);
    }

    Ok(())
}
