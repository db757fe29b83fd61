//! Live contract tests against api.openweathermap.org.
//!
//! Ignored by default. Run them with `cargo test -- --ignored` once
//! `API_KEY` is set (directly or through `.env`). A missing key fails.

use weather_check_core::{
    Fixtures, Outcome, ScenarioId, SuiteConfig, Tag, config::API_KEY_ENV, run_scenarios,
};

fn live_fixtures() -> Fixtures {
    let config = SuiteConfig::load().unwrap_or_else(|_| {
        let mut config = SuiteConfig::default();
        config.apply_env_api_key(std::env::var(API_KEY_ENV).ok());
        config
    });
    let fixtures = Fixtures::from_config(config).expect("fixtures should build");

    if let Err(skip) = fixtures.require_api_key() {
        panic!("live tests need a credential: {skip}");
    }
    fixtures
}

async fn run_tagged(tag: Tag) {
    let fixtures = live_fixtures();

    let ids: Vec<ScenarioId> = ScenarioId::all().iter().copied().filter(|id| id.has_tag(tag)).collect();
    let failures: Vec<String> = run_scenarios(&ids, &fixtures)
        .await
        .into_iter()
        .filter_map(|r| match r.outcome {
            Outcome::Failed(reason) => Some(format!("{}: {reason}", r.id)),
            _ => None,
        })
        .collect();

    assert!(failures.is_empty(), "live scenarios failed:\n{}", failures.join("\n"));
}

#[tokio::test]
#[ignore = "requires API_KEY"]
async fn live_positive_scenarios() {
    run_tagged(Tag::Positive).await;
}

#[tokio::test]
#[ignore = "requires API_KEY"]
async fn live_negative_scenarios() {
    run_tagged(Tag::Negative).await;
}
