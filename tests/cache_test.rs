//! Response cache behaviour: fingerprint keying and TTL expiry.

use std::time::Duration;

use huginn::{AskOptions, CacheConfig, Capability, Fingerprint, NormalizedResult, ResponseCache};

fn result(text: &str) -> NormalizedResult {
    NormalizedResult::new(text, Some(0.9), serde_json::json!({ "cached": true }))
}

#[tokio::test]
async fn put_then_get_round_trips() {
    let cache = ResponseCache::new(&CacheConfig::default());
    let fp = Fingerprint::compute(Capability::Sentiment, "I love this app", &AskOptions::default());

    assert!(cache.get(&fp, Capability::Sentiment).await.is_none());

    cache.put(fp, result("positive"), None).await;
    let hit = cache.get(&fp, Capability::Sentiment).await.unwrap();
    assert_eq!(hit.text, "positive");
    assert_eq!(hit, result("positive"));
}

#[tokio::test]
async fn different_prompts_do_not_collide() {
    let cache = ResponseCache::new(&CacheConfig::default());
    let options = AskOptions::default();
    let a = Fingerprint::compute(Capability::Summarize, "first text", &options);
    let b = Fingerprint::compute(Capability::Summarize, "second text", &options);

    cache.put(a, result("summary of first"), None).await;
    assert!(cache.get(&b, Capability::Summarize).await.is_none());
}

#[tokio::test]
async fn entries_are_replace_only() {
    let cache = ResponseCache::new(&CacheConfig::default());
    let fp = Fingerprint::compute(Capability::Answer, "where?", &AskOptions::default());

    cache.put(fp, result("in the pantry"), None).await;
    cache.put(fp, result("in the fridge"), None).await;

    let hit = cache.get(&fp, Capability::Answer).await.unwrap();
    assert_eq!(hit.text, "in the fridge");
}

#[tokio::test]
async fn expired_entries_are_treated_as_absent() {
    let config = CacheConfig::new().ttl(Duration::from_millis(50));
    let cache = ResponseCache::new(&config);
    let fp = Fingerprint::compute(Capability::Sentiment, "short lived", &AskOptions::default());

    cache.put(fp, result("positive"), None).await;
    assert!(cache.get(&fp, Capability::Sentiment).await.is_some());

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(cache.get(&fp, Capability::Sentiment).await.is_none());
}

#[tokio::test]
async fn per_call_ttl_overrides_the_default() {
    // Cache-wide default is long; the entry's own TTL wins.
    let cache = ResponseCache::new(&CacheConfig::default());
    let short = Fingerprint::compute(Capability::Sentiment, "short", &AskOptions::default());
    let long = Fingerprint::compute(Capability::Sentiment, "long", &AskOptions::default());

    cache
        .put(short, result("gone soon"), Some(Duration::from_millis(30)))
        .await;
    cache.put(long, result("still here"), None).await;

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(cache.get(&short, Capability::Sentiment).await.is_none());
    assert!(cache.get(&long, Capability::Sentiment).await.is_some());
}
