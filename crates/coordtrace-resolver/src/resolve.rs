use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use tokio::sync::Semaphore;

use coordtrace_store::Store;
use coordtrace_types::{ResolvedStatus, ResolverConfig};

use crate::classify::classify;
use crate::{Error, Result};

/// Tallies from one call to [`resolve_pending`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolvePassReport {
    pub attempted: usize,
    pub ok: usize,
    pub failed: usize,
}

struct Outcome {
    url: String,
    resolved_url: String,
    ssl_verified: Option<bool>,
    status: ResolvedStatus,
}

/// Resolves every URL in `resolved_url` whose `resolved_url` column is
/// still null, then rebuilds `resolved_message_url`.
///
/// Issuance is throttled to `requests_per_tick` requests followed by a
/// `tick_interval_ms` sleep — this paces how fast new requests go out, not
/// how many are in flight at once. Backpressure is separate: once the
/// in-flight set reaches `backpressure_limit`, the pool drains completed
/// futures and persists their results before issuing anything new.
pub async fn resolve_pending(store: &mut Store, config: &ResolverConfig) -> Result<ResolvePassReport> {
    let pending = Store::pending_urls(store.connection())?;
    let mut report = ResolvePassReport::default();
    if pending.is_empty() {
        return Ok(report);
    }

    let verified = build_client(config, true)?;
    let unverified = build_client(config, false)?;
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency));

    let mut urls = pending.into_iter();
    let mut in_flight = FuturesUnordered::new();

    loop {
        let mut issued_this_tick = 0usize;
        while issued_this_tick < config.requests_per_tick {
            let Some(url) = urls.next() else { break };
            issued_this_tick += 1;
            report.attempted += 1;

            let sem = semaphore.clone();
            let verified = verified.clone();
            let unverified = unverified.clone();
            in_flight.push(tokio::spawn(async move {
                let _permit = sem.acquire_owned().await.expect("semaphore is never closed");
                resolve_one(&verified, &unverified, url).await
            }));

            if in_flight.len() >= config.backpressure_limit {
                drain_one(&mut in_flight, store, &mut report).await?;
            }
        }

        if issued_this_tick == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(config.tick_interval_ms)).await;
    }

    while !in_flight.is_empty() {
        drain_one(&mut in_flight, store, &mut report).await?;
    }

    Store::rebuild_resolved_message_url(store.connection())?;
    Ok(report)
}

async fn drain_one(
    in_flight: &mut FuturesUnordered<tokio::task::JoinHandle<Outcome>>,
    store: &mut Store,
    report: &mut ResolvePassReport,
) -> Result<()> {
    let Some(joined) = in_flight.next().await else {
        return Ok(());
    };
    let outcome = joined.expect("resolver task panicked");
    persist(store, &outcome)?;
    if outcome.status == ResolvedStatus::Ok {
        report.ok += 1;
    } else {
        report.failed += 1;
    }
    Ok(())
}

fn persist(store: &mut Store, outcome: &Outcome) -> Result<()> {
    Store::update_resolved_url(
        store.connection(),
        &outcome.url,
        &outcome.resolved_url,
        outcome.ssl_verified,
        outcome.status,
    )?;
    Ok(())
}

async fn resolve_one(verified: &Client, unverified: &Client, url: String) -> Outcome {
    match verified.head(&url).send().await {
        Ok(response) => ok_outcome(url, response.url().as_str(), true),
        Err(err) if is_certificate_error(&err) => retry_unverified(unverified, url).await,
        Err(err) => failed_outcome(url, classify(&err)),
    }
}

async fn retry_unverified(unverified: &Client, url: String) -> Outcome {
    match unverified.head(&url).send().await {
        Ok(response) => ok_outcome(url, response.url().as_str(), false),
        Err(err) => failed_outcome(url, classify(&err)),
    }
}

fn ok_outcome(url: String, resolved: &str, ssl_verified: bool) -> Outcome {
    Outcome {
        url,
        resolved_url: resolved.to_string(),
        ssl_verified: Some(ssl_verified),
        status: ResolvedStatus::Ok,
    }
}

fn failed_outcome(url: String, status: ResolvedStatus) -> Outcome {
    let resolved_url = url.clone();
    Outcome {
        url,
        resolved_url,
        ssl_verified: None,
        status,
    }
}

fn is_certificate_error(err: &reqwest::Error) -> bool {
    matches!(classify(err), ResolvedStatus::SslError)
}

fn build_client(config: &ResolverConfig, verify: bool) -> Result<Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.read_timeout_secs))
        .danger_accept_invalid_certs(!verify)
        .build()
        .map_err(Error::ClientBuild)
}
