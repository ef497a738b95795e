//! The collection run: fetch, merge, persist.

use tracing::{debug, info, warn};

use usagebot_config::{Config, PanelEndpoint};
use usagebot_models::{ClientInfo, Inbound, KeyResolution, StatsSource, UsageSnapshot};
use usagebot_panel::PanelSession;
use usagebot_persistence::{Result, SnapshotStore};

/// Runs one full collection cycle and persists the resulting snapshot.
///
/// Panels are processed sequentially in configuration order; on identifier
/// collisions the last panel wins, which keeps the outcome deterministic.
/// Panel-level failures are absorbed here and only logged. The single
/// propagated error is a failed snapshot write, in which case the previous
/// snapshot file stays in place and the next run retries.
pub async fn refresh_once(config: &Config, store: &SnapshotStore) -> Result<UsageSnapshot> {
    info!("usage collection started");

    let mut snapshot = UsageSnapshot::new();
    let mut failed = 0usize;

    for endpoint in &config.panels {
        match fetch_panel(endpoint, &config.username, &config.password).await {
            Ok(inbounds) => {
                debug!(panel = %endpoint, inbounds = inbounds.len(), "panel fetched");
                merge_inbounds(&mut snapshot, endpoint, &inbounds);
            }
            Err(e) => {
                failed += 1;
                warn!(panel = %endpoint, error = %e, "panel skipped for this run");
            }
        }
    }

    store.save(&snapshot)?;
    info!(
        clients = snapshot.len(),
        panels = config.panels.len(),
        failed,
        "usage collection finished"
    );
    Ok(snapshot)
}

/// Logs in to one panel and fetches its inbound records.
async fn fetch_panel(
    endpoint: &PanelEndpoint,
    username: &str,
    password: &str,
) -> usagebot_panel::Result<Vec<Inbound>> {
    let session = PanelSession::login(endpoint, username, password).await?;
    session.fetch_inbounds().await
}

/// Merges one panel's inbound records into the in-progress snapshot.
///
/// For every client definition, every stat entry with the same email
/// produces one merged record; with duplicate stat emails the last match
/// wins. Malformed settings blobs skip the inbound, unresolvable clients
/// skip the client, both without failing the run.
pub fn merge_inbounds(snapshot: &mut UsageSnapshot, panel: &PanelEndpoint, inbounds: &[Inbound]) {
    for inbound in inbounds {
        let clients = match inbound.clients() {
            Ok(clients) => clients,
            Err(e) => {
                warn!(panel = %panel, error = %e, "skipping inbound with malformed settings");
                continue;
            }
        };

        let stats = inbound.stats();
        match stats {
            StatsSource::Fallback(_) => {
                debug!(panel = %panel, "stats taken from legacy clientInfo field")
            }
            StatsSource::Empty => debug!(panel = %panel, "inbound carries no stats list"),
            StatsSource::Primary(_) => {}
        }
        let stats = stats.entries();

        for client in &clients {
            let key = match client.key() {
                KeyResolution::ById(id) => id,
                KeyResolution::ByPassword(password) => password,
                KeyResolution::Unresolvable => {
                    warn!(panel = %panel, email = %client.email, "client has neither id nor password, skipping");
                    continue;
                }
            };

            for stat in stats.iter().filter(|stat| stat.email == client.email) {
                snapshot.insert(key, ClientInfo::merge(client, stat));
            }
        }
    }
}
