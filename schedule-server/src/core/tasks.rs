//! 后台任务

use crate::db::StoreClient;

/// Keep reconnecting until the store answers, one backoff round at a time
pub fn spawn_store_recovery(store: StoreClient) {
    tokio::spawn(async move {
        let pause = store.settings().backoff.max_delay;
        loop {
            tokio::time::sleep(pause).await;
            if store.reconnect().await {
                tracing::info!("Store recovered");
                break;
            }
        }
    });
}

/// Seed the demo roster once the store is connected
pub fn spawn_demo_seed(store: StoreClient) {
    tokio::spawn(async move {
        let pause = store.settings().backoff.max_delay;
        while !store.is_connected().await {
            tokio::time::sleep(pause).await;
        }

        match crate::seed::seed_demo_data(&store, shared::util::today()).await {
            Ok(report) => tracing::info!(
                employees = report.employees,
                shifts = report.shifts,
                "Demo data seeded"
            ),
            Err(e) => tracing::error!("Demo data seeding failed: {e}"),
        }
    });
}
