// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Fire-and-forget persistence on the tokio runtime.

use std::sync::{Mutex, PoisonError};

use sittersync_core::{PersistRequest, Persistence};
use tokio::runtime::Handle;
use tokio::task::JoinSet;

use crate::client::ScheduleClient;
use crate::error::ClientError;

/// Sends every write the controller hands over on a background task.
///
/// Failures are logged and dropped. Local state has already changed and is not rolled back.
#[derive(Debug)]
pub struct RestPersistence {
    client: ScheduleClient,
    handle: Handle,
    tasks: Mutex<JoinSet<Result<(), ClientError>>>,
}

impl RestPersistence {
    /// Creates a persistence that spawns onto `handle`.
    #[must_use]
    pub fn new(client: ScheduleClient, handle: Handle) -> Self {
        Self {
            client,
            handle,
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Creates a persistence on the runtime the caller is running in.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    #[must_use]
    pub fn current(client: ScheduleClient) -> Self {
        Self::new(client, Handle::current())
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &ScheduleClient {
        &self.client
    }

    /// Number of writes not yet awaited by [`Self::flush`].
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Waits for every write dispatched so far and returns the number that failed.
    pub async fn flush(&self) -> usize {
        let mut tasks = std::mem::take(
            &mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner),
        );

        let mut failed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(_)) => failed += 1,
                Err(err) => {
                    tracing::error!(%err, "persistence task aborted");
                    failed += 1;
                }
            }
        }
        failed
    }
}

impl Persistence for RestPersistence {
    fn dispatch(&self, request: PersistRequest) {
        tracing::debug!(
            method = request.method(),
            schedule_id = request.schedule_id(),
            "dispatching write"
        );

        let client = self.client.clone();
        let future = async move {
            let result = client.send(&request).await;
            if let Err(err) = &result {
                tracing::error!(
                    method = request.method(),
                    schedule_id = request.schedule_id(),
                    %err,
                    "failed to save to the server"
                );
            }
            result
        };

        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .spawn_on(future, &self.handle);
    }
}
