// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use hbcoreclient::DataServiceError;
use parking_lot::Mutex;
use tokio::sync::watch;

/// Controls how the [`InMemoryBackend`](crate::InMemoryBackend) answers requests.
///
/// Cloned handles control the same backend.
#[derive(Clone, Debug)]
pub struct BackendControl {
    inner: Arc<ControlInner>,
}

#[derive(Debug)]
struct ControlInner {
    failing_writes: Mutex<HashSet<&'static str>>,
    failing_reads: Mutex<HashSet<&'static str>>,
    fail_auth: AtomicBool,
    writes_open: watch::Sender<bool>,
    reads_open: watch::Sender<bool>,
}

impl Default for BackendControl {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendControl {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ControlInner {
                failing_writes: Default::default(),
                failing_reads: Default::default(),
                fail_auth: AtomicBool::new(false),
                writes_open: watch::Sender::new(true),
                reads_open: watch::Sender::new(true),
            }),
        }
    }

    /// Rejects all writes to `table`.
    pub fn fail_writes_to(&self, table: &'static str) {
        self.inner.failing_writes.lock().insert(table);
    }

    /// Fails all reads from `table`.
    pub fn fail_reads_from(&self, table: &'static str) {
        self.inner.failing_reads.lock().insert(table);
    }

    /// Rejects all credentials and session lookups.
    pub fn set_fail_auth(&self, fail: bool) {
        self.inner.fail_auth.store(fail, Ordering::Relaxed);
    }

    /// Answers all requests normally again.
    pub fn heal(&self) {
        self.inner.failing_writes.lock().clear();
        self.inner.failing_reads.lock().clear();
        self.set_fail_auth(false);
        self.resume_writes();
        self.resume_reads();
    }

    /// Holds back all writes until [`Self::resume_writes`] is called.
    pub fn pause_writes(&self) {
        self.inner.writes_open.send_replace(false);
    }

    pub fn resume_writes(&self) {
        self.inner.writes_open.send_replace(true);
    }

    /// Holds back all reads until [`Self::resume_reads`] is called.
    pub fn pause_reads(&self) {
        self.inner.reads_open.send_replace(false);
    }

    pub fn resume_reads(&self) {
        self.inner.reads_open.send_replace(true);
    }

    pub(crate) async fn check_write(&self, table: &'static str) -> Result<(), DataServiceError> {
        let mut open = self.inner.writes_open.subscribe();
        // The sender lives as long as `self`, so waiting can't fail.
        let _ = open.wait_for(|open| *open).await;
        if self.inner.failing_writes.lock().contains(table) {
            return Err(DataServiceError::rejected(format!(
                "permission denied for table {table}"
            )));
        }
        Ok(())
    }

    pub(crate) async fn check_read(&self, table: &'static str) -> Result<(), DataServiceError> {
        let mut open = self.inner.reads_open.subscribe();
        let _ = open.wait_for(|open| *open).await;
        if self.inner.failing_reads.lock().contains(table) {
            return Err(DataServiceError::transport(format!(
                "connection reset while reading {table}"
            )));
        }
        Ok(())
    }

    pub(crate) fn check_auth(&self) -> Result<(), DataServiceError> {
        if self.inner.fail_auth.load(Ordering::Relaxed) {
            return Err(DataServiceError::auth("Invalid login credentials"));
        }
        Ok(())
    }
}
