//! Test doubles for the diff source and checker suite

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use depdiff_core::{
    CancellationToken, CapabilitySet, CheckBundle, CheckExecutionError, CheckScore, CheckerSuite,
    ClientAcquisitionError, DiffFetchError, DiffSource, EnabledChecks, RawDependency, RepoId,
};

/// Diff source returning a canned response
pub struct FakeSource {
    response: Result<Vec<RawDependency>, DiffFetchError>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_records(records: Vec<RawDependency>) -> Self {
        Self {
            response: Ok(records),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: DiffFetchError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiffSource for FakeSource {
    async fn fetch(
        &self,
        _repo: &RepoId,
        _base: &str,
        _head: &str,
    ) -> Result<Vec<RawDependency>, DiffFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Checker suite recording every call, with per-repository failures
#[derive(Default)]
pub struct FakeSuite {
    fail_acquire: HashSet<String>,
    fail_run: HashSet<String>,
    cancel_on_run: Option<CancellationToken>,
    acquired: Mutex<Vec<(String, CapabilitySet)>>,
    runs: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_acquire(mut self, repo: &str) -> Self {
        self.fail_acquire.insert(repo.to_string());
        self
    }

    pub fn failing_run(mut self, repo: &str) -> Self {
        self.fail_run.insert(repo.to_string());
        self
    }

    /// Cancel `token` from inside the first run and never finish it
    pub fn cancelling(mut self, token: CancellationToken) -> Self {
        self.cancel_on_run = Some(token);
        self
    }

    pub fn acquired(&self) -> Vec<(String, CapabilitySet)> {
        self.acquired.lock().unwrap().clone()
    }

    pub fn runs(&self) -> Vec<(String, Vec<String>)> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckerSuite for FakeSuite {
    type Clients = String;

    async fn acquire_clients(
        &self,
        source_repository: &str,
        capabilities: &CapabilitySet,
    ) -> Result<String, ClientAcquisitionError> {
        self.acquired
            .lock()
            .unwrap()
            .push((source_repository.to_string(), capabilities.clone()));
        if self.fail_acquire.contains(source_repository) {
            return Err(ClientAcquisitionError::unavailable("repository unreachable"));
        }
        Ok(source_repository.to_string())
    }

    async fn run(
        &self,
        clients: &String,
        checks: &EnabledChecks,
    ) -> Result<CheckBundle, CheckExecutionError> {
        let names: Vec<String> = checks.names().map(str::to_string).collect();
        self.runs.lock().unwrap().push((clients.clone(), names.clone()));

        if let Some(token) = &self.cancel_on_run {
            token.cancel();
            std::future::pending::<()>().await;
        }
        if self.fail_run.contains(clients) {
            return Err(CheckExecutionError::other("scorecard crashed"));
        }
        Ok(CheckBundle {
            repo: clients.clone(),
            score: Some(7.5),
            checks: names
                .into_iter()
                .map(|name| CheckScore {
                    name,
                    score: 10,
                    reason: "ok".to_string(),
                    details: Vec::new(),
                })
                .collect(),
            ..CheckBundle::default()
        })
    }
}

pub fn repo_url(name: &str) -> String {
    format!("https://github.com/example/{}", name)
}

/// Added npm dependency with a source repository
pub fn added_with_repo(name: &str) -> RawDependency {
    RawDependency::added(name)
        .with_ecosystem("npm")
        .with_version("1.0.0")
        .with_source_repository(repo_url(name))
}
