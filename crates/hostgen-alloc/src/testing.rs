//! Test fixtures shared by the allocator unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hostgen_state::HostnameRecord;

use crate::backend::HostnameBackend;
use crate::error::{BackendError, BackendResult};

pub fn record(hostname: &str) -> HostnameRecord {
    HostnameRecord {
        id: 1,
        code: "001".to_string(),
        hostname: hostname.to_string(),
        domain: "pactual.net".to_string(),
        os: "Windows Server 2022".to_string(),
        environment: String::new(),
        server_function: String::new(),
        node: "0".to_string(),
        site: "SP".to_string(),
        ip: String::new(),
        sec_ip: String::new(),
        updated_by: "admin".to_string(),
        system: String::new(),
        description: String::new(),
        object: "VIRTUAL SERVER".to_string(),
        alias: String::new(),
        status: "ACTIVE".to_string(),
        project: String::new(),
        owner: String::new(),
        updatetime: "2024-01-01 00:00:00".to_string(),
    }
}

/// Backend driven by canned answers, recording every call it receives.
///
/// Listing pops the next snapshot, repeating the last one once the queue
/// is down to a single entry. Existence answers pop from their own queue
/// and default to "free".
#[derive(Default)]
pub struct ScriptedBackend {
    snapshots: Mutex<VecDeque<BackendResult<Vec<HostnameRecord>>>>,
    exists_answers: Mutex<VecDeque<BackendResult<bool>>>,
    list_calls: Mutex<usize>,
    exists_calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn with_records(hostnames: &[&str]) -> Self {
        let backend = Self::default();
        backend.push_snapshot(hostnames);
        backend
    }

    pub fn push_snapshot(&self, hostnames: &[&str]) {
        let records = hostnames.iter().map(|h| record(h)).collect();
        self.snapshots.lock().unwrap().push_back(Ok(records));
    }

    pub fn push_list_failure(&self) {
        self.snapshots
            .lock()
            .unwrap()
            .push_back(Err(BackendError::Transport("connection refused".to_string())));
    }

    pub fn push_exists(&self, answer: bool) {
        self.exists_answers.lock().unwrap().push_back(Ok(answer));
    }

    pub fn push_exists_failure(&self) {
        self.exists_answers
            .lock()
            .unwrap()
            .push_back(Err(BackendError::Transport("connection reset".to_string())));
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub fn exists_calls(&self) -> Vec<String> {
        self.exists_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostnameBackend for ScriptedBackend {
    async fn list_hostnames(&self) -> BackendResult<Vec<HostnameRecord>> {
        *self.list_calls.lock().unwrap() += 1;
        let mut snapshots = self.snapshots.lock().unwrap();
        if snapshots.len() > 1 {
            return snapshots.pop_front().unwrap_or(Ok(Vec::new()));
        }
        match snapshots.front() {
            Some(Ok(records)) => Ok(records.clone()),
            Some(Err(_)) => Err(BackendError::Transport("connection refused".to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn hostname_exists(&self, candidate: &str) -> BackendResult<bool> {
        self.exists_calls.lock().unwrap().push(candidate.to_string());
        self.exists_answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_backend_records_calls() {
        let backend = ScriptedBackend::with_records(&["W10000PAPP0"]);
        backend.push_exists(true);

        assert_eq!(backend.list_hostnames().await.unwrap().len(), 1);
        assert_eq!(backend.list_hostnames().await.unwrap().len(), 1);
        assert!(backend.hostname_exists("W10001PAPP0").await.unwrap());
        assert!(!backend.hostname_exists("W10002PAPP0").await.unwrap());

        assert_eq!(backend.list_calls(), 2);
        assert_eq!(backend.exists_calls(), vec!["W10001PAPP0", "W10002PAPP0"]);
    }
}
