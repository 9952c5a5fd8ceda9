//! Scripted connectivity probe for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::ConnectivityStatus;
use crate::traits::ConnectivityProbe;

/// Probe that replays a script of statuses.
///
/// Once the script runs out, the last status repeats.
#[derive(Debug, Clone)]
pub struct ScriptedProbe {
    script: Arc<Mutex<VecDeque<ConnectivityStatus>>>,
    last: Arc<Mutex<ConnectivityStatus>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedProbe {
    pub fn new(script: Vec<ConnectivityStatus>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            last: Arc::new(Mutex::new(ConnectivityStatus::Satisfied)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of probes performed so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ConnectivityProbe for ScriptedProbe {
    async fn probe(&self) -> ConnectivityStatus {
        *self.calls.lock().unwrap() += 1;
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = next;
        }
        *last
    }
}
