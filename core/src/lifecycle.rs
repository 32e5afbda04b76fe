//! Orchestrator-side mirror of one managed record.
//!
//! # Design
//! `Managed` holds the persisted state of a single record and walks it
//! through `Absent -> Planned -> Created -> (Refreshed <-> Updated)* ->
//! Absent`. State is replaced only after an operation succeeds, so a failed
//! create, update, or delete leaves the previous state untouched. A read
//! that finds the record gone drops it without recreating it; the next
//! `plan` reports `Create`.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Result;
use crate::resource::{ReadOutcome, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Absent,
    Planned,
    Created,
    Refreshed,
    Updated,
}

/// What `apply` will do to reach the desired configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    Create,
    Update,
    Delete,
    NoOp,
}

#[derive(Debug)]
pub struct Managed<R: Resource> {
    resource: R,
    desired: Option<R::Plan>,
    state: Option<R::State>,
    phase: Phase,
}

impl<R: Resource> Managed<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            desired: None,
            state: None,
            phase: Phase::Absent,
        }
    }

    /// Resume from previously persisted state.
    pub fn with_state(resource: R, state: R::State) -> Self {
        Self {
            resource,
            desired: None,
            state: Some(state),
            phase: Phase::Created,
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn state(&self) -> Option<&R::State> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Record the desired configuration (`None` to remove the record) and
    /// report the action `apply` would take.
    pub fn plan(&mut self, desired: Option<R::Plan>) -> PlannedAction {
        self.desired = desired;
        if self.state.is_none() && self.desired.is_some() {
            self.phase = Phase::Planned;
        }
        self.pending()
    }

    fn pending(&self) -> PlannedAction {
        match (&self.desired, &self.state) {
            (Some(_), None) => PlannedAction::Create,
            (Some(plan), Some(state)) if self.resource.needs_update(plan, state) => PlannedAction::Update,
            (Some(_), Some(_)) | (None, None) => PlannedAction::NoOp,
            (None, Some(_)) => PlannedAction::Delete,
        }
    }

    /// Converge the remote record on the planned configuration.
    pub async fn apply(&mut self, cancel: &CancellationToken) -> Result<PlannedAction> {
        let action = self.pending();
        match action {
            PlannedAction::Create => {
                if let Some(plan) = &self.desired {
                    let created = self.resource.create(plan, cancel).await?;
                    self.state = Some(created);
                    self.phase = Phase::Created;
                }
            }
            PlannedAction::Update => {
                if let (Some(plan), Some(state)) = (self.desired.as_ref(), self.state.as_ref()) {
                    let updated = self.resource.update(plan, state, cancel).await?;
                    self.state = Some(updated);
                    self.phase = Phase::Updated;
                }
            }
            PlannedAction::Delete => self.destroy(cancel).await?,
            PlannedAction::NoOp => {}
        }
        debug!(resource = R::TYPE_NAME, ?action, phase = ?self.phase, "applied");
        Ok(action)
    }

    /// Reconcile the persisted state with the service. Never writes remotely.
    pub async fn refresh(&mut self, cancel: &CancellationToken) -> Result<()> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        let outcome = self.resource.read(state, cancel).await?;
        match outcome {
            ReadOutcome::Found(fresh) => {
                self.state = Some(fresh);
                self.phase = Phase::Refreshed;
            }
            ReadOutcome::NotFound => {
                debug!(resource = R::TYPE_NAME, "record vanished, dropping state");
                self.state = None;
                self.phase = Phase::Absent;
            }
        }
        Ok(())
    }

    /// Delete the remote record and forget it.
    pub async fn destroy(&mut self, cancel: &CancellationToken) -> Result<()> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        self.resource.delete(state, cancel).await?;
        self.state = None;
        self.desired = None;
        self.phase = Phase::Absent;
        Ok(())
    }

    /// Adopt an existing remote record. Returns `false` when it does not exist.
    pub async fn import(&mut self, id: &str, cancel: &CancellationToken) -> Result<bool> {
        match self.resource.import(id, cancel).await? {
            ReadOutcome::Found(state) => {
                self.state = Some(state);
                self.phase = Phase::Refreshed;
                Ok(true)
            }
            ReadOutcome::NotFound => Ok(false),
        }
    }
}
