//! One synchronization pass: fetch, filter, reconcile, map, write.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::collab::{CmsSink, CmsSource, CrmSource, SinkError, SourceError};
use crate::filter::filter_by_venue;
use crate::mapper::DocumentMapper;
use crate::models::CrmEvent;
use crate::reconcile::reconcile;
use crate::templates::StaticBlocks;

#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Venue whose events are synchronized
    pub venue: String,
    /// Parent node for newly created events
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Create,
    Update,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Create => write!(f, "create"),
            SyncAction::Update => write!(f, "update"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncFailure {
    pub event_id: String,
    pub action: SyncAction,
    pub error: String,
}

/// Outcome of a pass. Event ids are CMS-form strings.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub venue: String,
    pub dry_run: bool,
    /// CRM events fetched
    pub fetched: usize,
    /// CRM events left after the venue filter
    pub selected: usize,
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (created, updated) = if self.dry_run {
            ("to create", "to update")
        } else {
            ("created", "updated")
        };
        writeln!(f, "Venue: {}", self.venue)?;
        writeln!(
            f,
            "CRM events: {} fetched, {} selected",
            self.fetched, self.selected
        )?;
        writeln!(f, "  {}: {}", created, self.created.len())?;
        for id in &self.created {
            writeln!(f, "    - {}", id)?;
        }
        writeln!(f, "  {}: {}", updated, self.updated.len())?;
        for id in &self.updated {
            writeln!(f, "    - {}", id)?;
        }
        writeln!(f, "  unchanged: {}", self.unchanged)?;
        if !self.failures.is_empty() {
            writeln!(f, "  failed: {}", self.failures.len())?;
            for failure in &self.failures {
                writeln!(
                    f,
                    "    - {} ({}): {}",
                    failure.event_id, failure.action, failure.error
                )?;
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("CRM source failed: {0}")]
    Crm(#[source] SourceError),

    #[error("CMS source failed: {0}")]
    Cms(#[source] SourceError),
}

pub struct SyncRunner<R, T> {
    mapper: DocumentMapper<R, T>,
    options: SyncOptions,
}

impl<R: Rng, T: StaticBlocks> SyncRunner<R, T> {
    pub fn new(mapper: DocumentMapper<R, T>, options: SyncOptions) -> Self {
        Self { mapper, options }
    }

    /// Reconciles and maps without writing anything.
    pub fn plan(
        &mut self,
        crm: &dyn CrmSource,
        cms: &dyn CmsSource,
    ) -> Result<SyncReport, SyncError> {
        self.execute(crm, cms, None)
    }

    /// Reconciles, maps and hands every payload to `sink`.
    ///
    /// A rejected payload is recorded in the report and the pass carries on;
    /// failed writes are not retried.
    pub fn run(
        &mut self,
        crm: &dyn CrmSource,
        cms: &dyn CmsSource,
        sink: &mut dyn CmsSink,
    ) -> Result<SyncReport, SyncError> {
        self.execute(crm, cms, Some(sink))
    }

    fn execute(
        &mut self,
        crm: &dyn CrmSource,
        cms: &dyn CmsSource,
        mut sink: Option<&mut dyn CmsSink>,
    ) -> Result<SyncReport, SyncError> {
        let started_at = Utc::now();

        let crm_events = crm.fetch_events().map_err(SyncError::Crm)?;
        let selected = filter_by_venue(&crm_events, &self.options.venue);
        tracing::info!(
            venue = %self.options.venue,
            fetched = crm_events.len(),
            selected = selected.len(),
            "filtered CRM events"
        );

        let cms_events = cms.fetch_events().map_err(SyncError::Cms)?;
        let plan = reconcile(selected.iter().copied(), &cms_events);
        tracing::info!(
            cms_events = cms_events.len(),
            create = plan.to_create.len(),
            update = plan.to_update.len(),
            unchanged = plan.unchanged,
            "reconciled against CMS"
        );

        let mut report = SyncReport {
            started_at,
            venue: self.options.venue.clone(),
            dry_run: sink.is_none(),
            fetched: crm_events.len(),
            selected: selected.len(),
            created: Vec::new(),
            updated: Vec::new(),
            unchanged: plan.unchanged,
            failures: Vec::new(),
        };

        for event in &plan.to_create {
            let document = self
                .mapper
                .build_document(event, self.options.parent_id.as_deref());
            let outcome = match sink.as_mut() {
                Some(sink) => sink.create(&document),
                None => Ok(()),
            };
            record(&mut report, SyncAction::Create, event, outcome);
        }

        for pending in &plan.to_update {
            let document = self.mapper.build_update(pending.crm, &pending.cms.document);
            let outcome = match sink.as_mut() {
                Some(sink) => sink.update(pending.cms, &document),
                None => Ok(()),
            };
            record(&mut report, SyncAction::Update, pending.crm, outcome);
        }

        tracing::info!(
            created = report.created.len(),
            updated = report.updated.len(),
            failed = report.failures.len(),
            dry_run = report.dry_run,
            "sync pass finished"
        );
        Ok(report)
    }
}

fn record(
    report: &mut SyncReport,
    action: SyncAction,
    event: &CrmEvent,
    outcome: Result<(), SinkError>,
) {
    let event_id = event.cms_id();
    match outcome {
        Ok(()) => match action {
            SyncAction::Create => report.created.push(event_id),
            SyncAction::Update => report.updated.push(event_id),
        },
        Err(e) => {
            tracing::error!(event_id = %event_id, %action, error = %e, "CMS write failed");
            report.failures.push(SyncFailure {
                event_id,
                action,
                error: e.to_string(),
            });
        }
    }
}
