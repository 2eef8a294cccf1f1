//! Classification of CRM events against the current CMS collection.
//!
//! Matching is by identity (the CRM id in string form against the CMS
//! `eventId`). A matched pair whose normalized freshness markers agree is
//! already in sync and appears in neither output list. CMS events without a
//! CRM counterpart are not reported; nothing is ever deleted.

use std::collections::HashMap;

use crate::freshness::same_marker;
use crate::models::{CmsEvent, CrmEvent};

/// A CRM event that changed since its CMS counterpart was written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingUpdate<'a> {
    pub cms: &'a CmsEvent,
    pub crm: &'a CrmEvent,
}

/// Result of [`reconcile`]. Both lists follow CRM input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncPlan<'a> {
    pub to_create: Vec<&'a CrmEvent>,
    pub to_update: Vec<PendingUpdate<'a>>,
    /// Matched events whose markers agree
    pub unchanged: usize,
}

impl SyncPlan<'_> {
    /// True when there is nothing to write.
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty()
    }
}

/// Partitions `crm` events into create and update sets.
///
/// When `cms` holds several events with the same identity, the last one wins.
pub fn reconcile<'a, I>(crm: I, cms: &'a [CmsEvent]) -> SyncPlan<'a>
where
    I: IntoIterator<Item = &'a CrmEvent>,
{
    let by_id: HashMap<&str, &CmsEvent> = cms.iter().map(|e| (e.event_id(), e)).collect();

    let mut plan = SyncPlan::default();
    for event in crm {
        match by_id.get(event.cms_id().as_str()).copied() {
            None => {
                tracing::debug!(event_id = event.event_id, "no CMS counterpart, will create");
                plan.to_create.push(event);
            }
            Some(existing) if same_marker(&event.last_updated_date, existing.last_updated_date()) => {
                tracing::trace!(event_id = event.event_id, "already in sync");
                plan.unchanged += 1;
            }
            Some(existing) => {
                tracing::debug!(
                    event_id = event.event_id,
                    crm_marker = %event.last_updated_date,
                    cms_marker = %existing.last_updated_date(),
                    "freshness marker changed, will update"
                );
                plan.to_update.push(PendingUpdate {
                    cms: existing,
                    crm: event,
                });
            }
        }
    }

    plan
}
