//! Local-first store with an optional remote mirror
//!
//! Saves always land locally first and are then pushed to the remote; the
//! outcome is always a success and names the store that accepted it last.
//! Loads prefer the local copy and fall back to the remote one. Every
//! failure is logged and degrades to "nothing stored".

use async_trait::async_trait;
use inspection_checklist::Inspection;

use super::traits::{InspectionStore, SaveOutcome, SaveSource};
use crate::domain::StoreResult;

pub struct FallbackStore<L, R> {
    local: L,
    remote: Option<R>,
}

impl<L: InspectionStore, R: InspectionStore> FallbackStore<L, R> {
    pub fn new(local: L, remote: Option<R>) -> Self {
        Self { local, remote }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> Option<&R> {
        self.remote.as_ref()
    }
}

#[async_trait]
impl<L: InspectionStore, R: InspectionStore> InspectionStore for FallbackStore<L, R> {
    async fn save(&self, id: &str, inspection: &Inspection) -> StoreResult<SaveOutcome> {
        if let Err(e) = self.local.save(id, inspection).await {
            log::error!("local save of {} failed: {}", id, e);
        }

        if let Some(remote) = &self.remote {
            match remote.save(id, inspection).await {
                Ok(outcome) if outcome.success => return Ok(SaveOutcome::saved(SaveSource::Remote)),
                Ok(_) => log::warn!("remote declined save of {}", id),
                Err(e) => log::warn!("remote save of {} failed, kept local copy: {}", id, e),
            }
        }

        Ok(SaveOutcome::saved(SaveSource::LocalCache))
    }

    async fn load(&self, id: &str) -> StoreResult<Option<Inspection>> {
        match self.local.load(id).await {
            Ok(Some(inspection)) => return Ok(Some(inspection)),
            Ok(None) => {}
            Err(e) => log::warn!("local load of {} failed: {}", id, e),
        }

        let Some(remote) = &self.remote else {
            return Ok(None);
        };
        match remote.load(id).await {
            Ok(Some(inspection)) => {
                if let Err(e) = self.local.save(id, &inspection).await {
                    log::warn!("could not cache remote copy of {}: {}", id, e);
                }
                Ok(Some(inspection))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                log::warn!("remote load of {} failed: {}", id, e);
                Ok(None)
            }
        }
    }
}
