use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

/// Form instances with a submission currently in flight.
#[derive(Clone, Default)]
pub struct InFlightForms {
    forms: Arc<DashMap<Uuid, ()>>,
}

impl InFlightForms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `form_id` for the duration of one submission. Returns `None` if
    /// another submission for the same form is still running.
    pub fn claim(&self, form_id: Uuid) -> Option<InFlightGuard> {
        match self.forms.entry(form_id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(InFlightGuard {
                    forms: self.forms.clone(),
                    form_id,
                })
            }
        }
    }

    pub fn is_in_flight(&self, form_id: Uuid) -> bool {
        self.forms.contains_key(&form_id)
    }
}

/// Releases the claim on drop, whatever the submission outcome.
pub struct InFlightGuard {
    forms: Arc<DashMap<Uuid, ()>>,
    form_id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.forms.remove(&self.form_id);
    }
}
