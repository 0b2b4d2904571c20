//! When to offer or run a backup of the file the user is working on.

use super::recent::{recent_file_key, RecentFileList};
use crate::domain::{BackupActions, BackupDecision, BackupFrequency, BackupTrigger, FileRecord};
use crate::repositories::PreferenceStore;
use crate::utils::{Clock, SystemClock};
use chrono::{DateTime, Local};
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_DAYS_BETWEEN_BACKUPS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupSettings {
    pub frequency: BackupFrequency,
    /// Occasional mode prompts on close once this many calendar days have passed.
    pub days_between_backups: u32,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            frequency: BackupFrequency::default(),
            days_between_backups: DEFAULT_DAYS_BETWEEN_BACKUPS,
        }
    }
}

/// Calendar days from `last` to `now`: the number of single-day steps that
/// take the local date of `last` to the local date of `now`. A `last` in
/// the future gives 0.
pub fn days_since(last: &DateTime<Local>, now: &DateTime<Local>) -> i64 {
    let today = now.date_naive();
    let mut day = last.date_naive();
    let mut days = 0;
    while day < today {
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
        days += 1;
    }
    days
}

/// `None` when the record has never been backed up.
pub fn days_since_last_backup(record: &FileRecord, now: &DateTime<Local>) -> Option<i64> {
    record.last_backup.as_ref().map(|last| days_since(last, now))
}

pub struct BackupPolicy {
    settings: BackupSettings,
    store: Rc<dyn PreferenceStore>,
    clock: Box<dyn Clock>,
}

impl BackupPolicy {
    pub fn new(settings: BackupSettings, store: Rc<dyn PreferenceStore>) -> Self {
        Self {
            settings,
            store,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn settings(&self) -> &BackupSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: BackupSettings) {
        self.settings = settings;
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn decide(
        &self,
        record: &FileRecord,
        trigger: BackupTrigger,
        now: &DateTime<Local>,
    ) -> BackupDecision {
        if !record.has_path() {
            return BackupDecision::Skip;
        }

        match (self.settings.frequency, trigger) {
            (BackupFrequency::Manual, _) => BackupDecision::Skip,
            (BackupFrequency::Automatic, _) => BackupDecision::Silent,
            (BackupFrequency::Occasional, BackupTrigger::MajorEvent) => BackupDecision::Prompt,
            (BackupFrequency::Occasional, BackupTrigger::Close) => {
                let due = match days_since_last_backup(record, now) {
                    Some(days) => days >= i64::from(self.settings.days_between_backups),
                    None => true,
                };
                if due {
                    BackupDecision::Prompt
                } else {
                    BackupDecision::Skip
                }
            }
        }
    }

    /// Close-time check for `record`, persisted at `slot` of `scope` on success.
    pub fn on_close(
        &self,
        record: &mut FileRecord,
        scope: &str,
        slot: usize,
        actions: &mut dyn BackupActions,
    ) -> bool {
        self.consider(record, scope, slot, BackupTrigger::Close, actions)
    }

    /// Like [`Self::on_close`], but occasional mode always offers a backup.
    pub fn on_major_event(
        &self,
        record: &mut FileRecord,
        scope: &str,
        slot: usize,
        actions: &mut dyn BackupActions,
    ) -> bool {
        self.consider(record, scope, slot, BackupTrigger::MajorEvent, actions)
    }

    pub fn on_close_current(&self, list: &mut RecentFileList, actions: &mut dyn BackupActions) -> bool {
        self.consider_current(list, BackupTrigger::Close, actions)
    }

    pub fn on_major_event_current(
        &self,
        list: &mut RecentFileList,
        actions: &mut dyn BackupActions,
    ) -> bool {
        self.consider_current(list, BackupTrigger::MajorEvent, actions)
    }

    fn consider_current(
        &self,
        list: &mut RecentFileList,
        trigger: BackupTrigger,
        actions: &mut dyn BackupActions,
    ) -> bool {
        let scope = list.scope().to_string();
        match list.get_mut(0) {
            Some(record) => self.consider(record, &scope, 0, trigger, actions),
            None => false,
        }
    }

    #[instrument(skip(self, record, actions), fields(path = %record.path))]
    fn consider(
        &self,
        record: &mut FileRecord,
        scope: &str,
        slot: usize,
        trigger: BackupTrigger,
        actions: &mut dyn BackupActions,
    ) -> bool {
        let now = self.clock.now();
        let decision = self.decide(record, trigger, &now);
        debug!("Backup decision: {:?}", decision);

        let backed_up = match decision {
            BackupDecision::Skip => false,
            BackupDecision::Silent => actions.back_up_silently(),
            BackupDecision::Prompt => actions.suggest_backup() && actions.prompt_for_backup(),
        };

        if backed_up {
            self.stamp(record, scope, slot, now);
        }
        backed_up
    }

    /// Stamp a backup completed outside the policy.
    pub fn record_backup(&self, record: &mut FileRecord, scope: &str, slot: usize) {
        self.stamp(record, scope, slot, self.clock.now());
    }

    fn stamp(&self, record: &mut FileRecord, scope: &str, slot: usize, now: DateTime<Local>) {
        record.last_backup = Some(now);
        let key = recent_file_key(scope, slot);
        let written = self
            .store
            .set(&key, &record.encode())
            .and_then(|()| self.store.flush());

        match written {
            Ok(()) => info!("Recorded backup of {} in {}", record.path, key),
            Err(e) => warn!("Could not record backup of {}: {}", record.path, e),
        }
    }
}
