use crate::ui::{backup_view, components, recent_view, settings_view};
use iced::widget::{column, container, scrollable, text, Space};
use iced::{Element, Fill, Task, Theme};
use recent_files::services::{MenuMirror, StartupChoice, StartupChoices};
use recent_files::{
    open_default_store, start_session, BackupDecision, BackupFrequency, BackupPolicy,
    BackupTrigger, FileOpener, FileRecord, FilePreferences, FolderBackup, FsProbe,
    ListObserver, MemoryStore, PreferenceStore, PurgeWhen, RecentFileList,
    SelectionMode,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{error, info, warn};

const ORGANISATION: &str = "RecentFiles";
const APPLICATION: &str = "recent-files";

#[derive(Debug, Clone)]
pub enum Message {
    PathChanged(String),
    SelectionModeChanged(SelectionMode),
    OpenPath,
    OpenRecent(usize),
    RemoveRecent(usize),
    PurgeInaccessible,
    ClearHistory,
    MaxSizeChanged(u8),
    FrequencyChanged(BackupFrequency),
    DaysBetweenChanged(u8),
    BackupsToKeepChanged(u8),
    StartupChosen(StartupChoice),
    PurgeWhenChanged(PurgeWhen),
    EssentialPathChanged(String),
    SavePreferences,
    CloseCurrent,
    MajorEvent,
    BackupAnswered(bool),
    OpenBackupFolder,
}

/// Hands files to the desktop's default handler.
struct SystemOpener {
    opened: Option<String>,
}

impl FileOpener for SystemOpener {
    fn open_file(&mut self, record: &FileRecord) {
        match spawn_default_handler(Path::new(&record.path)) {
            Ok(()) => self.opened = Some(record.path.clone()),
            Err(e) => warn!("Could not open {}: {}", record.path, e),
        }
    }
}

fn spawn_default_handler(path: &Path) -> std::io::Result<()> {
    #[cfg(windows)]
    let mut command = std::process::Command::new("explorer");
    #[cfg(target_os = "macos")]
    let mut command = std::process::Command::new("open");
    #[cfg(all(unix, not(target_os = "macos")))]
    let mut command = std::process::Command::new("xdg-open");

    command.arg(path).spawn().map(|_| ())
}

pub struct State {
    store: Rc<dyn PreferenceStore>,
    recent: RecentFileList,
    menu: Rc<RefCell<MenuMirror>>,
    startup: Rc<RefCell<StartupChoices>>,
    preferences: FilePreferences,
    policy: BackupPolicy,
    path_input: String,
    selection_mode: SelectionMode,
    pending_backup: Option<BackupTrigger>,
    status_message: String,
}

impl State {
    pub fn new() -> Self {
        let store = open_default_store(ORGANISATION, APPLICATION).unwrap_or_else(|e| {
            error!("Preferences unavailable, changes will not be kept: {}", e);
            Rc::new(MemoryStore::new()) as Rc<dyn PreferenceStore>
        });

        let preferences = FilePreferences::load(store.as_ref());
        let menu = Rc::new(RefCell::new(MenuMirror::new()));
        let startup = Rc::new(RefCell::new(StartupChoices::new(
            preferences.launch_at_startup.clone(),
        )));
        let observers: Vec<Box<dyn ListObserver>> =
            vec![Box::new(menu.clone()), Box::new(startup.clone())];
        let session = start_session(store.clone(), "", &FsProbe, observers);

        let mut state = Self {
            store,
            recent: session.recent,
            menu,
            startup,
            preferences: session.preferences,
            policy: session.policy,
            path_input: String::new(),
            selection_mode: SelectionMode::FilesAndDirectories,
            pending_backup: None,
            status_message: String::new(),
        };

        if let Some(path) = state.preferences.startup_path(&state.recent) {
            state.open_path(PathBuf::from(path));
        }
        state
    }

    fn open_path(&mut self, path: PathBuf) {
        let mut opener = SystemOpener { opened: None };
        match self
            .recent
            .open_chosen(&path, self.selection_mode, &mut opener, &FsProbe)
        {
            Ok(record) => {
                self.status_message = match opener.opened {
                    Some(_) => format!("Opened {}", record.display_name()),
                    None => format!("Remembered {}", record.display_name()),
                };
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn current(&self) -> Option<&FileRecord> {
        self.recent.get(0)
    }

    /// Ask the policy about the current file; prompts wait for the banner.
    fn consider_backup(&mut self, trigger: BackupTrigger) {
        let Some(record) = self.current() else {
            self.status_message = "No file is open".to_string();
            return;
        };

        let now = self.policy.now();
        match self.policy.decide(record, trigger, &now) {
            BackupDecision::Skip => {
                self.status_message = "No backup needed".to_string();
            }
            BackupDecision::Prompt => self.pending_backup = Some(trigger),
            BackupDecision::Silent => self.run_backup(trigger, true),
        }
    }

    fn run_backup(&mut self, trigger: BackupTrigger, confirmed: bool) {
        let keep = self.preferences.backups_to_keep as usize;
        let Some(backup) = self.current().and_then(|r| FolderBackup::for_record(r, keep)) else {
            return;
        };
        let mut backup = backup.with_confirmation(move || confirmed);

        let backed_up = match trigger {
            BackupTrigger::Close => self.policy.on_close_current(&mut self.recent, &mut backup),
            BackupTrigger::MajorEvent => {
                self.policy.on_major_event_current(&mut self.recent, &mut backup)
            }
        };

        self.status_message = match (backed_up, backup.last_backup()) {
            (true, Some(target)) => format!("Backed up to {}", target.display()),
            (true, None) => "Backup recorded".to_string(),
            (false, _) if confirmed => "Backup failed, see the log for details".to_string(),
            (false, _) => "Backup skipped".to_string(),
        };
    }

    fn save_preferences(&mut self) {
        self.preferences.launch_at_startup = self.startup.borrow().launch_at_startup().clone();
        self.policy.set_settings(self.preferences.backup_settings());

        match self.preferences.save(self.store.as_ref()) {
            Ok(()) => {
                info!("Preferences saved");
                self.status_message = "Preferences saved".to_string();
            }
            Err(e) => self.status_message = format!("Could not save preferences: {}", e),
        }
    }
}

pub fn init() -> (State, Task<Message>) {
    (State::new(), Task::none())
}

pub fn theme(_state: &State) -> Theme {
    Theme::Dark
}

pub fn update(state: &mut State, message: Message) -> Task<Message> {
    match message {
        Message::PathChanged(path) => state.path_input = path,
        Message::SelectionModeChanged(mode) => state.selection_mode = mode,
        Message::OpenPath => {
            let path = state.path_input.trim().to_string();
            if !path.is_empty() {
                state.open_path(PathBuf::from(path));
                state.path_input.clear();
            }
        }
        Message::OpenRecent(index) => {
            let mut opener = SystemOpener { opened: None };
            if state.recent.reopen(index, &mut opener, &FsProbe) {
                state.status_message = opener
                    .opened
                    .map(|p| format!("Opened {}", p))
                    .unwrap_or_default();
            } else {
                state.status_message = "That file is no longer available".to_string();
            }
        }
        Message::RemoveRecent(index) => state.recent.remove(index),
        Message::PurgeInaccessible => {
            let removed = state.recent.purge_inaccessible(&FsProbe);
            state.status_message = format!("Removed {} missing files", removed);
        }
        Message::ClearHistory => state.recent.clear_history(),
        Message::MaxSizeChanged(max) => {
            state.recent.set_max_size(usize::from(max));
            state.preferences.recent_files_max = state.recent.max_size();
        }
        Message::FrequencyChanged(frequency) => state.preferences.backup_frequency = frequency,
        Message::DaysBetweenChanged(days) => {
            state.preferences.days_between_backups = u32::from(days)
        }
        Message::BackupsToKeepChanged(keep) => state.preferences.backups_to_keep = u32::from(keep),
        Message::StartupChosen(choice) => state.startup.borrow_mut().select(choice.index),
        Message::PurgeWhenChanged(when) => state.preferences.purge_inaccessible = when,
        Message::EssentialPathChanged(path) => state.preferences.essential_path = path,
        Message::SavePreferences => state.save_preferences(),
        Message::CloseCurrent => state.consider_backup(BackupTrigger::Close),
        Message::MajorEvent => state.consider_backup(BackupTrigger::MajorEvent),
        Message::BackupAnswered(yes) => {
            if let Some(trigger) = state.pending_backup.take() {
                state.run_backup(trigger, yes);
            }
        }
        Message::OpenBackupFolder => {
            let keep = state.preferences.backups_to_keep as usize;
            if let Some(backup) = state.current().and_then(|r| FolderBackup::for_record(r, keep)) {
                if let Err(e) = spawn_default_handler(backup.folder()) {
                    state.status_message = format!("Could not open backup folder: {}", e);
                }
            }
        }
    }
    Task::none()
}

pub fn view(state: &State) -> Element<'_, Message> {
    let mut content = column![text("Recent Files").size(26)].spacing(5).padding(15);

    if let Some(trigger) = state.pending_backup {
        content = content.push(components::backup_banner(trigger));
    }

    if !state.status_message.is_empty() {
        content = content.push(components::status_box(&state.status_message));
    }

    let startup = state.startup.borrow();
    let choices = startup.choices();
    let selected = choices.get(startup.selected()).cloned();

    content = content
        .push(Space::new().height(15))
        .push(backup_view::view(
            state.current(),
            &state.preferences,
            state.policy.now(),
        ))
        .push(Space::new().height(15))
        .push(recent_view::view(
            state.menu.borrow().entries().to_vec(),
            &state.path_input,
            state.selection_mode,
        ))
        .push(Space::new().height(15))
        .push(settings_view::view(
            &state.preferences,
            choices,
            selected,
        ));

    container(scrollable(content))
        .width(Fill)
        .height(Fill)
        .into()
}
