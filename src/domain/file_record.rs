//! File records and their persisted `key=value;` encoding.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone};
use std::path::{Path, PathBuf};

const EQUALS: char = '=';
const DELIMITER: char = ';';

pub const PATH: &str = "path";
pub const TYPE: &str = "type";
pub const FORMAT: &str = "format";
pub const LAST_ACCESS: &str = "last-access";
pub const LAST_BACKUP: &str = "last-backup";
pub const BACKUP_FOLDER: &str = "backup-folder";
pub const TEMPLATES_FOLDER: &str = "templates-folder";
pub const SCRIPTS_FOLDER: &str = "scripts-folder";
pub const EASYPLAY: &str = "easyplay";

/// Stored in place of a backup date that never happened.
pub const NO_DATE: &str = "no-date";

const BRIEF_DISPLAY_NAME_MAX_LENGTH: usize = 30;

/// Medium date-time layouts written by earlier releases. Read, never written.
const LEGACY_DATE_FORMATS: [&str; 2] = ["%b %d, %Y %I:%M:%S %p", "%b %d, %Y, %I:%M:%S %p"];

/// One tracked file, folder or URL plus the metadata remembered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Canonical path or URL. Identity key within a recent list; empty means "no record".
    pub path: String,
    /// "file", "url", ...
    pub kind: String,
    /// Free-form data format tag.
    pub format: String,
    pub last_access: DateTime<Local>,
    /// `None` until the first successful backup.
    pub last_backup: Option<DateTime<Local>>,
    pub backup_folder: String,
    pub templates_folder: String,
    pub scripts_folder: String,
    /// Opaque value owned by the host application.
    pub easyplay: String,
}

impl Default for FileRecord {
    fn default() -> Self {
        Self {
            path: String::new(),
            kind: String::new(),
            format: String::new(),
            last_access: Local::now(),
            last_backup: None,
            backup_folder: String::new(),
            templates_folder: String::new(),
            scripts_folder: String::new(),
            easyplay: String::new(),
        }
    }
}

impl FileRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(
        kind: impl Into<String>,
        path: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
            format: format.into(),
            ..Default::default()
        }
    }

    /// Build a `file` record from a filesystem path, canonicalised when possible.
    pub fn from_path(path: &Path) -> Self {
        let resolved = std::fs::canonicalize(path)
            .or_else(|_| std::path::absolute(path))
            .unwrap_or_else(|_| path.to_path_buf());
        Self::with_kind("file", resolved.display().to_string(), "")
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Path with `%20` shown as spaces.
    pub fn display_name(&self) -> String {
        self.path.replace("%20", " ")
    }

    /// The file name plus as many enclosing folders as fit in a short menu label.
    pub fn brief_display_name(&self) -> String {
        let chars: Vec<char> = self.display_name().chars().collect();
        let start = chars
            .iter()
            .enumerate()
            .rev()
            .take(BRIEF_DISPLAY_NAME_MAX_LENGTH)
            .filter(|(_, c)| **c == '/' || **c == '\\')
            .map(|(i, _)| i + 1)
            .last()
            .unwrap_or(0);
        chars[start..].iter().collect()
    }

    /// The folder this record lives in: itself for folders and missing paths,
    /// the parent for files.
    pub fn folder(&self) -> Option<PathBuf> {
        if !self.has_path() {
            return None;
        }
        let path = PathBuf::from(&self.path);
        if !path.exists() || path.is_dir() {
            Some(path)
        } else if path.is_file() {
            path.parent().map(Path::to_path_buf)
        } else {
            None
        }
    }

    pub fn exists(&self) -> bool {
        self.has_path() && Path::new(&self.path).exists()
    }

    pub fn touch(&mut self) {
        self.last_access = Local::now();
    }

    /// Capture backup and folder metadata from an older entry for the same path.
    /// Fields already set on `self` are kept.
    pub fn absorb(&mut self, older: &FileRecord) {
        if self.last_backup.is_none() {
            self.last_backup = older.last_backup;
        }
        inherit(&mut self.backup_folder, &older.backup_folder);
        inherit(&mut self.templates_folder, &older.templates_folder);
        inherit(&mut self.scripts_folder, &older.scripts_folder);
        inherit(&mut self.easyplay, &older.easyplay);
    }

    /// Encode as `key=value;` pairs, skipping empty fields.
    pub fn encode(&self) -> String {
        let last_access = format_timestamp(&self.last_access);
        let last_backup = self
            .last_backup
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default();

        [
            (PATH, self.path.as_str()),
            (TYPE, self.kind.as_str()),
            (FORMAT, self.format.as_str()),
            (LAST_ACCESS, last_access.as_str()),
            (LAST_BACKUP, last_backup.as_str()),
            (BACKUP_FOLDER, self.backup_folder.as_str()),
            (TEMPLATES_FOLDER, self.templates_folder.as_str()),
            (SCRIPTS_FOLDER, self.scripts_folder.as_str()),
            (EASYPLAY, self.easyplay.as_str()),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .fold(String::new(), |mut out, (name, value)| {
            out.push_str(name);
            out.push(EQUALS);
            out.push_str(value);
            out.push(DELIMITER);
            out
        })
    }

    /// Decode a `key=value;` string. Never fails: unknown keys and pairs
    /// without `=` are skipped, missing keys keep their defaults.
    pub fn parse(info: &str) -> Self {
        let mut record = Self::default();
        for pair in info.split(DELIMITER) {
            let pair = pair.trim_start();
            if let Some((name, value)) = pair.split_once(EQUALS) {
                record.set_attribute(name, value);
            }
        }
        record
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let is = |key: &str| name.eq_ignore_ascii_case(key);
        if is(PATH) {
            self.path = value.to_string();
        } else if is(TYPE) {
            self.kind = value.to_string();
        } else if is(FORMAT) {
            self.format = value.to_string();
        } else if is(LAST_ACCESS) {
            self.last_access = parse_timestamp(value).unwrap_or_else(Local::now);
        } else if is(LAST_BACKUP) {
            self.last_backup = parse_timestamp(value);
        } else if is(BACKUP_FOLDER) {
            self.backup_folder = value.to_string();
        } else if is(TEMPLATES_FOLDER) {
            self.templates_folder = value.to_string();
        } else if is(SCRIPTS_FOLDER) {
            self.scripts_folder = value.to_string();
        } else if is(EASYPLAY) {
            self.easyplay = value.to_string();
        }
    }
}

fn inherit(field: &mut String, older: &str) {
    if field.is_empty() {
        *field = older.to_string();
    }
}

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Parse a stored timestamp. Returns `None` for empty, `no-date` and
/// anything that is neither RFC 3339 nor one of the legacy layouts.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    let value = value.trim().replace('\u{202f}', " ");
    if value.is_empty() || value.eq_ignore_ascii_case(NO_DATE) {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&value) {
        return Some(parsed.with_timezone(&Local));
    }

    LEGACY_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&value, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn encode_then_parse_keeps_every_populated_field() {
        let record = FileRecord {
            path: "/home/ann/notes".into(),
            kind: "file".into(),
            format: "markdown".into(),
            last_access: at(2024, 3, 1, 10, 30) + Duration::milliseconds(250),
            last_backup: Some(at(2024, 2, 20, 8, 0)),
            backup_folder: "/home/ann/backups".into(),
            templates_folder: "/home/ann/templates".into(),
            scripts_folder: "/home/ann/scripts".into(),
            easyplay: "on".into(),
        };

        assert_eq!(FileRecord::parse(&record.encode()), record);
    }

    #[test]
    fn encode_skips_empty_fields() {
        let record = FileRecord::new("/tmp/a");
        let encoded = record.encode();
        assert!(encoded.starts_with("path=/tmp/a;last-access="));
        assert!(!encoded.contains(LAST_BACKUP));
        assert!(!encoded.contains(TYPE));
    }

    #[test]
    fn parse_is_tolerant() {
        let record =
            FileRecord::parse("  path=/a/b;garbage; TYPE=url;colour=blue;format=x=y;last-backup=oops");
        assert_eq!(record.path, "/a/b");
        assert_eq!(record.kind, "url");
        assert_eq!(record.format, "x=y");
        assert_eq!(record.last_backup, None);
    }

    #[test]
    fn parse_of_empty_string_has_no_path() {
        assert!(!FileRecord::parse("").has_path());
    }

    #[test]
    fn legacy_dates_are_read_in_local_time() {
        let parsed = parse_timestamp("Jan 5, 2013 3:04:05 PM").unwrap();
        assert_eq!(parsed, Local.with_ymd_and_hms(2013, 1, 5, 15, 4, 5).unwrap());
        assert_eq!(parse_timestamp("Jan 5, 2013, 3:04:05 PM"), Some(parsed));
        assert_eq!(parse_timestamp(NO_DATE), None);
    }

    #[test]
    fn absorb_keeps_own_fields_and_inherits_missing_ones() {
        let mut newer = FileRecord::new("/p");
        newer.scripts_folder = "/mine".into();
        let mut older = FileRecord::new("/p");
        older.backup_folder = "X".into();
        older.scripts_folder = "/theirs".into();
        older.last_backup = Some(at(2024, 1, 1, 0, 0));

        newer.absorb(&older);

        assert_eq!(newer.backup_folder, "X");
        assert_eq!(newer.scripts_folder, "/mine");
        assert_eq!(newer.last_backup, older.last_backup);
    }

    #[test]
    fn display_names() {
        let record = FileRecord::new("/Users/ann/My%20Documents/projects/2024/report.txt");
        assert_eq!(
            record.display_name(),
            "/Users/ann/My Documents/projects/2024/report.txt"
        );
        assert_eq!(record.brief_display_name(), "projects/2024/report.txt");
        assert_eq!(FileRecord::new("report.txt").brief_display_name(), "report.txt");
        assert_eq!(
            FileRecord::new(r"C:\Data\notes.db").brief_display_name(),
            r"Data\notes.db"
        );
    }
}
