use ratatui::style::Color;

pub const APP_NAME: &str = "habits";

pub const FILE_NAMES: FileNames = FileNames {
    record: "habits.json",
    backups_dir: "backups",
    log_basename: "habits",
};

pub const STORAGE_SETTINGS: StorageSettings = StorageSettings {
    max_backups: 10,
    export_schema_version: 1,
};

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    poll_ms: 250,
    warning_ttl_secs: 5,
};

pub const PALETTE: Palette = Palette {
    done: Color::Rgb(16, 185, 129),
    missed: Color::Rgb(244, 63, 94),
    today: Color::Rgb(96, 165, 250),
    unmarked: Color::Gray,
    muted: Color::DarkGray,
    warning: Color::Yellow,
};

pub const WEEKDAY_HEADERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

pub const INFO_LINES: [&str; 3] = [
    "Mark once: habit complete",
    "Mark again: habit missed",
    "Mark a third time: reset day",
];

pub struct FileNames {
    pub record: &'static str,
    pub backups_dir: &'static str,
    pub log_basename: &'static str,
}

pub struct StorageSettings {
    pub max_backups: usize,
    pub export_schema_version: u32,
}

pub struct TimeSettings {
    pub poll_ms: u64,
    pub warning_ttl_secs: u64,
}

pub struct Palette {
    pub done: Color,
    pub missed: Color,
    pub today: Color,
    pub unmarked: Color,
    pub muted: Color,
    pub warning: Color,
}
