//! User configuration — keybindings and client settings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/hangszer/config.toml` (default
//! `~/.config/hangszer/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    Select,
    Back,
    Fullscreen,
    AddToCart,
    SellerProfile,
    Refresh,
    GoHome,
    GoCart,
    GoProfile,
    Quit,
}

impl Action {
    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::PrevPage => "prev_page",
            Action::NextPage => "next_page",
            Action::Select => "select",
            Action::Back => "back",
            Action::Fullscreen => "fullscreen",
            Action::AddToCart => "add_to_cart",
            Action::SellerProfile => "seller_profile",
            Action::Refresh => "refresh",
            Action::GoHome => "go_home",
            Action::GoCart => "go_cart",
            Action::GoProfile => "go_profile",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "move_up" => Some(Action::MoveUp),
            "move_down" => Some(Action::MoveDown),
            "prev_page" => Some(Action::PrevPage),
            "next_page" => Some(Action::NextPage),
            "select" => Some(Action::Select),
            "back" => Some(Action::Back),
            "fullscreen" => Some(Action::Fullscreen),
            "add_to_cart" => Some(Action::AddToCart),
            "seller_profile" => Some(Action::SellerProfile),
            "refresh" => Some(Action::Refresh),
            "go_home" => Some(Action::GoHome),
            "go_cart" => Some(Action::GoCart),
            "go_profile" => Some(Action::GoProfile),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }

    /// Ordered list of all actions (used when serialising).
    const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::PrevPage,
        Action::NextPage,
        Action::Select,
        Action::Back,
        Action::Fullscreen,
        Action::AddToCart,
        Action::SellerProfile,
        Action::Refresh,
        Action::GoHome,
        Action::GoCart,
        Action::GoProfile,
        Action::Quit,
    ];
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"↑"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            s if s.len() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

pub const DEFAULT_SERVER_URL: &str = "https://hangszercsere.hu";

/// Application configuration — keybindings and client settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Marketplace server base URL (no trailing slash).
    pub server_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Hard-coded default keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(PrevPage, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(NextPage, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Select, vec![KeyBind::new(Enter, n)]);
        m.insert(Back, vec![KeyBind::new(Esc, n)]);
        m.insert(Fullscreen, vec![KeyBind::new(Char('f'), n)]);
        m.insert(AddToCart, vec![KeyBind::new(Char('a'), n)]);
        m.insert(SellerProfile, vec![KeyBind::new(Char('s'), n)]);
        m.insert(Refresh, vec![KeyBind::new(Char('r'), n)]);
        m.insert(GoHome, vec![KeyBind::new(Char('1'), n)]);
        m.insert(GoCart, vec![KeyBind::new(Char('2'), n)]);
        m.insert(GoProfile, vec![KeyBind::new(Char('3'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for hint lines).
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk. On first run the default config is written
    /// out so the bindings are discoverable and editable.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(contents) = std::fs::read_to_string(&path) {
            return Self::parse_config(&contents);
        }
        let config = Self::default();
        if let Err(err) = config.save() {
            tracing::debug!("could not write default config: {err:#}");
        }
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut bindings = Self::default_bindings();
        let mut server_url = DEFAULT_SERVER_URL.to_string();
        let mut timeout_secs = 10;

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Client settings.
            match key {
                "server_url" => {
                    if !value.is_empty() {
                        server_url = value.trim_end_matches('/').to_string();
                    }
                    continue;
                }
                "timeout_secs" => {
                    if let Ok(v) = value.parse::<u64>() {
                        // Keep this bounded so a typo can't freeze requests.
                        timeout_secs = v.clamp(1, 120);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                bindings.insert(action, parsed);
            }
        }

        Self {
            bindings,
            server_url,
            timeout_secs,
        }
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# hangszer configuration".to_string(),
            String::new(),
            "# Client settings".to_string(),
            format!("server_url = {}", self.server_url),
            format!("timeout_secs = {}", self.timeout_secs),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/hangszer/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("hangszer").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialise_parse_round_trip() {
        let mut config = AppConfig {
            bindings: AppConfig::default_bindings(),
            server_url: "https://dev.example.test".into(),
            timeout_secs: 30,
        };
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::parse("Ctrl+q").unwrap()]);

        let parsed = AppConfig::parse_config(&config.serialise());
        assert_eq!(parsed.server_url, "https://dev.example.test");
        assert_eq!(parsed.timeout_secs, 30);
        assert_eq!(
            parsed.bindings.get(&Action::Quit),
            Some(&vec![KeyBind::new(KeyCode::Char('q'), KeyModifiers::CONTROL)])
        );
    }

    #[test]
    fn unknown_keys_fall_back_to_defaults() {
        let parsed = AppConfig::parse_config("nonsense = true\nquit = @@@\n");
        assert_eq!(parsed.server_url, DEFAULT_SERVER_URL);
        assert_eq!(
            parsed.bindings.get(&Action::Quit),
            AppConfig::default_bindings().get(&Action::Quit)
        );
    }

    #[test]
    fn timeout_is_bounded() {
        let parsed = AppConfig::parse_config("timeout_secs = 99999\n");
        assert_eq!(parsed.timeout_secs, 120);
    }
}
