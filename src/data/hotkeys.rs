//! Keyboard shortcuts: parsing, display and detection against egui input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use eframe::egui;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
    Shift,
    CtrlAlt,
    CtrlShift,
    AltShift,
    CtrlAltShift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::CtrlAlt => "Ctrl+Alt",
            Modifier::CtrlShift => "Ctrl+Shift",
            Modifier::AltShift => "Alt+Shift",
            Modifier::CtrlAltShift => "Ctrl+Alt+Shift",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    pub modifier: Modifier,
    pub key: char,
}

impl Hotkey {
    pub fn new(modifier: Modifier, key: char) -> Self {
        Self { modifier, key }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            ' ' => "Space".to_string(),
            other => other.to_string(),
        };

        if self.modifier == Modifier::None {
            write!(f, "{}", key)
        } else {
            write!(f, "{}+{}", self.modifier, key)
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty hotkey".to_string());
        }
        // A trailing '+' is the key itself (e.g. "Ctrl++" or "+").
        let (mods_part, key_part) = if s == "+" {
            ("", "+")
        } else if let Some(head) = s.strip_suffix("++") {
            (head, "+")
        } else {
            match s.rfind('+') {
                Some(i) => (&s[..i], &s[i + 1..]),
                None => ("", s),
            }
        };
        let key_part = key_part.trim();
        let ch = match key_part.to_lowercase().as_str() {
            "space" => ' ',
            _ => {
                let mut chars = key_part.chars();
                let c = chars.next().ok_or_else(|| "no key char".to_string())?;
                if chars.next().is_some() {
                    return Err(format!("unknown key '{}'", key_part));
                }
                c.to_ascii_uppercase()
            }
        };
        let mut mods: Vec<String> = mods_part
            .split('+')
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .map(|m| if m == "control" { "ctrl".to_string() } else { m })
            .collect();
        mods.sort();
        let modifier = match mods.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] => Modifier::None,
            ["ctrl"] => Modifier::Ctrl,
            ["alt"] => Modifier::Alt,
            ["shift"] => Modifier::Shift,
            ["alt", "ctrl"] => Modifier::CtrlAlt,
            ["ctrl", "shift"] => Modifier::CtrlShift,
            ["alt", "shift"] => Modifier::AltShift,
            ["alt", "ctrl", "shift"] => Modifier::CtrlAltShift,
            other => return Err(format!("unknown modifier combo '{:?}'", other)),
        };
        Ok(Hotkey { modifier, key: ch })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub play_pause: Option<Hotkey>,
    pub reset_view: Option<Hotkey>,
    pub more_terms: Option<Hotkey>,
    pub fewer_terms: Option<Hotkey>,
    pub save_png: Option<Hotkey>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            play_pause: Some(Hotkey::new(Modifier::None, 'P')),
            reset_view: Some(Hotkey::new(Modifier::None, 'R')),
            more_terms: Some(Hotkey::new(Modifier::None, '+')),
            fewer_terms: Some(Hotkey::new(Modifier::None, '-')),
            save_png: Some(Hotkey::new(Modifier::None, 'S')),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HotkeyName {
    PlayPause,
    ResetView,
    MoreTerms,
    FewerTerms,
    SavePng,
}

impl Hotkeys {
    pub fn get(&self, name: HotkeyName) -> Option<&Hotkey> {
        match name {
            HotkeyName::PlayPause => self.play_pause.as_ref(),
            HotkeyName::ResetView => self.reset_view.as_ref(),
            HotkeyName::MoreTerms => self.more_terms.as_ref(),
            HotkeyName::FewerTerms => self.fewer_terms.as_ref(),
            HotkeyName::SavePng => self.save_png.as_ref(),
        }
    }

    /// Which configured action `hk` triggers, if any.
    pub fn action_for(&self, hk: &Hotkey) -> Option<HotkeyName> {
        const ALL: [HotkeyName; 5] = [
            HotkeyName::PlayPause,
            HotkeyName::ResetView,
            HotkeyName::MoreTerms,
            HotkeyName::FewerTerms,
            HotkeyName::SavePng,
        ];
        ALL.into_iter().find(|name| self.get(*name) == Some(hk))
    }
}

/// Button tooltip with the bound hotkey appended, e.g. `"Reset view [R]"`.
pub fn format_button_tooltip(description: &str, hotkey: Option<&Hotkey>) -> String {
    match hotkey {
        Some(hk) => format!("{} [{}]", description, hk),
        None => description.to_string(),
    }
}

fn char_from_key(key: egui::Key) -> Option<char> {
    use egui::Key;
    let ch = match key {
        Key::Space => ' ',
        Key::Plus | Key::Equals => '+',
        Key::Minus => '-',
        other => {
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase(),
                _ => return None,
            }
        }
    };
    Some(ch)
}

fn mods_to_modifier(m: egui::Modifiers) -> Modifier {
    match (m.ctrl || m.command, m.alt, m.shift) {
        (false, false, false) => Modifier::None,
        (true, false, false) => Modifier::Ctrl,
        (false, true, false) => Modifier::Alt,
        (false, false, true) => Modifier::Shift,
        (true, true, false) => Modifier::CtrlAlt,
        (true, false, true) => Modifier::CtrlShift,
        (false, true, true) => Modifier::AltShift,
        (true, true, true) => Modifier::CtrlAltShift,
    }
}

/// Hotkey pressed in a single key event, if the key maps to one.
pub fn event_to_hotkey(ev: &egui::Event) -> Option<Hotkey> {
    match ev {
        egui::Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => {
            let ch = char_from_key(*key)?;
            // '+' usually needs Shift; don't let it change the binding.
            let mut modifiers = *modifiers;
            if ch == '+' {
                modifiers.shift = false;
            }
            Some(Hotkey::new(mods_to_modifier(modifiers), ch))
        }
        _ => None,
    }
}

/// Actions whose hotkeys were pressed this frame. Space always toggles playback.
pub fn detect_hotkey_actions(cfg: &Hotkeys, ctx: &egui::Context) -> Vec<HotkeyName> {
    let mut actions: Vec<HotkeyName> = Vec::new();
    if ctx.wants_keyboard_input() {
        return actions;
    }
    let events = ctx.input(|i| i.events.clone());
    let space = Hotkey::new(Modifier::None, ' ');
    for ev in &events {
        let Some(hk) = event_to_hotkey(ev) else {
            continue;
        };
        let action = if hk == space {
            Some(HotkeyName::PlayPause)
        } else {
            cfg.action_for(&hk)
        };
        if let Some(act) = action {
            if !actions.contains(&act) {
                actions.push(act);
            }
        }
    }
    actions
}
