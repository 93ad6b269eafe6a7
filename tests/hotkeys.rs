use eframe::egui;
use fourierplot::data::hotkeys::*;

#[test]
fn parse_plain_and_modified_keys() {
    assert_eq!("p".parse::<Hotkey>(), Ok(Hotkey::new(Modifier::None, 'P')));
    assert_eq!(
        "ctrl+shift+p".parse::<Hotkey>(),
        Ok(Hotkey::new(Modifier::CtrlShift, 'P'))
    );
    assert_eq!(
        "Shift+Control+P".parse::<Hotkey>(),
        Ok(Hotkey::new(Modifier::CtrlShift, 'P'))
    );
    assert_eq!(
        "Alt+Ctrl+X".parse::<Hotkey>(),
        Ok(Hotkey::new(Modifier::CtrlAlt, 'X'))
    );
}

#[test]
fn parse_plus_and_space() {
    assert_eq!("+".parse::<Hotkey>(), Ok(Hotkey::new(Modifier::None, '+')));
    assert_eq!("Ctrl++".parse::<Hotkey>(), Ok(Hotkey::new(Modifier::Ctrl, '+')));
    assert_eq!("Space".parse::<Hotkey>(), Ok(Hotkey::new(Modifier::None, ' ')));
}

#[test]
fn parse_rejects_garbage() {
    assert!("".parse::<Hotkey>().is_err());
    assert!("PP".parse::<Hotkey>().is_err());
    assert!("Hyper+P".parse::<Hotkey>().is_err());
}

#[test]
fn display_round_trips() {
    for text in ["P", "Ctrl+S", "Alt+Shift+R", "+", "Ctrl+Space", "-"] {
        let hk: Hotkey = text.parse().unwrap();
        assert_eq!(hk.to_string(), text);
    }
}

#[test]
fn defaults_and_lookup() {
    let hk = Hotkeys::default();
    assert_eq!(
        hk.action_for(&Hotkey::new(Modifier::None, 'P')),
        Some(HotkeyName::PlayPause)
    );
    assert_eq!(
        hk.action_for(&Hotkey::new(Modifier::None, '-')),
        Some(HotkeyName::FewerTerms)
    );
    assert_eq!(hk.action_for(&Hotkey::new(Modifier::Ctrl, 'P')), None);
    assert_eq!(hk.get(HotkeyName::SavePng), Some(&Hotkey::new(Modifier::None, 'S')));
}

#[test]
fn unbound_action_has_no_hotkey() {
    let hk = Hotkeys {
        reset_view: None,
        ..Hotkeys::default()
    };
    assert_eq!(hk.get(HotkeyName::ResetView), None);
    assert_eq!(hk.action_for(&Hotkey::new(Modifier::None, 'R')), None);
}

#[test]
fn tooltip_mentions_binding() {
    let hk = Hotkeys::default();
    assert_eq!(
        format_button_tooltip("Reset zoom and pan", hk.get(HotkeyName::ResetView)),
        "Reset zoom and pan [R]"
    );
    assert_eq!(format_button_tooltip("Plain", None), "Plain");
}

fn key_event(key: egui::Key, modifiers: egui::Modifiers, pressed: bool) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed,
        repeat: false,
        modifiers,
    }
}

#[test]
fn key_events_map_to_hotkeys() {
    assert_eq!(
        event_to_hotkey(&key_event(egui::Key::A, egui::Modifiers::CTRL, true)),
        Some(Hotkey::new(Modifier::Ctrl, 'A'))
    );
    assert_eq!(
        event_to_hotkey(&key_event(egui::Key::Plus, egui::Modifiers::SHIFT, true)),
        Some(Hotkey::new(Modifier::None, '+'))
    );
    assert_eq!(
        event_to_hotkey(&key_event(egui::Key::Space, egui::Modifiers::NONE, true)),
        Some(Hotkey::new(Modifier::None, ' '))
    );
    assert_eq!(
        event_to_hotkey(&key_event(egui::Key::F1, egui::Modifiers::NONE, true)),
        None
    );
    assert_eq!(
        event_to_hotkey(&key_event(egui::Key::P, egui::Modifiers::NONE, false)),
        None
    );
}
