use std::path::PathBuf;

use dino_tray::TrayConfig;

fn temp_config(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dino-tray-test-{}", std::process::id()));
    dir.join(name)
}

#[test]
fn defaults_match_the_chat_client() {
    // Arrange
    let config = TrayConfig::default();

    // Assert
    assert_eq!(config.class_name, "DinoTrayWindow");
    assert_eq!(config.window_title, "Dino Tray");
    assert_eq!(config.tooltip, "Dino - XMPP Client");
    assert_eq!(config.show_label, "Show Dino");
    assert_eq!(config.exit_label, "Exit");
    assert!(config.icon.is_none());
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    // Arrange
    let content = r#"
        tooltip = "Dino (3 unread)"
        icon = 'C:\Program Files\Dino\dino.ico'
    "#;

    // Act
    let config: TrayConfig = toml::from_str(content).unwrap();

    // Assert
    assert_eq!(config.tooltip, "Dino (3 unread)");
    assert_eq!(
        config.icon,
        Some(PathBuf::from(r"C:\Program Files\Dino\dino.ico"))
    );
    assert_eq!(config.class_name, "DinoTrayWindow");
    assert_eq!(config.exit_label, "Exit");
}

#[test]
fn unset_icon_is_not_serialized() {
    // Act
    let content = toml::to_string(&TrayConfig::default()).unwrap();

    // Assert
    assert!(!content.contains("icon"));
    assert!(content.contains("tooltip = \"Dino - XMPP Client\""));
}

#[test]
fn missing_file_loads_defaults() {
    // Arrange
    let path = temp_config("does-not-exist.toml");

    // Act
    let config = TrayConfig::load_from(&path).unwrap();

    // Assert
    assert_eq!(config, TrayConfig::default());
}

#[test]
fn saved_config_loads_back() {
    // Arrange
    let path = temp_config("saved.toml");
    let config = TrayConfig {
        tooltip: "Dino".into(),
        show_label: "Open Dino".into(),
        icon: Some(PathBuf::from("dino.ico")),
        ..Default::default()
    };

    // Act
    config.save_to(&path).unwrap();
    let loaded = TrayConfig::load_from(&path);
    let _ = std::fs::remove_file(&path);

    // Assert
    assert_eq!(loaded.unwrap(), config);
}

#[test]
fn invalid_file_is_an_error() {
    // Arrange
    let path = temp_config("invalid.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "tooltip = [").unwrap();

    // Act
    let result = TrayConfig::load_from(&path);
    let _ = std::fs::remove_file(&path);

    // Assert
    assert!(result.is_err());
}
