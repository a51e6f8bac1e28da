//! Environment overrides live in their own test binary: env vars are process-wide.

use std::env;

use outliner::config::Settings;

#[test]
fn given_env_overrides_when_load_then_env_wins_over_defaults() {
    // Arrange
    env::set_var("OUTLINER_DEFAULT_DOCUMENT", "fromenv");
    env::set_var("OUTLINER_TREE__SHOW_IDS", "true");

    // Act
    let settings = Settings::load_from(None, None).unwrap();

    // Assert
    assert_eq!(settings.default_document, "fromenv");
    assert!(settings.tree.show_ids);

    env::remove_var("OUTLINER_DEFAULT_DOCUMENT");
    env::remove_var("OUTLINER_TREE__SHOW_IDS");
}
