use crate::cli::commands::list::row;
use crate::cli::commands::run::{api_token, select_collections};
use crate::cli::observer::{render_bar, BAR_WIDTH};
use iconsync_core::config::{CollectionConfig, IconsyncConfig};
use iconsync_core::pipeline::artifact_path;
use std::path::PathBuf;

fn collection(name: &str) -> CollectionConfig {
    CollectionConfig {
        name: name.to_string(),
        node_id: "1-2".to_string(),
    }
}

#[test]
fn select_all_when_no_filter() {
    let all = vec![collection("arrows"), collection("social")];
    let picked = select_collections(&all, &[]).unwrap();
    assert_eq!(picked.len(), 2);
}

#[test]
fn select_keeps_config_order() {
    let all = vec![collection("arrows"), collection("social"), collection("media")];
    let only = vec!["media".to_string(), "arrows".to_string()];
    let picked = select_collections(&all, &only).unwrap();
    let names: Vec<_> = picked.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["arrows", "media"]);
}

#[test]
fn select_rejects_unknown_name() {
    let all = vec![collection("arrows")];
    let err = select_collections(&all, &["nope".to_string()]).unwrap_err();
    assert!(err.to_string().contains("nope"));
}

#[test]
fn token_prefers_first_variable() {
    let token = api_token(|name| match name {
        "FIGMA_TOKEN" => Some("primary".to_string()),
        "FIGMA_PERSONAL_ACCESS_TOKEN" => Some("secondary".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(token, "primary");
}

#[test]
fn token_skips_blank_values() {
    let token = api_token(|name| match name {
        "FIGMA_TOKEN" => Some("  ".to_string()),
        "FIGMA_PERSONAL_ACCESS_TOKEN" => Some("secondary".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(token, "secondary");
}

#[test]
fn token_missing_is_error() {
    assert!(api_token(|_| None).is_err());
}

#[test]
fn bar_empty_half_full() {
    assert_eq!(render_bar(0, 4), format!("[{}] (0/4)", "-".repeat(BAR_WIDTH)));
    assert_eq!(
        render_bar(2, 4),
        format!("[{}{}] (2/4)", "█".repeat(10), "-".repeat(10))
    );
    assert_eq!(render_bar(4, 4), format!("[{}] (4/4)", "█".repeat(BAR_WIDTH)));
}

#[test]
fn bar_clamps_overshoot() {
    assert_eq!(render_bar(9, 4), format!("[{}] (4/4)", "█".repeat(BAR_WIDTH)));
}

#[test]
fn list_row_shows_api_node_and_artifact() {
    let cfg = IconsyncConfig {
        output_dir: PathBuf::from("out/icons"),
        ..IconsyncConfig::default()
    };
    let c = collection("arrows");
    let line = row(&cfg, &c);
    assert!(line.starts_with("arrows "));
    assert!(line.contains(" 1:2 "));
    let expected = artifact_path(&cfg.output_dir, "arrows");
    assert!(line.ends_with(&expected.display().to_string()));
    assert_eq!(expected, PathBuf::from("out/icons/arrows.ts"));
}
