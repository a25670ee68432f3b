use anyhow::{Context as _, Result};
use css_grid::{
    AvailableSize, FixedContentSizes, GridContainerStyle, GridItemStyle, GridTree, NodeId,
    layout_tree, parse_track_template,
};
use serde::Deserialize;

const SIDEBAR_LAYOUT: &str = include_str!("fixtures/sidebar_layout.json");
const EPSILON: f32 = 1e-3;

/// A container style, its items and the width it is laid out at.
#[derive(Debug, Deserialize)]
struct StyleSnapshot {
    container: GridContainerStyle,
    available_width: f32,
    items: Vec<GridItemStyle>,
}

fn init_logging() {
    if let Err(error) = env_logger::builder().is_test(true).try_init() {
        log::trace!("logger already initialised: {error}");
    }
}

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < EPSILON
}

fn load_snapshot() -> Result<StyleSnapshot> {
    serde_json::from_str(SIDEBAR_LAYOUT).context("parsing sidebar_layout.json")
}

#[test]
fn snapshot_matches_css_text() -> Result<()> {
    init_logging();
    let snapshot = load_snapshot()?;

    assert_eq!(
        snapshot.container.template_columns,
        parse_track_template("[sidebar-start] 120px [content-start] 1fr [content-end]")
    );
    assert_eq!(
        snapshot.container.template_rows,
        parse_track_template("60px auto")
    );
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(snapshot.items.get(1).and_then(|item| item.min_height), Some(100.0));
    Ok(())
}

#[test]
fn snapshot_lays_out_with_named_lines() -> Result<()> {
    init_logging();
    let snapshot = load_snapshot()?;

    let mut tree = GridTree::new();
    let root = tree.add_grid(snapshot.container, GridItemStyle::default());
    let mut children: Vec<NodeId> = Vec::new();
    for item in snapshot.items {
        let leaf = tree.add_leaf(item);
        tree.append_child(root, leaf)?;
        children.push(leaf);
    }

    let layout = layout_tree(
        &tree,
        root,
        AvailableSize::definite_width(snapshot.available_width),
        &mut FixedContentSizes::new(),
    )?;

    let expected = [
        // Header across both columns at its fixed height.
        (5.0, 5.0, 490.0, 60.0),
        // Content column, pushed below the header, floored by min-height.
        (135.0, 75.0, 360.0, 100.0),
        // Back to the sidebar column: auto-placement moves on to a new row.
        (5.0, 185.0, 120.0, 0.0),
    ];
    for (child, (x, y, width, height)) in children.iter().zip(expected) {
        let rect = layout.rect(*child).with_context(|| format!("{child:?} missing"))?;
        assert!(close(rect.x, x), "{child:?} x = {}", rect.x);
        assert!(close(rect.y, y), "{child:?} y = {}", rect.y);
        assert!(close(rect.width, width), "{child:?} width = {}", rect.width);
        assert!(close(rect.height, height), "{child:?} height = {}", rect.height);
    }

    let root_rect = layout.rect(root).context("root missing")?;
    assert!(close(root_rect.width, 500.0));
    assert!(close(root_rect.height, 190.0));
    Ok(())
}
