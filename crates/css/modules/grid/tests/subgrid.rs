use anyhow::{Context as _, Result};
use css_grid::{
    AvailableSize, ContentDistribution, ContentSizes, FixedContentSizes, GridContainerStyle,
    GridItemStyle, GridTree, LayoutRect, NodeId, TreeLayout, layout_tree,
};

const EPSILON: f32 = 1e-3;

fn init_logging() {
    if let Err(error) = env_logger::builder().is_test(true).try_init() {
        log::trace!("logger already initialised: {error}");
    }
}

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < EPSILON
}

fn rect(layout: &TreeLayout, node: NodeId) -> Result<LayoutRect> {
    layout.rect(node).with_context(|| format!("{node:?} was not laid out"))
}

fn horizontal(layout: &TreeLayout, node: NodeId) -> Result<(f32, f32)> {
    let placed = rect(layout, node)?;
    Ok((placed.x, placed.width))
}

fn spans_horizontally(actual: (f32, f32), x: f32, width: f32) -> bool {
    close(actual.0, x) && close(actual.1, width)
}

fn leaf_sizes(leaves: &[(NodeId, f32)]) -> FixedContentSizes<NodeId> {
    let mut sizes = FixedContentSizes::new();
    for (leaf, width) in leaves {
        sizes.insert(*leaf, ContentSizes::fixed(*width), ContentSizes::fixed(10.0));
    }
    sizes
}

#[test]
fn subgrid_padding_shrinks_edge_tracks() -> Result<()> {
    init_logging();
    let mut tree = GridTree::new();
    let root = tree.add_grid(
        GridContainerStyle::default().with_template_columns("100px 150px 100px"),
        GridItemStyle::default(),
    );
    let subgrid = tree.add_grid(
        GridContainerStyle::default()
            .with_template_columns("subgrid")
            .with_padding(8.0),
        GridItemStyle::default().at("1", "1 / -1"),
    );
    let first = tree.add_leaf(GridItemStyle::default());
    let second = tree.add_leaf(GridItemStyle::default());
    tree.append_child(root, subgrid)?;
    tree.append_child(subgrid, first)?;
    tree.append_child(subgrid, second)?;

    let mut sizes = FixedContentSizes::new();
    let layout = layout_tree(&tree, root, AvailableSize::definite_width(350.0), &mut sizes)?;

    assert!(spans_horizontally(horizontal(&layout, subgrid)?, 0.0, 350.0));
    assert!(spans_horizontally(horizontal(&layout, first)?, 8.0, 92.0));
    assert!(spans_horizontally(horizontal(&layout, second)?, 100.0, 150.0));

    let geometry = layout.container(subgrid).context("subgrid geometry")?;
    assert!(close(geometry.content_width, 334.0));
    assert!(close(geometry.col_sizes.offset(1), 92.0));
    Ok(())
}

#[test]
fn subgrid_items_size_the_parent_tracks() -> Result<()> {
    init_logging();
    let mut tree = GridTree::new();
    let root_style = GridContainerStyle {
        justify_content: ContentDistribution::Start,
        ..GridContainerStyle::default().with_template_columns("auto auto")
    };
    let root = tree.add_grid(root_style, GridItemStyle::default());
    let subgrid = tree.add_grid(
        GridContainerStyle::default()
            .with_template_columns("subgrid")
            .with_padding(10.0),
        GridItemStyle::default().at("1", "1 / span 2"),
    );
    let narrow = tree.add_leaf(GridItemStyle::default());
    let wide = tree.add_leaf(GridItemStyle::default());
    tree.append_child(root, subgrid)?;
    tree.append_child(subgrid, narrow)?;
    tree.append_child(subgrid, wide)?;

    let mut sizes = leaf_sizes(&[(narrow, 60.0), (wide, 90.0)]);
    let layout = layout_tree(&tree, root, AvailableSize::definite_width(500.0), &mut sizes)?;

    // Each edge track also holds the subgrid padding on its side.
    let root_tracks = &layout.container(root).context("root geometry")?.col_sizes;
    assert!(close(root_tracks.size(0), 70.0));
    assert!(close(root_tracks.size(1), 100.0));

    assert!(spans_horizontally(horizontal(&layout, narrow)?, 10.0, 60.0));
    assert!(spans_horizontally(horizontal(&layout, wide)?, 70.0, 90.0));

    // 10px leaves plus 10px padding above and below.
    assert!(close(rect(&layout, subgrid)?.height, 30.0));
    Ok(())
}

#[test]
fn subgrid_resolves_parent_and_own_line_names() -> Result<()> {
    init_logging();
    let mut tree = GridTree::new();
    let root = tree.add_grid(
        GridContainerStyle::default().with_template_columns("[a] 100px [b] 150px [c] 100px [d]"),
        GridItemStyle::default(),
    );
    let subgrid = tree.add_grid(
        GridContainerStyle::default().with_template_columns("subgrid [first] [second]"),
        GridItemStyle::default().at("1", "a / d"),
    );
    let by_parent_name = tree.add_leaf(GridItemStyle::default().at("1", "c / d"));
    let by_own_name = tree.add_leaf(GridItemStyle::default().at("2", "second / c"));
    tree.append_child(root, subgrid)?;
    tree.append_child(subgrid, by_parent_name)?;
    tree.append_child(subgrid, by_own_name)?;

    let mut sizes = FixedContentSizes::new();
    let layout = layout_tree(&tree, root, AvailableSize::definite_width(350.0), &mut sizes)?;

    assert!(spans_horizontally(horizontal(&layout, by_parent_name)?, 250.0, 100.0));
    assert!(spans_horizontally(horizontal(&layout, by_own_name)?, 100.0, 150.0));
    Ok(())
}

#[test]
fn nested_subgrids_pass_tracks_through() -> Result<()> {
    init_logging();
    let mut tree = GridTree::new();
    let root = tree.add_grid(
        GridContainerStyle::default().with_template_columns("100px 150px 100px"),
        GridItemStyle::default(),
    );
    let outer = tree.add_grid(
        GridContainerStyle::default().with_template_columns("subgrid"),
        GridItemStyle::default().at("1", "1 / -1"),
    );
    let inner = tree.add_grid(
        GridContainerStyle::default().with_template_columns("subgrid"),
        GridItemStyle::default().at("1", "2 / 4"),
    );
    let leaf = tree.add_leaf(GridItemStyle::default());
    tree.append_child(root, outer)?;
    tree.append_child(outer, inner)?;
    tree.append_child(inner, leaf)?;

    let mut sizes = leaf_sizes(&[(leaf, 20.0)]);
    let layout = layout_tree(&tree, root, AvailableSize::definite_width(350.0), &mut sizes)?;

    assert!(spans_horizontally(horizontal(&layout, inner)?, 100.0, 250.0));
    assert!(spans_horizontally(horizontal(&layout, leaf)?, 100.0, 150.0));
    assert!(close(rect(&layout, root)?.height, 10.0));
    Ok(())
}

#[test]
fn tree_layout_is_repeatable() -> Result<()> {
    init_logging();
    let mut tree = GridTree::new();
    let root = tree.add_grid(
        GridContainerStyle::default()
            .with_template_columns("auto 1fr auto")
            .with_gap(4.0, 4.0),
        GridItemStyle::default(),
    );
    let subgrid = tree.add_grid(
        GridContainerStyle::default()
            .with_template_columns("subgrid")
            .with_padding(3.0),
        GridItemStyle::default().at("1", "1 / -1"),
    );
    let leaves: Vec<NodeId> = (0..4)
        .map(|_| tree.add_leaf(GridItemStyle::default()))
        .collect();
    tree.append_child(root, subgrid)?;
    for leaf in &leaves {
        tree.append_child(subgrid, *leaf)?;
    }

    let widths: Vec<(NodeId, f32)> = leaves
        .iter()
        .zip([30.0, 50.0, 20.0, 40.0])
        .map(|(leaf, width)| (*leaf, width))
        .collect();
    let first = layout_tree(
        &tree,
        root,
        AvailableSize::definite_width(400.0),
        &mut leaf_sizes(&widths),
    )?;
    let second = layout_tree(
        &tree,
        root,
        AvailableSize::definite_width(400.0),
        &mut leaf_sizes(&widths),
    )?;
    assert_eq!(first, second);
    Ok(())
}
