//! Trees of nested grid containers, subgrids included.
//!
//! Spec: §9 Subgrids
//! <https://www.w3.org/TR/css-grid-2/#subgrids>
//!
//! A layout pass walks the tree twice. Sizing a container asks for the
//! contributions of its subgrid children, which recursively lift their own
//! descendants' contributions (memoized per pass, so each subtree is
//! measured once). Once a container is sized, its final tracks are handed
//! down to subgrid children as borrowed slices and the walk descends.

use std::collections::HashMap;

use anyhow::{Context as _, Result, bail};
use serde::{Deserialize, Serialize};

use crate::intrinsic::{ItemContribution, MeasureContent, MeasureRequest};
use crate::layout::{
    GridContainerInputs, GridContainerStyle, GridItem, GridItemStyle, GridLayoutResult,
    axis_contributions, layout_grid, plan_grid, size_columns,
};
use crate::subgrid::{
    InheritedTracks, SubgridBinding, frame_contribution, lift_contribution, merge_line_names,
};
use crate::track_list::{GridTemplate, LineNameMap};
use crate::track_sizing::ResolvedTrackSizes;
use crate::types::{AvailableSpace, GridAxis};

/// Identifier of a node in a [`GridTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Grid(Box<GridContainerStyle>),
    Leaf,
}

#[derive(Debug, Clone)]
struct TreeNode {
    kind: NodeKind,
    item: GridItemStyle,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena of grid containers and leaf items.
#[derive(Debug, Clone, Default)]
pub struct GridTree {
    nodes: Vec<TreeNode>,
}

impl GridTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grid container. `item` is its style as a child of another grid.
    pub fn add_grid(&mut self, style: GridContainerStyle, item: GridItemStyle) -> NodeId {
        self.push(NodeKind::Grid(Box::new(style)), item)
    }

    /// Add a leaf item measured by the content measurer.
    pub fn add_leaf(&mut self, item: GridItemStyle) -> NodeId {
        self.push(NodeKind::Leaf, item)
    }

    fn push(&mut self, kind: NodeKind, item: GridItemStyle) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            kind,
            item,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` to the children of the grid container `parent`.
    ///
    /// # Errors
    /// Returns an error if either node is unknown, `parent` is not a grid
    /// container, `child` already has a parent, or the edge would create a
    /// cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !matches!(self.node(parent)?.kind, NodeKind::Grid(_)) {
            bail!("node {parent:?} is not a grid container");
        }
        if let Some(current) = self.node(child)?.parent {
            bail!("node {child:?} already belongs to {current:?}");
        }
        let mut ancestor = Some(parent);
        while let Some(node) = ancestor {
            if node == child {
                bail!("appending {child:?} to {parent:?} would create a cycle");
            }
            ancestor = self.node(node)?.parent;
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of a node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|entry| entry.parent)
    }

    /// Children of a node in source order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map_or(&[][..], |entry| entry.children.as_slice())
    }

    /// Container style, if the node is a grid container.
    pub fn container_style(&self, node: NodeId) -> Option<&GridContainerStyle> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Grid(style) => Some(style),
            NodeKind::Leaf => None,
        }
    }

    /// Item style of a node.
    pub fn item_style(&self, node: NodeId) -> Option<&GridItemStyle> {
        self.nodes.get(node.0).map(|entry| &entry.item)
    }

    fn node(&self, node: NodeId) -> Result<&TreeNode> {
        self.nodes
            .get(node.0)
            .with_context(|| format!("unknown grid tree node {node:?}"))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut TreeNode> {
        self.nodes
            .get_mut(node.0)
            .with_context(|| format!("unknown grid tree node {node:?}"))
    }

    /// Children of a container as grid items.
    fn grid_items(&self, node: NodeId) -> Vec<GridItem<NodeId>> {
        self.children(node)
            .iter()
            .filter_map(|child| {
                self.item_style(*child)
                    .map(|style| GridItem::new(*child).with_style(style.clone()))
            })
            .collect()
    }

    /// Whether a node is a grid container subgridded along `axis`.
    fn is_subgrid(&self, node: NodeId, axis: GridAxis) -> bool {
        self.container_style(node)
            .is_some_and(|style| style.template(axis).is_subgrid())
    }
}

/// Available space for the root's border box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailableSize {
    /// Width constraint
    pub width: AvailableSpace,
    /// Height constraint
    pub height: AvailableSpace,
}

impl AvailableSize {
    /// Definite width with an indefinite height.
    pub fn definite_width(width: f32) -> Self {
        Self {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::MaxContent,
        }
    }

    /// Definite width and height.
    pub fn definite(width: f32, height: f32) -> Self {
        Self {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        }
    }
}

/// Border-box rectangle of a node, relative to the root's border box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

/// Resolved geometry of one grid container.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerGeometry {
    /// Column sizes and offsets within the content box
    pub col_sizes: ResolvedTrackSizes,
    /// Row sizes and offsets within the content box
    pub row_sizes: ResolvedTrackSizes,
    /// Top-left corner of the content box, relative to the root's border box
    pub content_origin: (f32, f32),
    /// Content-box width
    pub content_width: f32,
    /// Content-box height
    pub content_height: f32,
}

impl ContainerGeometry {
    /// Positions of the grid lines of an axis, relative to the root's border box.
    pub fn line_positions(&self, axis: GridAxis) -> Vec<f32> {
        let (tracks, origin) = match axis {
            GridAxis::Column => (&self.col_sizes, self.content_origin.0),
            GridAxis::Row => (&self.row_sizes, self.content_origin.1),
        };
        tracks
            .line_positions()
            .into_iter()
            .map(|line| line + origin)
            .collect()
    }
}

/// Output of [`layout_tree`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeLayout {
    rects: HashMap<NodeId, LayoutRect>,
    containers: HashMap<NodeId, ContainerGeometry>,
}

impl TreeLayout {
    /// Border-box rectangle of a laid out node.
    pub fn rect(&self, node: NodeId) -> Option<LayoutRect> {
        self.rects.get(&node).copied()
    }

    /// Geometry of a laid out grid container.
    pub fn container(&self, node: NodeId) -> Option<&ContainerGeometry> {
        self.containers.get(&node)
    }

    /// Number of nodes with a rectangle.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Check if nothing was laid out.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Content-box constraint from a border-box constraint.
fn inner_space(space: AvailableSpace, insets: (f32, f32)) -> AvailableSpace {
    match space {
        AvailableSpace::Definite(size) => AvailableSpace::Definite((size - insets.0 - insets.1).max(0.0)),
        other => other,
    }
}

/// Subgrid, axis, span and the bit pattern of the known cross size.
type LiftKey = (NodeId, GridAxis, usize, Option<u32>);

/// Measurer for the items of a tree: leaves go to the content measurer,
/// nested grids are laid out.
struct TreeMeasurer<'tree, M> {
    tree: &'tree GridTree,
    leaves: &'tree mut M,
    /// Lifted descendant contributions per subgrid, axis, span and cross size
    lifted: HashMap<LiftKey, Vec<ItemContribution>>,
    /// Latest parent tracks handed to each subgrid
    bindings: HashMap<(NodeId, GridAxis), InheritedTracks>,
}

impl<'tree, M: MeasureContent<NodeId>> TreeMeasurer<'tree, M> {
    fn new(tree: &'tree GridTree, leaves: &'tree mut M) -> Self {
        Self {
            tree,
            leaves,
            lifted: HashMap::new(),
            bindings: HashMap::new(),
        }
    }

    /// Inputs for a nested container, with any tracks bound to it.
    fn container_inputs<'style>(
        &self,
        node: NodeId,
        style: &'style GridContainerStyle,
        width: AvailableSpace,
        height: AvailableSpace,
    ) -> GridContainerInputs<'style> {
        let mut inputs = GridContainerInputs::new(style, width, height);
        for axis in [GridAxis::Column, GridAxis::Row] {
            if let Some(tracks) = self.bindings.get(&(node, axis)) {
                inputs = inputs.with_inherited(axis, tracks.clone());
            }
        }
        inputs
    }

    /// Border-box size of a nested grid container along the requested axis.
    fn measure_grid(
        &mut self,
        node: NodeId,
        style: &'tree GridContainerStyle,
        request: MeasureRequest,
    ) -> f32 {
        let column_insets = style.insets(GridAxis::Column);
        let row_insets = style.insets(GridAxis::Row);
        let cross = |insets: (f32, f32)| {
            request
                .known_cross_size
                .map_or(AvailableSpace::MaxContent, |size| {
                    inner_space(AvailableSpace::Definite(size), insets)
                })
        };
        // Block sizes of grids come from their content.
        let (width, height) = match request.axis {
            GridAxis::Column => (inner_space(request.available, column_insets), cross(row_insets)),
            GridAxis::Row => (cross(column_insets), AvailableSpace::MaxContent),
        };

        let items = self.tree.grid_items(node);
        let inputs = self.container_inputs(node, style, width, height);
        let result = layout_grid(&items, &inputs, self);
        match request.axis {
            GridAxis::Column => result.content_width + column_insets.0 + column_insets.1,
            GridAxis::Row => result.content_height + row_insets.0 + row_insets.1,
        }
    }

    /// Contributions of a subgrid's descendants, lifted into its own area.
    ///
    /// `known_cross_size` is the subgrid's border-box size on the other axis.
    /// Row contributions are measured at the widths the subgrid's items get
    /// in that size.
    fn lift_subgrid(
        &mut self,
        node: NodeId,
        style: &'tree GridContainerStyle,
        axis: GridAxis,
        span: usize,
        known_cross_size: Option<f32>,
    ) -> Vec<ItemContribution> {
        let own_names = match style.template(axis) {
            GridTemplate::Subgrid(names) => names.as_slice(),
            GridTemplate::None | GridTemplate::Tracks(_) => &[],
        };
        let placeholder = InheritedTracks {
            sizes: ResolvedTrackSizes::from_sizes(vec![0.0; span], 0.0),
            line_names: merge_line_names(&LineNameMap::new(), 0..span, own_names),
        };
        let cross_space = known_cross_size.map_or(AvailableSpace::MaxContent, |size| {
            inner_space(AvailableSpace::Definite(size), style.insets(axis.other()))
        });
        let (width, height) = match axis {
            GridAxis::Column => (AvailableSpace::MaxContent, cross_space),
            GridAxis::Row => (cross_space, AvailableSpace::MaxContent),
        };
        let items = self.tree.grid_items(node);
        let inputs = self
            .container_inputs(node, style, width, height)
            .with_inherited(axis, placeholder);
        let plan = plan_grid(&items, &inputs);
        let known_widths: Vec<Option<f32>> = match axis {
            GridAxis::Column => Vec::new(),
            GridAxis::Row => {
                let (_, columns) = size_columns(&items, &plan, &inputs, self);
                columns.iter().map(|(_, item_width)| Some(*item_width)).collect()
            }
        };

        let insets = style.insets(axis);
        let mut contributions: Vec<ItemContribution> =
            axis_contributions(&items, &plan.placement.areas, axis, &known_widths, self)
                .iter()
                .map(|contribution| lift_contribution(contribution, span, insets))
                .collect();
        contributions.push(frame_contribution(span, insets));

        tracing::trace!(
            "lifted {} contributions from subgrid {node:?} on {axis:?}",
            contributions.len()
        );
        contributions
    }
}

impl<M: MeasureContent<NodeId>> MeasureContent<NodeId> for TreeMeasurer<'_, M> {
    fn measure(&mut self, node: &NodeId, request: MeasureRequest) -> f32 {
        let tree = self.tree;
        match tree.container_style(*node) {
            Some(style) => self.measure_grid(*node, style, request),
            None => self.leaves.measure(node, request),
        }
    }

    fn first_baseline(&mut self, node: &NodeId, width: f32, height: f32) -> f32 {
        if self.tree.container_style(*node).is_some() {
            return height;
        }
        self.leaves.first_baseline(node, width, height)
    }

    fn last_baseline(&mut self, node: &NodeId, width: f32, height: f32) -> f32 {
        if self.tree.container_style(*node).is_some() {
            return height;
        }
        self.leaves.last_baseline(node, width, height)
    }

    fn is_subgrid(&self, node: &NodeId, axis: GridAxis) -> bool {
        self.tree.is_subgrid(*node, axis)
    }

    fn subgrid_contributions(
        &mut self,
        node: &NodeId,
        axis: GridAxis,
        span: usize,
        known_cross_size: Option<f32>,
    ) -> Vec<ItemContribution> {
        let key = (*node, axis, span, known_cross_size.map(f32::to_bits));
        if let Some(cached) = self.lifted.get(&key) {
            return cached.clone();
        }
        let tree = self.tree;
        let Some(style) = tree.container_style(*node) else {
            return Vec::new();
        };
        let contributions = self.lift_subgrid(*node, style, axis, span, known_cross_size);
        self.lifted.insert(key, contributions.clone());
        contributions
    }

    fn bind_subgrid(&mut self, node: &NodeId, binding: SubgridBinding<'_>) {
        let Some(style) = self.tree.container_style(*node) else {
            return;
        };
        let own_names = match style.template(binding.axis) {
            GridTemplate::Subgrid(names) => names.as_slice(),
            GridTemplate::None | GridTemplate::Tracks(_) => &[],
        };
        let axis = binding.axis;
        let inherited = SubgridBinding {
            insets: style.insets(axis),
            ..binding
        }
        .inherit(own_names);
        self.bindings.insert((*node, axis), inherited);
    }
}

/// Lay out a tree of grid containers from `root`.
///
/// `available` constrains the root's border box. Nested grids are laid out
/// in their grid areas; subgrids take their parent's tracks on subgridded
/// axes, net of their own padding and border.
///
/// # Errors
/// Returns an error if `root` is unknown or is not a grid container.
pub fn layout_tree<M: MeasureContent<NodeId>>(
    tree: &GridTree,
    root: NodeId,
    available: AvailableSize,
    measurer: &mut M,
) -> Result<TreeLayout> {
    let style = tree
        .container_style(root)
        .with_context(|| format!("root {root:?} is not a grid container"))?;
    for axis in [GridAxis::Column, GridAxis::Row] {
        if style.template(axis).is_subgrid() {
            log::warn!(
                target: "css::grid::subgrid",
                "root grid {root:?} declares subgrid on {axis:?} without a parent grid, using none"
            );
        }
    }

    let column_insets = style.insets(GridAxis::Column);
    let row_insets = style.insets(GridAxis::Row);
    let mut pass = TreeLayoutPass {
        measurer: TreeMeasurer::new(tree, measurer),
        layout: TreeLayout::default(),
    };
    let inputs = GridContainerInputs::new(
        style,
        inner_space(available.width, column_insets),
        inner_space(available.height, row_insets),
    );
    let result = pass.layout_container(root, &inputs, (column_insets.0, row_insets.0))?;
    pass.layout.rects.insert(
        root,
        LayoutRect {
            x: 0.0,
            y: 0.0,
            width: result.content_width + column_insets.0 + column_insets.1,
            height: result.content_height + row_insets.0 + row_insets.1,
        },
    );

    tracing::debug!("layout_tree: {} nodes laid out from {root:?}", pass.layout.len());
    Ok(pass.layout)
}

/// Top-down walk over sized containers.
struct TreeLayoutPass<'tree, M> {
    measurer: TreeMeasurer<'tree, M>,
    layout: TreeLayout,
}

impl<M: MeasureContent<NodeId>> TreeLayoutPass<'_, M> {
    /// Lay out one container whose content box starts at `origin`, then
    /// descend into its grid children.
    fn layout_container(
        &mut self,
        node: NodeId,
        inputs: &GridContainerInputs<'_>,
        origin: (f32, f32),
    ) -> Result<GridLayoutResult<NodeId>> {
        let tree = self.measurer.tree;
        let items = tree.grid_items(node);
        let result = layout_grid(&items, inputs, &mut self.measurer);

        self.layout.containers.insert(
            node,
            ContainerGeometry {
                col_sizes: result.col_sizes.clone(),
                row_sizes: result.row_sizes.clone(),
                content_origin: origin,
                content_width: result.content_width,
                content_height: result.content_height,
            },
        );

        for placed in &result.items {
            let rect = LayoutRect {
                x: origin.0 + placed.x,
                y: origin.1 + placed.y,
                width: placed.width,
                height: placed.height,
            };
            self.layout.rects.insert(placed.node_id, rect);

            let Some(child_style) = tree.container_style(placed.node_id) else {
                continue;
            };
            let column_insets = child_style.insets(GridAxis::Column);
            let row_insets = child_style.insets(GridAxis::Row);
            let mut child_inputs = GridContainerInputs::new(
                child_style,
                inner_space(AvailableSpace::Definite(rect.width), column_insets),
                inner_space(AvailableSpace::Definite(rect.height), row_insets),
            );
            for axis in [GridAxis::Column, GridAxis::Row] {
                let GridTemplate::Subgrid(own_names) = child_style.template(axis) else {
                    continue;
                };
                let binding = SubgridBinding::new(
                    result.tracks(axis),
                    result.line_names(axis),
                    placed.area.tracks(axis),
                    axis,
                    child_style.insets(axis),
                );
                child_inputs = child_inputs.with_inherited(axis, binding.inherit(own_names));
            }
            self.layout_container(
                placed.node_id,
                &child_inputs,
                (rect.x + column_insets.0, rect.y + row_insets.0),
            )
            .with_context(|| format!("laying out grid {:?}", placed.node_id))?;
        }
        Ok(result)
    }
}
