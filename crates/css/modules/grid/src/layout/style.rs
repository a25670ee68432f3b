//! Computed style of grid containers and grid items.

use serde::{Deserialize, Serialize};

use crate::intrinsic::ItemBox;
use crate::placement::{GridPlacement, parse_grid_area, parse_line_pair};
use crate::track_list::{
    GridTemplate, GridTemplateAreas, parse_track_sizes, parse_track_template,
};
use crate::types::{
    ContentDistribution, Edges, GridAlignment, GridAutoFlow, GridAxis, GridTrackSize,
    LengthPercentage,
};

/// Grid container properties, defaulting to the CSS initial values.
///
/// Spec: §7 Defining the Grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridContainerStyle {
    /// grid-template-columns
    pub template_columns: GridTemplate,
    /// grid-template-rows
    pub template_rows: GridTemplate,
    /// grid-template-areas, one string per row
    pub template_areas: Vec<String>,
    /// grid-auto-columns
    pub auto_columns: Vec<GridTrackSize>,
    /// grid-auto-rows
    pub auto_rows: Vec<GridTrackSize>,
    /// grid-auto-flow
    pub auto_flow: GridAutoFlow,
    /// column-gap
    pub column_gap: LengthPercentage,
    /// row-gap
    pub row_gap: LengthPercentage,
    /// justify-content
    pub justify_content: ContentDistribution,
    /// align-content
    pub align_content: ContentDistribution,
    /// justify-items
    pub justify_items: GridAlignment,
    /// align-items
    pub align_items: GridAlignment,
    /// Padding widths
    pub padding: Edges,
    /// Border widths
    pub border: Edges,
}

impl GridContainerStyle {
    /// Set `grid-template-columns` from CSS text.
    #[must_use]
    pub fn with_template_columns(mut self, value: &str) -> Self {
        self.template_columns = parse_track_template(value);
        self
    }

    /// Set `grid-template-rows` from CSS text.
    #[must_use]
    pub fn with_template_rows(mut self, value: &str) -> Self {
        self.template_rows = parse_track_template(value);
        self
    }

    /// Set `grid-template-areas` from its row strings.
    #[must_use]
    pub fn with_template_areas(mut self, rows: &[&str]) -> Self {
        self.template_areas = rows.iter().map(|row| (*row).to_owned()).collect();
        self
    }

    /// Set `grid-auto-columns` from CSS text.
    #[must_use]
    pub fn with_auto_columns(mut self, value: &str) -> Self {
        self.auto_columns = parse_track_sizes(value);
        self
    }

    /// Set `grid-auto-rows` from CSS text.
    #[must_use]
    pub fn with_auto_rows(mut self, value: &str) -> Self {
        self.auto_rows = parse_track_sizes(value);
        self
    }

    /// Set pixel column and row gaps.
    #[must_use]
    pub fn with_gap(mut self, column_gap: f32, row_gap: f32) -> Self {
        self.column_gap = LengthPercentage::Length(column_gap);
        self.row_gap = LengthPercentage::Length(row_gap);
        self
    }

    /// Set the same padding on every side.
    #[must_use]
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Edges::uniform(padding);
        self
    }

    /// Track template of an axis.
    pub fn template(&self, axis: GridAxis) -> &GridTemplate {
        match axis {
            GridAxis::Column => &self.template_columns,
            GridAxis::Row => &self.template_rows,
        }
    }

    /// Implicit track pattern of an axis.
    pub fn auto_tracks(&self, axis: GridAxis) -> &[GridTrackSize] {
        match axis {
            GridAxis::Column => &self.auto_columns,
            GridAxis::Row => &self.auto_rows,
        }
    }

    /// Declared gap along an axis.
    pub fn gap(&self, axis: GridAxis) -> LengthPercentage {
        match axis {
            GridAxis::Column => self.column_gap,
            GridAxis::Row => self.row_gap,
        }
    }

    /// justify-content for columns, align-content for rows.
    pub fn content_distribution(&self, axis: GridAxis) -> ContentDistribution {
        match axis {
            GridAxis::Column => self.justify_content,
            GridAxis::Row => self.align_content,
        }
    }

    /// justify-items for columns, align-items for rows.
    pub fn item_alignment(&self, axis: GridAxis) -> GridAlignment {
        match axis {
            GridAxis::Column => self.justify_items,
            GridAxis::Row => self.align_items,
        }
    }

    /// Padding plus border at the `(start, end)` of an axis.
    pub fn insets(&self, axis: GridAxis) -> (f32, f32) {
        self.padding.add(&self.border).axis(axis)
    }

    /// Validated named areas; an invalid declaration counts as `none`.
    pub fn areas(&self) -> Option<GridTemplateAreas> {
        if self.template_areas.is_empty() {
            return None;
        }
        GridTemplateAreas::from_rows(&self.template_areas)
    }
}

/// Grid item properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridItemStyle {
    /// grid-row-start / grid-row-end / grid-column-start / grid-column-end
    pub placement: GridPlacement,
    /// Definite border-box width
    pub width: Option<f32>,
    /// Definite border-box height
    pub height: Option<f32>,
    /// Definite min-width
    pub min_width: Option<f32>,
    /// Definite min-height
    pub min_height: Option<f32>,
    /// Definite max-width
    pub max_width: Option<f32>,
    /// Definite max-height
    pub max_height: Option<f32>,
    /// Margins
    pub margin: Edges,
    /// justify-self (`None` is `auto`)
    pub justify_self: Option<GridAlignment>,
    /// align-self (`None` is `auto`)
    pub align_self: Option<GridAlignment>,
}

impl GridItemStyle {
    /// Place with `grid-row` and `grid-column` values.
    #[must_use]
    pub fn at(mut self, row: &str, column: &str) -> Self {
        self.placement = GridPlacement::new(parse_line_pair(row), parse_line_pair(column));
        self
    }

    /// Place with a `grid-area` value.
    #[must_use]
    pub fn in_area(mut self, area: &str) -> Self {
        self.placement = parse_grid_area(area);
        self
    }

    /// Set a definite width and height.
    #[must_use]
    pub fn with_size(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Definite size along an axis.
    pub fn size(&self, axis: GridAxis) -> Option<f32> {
        match axis {
            GridAxis::Column => self.width,
            GridAxis::Row => self.height,
        }
    }

    /// Definite minimum size along an axis.
    pub fn min_size(&self, axis: GridAxis) -> Option<f32> {
        match axis {
            GridAxis::Column => self.min_width,
            GridAxis::Row => self.min_height,
        }
    }

    /// Definite maximum size along an axis.
    pub fn max_size(&self, axis: GridAxis) -> Option<f32> {
        match axis {
            GridAxis::Column => self.max_width,
            GridAxis::Row => self.max_height,
        }
    }

    /// Clamp a border-box size between the max and min sizes; the minimum wins.
    pub fn clamp_size(&self, axis: GridAxis, size: f32) -> f32 {
        self.max_size(axis)
            .map_or(size, |max| size.min(max))
            .max(self.min_size(axis).unwrap_or(0.0))
    }

    /// justify-self for columns, align-self for rows.
    pub fn self_alignment(&self, axis: GridAxis) -> Option<GridAlignment> {
        match axis {
            GridAxis::Column => self.justify_self,
            GridAxis::Row => self.align_self,
        }
    }

    /// Box properties used for contributions along an axis.
    pub fn item_box(&self, axis: GridAxis) -> ItemBox {
        ItemBox {
            size: self.size(axis),
            min_size: self.min_size(axis),
            max_size: self.max_size(axis),
            margin: self.margin.axis(axis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::GridLine;

    /// Builders parse CSS text into the typed style.
    ///
    /// # Panics
    /// Panics if a builder stores the wrong value.
    #[test]
    fn builders_parse_css_text() {
        let style = GridContainerStyle::default()
            .with_template_columns("100px 1fr")
            .with_template_areas(&["head head", "side main"])
            .with_auto_rows("50px");
        assert_eq!(
            style.template(GridAxis::Column),
            &GridTemplate::tracks([GridTrackSize::px(100.0), GridTrackSize::fr(1.0)])
        );
        assert_eq!(style.auto_tracks(GridAxis::Row), &[GridTrackSize::px(50.0)]);
        assert_eq!(
            style.areas().map(|areas| areas.column_count()),
            Some(2)
        );

        let item = GridItemStyle::default().at("2", "1 / span 2");
        assert_eq!(item.placement.row_start, GridLine::Line(2));
        assert_eq!(item.placement.column_end, GridLine::Span(2));
    }
}
