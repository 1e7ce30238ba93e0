//! Presentational hints for `table` and the `cellpadding` invalidation event.
//!
//! Spec: <https://html.spec.whatwg.org/multipage/rendering.html#tables-2>

use super::HTMLTableElement;
use crate::dom::{AttributeChange, DOM, StyleInvalidator};
use crate::elements::PresentationalHints;
use crate::numbers::{parse_dimension_value, parse_integer, parse_nonzero_dimension_value};
use css_cascade::{CascadedProperties, Keyword, PropertyId, StyleValue, parse_float_value};
use css_color::parse_legacy_color_value;
use css_values_units::{Color, Length};
use indextree::NodeId;

/// Cells fall back to this padding once `cellpadding` is removed.
const DEFAULT_CELLPADDING: u32 = 1;

/// Color used for every edge of a `border`-attribute table.
const BORDER_COLOR: Color = Color::rgb(128, 128, 128);

const EDGES: [(PropertyId, PropertyId, PropertyId); 4] = [
    (
        PropertyId::BorderLeftStyle,
        PropertyId::BorderLeftWidth,
        PropertyId::BorderLeftColor,
    ),
    (
        PropertyId::BorderTopStyle,
        PropertyId::BorderTopWidth,
        PropertyId::BorderTopColor,
    ),
    (
        PropertyId::BorderRightStyle,
        PropertyId::BorderRightWidth,
        PropertyId::BorderRightColor,
    ),
    (
        PropertyId::BorderBottomStyle,
        PropertyId::BorderBottomWidth,
        PropertyId::BorderBottomColor,
    ),
];

/// `border` as an unsigned integer: the whole trimmed value, else `0`.
///
/// Shared by the `border()` getter and the border hint so they always agree.
pub(super) fn parse_border(value: &str) -> u32 {
    value
        .trim_matches(|character: char| character.is_ascii_whitespace())
        .parse()
        .unwrap_or(0)
}

/// Cells whose style must be recomputed because the table's padding changed.
///
/// Produced by [`HTMLTableElement::attribute_changed`]; the host hands it to
/// whatever owns style invalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPaddingInvalidation {
    pub table: NodeId,
    pub cellpadding: u32,
    /// `td` and `th` descendants in tree order.
    pub cells: Vec<NodeId>,
}

impl CellPaddingInvalidation {
    pub fn dispatch(self, invalidator: &mut impl StyleInvalidator) {
        log::debug!(
            target: "html::table::hints",
            "cellpadding {} on {:?}: invalidating {} cells",
            self.cellpadding,
            self.table,
            self.cells.len()
        );
        for cell in self.cells {
            invalidator.invalidate_style(cell);
        }
    }
}

impl HTMLTableElement {
    /// React to an attribute mutation on the table.
    ///
    /// Only `cellpadding` is tracked. Returns an invalidation when the
    /// effective padding actually changed.
    pub fn attribute_changed(
        &mut self,
        dom: &DOM,
        change: &AttributeChange,
    ) -> Option<CellPaddingInvalidation> {
        if change.node != self.node || change.namespace.is_some() || change.name != "cellpadding" {
            return None;
        }
        let cellpadding = match &change.value {
            Some(value) => u32::try_from(parse_integer(value).unwrap_or(0).max(0)).unwrap_or(0),
            None => DEFAULT_CELLPADDING,
        };
        if self.cellpadding == Some(cellpadding) {
            return None;
        }
        self.cellpadding = Some(cellpadding);
        let cells = dom
            .descendants(self.node)
            .filter(|&node| {
                dom.is_html_element(node)
                    && dom.local_name(node).is_some_and(|name| name.is_table_cell())
            })
            .collect();
        Some(CellPaddingInvalidation {
            table: self.node,
            cellpadding,
            cells,
        })
    }
}

/// Map one attribute. `None` when a recognized value yields no hint.
fn apply_hint(dom: &DOM, name: &str, value: &str, cascaded: &mut CascadedProperties) -> Option<()> {
    match name {
        "width" => {
            let width = parse_nonzero_dimension_value(value)?;
            cascaded.set_property_from_presentational_hint(PropertyId::Width, width.into());
        }
        "height" => {
            let height = parse_dimension_value(value)?;
            cascaded.set_property_from_presentational_hint(PropertyId::Height, height.into());
        }
        "align" => {
            if value.eq_ignore_ascii_case("center") {
                let auto = StyleValue::Keyword(Keyword::Auto);
                cascaded.set_property_from_presentational_hint(PropertyId::MarginLeft, auto.clone());
                cascaded.set_property_from_presentational_hint(PropertyId::MarginRight, auto);
            } else {
                let float = parse_float_value(value)?;
                cascaded.set_property_from_presentational_hint(PropertyId::Float, float);
            }
        }
        "background" => {
            let url = dom.encoding_parse_url(value)?;
            cascaded.set_property_from_presentational_hint(
                PropertyId::BackgroundImage,
                StyleValue::Image(url),
            );
        }
        "bgcolor" => {
            let color = parse_legacy_color_value(value)?;
            cascaded.set_property_from_presentational_hint(
                PropertyId::BackgroundColor,
                StyleValue::legacy_color(color),
            );
        }
        "cellspacing" => {
            let spacing = parse_dimension_value(value)?;
            cascaded.set_property_from_presentational_hint(PropertyId::BorderSpacing, spacing.into());
        }
        "border" => {
            let width = parse_border(value);
            if width == 0 {
                return None;
            }
            let edge_width = Length::px(width as f32);
            for (style, width_property, color) in EDGES {
                cascaded.set_property_from_presentational_hint(
                    style,
                    StyleValue::Keyword(Keyword::Outset),
                );
                cascaded.set_property_from_presentational_hint(
                    width_property,
                    StyleValue::Length(edge_width),
                );
                cascaded.set_property_from_presentational_hint(
                    color,
                    StyleValue::legacy_color(BORDER_COLOR),
                );
            }
        }
        "bordercolor" => {
            let color = parse_legacy_color_value(value)?;
            for (_, _, edge_color) in EDGES {
                cascaded.set_property_from_presentational_hint(
                    edge_color,
                    StyleValue::legacy_color(color),
                );
            }
        }
        _ => {}
    }
    Some(())
}

impl PresentationalHints for HTMLTableElement {
    fn is_presentational_hint(&self, name: &str) -> bool {
        matches!(
            name,
            "align"
                | "background"
                | "bgcolor"
                | "border"
                | "bordercolor"
                | "cellpadding"
                | "cellspacing"
                | "height"
                | "width"
        )
    }

    fn apply_presentational_hints(&self, dom: &DOM, cascaded: &mut CascadedProperties) {
        for (name, value) in dom.attributes(self.node) {
            if apply_hint(dom, name, value, cascaded).is_none() {
                log::trace!(
                    target: "html::table::hints",
                    "ignoring {name}={value:?} on {:?}",
                    self.node
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomException, LocalName, Namespace};
    use css_cascade::{CascadeSource, Origin};
    use css_values_units::Percentage;
    use url::Url;

    fn hints_for(dom: &mut DOM, attrs: &[(&str, &str)]) -> CascadedProperties {
        let table = HTMLTableElement::create(dom);
        for (name, value) in attrs {
            dom.set_attribute(table.node(), name, *value);
        }
        let mut cascaded = CascadedProperties::new();
        table.apply_presentational_hints(dom, &mut cascaded);
        cascaded
    }

    #[test]
    fn recognizes_table_attributes_only() {
        let mut dom = DOM::default();
        let table = HTMLTableElement::create(&mut dom);
        assert!(table.is_presentational_hint("cellpadding"));
        assert!(table.is_presentational_hint("bordercolor"));
        assert!(!table.is_presentational_hint("summary"));
        assert!(!table.is_presentational_hint("valign"));
    }

    #[test]
    fn dimensions_map_to_width_and_height() {
        let mut dom = DOM::default();
        let cascaded = hints_for(&mut dom, &[("width", "50%"), ("height", "0")]);
        assert_eq!(
            cascaded.property(PropertyId::Width),
            Some(&StyleValue::Percentage(Percentage(0.5)))
        );
        assert_eq!(
            cascaded.property(PropertyId::Height),
            Some(&StyleValue::Length(Length::px(0.0)))
        );

        let cascaded = hints_for(&mut dom, &[("width", "0")]);
        assert_eq!(cascaded.property(PropertyId::Width), None);
    }

    #[test]
    fn align_centers_or_floats() {
        let mut dom = DOM::default();
        let centered = hints_for(&mut dom, &[("align", "CENTER")]);
        assert_eq!(
            centered.property(PropertyId::MarginLeft),
            Some(&StyleValue::Keyword(Keyword::Auto))
        );
        assert_eq!(
            centered.property(PropertyId::MarginRight),
            Some(&StyleValue::Keyword(Keyword::Auto))
        );
        assert_eq!(centered.property(PropertyId::Float), None);

        let floated = hints_for(&mut dom, &[("align", "right")]);
        assert_eq!(
            floated.property(PropertyId::Float),
            Some(&StyleValue::Keyword(Keyword::Right))
        );

        let ignored = hints_for(&mut dom, &[("align", "middle")]);
        assert!(ignored.is_empty());
    }

    #[test]
    fn background_resolves_against_document_url() -> Result<(), url::ParseError> {
        let mut dom = DOM::new(Url::parse("https://example.com/tables/index.html")?);
        let cascaded = hints_for(&mut dom, &[("background", " tile.png ")]);
        assert_eq!(
            cascaded.property(PropertyId::BackgroundImage),
            Some(&StyleValue::Image(Url::parse(
                "https://example.com/tables/tile.png"
            )?))
        );
        Ok(())
    }

    #[test]
    fn colors_use_legacy_parsing() {
        let mut dom = DOM::default();
        let cascaded = hints_for(&mut dom, &[("bgcolor", "chucknorris"), ("bordercolor", "red")]);
        assert_eq!(
            cascaded.property(PropertyId::BackgroundColor),
            Some(&StyleValue::legacy_color(Color::rgb(0xc0, 0, 0)))
        );
        for (style, width, color) in EDGES {
            assert_eq!(
                cascaded.property(color),
                Some(&StyleValue::legacy_color(Color::rgb(255, 0, 0)))
            );
            assert_eq!(cascaded.property(style), None);
            assert_eq!(cascaded.property(width), None);
        }
    }

    #[test]
    fn border_sets_every_edge() {
        let mut dom = DOM::default();
        let cascaded = hints_for(&mut dom, &[("border", "2")]);
        assert_eq!(cascaded.len(), 12);
        for (style, width, color) in EDGES {
            assert_eq!(
                cascaded.property(style),
                Some(&StyleValue::Keyword(Keyword::Outset))
            );
            assert_eq!(
                cascaded.property(width),
                Some(&StyleValue::Length(Length::px(2.0)))
            );
            assert_eq!(
                cascaded.property(color),
                Some(&StyleValue::legacy_color(BORDER_COLOR))
            );
        }
        assert!(hints_for(&mut dom, &[("border", "-3")]).is_empty());
    }

    #[test]
    fn border_hint_agrees_with_border_getter() {
        let mut dom = DOM::default();
        let table = HTMLTableElement::create(&mut dom);
        for (value, width) in [("5px", 0), ("3000000000", 3_000_000_000), (" 4 ", 4), ("0", 0)] {
            dom.set_attribute(table.node(), "border", value);
            assert_eq!(table.border(&dom), width);
            let mut cascaded = CascadedProperties::new();
            table.apply_presentational_hints(&dom, &mut cascaded);
            let expected = (width > 0).then(|| StyleValue::Length(Length::px(width as f32)));
            assert_eq!(cascaded.property(PropertyId::BorderTopWidth), expected.as_ref());
            assert_eq!(cascaded.len(), if width > 0 { 12 } else { 0 });
        }
    }

    #[test]
    fn author_declarations_beat_hints() {
        let mut dom = DOM::default();
        let table = HTMLTableElement::create(&mut dom);
        dom.set_attribute(table.node(), "cellspacing", "4");
        let mut cascaded = CascadedProperties::new();
        cascaded.set_property(
            PropertyId::BorderSpacing,
            StyleValue::Length(Length::px(0.0)),
            CascadeSource::Declaration(Origin::Author),
        );
        table.apply_presentational_hints(&dom, &mut cascaded);
        assert_eq!(
            cascaded.property(PropertyId::BorderSpacing),
            Some(&StyleValue::Length(Length::px(0.0)))
        );
    }

    #[test]
    fn border_getter_reads_whole_value() {
        let mut dom = DOM::default();
        let table = HTMLTableElement::create(&mut dom);
        assert_eq!(table.border(&dom), 0);
        dom.set_attribute(table.node(), "border", " 7 ");
        assert_eq!(table.border(&dom), 7);
        dom.set_attribute(table.node(), "border", "7px");
        assert_eq!(table.border(&dom), 0);
    }

    #[test]
    fn cellpadding_clamps_and_resets() -> Result<(), DomException> {
        let mut dom = DOM::default();
        let mut table = HTMLTableElement::create(&mut dom);
        let row = dom.create_element(LocalName::Tr, Namespace::Html);
        let cell = dom.create_element(LocalName::Th, Namespace::Html);
        dom.append_child(table.node(), row)?;
        dom.append_child(row, cell)?;

        let change = dom.set_attribute(table.node(), "cellpadding", "-4");
        let event = change.and_then(|change| table.attribute_changed(&dom, &change));
        assert_eq!(event.map(|event| event.cells), Some(vec![cell]));
        assert_eq!(table.cellpadding(), Some(0));

        let change = dom.remove_attribute(table.node(), "cellpadding");
        let event = change.and_then(|change| table.attribute_changed(&dom, &change));
        assert!(event.is_some());
        assert_eq!(table.cellpadding(), Some(DEFAULT_CELLPADDING));
        Ok(())
    }

    #[test]
    fn unrelated_changes_are_ignored() {
        let mut dom = DOM::default();
        let mut table = HTMLTableElement::create(&mut dom);
        let other = HTMLTableElement::create(&mut dom);
        let change = dom.set_attribute(table.node(), "border", "1");
        assert_eq!(change.and_then(|change| table.attribute_changed(&dom, &change)), None);
        let change = dom.set_attribute(other.node(), "cellpadding", "9");
        assert_eq!(change.and_then(|change| table.attribute_changed(&dom, &change)), None);
        assert_eq!(table.cellpadding(), None);
    }
}
