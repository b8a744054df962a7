use indexmap::IndexMap;
use serde::Serialize;
use crate::extract::parse_table_markup;

pub const CATALOG_TABLE_ID: &str = "DataTable";
const PRODUCT_AREA_HEADER: &str = "product area";
const COMPONENT_NAME_HEADER: &str = "component name";

/// Product area to its components, both in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentCatalog {
    areas: IndexMap<String, Vec<String>>,
}

impl ComponentCatalog {
    pub fn product_areas(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    pub fn components_for(&self, area: &str) -> &[String] {
        self.areas.get(area).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.areas.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// Read the components table. A page without it yields an empty catalog.
pub fn parse_component_catalog(markup: &str) -> ComponentCatalog {
    let Some(table) = parse_table_markup(
        markup,
        CATALOG_TABLE_ID,
        &[PRODUCT_AREA_HEADER, COMPONENT_NAME_HEADER],
    ) else {
        return ComponentCatalog::default();
    };

    let mut areas: IndexMap<String, Vec<String>> = IndexMap::new();
    for row in &table.rows {
        areas
            .entry(row.text(PRODUCT_AREA_HEADER).to_string())
            .or_default()
            .push(row.text(COMPONENT_NAME_HEADER).to_string());
    }
    ComponentCatalog { areas }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
        <table id="DataTable">
          <tr><th>Component Name</th><th>Description</th><th>Product Area</th></tr>
          <tr><td>ACCRUL</td><td>Accounting Rules</td><td>Finance</td></tr>
          <tr><td>ORDER</td><td>Customer Orders</td><td>Distribution</td></tr>
          <tr><td>GENLED</td><td>General Ledger</td><td> Finance </td></tr>
          <tr><td>SHORT</td></tr>
        </table>
    "#;

    #[test]
    fn test_groups_components_by_area_in_page_order() {
        let catalog = parse_component_catalog(CATALOG);
        let areas: Vec<&str> = catalog.product_areas().collect();
        assert_eq!(areas, vec!["Finance", "Distribution"]);
        assert_eq!(catalog.components_for("Finance"), ["ACCRUL", "GENLED"]);
        assert_eq!(catalog.components_for("Distribution"), ["ORDER"]);
    }

    #[test]
    fn test_unknown_area_is_empty() {
        let catalog = parse_component_catalog(CATALOG);
        assert!(catalog.components_for("Manufacturing").is_empty());
    }

    #[test]
    fn test_missing_table_or_headers() {
        assert!(parse_component_catalog("<p>down for maintenance</p>").is_empty());
        let no_area = r#"<table id="DataTable"><tr><th>Component Name</th></tr><tr><td>X</td></tr></table>"#;
        assert!(parse_component_catalog(no_area).is_empty());
    }
}
