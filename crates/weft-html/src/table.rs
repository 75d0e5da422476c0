//! Table
//!
//! Row/column data rendered to a `table` element. Header cells become `th`,
//! data cells `td`. Row and column CSS classes are applied on render.
//! Element cells are copied into each rendering, so one `Table` can be
//! rendered any number of times.

use weft_dom::{AttrValue, Attributes, Component, Content, ContentList, DomResult, ElementTree, NodeId, Params};

/// Tabular data with presentation settings
#[derive(Debug, Clone)]
pub struct Table {
    attrs: Attributes,
    headers: Vec<Content>,
    rows: Vec<Vec<Content>>,
    row_css_classes: Vec<String>,
    column_css_classes: Vec<String>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            attrs: Attributes::new().with("cellpadding", 0).with("cellspacing", 0),
            headers: Vec::new(),
            rows: Vec::new(),
            row_css_classes: Vec::new(),
            column_css_classes: Vec::new(),
        }
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a `table` attribute
    pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Header cells. Element entries are used as-is, text is wrapped in `th`.
    pub fn headers<I, C>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// CSS classes added to every data row
    pub fn row_css_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.row_css_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// CSS class per column index
    pub fn column_css_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_css_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    /// Number of columns (header count, or the widest row)
    pub fn num_columns(&self) -> usize {
        if !self.headers.is_empty() {
            return self.headers.len();
        }
        self.rows.iter().map(Vec::len).max().unwrap_or(1)
    }

    pub fn rows(&self) -> &[Vec<Content>] {
        &self.rows
    }

    pub fn add_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Replace all rows
    pub fn set_data<R, I, C>(&mut self, rows: R)
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        self.rows.clear();
        for row in rows {
            self.add_row(row);
        }
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Content> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Replace a cell value. Returns `false` when the cell does not exist.
    pub fn set_cell(&mut self, column: usize, row: usize, value: impl Into<Content>) -> bool {
        match self.rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// Build the `table` element
    pub fn render(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let mut content = ContentList::new();

        if !self.headers.is_empty() {
            let mut cells = ContentList::new();
            for header in &self.headers {
                match header {
                    Content::Node(id) => cells.push(copy_element(tree, *id)?),
                    Content::Text(text) => cells.push(tree.create(Params::new().tag("th").content(text.clone()))?),
                }
            }
            content.push(tree.create(Params::new().tag("tr").content(cells))?);
        }

        let row_classes: Vec<&str> = self.row_css_classes.iter().map(String::as_str).collect();
        for row in &self.rows {
            let mut cells = ContentList::new();
            for (column, value) in row.iter().enumerate() {
                let value = match value {
                    Content::Node(id) => Content::Node(copy_element(tree, *id)?),
                    Content::Text(_) => value.clone(),
                };
                let cell = tree.create(Params::new().tag("td").content(value))?;
                if let Some(class) = self.column_css_classes.get(column) {
                    tree.add_class(cell, &[class.as_str()])?;
                }
                cells.push(cell);
            }
            let tr = tree.create(Params::new().tag("tr").content(cells))?;
            if !row_classes.is_empty() {
                tree.add_class(tr, &row_classes)?;
            }
            content.push(tr);
        }

        tracing::trace!("weft_html::table: rendering {} rows x {} columns", self.rows.len(), self.num_columns());
        tree.create(Params::from(self.attrs.clone()).tag("table").content(content))
    }
}

fn copy_element(tree: &mut ElementTree, id: NodeId) -> DomResult<NodeId> {
    let snapshot = tree.snapshot(id)?;
    tree.restore(&snapshot)
}

impl Component for Table {
    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        self.render(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_with_headers() {
        let mut tree = ElementTree::new();
        let mut table = Table::new().headers(["Name", "Age"]);
        table.add_row(["Ada", "36"]);
        let id = table.render(&mut tree).unwrap();
        assert_eq!(
            tree.serialize(id).unwrap().as_str(),
            concat!(
                r#"<table cellpadding="0" cellspacing="0">"#,
                "<tr><th>Name</th><th>Age</th></tr>",
                "<tr><td>Ada</td><td>36</td></tr>",
                "</table>"
            )
        );
    }

    #[test]
    fn test_row_and_column_classes() {
        let mut tree = ElementTree::new();
        let mut table = Table::new()
            .attr("class", "grid")
            .row_css_classes(["row"])
            .column_css_classes(["key", "value"]);
        table.set_data([["a", "1"], ["b", "2"]]);
        let id = table.render(&mut tree).unwrap();
        assert_eq!(
            tree.serialize(id).unwrap().as_str(),
            concat!(
                r#"<table cellpadding="0" cellspacing="0" class="grid">"#,
                r#"<tr class="row"><td class="key">a</td><td class="value">1</td></tr>"#,
                r#"<tr class="row"><td class="key">b</td><td class="value">2</td></tr>"#,
                "</table>"
            )
        );
    }

    #[test]
    fn test_cell_access() {
        let mut table = Table::new();
        table.add_row(["x", "y"]);
        assert!(table.set_cell(1, 0, "z"));
        assert!(!table.set_cell(5, 0, "z"));
        assert_eq!(table.cell(1, 0).and_then(Content::as_text).map(|t| t.as_str()), Some("z"));
        assert_eq!(table.num_columns(), 2);
    }

    #[test]
    fn test_empty_table_keeps_closing_tag_rules() {
        let mut tree = ElementTree::new();
        let id = Table::new().render(&mut tree).unwrap();
        assert_eq!(tree.serialize(id).unwrap().as_str(), r#"<table cellpadding="0" cellspacing="0" />"#);
    }

    #[test]
    fn test_element_cells() {
        let mut tree = ElementTree::new();
        let link = tree.create(Params::new().tag("a").attr("href", "#").content("edit")).unwrap();
        let mut table = Table::new();
        table.add_row([Content::from("row"), Content::from(link)]);
        let id = table.render(&mut tree).unwrap();
        assert_eq!(
            tree.serialize(id).unwrap().as_str(),
            r##"<table cellpadding="0" cellspacing="0"><tr><td>row</td><td><a href="#">edit</a></td></tr></table>"##
        );
        assert_eq!(tree.parent(link), None);
    }

    #[test]
    fn test_render_twice_keeps_element_cells() {
        let mut tree = ElementTree::new();
        let header = tree.create(Params::new().tag("th").content("Tools")).unwrap();
        let link = tree.create(Params::new().tag("a").content("edit")).unwrap();
        let mut table = Table::new().headers([header]);
        table.add_row([link]);

        let first = table.render(&mut tree).unwrap();
        let second = table.render(&mut tree).unwrap();
        let expected = concat!(
            r#"<table cellpadding="0" cellspacing="0">"#,
            "<tr><th>Tools</th></tr>",
            "<tr><td><a>edit</a></td></tr>",
            "</table>"
        );
        assert_eq!(tree.serialize(first).unwrap().as_str(), expected);
        assert_eq!(tree.serialize(second).unwrap().as_str(), expected);
    }
}
