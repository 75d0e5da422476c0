//! Integration tests across the weft crates

use pretty_assertions::assert_eq;
use weft::DomResult;
use weft::prelude::*;

#[test]
fn test_init_tracing_twice() {
    weft::init_tracing();
    assert!(!weft::init_tracing());
}

#[test]
fn test_version() {
    assert!(!weft::VERSION.is_empty());
}

#[test]
fn test_page_with_form_table_and_script() {
    let mut tree = ElementTree::new();

    let mut form = Form::new().id("search").attr("method", "GET");
    form.add(weft::forms::TextField::new(FieldParams::new().name("q").label("Search")).unwrap());
    let form = form.render(&mut tree).unwrap();

    let mut results = Table::new().headers(["Name"]);
    results.add_row(["weft"]);
    let results = results.render(&mut tree).unwrap();

    let init = Javascript::namespace("Search").call("focus", ["q"]);
    let mut html = Html::new(&mut tree);
    let page = html
        .div_with(Params::new().id("page").attr("onload", init), |_| Ok(content![form, results]))
        .unwrap();

    let markup = tree.serialize(page).unwrap();
    assert!(markup.as_str().starts_with(r#"<div id="page" onload="Search.focus('q'); ">"#));
    assert!(markup.as_str().contains(r#"<form method="GET" enctype="multipart/form-data" id="search">"#));
    assert!(markup.as_str().ends_with("<tr><td>weft</td></tr></table></div>"));

    // second render is served from the cache
    let renders = tree.render_count();
    assert_eq!(tree.serialize(page).unwrap(), markup);
    assert_eq!(tree.render_count(), renders);
}

#[test]
fn test_lookup_and_replace_inside_form() {
    let mut tree = ElementTree::new();
    let mut form = Form::new();
    form.add(weft::forms::TextField::new(FieldParams::new().name("city").value("Oslo")).unwrap());
    let root = form.render(&mut tree).unwrap();

    let input = tree.find_by_dom_id(root, "city").unwrap();
    tree.set_attr(input, "value", "Bergen").unwrap();
    assert!(tree.serialize(root).unwrap().as_str().contains(r#"value="Bergen""#));

    let replacement = tree
        .create(Params::new().tag("span").id("other").content("fixed"))
        .unwrap();
    assert!(tree.replace_at(root, Key::from("city"), replacement).unwrap());
    assert_eq!(tree.find_by_dom_id(root, "city"), Some(input));
    assert!(tree.serialize(root).unwrap().as_str().contains(r#"<span id="city">fixed</span>"#));
}

struct SearchBox;

impl Component for SearchBox {
    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let form = Form::new()
            .id("search")
            .with_fieldset(
                Fieldset::new("terms")
                    .with_legend("Terms")
                    .with_field(weft::forms::TextField::new(FieldParams::new().name("q")).unwrap()),
            )
            .with_button(FormButton::submit("Go"));
        form.render(tree)
    }

    fn js_initialize(&self) -> String {
        "Search.init();".to_string()
    }
}

struct Sidebar {
    search: NodeId,
}

impl Component for Sidebar {
    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let help = Button::new("Help").attr("onclick", Javascript::namespace("Help").call("show", ["search"]));
        let help = help.render(tree)?;
        tree.create(Params::new().id("sidebar").content(content![self.search, help]))
    }

    fn js_initialize(&self) -> String {
        "Sidebar.open();".to_string()
    }

    fn js_finalize(&self) -> String {
        "Sidebar.ready();".to_string()
    }
}

#[test]
fn test_nested_widget_scripts() {
    let mut tree = ElementTree::new();
    let mut search = Widget::new(SearchBox);
    let search = search.node(&mut tree).unwrap();
    let mut sidebar = Widget::new(Sidebar { search });

    assert_eq!(
        sidebar.script(&mut tree).unwrap(),
        "Sidebar.open();Search.init();Sidebar.ready();"
    );

    let markup = sidebar.serialize(&mut tree).unwrap();
    assert!(markup.as_str().contains(r#"<fieldset id="terms"><legend>Terms</legend>"#));
    assert!(markup.as_str().contains(r#"</ul><input type="submit" value="Go" /></form>"#));
    assert!(markup.as_str().ends_with(r#"<button type="button" onclick="Help.show('search'); ">Help</button></div>"#));
}
