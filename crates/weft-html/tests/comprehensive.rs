//! Comprehensive tests for weft-html
//!
//! Whole pages assembled from the factory, tables and scripts.

use pretty_assertions::assert_eq;
use weft_dom::{ElementTree, Params, Widget, content};
use weft_html::{Html, Javascript, JsArg, Table, XmlDocument};

#[test]
fn test_page_with_table_and_script() {
    let mut tree = ElementTree::new();

    let mut table = Table::new().headers(["Title", "Actions"]);
    table.add_row(["First post", "edit"]);
    let grid = table.render(&mut tree).unwrap();

    let open = Javascript::namespace("App").call("open", [JsArg::from("post"), JsArg::from(1)]);
    let mut html = Html::new(&mut tree);
    let button = html
        .input(Params::new().attr("type", "button").attr("onclick", open).attr("value", "Open"))
        .unwrap();
    let page = html
        .div_with(Params::new().id("page"), |h| {
            let title = h.h1("Posts")?;
            Ok(content![title, grid, button])
        })
        .unwrap();

    assert_eq!(
        tree.serialize(page).unwrap().as_str(),
        concat!(
            r#"<div id="page"><h1>Posts</h1>"#,
            r#"<table cellpadding="0" cellspacing="0">"#,
            "<tr><th>Title</th><th>Actions</th></tr>",
            "<tr><td>First post</td><td>edit</td></tr>",
            "</table>",
            r#"<input type="button" onclick="App.open('post',1); " value="Open" />"#,
            "</div>"
        )
    );
}

#[test]
fn test_table_widget_rebuilds_on_new_rows() {
    let mut tree = ElementTree::new();
    let mut widget = Widget::new(Table::new().attr("id", "grid"));
    let id = widget.node(&mut tree).unwrap();
    assert_eq!(
        tree.serialize(id).unwrap().as_str(),
        r#"<table cellpadding="0" cellspacing="0" id="grid" />"#
    );

    widget.component_mut().add_row(["a"]);
    widget.touch();
    assert_eq!(
        widget.serialize(&mut tree).unwrap().as_str(),
        r#"<table cellpadding="0" cellspacing="0" id="grid"><tr><td>a</td></tr></table>"#
    );
    assert_eq!(widget.build_count(), 1);
    assert_eq!(widget.node(&mut tree).unwrap(), id);
}

#[test]
fn test_xml_feed_document() {
    let mut tree = ElementTree::new();
    let doc = XmlDocument::build(&mut tree, |x| {
        let mut feed = x.ns("og");
        let images: Vec<_> = ["a.jpg", "b.jpg"]
            .into_iter()
            .map(|src| feed.element("image", src))
            .collect::<Result<_, _>>()?;
        let list = feed.element("images", Params::new().content(images))?;
        feed.element("page", list)
    })
    .unwrap();

    assert_eq!(
        doc.render(&mut tree).unwrap(),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n",
            "<og:page><og:images><og:image>a.jpg</og:image><og:image>b.jpg</og:image></og:images></og:page>"
        )
    );
}

#[test]
fn test_classed_helper_on_factory_output() {
    let mut tree = ElementTree::new();
    let mut html = Html::new(&mut tree);
    let note = html.p(Params::new()).unwrap();
    tree.classed(note, "highlighted", "text").unwrap();
    assert_eq!(tree.serialize(note).unwrap().as_str(), r#"<p class="highlighted">text</p>"#);
}
