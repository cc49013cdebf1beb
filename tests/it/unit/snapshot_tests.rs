//! Snapshot tests for the persisted scene format.

use crate::helpers::two_boxes;
use arrowboard::scene::SceneSnapshot;
use insta::assert_snapshot;

#[test]
fn test_box_format() {
    let scene = two_boxes().with_arrow("A", "B").build();
    let json = serde_json::to_string_pretty(&scene.boxes["A"]).unwrap();
    assert_snapshot!(json, @r##"
    {
      "id": "A",
      "x": 0.0,
      "y": 0.0,
      "width": 10.0,
      "height": 10.0,
      "z": 0,
      "label": "",
      "color": "#FFF",
      "kind": "rect",
      "arrow_ids": [
        "a_0_1"
      ]
    }
    "##);
}

#[test]
fn test_arrow_format() {
    let scene = two_boxes().with_arrow("A", "B").build();
    let json = serde_json::to_string_pretty(&scene.arrows["a_0_1"]).unwrap();
    assert_snapshot!(json, @r#"
    {
      "id": "a_0_1",
      "from": {
        "type": "box",
        "id": "A"
      },
      "to": {
        "type": "box",
        "id": "B"
      },
      "flip": false,
      "label": ""
    }
    "#);
}

#[test]
fn test_minimal_document_loads() {
    // Older documents may omit selections, kinds and arrow lists.
    let json = r##"{
        "boxes": {
            "A": {"id": "A", "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0,
                  "z": 7, "label": "hi", "color": "#000"}
        },
        "arrows": {}
    }"##;
    let snapshot = SceneSnapshot::from_json(json).unwrap();
    let a = &snapshot.boxes["A"];
    assert_eq!(a.z, 7);
    assert!(a.arrow_ids.is_empty());
    assert!(snapshot.selected_box_ids.is_empty());
}
