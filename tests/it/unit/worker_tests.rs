//! Tests against the threaded index worker and the request client.

use crate::helpers::{default_hit_params, test_config, two_boxes};
use arrowboard::Editor;
use arrowboard::types::{Axis, Hit, Point, Rect};
use arrowboard::worker::{
    Envelope, IndexClient, IndexRequest, IndexResponse, IndexTransport, RequestId, RequestKind,
    WorkerTransport,
};
use std::time::{Duration, Instant};

const SETTLE: Duration = Duration::from_secs(2);

#[test]
fn test_threaded_hit_test() {
    let mut editor = Editor::new(two_boxes().build(), test_config()).unwrap();
    editor.pointer_move(Point::new(5.0, 5.0));
    editor.tick_now();
    editor.settle(SETTLE);
    assert_eq!(editor.scene().hit, Hit::Box("A".into()));
    assert_eq!(editor.pending_requests(), 0);
}

#[test]
fn test_threaded_stretch() {
    let scene = two_boxes().with_selection(&["A", "B"]).build();
    let mut editor = Editor::new(scene, test_config()).unwrap();
    let depth = editor.history().undo_depth();

    editor.send(arrowboard::Event::Stretched(Axis::X));
    editor.settle(SETTLE);

    for id in ["A", "B"] {
        let b = &editor.scene().boxes[id];
        assert_eq!(b.rect(), Rect::new(0.0, 0.0, 110.0, 10.0));
    }
    assert_eq!(editor.history().undo_depth(), depth + 1);
}

#[test]
fn test_client_matches_replies_to_requests() {
    let transport = WorkerTransport::spawn(default_hit_params()).unwrap();
    let mut client = IndexClient::new(Box::new(transport), SETTLE);

    client.request(IndexRequest::UpdateTree {
        boxes: two_boxes().build().box_list(),
    });
    client.request(IndexRequest::UpdateHitTree {
        boxes: two_boxes().build().box_list(),
        arrows: vec![],
        arrow_cache: vec![],
        zoom: 1.0,
    });
    // Hit index rebuilds are fire-and-forget.
    assert_eq!(client.pending_count(), 1);

    client.request(IndexRequest::HitTest {
        point: Point::new(105.0, 5.0),
        bounds: None,
        zoom: 1.0,
    });
    assert!(client.has_pending(RequestKind::HitTest));

    let responses = client.wait(SETTLE);
    assert_eq!(
        responses,
        vec![
            IndexResponse::TreeUpdated { len: 2 },
            IndexResponse::Hit(Hit::Box("B".into())),
        ]
    );
    assert_eq!(client.pending_count(), 0);
}

#[test]
fn test_expired_requests_drop_late_replies() {
    let transport = WorkerTransport::spawn(default_hit_params()).unwrap();
    let mut client = IndexClient::new(Box::new(transport), Duration::ZERO);

    client.request(IndexRequest::HitTest {
        point: Point::new(0.0, 0.0),
        bounds: None,
        zoom: 1.0,
    });
    let expired = client.expire(Instant::now() + Duration::from_millis(10));
    assert_eq!(expired, vec![RequestKind::HitTest]);

    // The reply still arrives, but nothing is waiting for it.
    std::thread::sleep(Duration::from_millis(50));
    assert!(client.poll().is_empty());
}

#[test]
fn test_worker_records_request_timings() {
    let mut transport = WorkerTransport::spawn(default_hit_params()).unwrap();
    transport
        .send(Envelope {
            id: RequestId(1),
            request: IndexRequest::UpdateTree {
                boxes: two_boxes().build().box_list(),
            },
        })
        .unwrap();
    let reply = transport.recv_timeout(SETTLE).expect("tree update reply");
    assert_eq!(reply.id, RequestId(1));

    let stats = transport.stats();
    assert_eq!(stats.total_count(), 1);
    assert_eq!(stats.log_summary(), 0);
    // Dropping joins the thread and logs the same summary.
    drop(transport);
}
