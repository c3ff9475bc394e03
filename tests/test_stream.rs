mod common;

use alertdesk::domain::ports::alert_feed::StreamEvent;
use alertdesk::domain::values::connection::ConnectionState;
use alertdesk::infrastructure::http::stream::StreamConnection;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;

const SSE_HEADER: &str =
    "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nConnection: close\r\n\r\n";

async fn next_event(rx: &mut UnboundedReceiver<StreamEvent>) -> StreamEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for stream event")
        .expect("event channel closed")
}

/// One-shot SSE server: accepts a single connection, writes `body` after
/// the response header, then holds the socket open until dropped.
async fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/alerts/stream", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all(SSE_HEADER.as_bytes()).await.unwrap();
        socket.write_all(body.as_bytes()).await.unwrap();
        // Keep the connection open so the driver does not redial mid-test
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });
    url
}

#[tokio::test]
async fn test_stream_delivers_alert_events() {
    let url = serve_once(
        "event: alert\n\
         data: {\"stockCode\":\"TCS\",\"buySell\":\"BUY\",\"price\":\"3421.50\",\
         \"scanName\":\"Intraday breakout\",\"alertDate\":\"2026-08-24T10:15:00Z\"}\n\n",
    )
    .await;

    let (mut conn, mut rx) = StreamConnection::open(url);
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Opened));

    match next_event(&mut rx).await {
        StreamEvent::Alert(record) => {
            assert_eq!(record.symbol, "TCS");
            assert_eq!(record.price, 3421.50);
        }
        other => panic!("expected an alert, got {other:?}"),
    }
    assert_eq!(conn.state(), ConnectionState::Open);
    assert_eq!(conn.attempts(), 0);
    conn.close();
}

#[tokio::test]
async fn test_malformed_payload_dropped_connection_stays_up() {
    let url = serve_once(
        "event: alert\n\
         data: {\"stockCode\":\"\",\"price\":0,\"alertDate\":\"junk\"}\n\n\
         event: alert\n\
         data: {\"stockCode\":\"INFY\",\"buySell\":\"SELL\",\"price\":1500,\
         \"alertDate\":\"2026-08-24T11:00:00Z\"}\n\n",
    )
    .await;

    let (mut conn, mut rx) = StreamConnection::open(url);
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Opened));

    // The bad payload produces no event; the next good alert still arrives
    match next_event(&mut rx).await {
        StreamEvent::Alert(record) => assert_eq!(record.symbol, "INFY"),
        other => panic!("expected an alert, got {other:?}"),
    }
    conn.close();
}

#[tokio::test]
async fn test_non_alert_events_ignored() {
    let url = serve_once(
        ": heartbeat\n\n\
         event: ping\ndata: {}\n\n\
         event: alert\n\
         data: {\"stockCode\":\"SBIN\",\"buySell\":\"BUY\",\"price\":800,\
         \"alertDate\":\"2026-08-24T12:00:00Z\"}\n\n",
    )
    .await;

    let (mut conn, mut rx) = StreamConnection::open(url);
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Opened));
    match next_event(&mut rx).await {
        StreamEvent::Alert(record) => assert_eq!(record.symbol, "SBIN"),
        other => panic!("expected an alert, got {other:?}"),
    }
    conn.close();
}

#[tokio::test]
async fn test_server_drop_emits_error_then_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/alerts/stream", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all(SSE_HEADER.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    let (mut conn, mut rx) = StreamConnection::open(url);
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Opened));
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Error(_)));
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Closed));
    assert_eq!(conn.attempts(), 1);

    // Cancel the pending redial before it fires
    conn.close();
}

#[tokio::test]
async fn test_close_is_idempotent_and_suppresses_events() {
    let url = serve_once(
        "event: alert\n\
         data: {\"stockCode\":\"TCS\",\"price\":100,\"alertDate\":\"2026-08-24T10:15:00Z\"}\n\n",
    )
    .await;

    let (mut conn, mut rx) = StreamConnection::open(url);
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Opened));

    conn.close();
    conn.close();
    tokio::time::sleep(Duration::from_millis(200)).await;
    conn.close();
    assert_eq!(conn.state(), ConnectionState::Closed);

    // Drain: no Error/Closed/GaveUp events after an intentional close
    while let Ok(Some(event)) = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await {
        assert!(
            matches!(event, StreamEvent::Alert(_)),
            "unexpected event after close: {event:?}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_gives_up_after_exhausting_redials() {
    // Grab a port the OS just freed so every dial is refused; the paused
    // clock fast-forwards through the backoff sleeps
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (conn, mut rx) = StreamConnection::open(format!("http://{addr}/api/alerts/stream"));

    // Await the channel directly: a virtual-time timeout here would be
    // auto-advanced past while the real TCP dial is still in flight
    let mut errors = 0;
    loop {
        match rx.recv().await.expect("event channel closed") {
            StreamEvent::Error(_) => errors += 1,
            StreamEvent::Closed => {}
            StreamEvent::GaveUp => break,
            other => panic!("unexpected event before give-up: {other:?}"),
        }
    }
    assert_eq!(errors, 10);
    assert_eq!(conn.attempts(), 10);
    assert_eq!(conn.state(), ConnectionState::Closed);

    // Terminal: no redial is scheduled and no further events arrive
    tokio::time::advance(Duration::from_secs(60)).await;
    assert!(rx.try_recv().is_err(), "events after give-up");
}

#[tokio::test]
async fn test_reconnect_resets_attempts_and_redials() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/alerts/stream", listener.local_addr().unwrap());
    tokio::spawn(async move {
        // First connection dies immediately, second one stays up
        let (mut first, _) = listener.accept().await.unwrap();
        first.write_all(SSE_HEADER.as_bytes()).await.unwrap();
        first.shutdown().await.unwrap();

        let (mut second, _) = listener.accept().await.unwrap();
        second.write_all(SSE_HEADER.as_bytes()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(second);
    });

    let (mut conn, mut rx) = StreamConnection::open(url);
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Opened));
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Error(_)));
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Closed));
    assert_eq!(conn.attempts(), 1);

    conn.reconnect();
    assert!(matches!(next_event(&mut rx).await, StreamEvent::Opened));
    assert_eq!(conn.attempts(), 0);
    conn.close();
}
