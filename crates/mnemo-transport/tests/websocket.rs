//! Integration tests for the WebSocket transport: real server, real
//! client, real bytes on the wire.

#[cfg(feature = "websocket")]
mod websocket {
    use futures_util::{SinkExt, StreamExt};
    use mnemo_transport::{Connection, Transport, WebSocketTransport};
    use tokio_tungstenite::tungstenite::Message;
    use tokio_tungstenite::tungstenite::client::IntoClientRequest;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    async fn bind() -> (WebSocketTransport, String) {
        let transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().expect("local addr").to_string();
        (transport, addr)
    }

    async fn connect_client(addr: &str) -> ClientWs {
        let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .expect("client should connect");
        ws
    }

    #[tokio::test]
    async fn test_accept_and_send_receive() {
        let (mut transport, addr) = bind().await;

        let server_handle =
            tokio::spawn(async move { transport.accept().await.expect("accept") });
        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.expect("task");

        assert!(server_conn.id().into_inner() > 0);

        // Server → client.
        server_conn.send(b"hello from server").await.expect("send");
        let msg = client_ws.next().await.unwrap().unwrap();
        assert_eq!(msg.into_data().as_ref(), b"hello from server");

        // Client → server.
        client_ws
            .send(Message::Binary(b"hello from client".to_vec().into()))
            .await
            .unwrap();
        let received = server_conn.recv().await.expect("recv").expect("data");
        assert_eq!(received, b"hello from client");

        server_conn.close().await.expect("close");
    }

    #[tokio::test]
    async fn test_recv_returns_none_on_client_close() {
        let (mut transport, addr) = bind().await;

        let server_handle =
            tokio::spawn(async move { transport.accept().await.expect("accept") });
        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        client_ws.send(Message::Close(None)).await.unwrap();

        let result = server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }

    #[tokio::test]
    async fn test_send_while_recv_is_blocked() {
        // The whole point of the split sink/stream: a broadcast must go
        // out while the read loop is parked waiting for client input.
        let (mut transport, addr) = bind().await;

        let server_handle =
            tokio::spawn(async move { transport.accept().await.expect("accept") });
        let mut client_ws = connect_client(&addr).await;
        let server_conn = std::sync::Arc::new(server_handle.await.unwrap());

        let reader = std::sync::Arc::clone(&server_conn);
        let read_task = tokio::spawn(async move { reader.recv().await });

        // Give the reader time to park on the stream half.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        server_conn.send(b"pushed").await.expect("send while reading");
        let msg = client_ws.next().await.unwrap().unwrap();
        assert_eq!(msg.into_data().as_ref(), b"pushed");

        client_ws.send(Message::Close(None)).await.unwrap();
        let read = read_task.await.unwrap().expect("recv");
        assert!(read.is_none());
    }

    #[tokio::test]
    async fn test_origin_header_is_captured() {
        let (mut transport, addr) = bind().await;

        let server_handle =
            tokio::spawn(async move { transport.accept().await.expect("accept") });

        let mut request = format!("ws://{addr}")
            .into_client_request()
            .expect("request");
        request
            .headers_mut()
            .insert("origin", "http://game.example".parse().unwrap());
        let (_client_ws, _) = tokio_tungstenite::connect_async(request)
            .await
            .expect("client should connect");

        let server_conn = server_handle.await.unwrap();
        assert_eq!(server_conn.origin(), Some("http://game.example"));
    }

    #[tokio::test]
    async fn test_origin_is_none_without_header() {
        let (mut transport, addr) = bind().await;

        let server_handle =
            tokio::spawn(async move { transport.accept().await.expect("accept") });
        let _client_ws = connect_client(&addr).await;

        let server_conn = server_handle.await.unwrap();
        assert_eq!(server_conn.origin(), None);
    }
}
