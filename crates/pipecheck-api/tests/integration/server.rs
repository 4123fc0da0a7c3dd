//! End-to-end run over a real TCP socket.

use pipecheck_api::{ServerConfig, build_router, serve_on};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

async fn roundtrip(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_serve_on_answers_and_shuts_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = build_router(&ServerConfig::default()).unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve_on(listener, router, async move {
        let _ = rx.await;
    }));

    let body = r#"{"nodes":[{"id":"A"},{"id":"B"}],"edges":[{"source":"A","target":"B"},{"source":"B","target":"A"}]}"#;
    let request = format!(
        "POST /pipelines/parse HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let response = roundtrip(addr, &request).await;

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains(r#""is_dag":false"#), "{response}");
    assert!(response.contains(r#""status":"success""#), "{response}");

    let greeting = roundtrip(
        addr,
        &format!("GET / HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    )
    .await;
    assert!(greeting.contains("Hello from backend!"), "{greeting}");

    tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
