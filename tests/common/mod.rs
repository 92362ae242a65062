#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Shell script that answers the import probe with `probe_exit` and runs
/// `export_body` for the export call. Inside `export_body`, `$stem` is the
/// model stem and the working directory is the export work dir.
pub fn fake_python(dir: &Path, probe_exit: i32, export_body: &str) -> PathBuf {
    let path = dir.join("fake-python");
    let script = format!(
        "#!/bin/sh\n\
         # probe: -c <script>\n\
         if [ \"$#\" -le 2 ]; then\n\
           if [ {probe_exit} -ne 0 ]; then echo \"ModuleNotFoundError: No module named 'ultralytics'\" >&2; fi\n\
           exit {probe_exit}\n\
         fi\n\
         stem=$(basename \"$3\" .pt)\n\
         {export_body}\n"
    );
    fs::write(&path, script).unwrap();
    make_executable(&path);
    path
}

/// Export body that writes `bytes` bytes to the float32 output and prints its path
pub fn writes_float32(bytes: usize) -> String {
    format!(
        "mkdir -p \"${{stem}}_saved_model\"\n\
         head -c {bytes} /dev/zero > \"${{stem}}_saved_model/${{stem}}_float32.tflite\"\n\
         echo \"${{stem}}_saved_model/${{stem}}_float32.tflite\""
    )
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Serves a single HTTP response on an ephemeral port and returns its URL.
pub async fn serve_once(status_line: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line,
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{}/yolo11n.pt", addr)
}

/// URL on a port nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/yolo11n.pt", addr)
}
