//! Test application for launcher end-to-end testing.
//!
//! Simulates the startup behavior of a real application: an optional
//! startup delay, a readiness banner on stdout or stderr, an optional
//! HTTP listener answering with a fixed status, and a bounded (or
//! unbounded) run time with a chosen exit code.

use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "testexe")]
#[command(about = "Test application for launcher testing", long_about = None)]
struct Args {
    /// Line to print once startup completes
    #[arg(long)]
    banner: Option<String>,

    /// Print the banner to stderr instead of stdout
    #[arg(long)]
    banner_to_stderr: bool,

    /// Milliseconds to wait before startup completes
    #[arg(long, default_value = "0")]
    startup_delay_ms: u64,

    /// Milliseconds to keep running after startup (0 = run until killed)
    #[arg(long, default_value = "0")]
    run_ms: u64,

    /// Exit code to return on shutdown
    #[arg(long, default_value = "0")]
    exit_code: i32,

    /// Port to serve HTTP responses on once startup completes
    #[arg(long)]
    http_port: Option<u16>,

    /// Status code served by the HTTP listener
    #[arg(long, default_value = "200")]
    http_status: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    debug!("testexe starting with args: {:?}", args);

    if args.startup_delay_ms > 0 {
        sleep(Duration::from_millis(args.startup_delay_ms)).await;
    }

    if let Some(banner) = &args.banner {
        if args.banner_to_stderr {
            eprintln!("{banner}");
            let _ = std::io::stderr().flush();
        } else {
            println!("{banner}");
            let _ = std::io::stdout().flush();
        }
    }

    let server = args
        .http_port
        .map(|port| tokio::spawn(run_status_server(port, args.http_status)));

    info!("testexe is up");

    if args.run_ms > 0 {
        sleep(Duration::from_millis(args.run_ms)).await;
    } else {
        std::future::pending::<()>().await;
    }

    if let Some(task) = server {
        task.abort();
    }

    info!("testexe exiting with code {}", args.exit_code);
    std::process::exit(args.exit_code);
}

async fn run_status_server(port: u16, status_code: u16) {
    use http_body_util::Full;
    use hyper::body::{Bytes, Incoming};
    use hyper::server::conn::http1;
    use hyper::service::service_fn;
    use hyper::{Request, Response, StatusCode};
    use hyper_util::rt::TokioIo;
    use tokio::net::TcpListener;

    let addr = format!("127.0.0.1:{port}");
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            info!("status server listening on http://{addr}");
            listener
        }
        Err(e) => {
            error!("failed to bind status server to {addr}: {e}");
            return;
        }
    };

    let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::OK);

    loop {
        let (stream, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("failed to accept connection: {e}");
                continue;
            }
        };

        let io = TokioIo::new(stream);
        tokio::spawn(async move {
            let service = service_fn(move |_req: Request<Incoming>| async move {
                Ok::<_, hyper::Error>(
                    Response::builder()
                        .status(status)
                        .body(Full::new(Bytes::from("ok\n")))
                        .unwrap(),
                )
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!("error serving connection: {e}");
            }
        });
    }
}
