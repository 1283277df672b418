//! UPF daemon entry point: wires sockets, the TUN device, the thread
//! topology of §5 and the session store together. The library crate
//! (`rs_upf`) is pure logic; this binary is the only place that touches
//! real file descriptors and is therefore the only place `unsafe` appears
//! in this crate — signal registration and the TUN `ioctl`.

use clap::Parser;
use rs_upf::config::{self, BindAddress, Cli, Config};
use rs_upf::ie::node_id::NodeId;
use rs_upf::metrics::Metrics;
use rs_upf::pfcp::PfcpHandler;
use rs_upf::pipeline::{Egress, Pipeline, SourceSocket};
use rs_upf::queue::{PacketQueue, QueueEntry};
use rs_upf::session::store::SessionStore;
use std::net::{IpAddr, SocketAddr, SocketAddrV4, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" {
    fn signal(signum: i32, handler: usize) -> usize;
}

const SIGINT: i32 = 2;
const SIGTERM: i32 = 15;

extern "C" fn request_shutdown(_signum: i32) {
    SHUTDOWN.store(true, Ordering::SeqCst);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();
}

fn install_signal_handlers() {
    // SAFETY: request_shutdown is `extern "C"`, touches only an atomic, and
    // is valid for the process lifetime; registering it with the libc
    // signal() entry point is the standard minimal-dependency pattern.
    unsafe {
        signal(SIGINT, request_shutdown as usize);
        signal(SIGTERM, request_shutdown as usize);
    }
}

struct UdpEgress {
    n3: UdpSocket,
    n9: UdpSocket,
    n6: std::fs::File,
}

impl Egress for UdpEgress {
    fn send_gtpu(&self, dest: SocketAddrV4, data: &[u8]) {
        if let Err(err) = self.n3.send_to(data, SocketAddr::V4(dest)) {
            warn!(%err, %dest, "gtp-u send failed, falling back to n9 socket");
            if let Err(err) = self.n9.send_to(data, SocketAddr::V4(dest)) {
                warn!(%err, %dest, "gtp-u send failed on both egress sockets");
            }
        }
    }

    fn send_n6(&self, data: &[u8]) {
        use std::io::Write;
        if let Err(err) = (&self.n6).write_all(data) {
            warn!(%err, "n6 tun write failed");
        }
    }
}

fn bind_udp(addr: &BindAddress, port: u16) -> std::io::Result<UdpSocket> {
    let ip: IpAddr = addr
        .resolve()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let socket = UdpSocket::bind(SocketAddr::new(ip, port))?;
    socket.set_read_timeout(Some(Duration::from_millis(100)))?;
    Ok(socket)
}

mod tun {
    use std::fs::{File, OpenOptions};
    use std::io;
    use std::os::unix::io::AsRawFd;

    extern "C" {
        fn ioctl(fd: i32, request: u64, ...) -> i32;
    }

    const TUNSETIFF: u64 = 0x4004_54ca;
    const IFF_TUN: i16 = 0x0001;
    const IFF_NO_PI: i16 = 0x1000;

    #[repr(C)]
    struct IfReq {
        name: [u8; 16],
        flags: i16,
        _pad: [u8; 22],
    }

    /// Opens `/dev/net/tun` and attaches it to an already-existing TUN
    /// interface `name` (created by the environment's operational surface,
    /// §6 — this never creates the interface itself).
    pub fn open(name: &str) -> io::Result<File> {
        let file = OpenOptions::new().read(true).write(true).open("/dev/net/tun")?;
        let mut req = IfReq {
            name: [0u8; 16],
            flags: IFF_TUN | IFF_NO_PI,
            _pad: [0u8; 22],
        };
        let bytes = name.as_bytes();
        let len = bytes.len().min(15);
        req.name[..len].copy_from_slice(&bytes[..len]);

        // SAFETY: `req` is a valid, properly sized `ifreq` for TUNSETIFF and
        // `file`'s fd stays open for the call's duration.
        let result = unsafe { ioctl(file.as_raw_fd(), TUNSETIFF, &mut req as *mut IfReq) };
        if result < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(file)
    }
}

fn run_pfcp_reader(socket: UdpSocket, handler: Arc<PfcpHandler>) {
    let mut buf = [0u8; 2048];
    loop {
        if SHUTDOWN.load(Ordering::SeqCst) {
            return;
        }
        match socket.recv_from(&mut buf) {
            Ok((len, peer)) => {
                if let Some(response) = handler.handle(&buf[..len]) {
                    if let Err(err) = socket.send_to(&response, peer) {
                        warn!(%err, %peer, "pfcp response send failed");
                    }
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock || err.kind() == std::io::ErrorKind::TimedOut => {}
            Err(err) => warn!(%err, "pfcp socket recv failed"),
        }
    }
}

fn run_gtpu_reader(socket: UdpSocket, socket_id: usize, queue: Arc<PacketQueue>, metrics: Arc<Metrics>) {
    let mut buf = [0u8; 4096];
    loop {
        if SHUTDOWN.load(Ordering::SeqCst) {
            return;
        }
        match socket.recv_from(&mut buf) {
            Ok((len, peer)) => {
                let entry = QueueEntry {
                    data: buf[..len].to_vec(),
                    peer,
                    socket_id,
                };
                if !queue.enqueue(entry) {
                    metrics.incr_queue_overflow();
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock || err.kind() == std::io::ErrorKind::TimedOut => {}
            Err(err) => warn!(%err, socket_id, "gtp-u socket recv failed"),
        }
    }
}

fn run_worker(worker_id: usize, queue: Arc<PacketQueue>, pipeline: Arc<Pipeline>, egress: Arc<UdpEgress>, shutdown_grace: Duration) {
    let mut draining_since: Option<Instant> = None;
    loop {
        match queue.dequeue() {
            Some(entry) => {
                let source = if entry.socket_id == 0 { SourceSocket::N3 } else { SourceSocket::N9 };
                pipeline.process(worker_id, &entry, source, egress.as_ref());
            }
            None => {
                if SHUTDOWN.load(Ordering::SeqCst) {
                    let since = draining_since.get_or_insert_with(Instant::now);
                    if since.elapsed() >= shutdown_grace {
                        return;
                    }
                }
                thread::sleep(Duration::from_millis(1));
            }
        }
    }
}

fn bootstrap(config: &Config) -> std::io::Result<(UdpSocket, UdpSocket, UdpSocket, std::fs::File)> {
    let n4 = bind_udp(&config.n4_address, config.pfcp_port)?;
    let n3 = bind_udp(&config.n3_address, config.gtpu_port)?;
    let n9 = bind_udp(&config.n9_address, config.gtpu_port)?;
    let n6 = tun::open(&config.n6_device)?;
    Ok((n4, n3, n9, n6))
}

fn main() {
    init_tracing();
    install_signal_handlers();

    let cli = Cli::parse();
    let config = match config::load(cli) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let (n4_socket, n3_socket, n9_socket, tun_file) = match bootstrap(&config) {
        Ok(sockets) => sockets,
        Err(err) => {
            error!(%err, "failed to bind sockets or open n6 device");
            std::process::exit(1);
        }
    };

    info!(
        workers = config.workers,
        queue_capacity = config.queue_capacity,
        n6_device = %config.n6_device,
        "upf starting"
    );

    let store = Arc::new(SessionStore::new(config.session_capacity));
    let metrics = Arc::new(Metrics::new());
    let queue = Arc::new(PacketQueue::new(config.queue_capacity));
    let pipeline = Arc::new(Pipeline::new(store.clone(), metrics.clone()));
    let local_node_id = NodeId::new_ipv4(match config.n4_address.resolve() {
        Ok(IpAddr::V4(v4)) => v4,
        _ => std::net::Ipv4Addr::UNSPECIFIED,
    });
    let handler = Arc::new(PfcpHandler::new(store.clone(), metrics.clone(), local_node_id));

    let egress = Arc::new(UdpEgress {
        n3: n3_socket.try_clone().expect("clone n3 socket"),
        n9: n9_socket.try_clone().expect("clone n9 socket"),
        n6: tun_file,
    });

    let mut handles = Vec::new();

    handles.push(thread::spawn({
        let handler = handler.clone();
        move || run_pfcp_reader(n4_socket, handler)
    }));

    handles.push(thread::spawn({
        let queue = queue.clone();
        let metrics = metrics.clone();
        move || run_gtpu_reader(n3_socket, 0, queue, metrics)
    }));

    handles.push(thread::spawn({
        let queue = queue.clone();
        let metrics = metrics.clone();
        move || run_gtpu_reader(n9_socket, 1, queue, metrics)
    }));

    // No N6 reader thread: downlink classification (N6 -> N3/N9) would need
    // a UE-IP-to-session reverse index the session store doesn't keep (§3
    // only indexes by UP-SEID and (TEID, source-interface)). `nat::rewrite_destination`
    // is implemented and unit-tested for when that index exists; see
    // DESIGN.md's NAT engine entry for the disclosed scope cut.

    let shutdown_grace = Duration::from_millis(config.shutdown_grace_ms);
    for worker_id in 0..config.workers {
        handles.push(thread::spawn({
            let queue = queue.clone();
            let pipeline = pipeline.clone();
            let egress = egress.clone();
            move || run_worker(worker_id, queue, pipeline, egress, shutdown_grace)
        }));
    }

    for handle in handles {
        let _ = handle.join();
    }

    info!(snapshot = ?metrics.snapshot(), "upf stopped");
}
